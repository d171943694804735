//! Lifecycle hook and modifier calls: `test.before(…)`, `test.only(…)`, ….

use crate::domain::config::Conventions;
use crate::domain::query::{callee, dotted, is_str_lit, member_chain, remove_first_param_named};
use crate::domain::rules::{lookup_lifecycle, LifecycleRule};
use swc_core::ecma::ast::*;
use swc_core::ecma::visit::{VisitMut, VisitMutWith};

struct LifecycleRewriter<'a> {
    test: &'a str,
    assertion: &'a str,
    rewritten: usize,
}

impl LifecycleRewriter<'_> {
    fn rule_for(&self, call: &CallExpr) -> Option<LifecycleRule> {
        let (root, path) = member_chain(callee(call)?)?;
        if root != self.test || path.is_empty() {
            return None;
        }
        lookup_lifecycle(&path.join("."))
    }
}

impl VisitMut for LifecycleRewriter<'_> {
    fn visit_mut_call_expr(&mut self, call: &mut CallExpr) {
        call.visit_mut_children_with(self);

        let Some(rule) = self.rule_for(call) else { return };

        call.callee = Callee::Expr(dotted(rule.callee));
        let has_title = call
            .args
            .first()
            .is_some_and(|a| a.spread.is_none() && is_str_lit(&a.expr));
        if rule.drops_title && has_title {
            call.args.remove(0);
        }
        for a in call.args.iter_mut().filter(|a| a.spread.is_none()) {
            remove_first_param_named(&mut a.expr, self.assertion);
        }
        self.rewritten += 1;
    }
}

pub fn run(module: &mut Module, conv: &Conventions) -> usize {
    let mut rewriter = LifecycleRewriter {
        test: &conv.test_ident,
        assertion: &conv.assertion_ident,
        rewritten: 0,
    };
    module.visit_mut_with(&mut rewriter);
    tracing::debug!(rewritten = rewriter.rewritten, "rewrote lifecycle calls");
    rewriter.rewritten
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::passes::test_support::{parse, print, squash};

    fn convert(src: &str) -> (String, usize) {
        let mut parsed = parse(src);
        let rewritten = run(&mut parsed.module, &Conventions::default());
        (squash(&print(parsed)), rewritten)
    }

    #[test]
    fn test_hook_drops_title_and_assertion_param() {
        let (out, n) = convert("test.before('setup', t => { init() })\n");
        assert_eq!(n, 1);
        assert_eq!(out, "beforeAll(()=>{init()})");
    }

    #[test]
    fn test_hook_without_title() {
        let (out, _) = convert("test.afterEach(async function (t) { await close() })\n");
        assert_eq!(out, "afterEach(asyncfunction(){awaitclose()})");
    }

    #[test]
    fn test_always_variants() {
        assert_eq!(convert("test.after.always(() => {})\n").0, "afterAll(()=>{})");
        assert_eq!(convert("test.afterEach.always(t => {})\n").0, "afterEach(()=>{})");
    }

    #[test]
    fn test_modifiers_keep_title() {
        assert_eq!(convert("test.only('one', t => {})\n").0, "test.only('one',()=>{})");
        assert_eq!(convert("test.todo('later')\n").0, "test.todo('later')");
        assert_eq!(convert("test.serial('s', t => {})\n").0, "test('s',()=>{})");
        assert_eq!(convert("test.serial.skip('s', t => {})\n").0, "test.skip('s',()=>{})");
    }

    #[test]
    fn test_other_parameter_names_kept() {
        let (out, _) = convert("test.beforeEach(ctx => {})\n");
        assert!(out == "beforeEach((ctx)=>{})" || out == "beforeEach(ctx=>{})", "out: {}", out);
    }

    #[test]
    fn test_unknown_paths_untouched() {
        let (out, n) = convert("test.macro(t => {})\ntest('plain', t => {})\nother.before('x')\n");
        assert_eq!(n, 0);
        assert!(out.contains("test.macro("), "out: {}", out);
        assert!(out.contains("other.before('x')"), "out: {}", out);
    }
}
