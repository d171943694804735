//! Assertion rewrite: `t.<name>(…)` to `expect(…)` matchers.

use crate::domain::config::Conventions;
use crate::domain::diagnostics::{Diagnostics, PassId};
use crate::domain::query::{arg, call, callee, empty_arrow, ident_expr, member_of, member_path};
use crate::domain::rules::{lookup_assertion, AssertionLookup, AssertionRule};
use swc_core::common::DUMMY_SP;
use swc_core::ecma::ast::*;
use swc_core::ecma::visit::{VisitMut, VisitMutWith};

const EXPECT: &str = "expect";

/// `expect(subject).<path>(args)`
fn matcher(subject: Option<ExprOrSpread>, path: &str, args: Vec<ExprOrSpread>) -> Expr {
    let expectation = call(DUMMY_SP, ident_expr(EXPECT), subject.into_iter().collect());
    call(DUMMY_SP, member_path(Box::new(expectation), path), args)
}

/// Replacement calls carry no source span, so comments attached to the end
/// of the original call are printed with the enclosing statement.
fn build(rule: AssertionRule, args: Vec<ExprOrSpread>) -> Expr {
    let mut args = args.into_iter();
    let first = args.next();
    let second = args.next();

    match rule {
        AssertionRule::Rename(path) => matcher(first, path, second.into_iter().collect()),
        AssertionRule::Boolean { truthy } => {
            let path = if truthy { "toBeTruthy" } else { "toBeFalsy" };
            matcher(first, path, vec![])
        }
        AssertionRule::Throw { negated } => {
            let path = if negated { "not.toThrow" } else { "toThrow" };
            matcher(Some(arg(empty_arrow())), path, second.into_iter().collect())
        }
        AssertionRule::Plan => call(
            DUMMY_SP,
            member_path(ident_expr(EXPECT), "assertions"),
            first.into_iter().collect(),
        ),
    }
}

struct AssertionRewriter<'a> {
    assertion: &'a str,
    diags: &'a mut Diagnostics,
    converted: usize,
}

impl AssertionRewriter<'_> {
    fn lookup(&self, e: &Expr) -> Option<(String, AssertionLookup)> {
        let Expr::Call(c) = e else { return None };
        let name = callee(c).and_then(|c| member_of(c, self.assertion))?;
        Some((name.to_string(), lookup_assertion(name)))
    }
}

impl VisitMut for AssertionRewriter<'_> {
    fn visit_mut_expr(&mut self, e: &mut Expr) {
        // inner calls first
        e.visit_mut_children_with(self);

        let Some((name, found)) = self.lookup(e) else { return };
        let Expr::Call(c) = e else { return };

        match found {
            AssertionLookup::Excluded => {}
            AssertionLookup::Unmapped => self.diags.warn(
                PassId::Assertions,
                c.span,
                format!("Unknown assertion `{}.{}`; left unconverted", self.assertion, name),
            ),
            AssertionLookup::Rule(rule) => {
                if let AssertionRule::Throw { .. } = rule {
                    self.diags.warn(
                        PassId::Assertions,
                        c.span,
                        format!(
                            "`{}.{}` converted with a placeholder `() => {{}}`; move the throwing call into it",
                            self.assertion, name
                        ),
                    );
                }
                let args = std::mem::take(&mut c.args);
                *e = build(rule, args);
                self.converted += 1;
            }
        }
    }
}

/// Rewrite every assertion call. Returns how many were converted.
pub fn run(module: &mut Module, conv: &Conventions, diags: &mut Diagnostics) -> usize {
    let mut rewriter = AssertionRewriter {
        assertion: &conv.assertion_ident,
        diags,
        converted: 0,
    };
    module.visit_mut_with(&mut rewriter);
    tracing::debug!(converted = rewriter.converted, "rewrote assertions");
    rewriter.converted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::passes::test_support::{parse, print, squash};
    use crate::domain::rules::RENAMED_ASSERTIONS;

    fn convert(src: &str) -> (String, usize, Diagnostics) {
        let mut parsed = parse(src);
        let mut diags = Diagnostics::new();
        let converted = run(&mut parsed.module, &Conventions::default(), &mut diags);
        (squash(&print(parsed)), converted, diags)
    }

    #[test]
    fn test_every_rename_keeps_argument_order() {
        for (origin, dest) in RENAMED_ASSERTIONS {
            let (out, converted, diags) = convert(&format!("t.{}(p, q)\n", origin));
            assert_eq!(converted, 1, "{}", origin);
            assert!(diags.is_empty(), "{}", origin);
            assert_eq!(out, format!("expect(p).{}(q)", dest), "{}", origin);
        }
    }

    #[test]
    fn test_rename_without_expected_value() {
        let (out, _, _) = convert("t.snapshot(tree)\n");
        assert_eq!(out, "expect(tree).toMatchSnapshot()");
    }

    #[test]
    fn test_boolean_assertions_take_no_argument() {
        assert_eq!(convert("t.true(p)\n").0, "expect(p).toBeTruthy()");
        assert_eq!(convert("t.false(p, 'message')\n").0, "expect(p).toBeFalsy()");
    }

    #[test]
    fn test_plan() {
        assert_eq!(convert("t.plan(3)\n").0, "expect.assertions(3)");
    }

    #[test]
    fn test_throws_uses_placeholder_and_warns() {
        let (out, converted, diags) = convert("t.throws(() => boom(), TypeError)\nt.notThrows(() => ok())\n");
        assert_eq!(converted, 2);
        assert!(out.contains("expect(()=>{}).toThrow(TypeError)"), "out: {}", out);
        assert!(out.contains("expect(()=>{}).not.toThrow()"), "out: {}", out);
        assert_eq!(diags.len(), 2);
    }

    #[test]
    fn test_unknown_assertion_stays_with_one_diagnostic() {
        let (out, converted, diags) = convert("t.banana(p)\n");
        assert_eq!(converted, 0);
        assert_eq!(out, "t.banana(p)");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags.from_pass(PassId::Assertions).count(), 1);
    }

    #[test]
    fn test_excluded_assertions_untouched() {
        let (out, converted, diags) = convert("t.pass()\nt.log('x')\n");
        assert_eq!(converted, 0);
        assert!(diags.is_empty());
        assert_eq!(out, "t.pass()t.log('x')");
    }

    #[test]
    fn test_nested_and_awaited_calls() {
        let (out, converted, _) = convert("async () => { t.is(await t.throwsAsync(p), t.truthy(x)) }\n");
        assert_eq!(converted, 3);
        assert!(
            out.contains("expect(awaitexpect(p).rejects.toThrow()).toBe(expect(x).toBeTruthy())"),
            "out: {}",
            out
        );
    }

    #[test]
    fn test_trailing_comment_stays_after_the_matcher() {
        let mut parsed = parse("t.is(a, 1) // check a\nt.true(ok) /* flag */\n");
        run(&mut parsed.module, &Conventions::default(), &mut Diagnostics::new());
        let out = print(parsed);

        let lines: Vec<&str> = out.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        assert_eq!(lines, vec!["expect(a).toBe(1) // check a", "expect(ok).toBeTruthy() /* flag */"], "out: {}", out);
    }

    #[test]
    fn test_other_objects_untouched() {
        let (out, converted, diags) = convert("assert.is(a, b)\nt['is'](a, b)\n");
        assert_eq!(converted, 0);
        assert!(diags.is_empty());
        assert_eq!(out, "assert.is(a,b)t['is'](a,b)");
    }
}
