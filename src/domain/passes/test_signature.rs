//! Clears the parameter list of test callbacks.

use crate::domain::config::Conventions;
use crate::domain::passes::ContextRewrite;
use crate::domain::query::{callee, clear_params, is_function, is_ident};
use swc_core::ecma::ast::*;
use swc_core::ecma::visit::{VisitMut, VisitMutWith};

struct SignatureClearer<'a> {
    test: &'a str,
    cleared: usize,
}

impl VisitMut for SignatureClearer<'_> {
    fn visit_mut_call_expr(&mut self, call: &mut CallExpr) {
        call.visit_mut_children_with(self);

        if !callee(call).is_some_and(|c| is_ident(c, self.test)) || call.args.len() < 2 {
            return;
        }
        let body = &mut call.args[1];
        if body.spread.is_none() && is_function(&body.expr) && clear_params(&mut body.expr) {
            self.cleared += 1;
        }
    }
}

/// `test(title, fn)` callbacks lose their parameters. Requires the context
/// references to be rewritten already, since they are matched by the very
/// parameter name removed here.
pub fn run(module: &mut Module, conv: &Conventions, _rewritten: &ContextRewrite) -> usize {
    let mut clearer = SignatureClearer {
        test: &conv.test_ident,
        cleared: 0,
    };
    module.visit_mut_with(&mut clearer);
    tracing::debug!(cleared = clearer.cleared, "cleared test callback parameters");
    clearer.cleared
}
