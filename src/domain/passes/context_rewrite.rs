//! Rewrites `t.context` to the shared context variable.

use crate::domain::config::Conventions;
use crate::domain::diagnostics::{Diagnostics, PassId};
use crate::domain::passes::ContextExtraction;
use crate::domain::query::{is_ident, member_of};
use swc_core::common::{Spanned, SyntaxContext, DUMMY_SP};
use swc_core::ecma::ast::*;
use swc_core::ecma::visit::{VisitMut, VisitMutWith};

/// Proof that context references were rewritten while the callback
/// parameters they name still existed.
#[derive(Debug)]
pub struct ContextRewrite {
    rewrites: usize,
}

impl ContextRewrite {
    pub fn rewrites(&self) -> usize {
        self.rewrites
    }
}

struct ContextRefRewriter<'a> {
    assertion: &'a str,
    target: &'a str,
    rewrites: usize,
}

impl ContextRefRewriter<'_> {
    fn replacement(&mut self, span: swc_core::common::Span) -> Ident {
        self.rewrites += 1;
        Ident::new(self.target.into(), span, SyntaxContext::empty())
    }
}

impl VisitMut for ContextRefRewriter<'_> {
    fn visit_mut_expr(&mut self, e: &mut Expr) {
        if member_of(e, self.assertion) == Some("context") {
            *e = Expr::Ident(self.replacement(e.span()));
            return;
        }
        e.visit_mut_children_with(self);
    }

    fn visit_mut_simple_assign_target(&mut self, target: &mut SimpleAssignTarget) {
        if let SimpleAssignTarget::Member(m) = target {
            let is_context = is_ident(&m.obj, self.assertion)
                && matches!(&m.prop, MemberProp::Ident(p) if &*p.sym == "context");
            if is_context {
                let id = self.replacement(m.span);
                *target = SimpleAssignTarget::Ident(BindingIdent { id, type_ann: None });
                return;
            }
        }
        target.visit_mut_children_with(self);
    }
}

pub fn run(
    module: &mut Module,
    conv: &Conventions,
    extraction: ContextExtraction,
    diags: &mut Diagnostics,
) -> ContextRewrite {
    let mut rewriter = ContextRefRewriter {
        assertion: &conv.assertion_ident,
        target: &conv.context_var_name,
        rewrites: 0,
    };
    module.visit_mut_with(&mut rewriter);
    let rewrites = rewriter.rewrites;

    if rewrites > 0 && !extraction.synthesized() {
        diags.warn(
            PassId::ContextRewrite,
            DUMMY_SP,
            format!(
                "Rewrote {} `{}.context` reference(s) to `{}`, but no `{}` declaration was synthesized; declare it manually",
                rewrites, conv.assertion_ident, conv.context_var_name, conv.context_var_name
            ),
        );
    }

    ContextRewrite { rewrites }
}
