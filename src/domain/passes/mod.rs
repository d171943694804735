//! Transformation passes.
//!
//! Each pass mutates the module in place and leaves it well formed. The
//! order they must run in is encoded in their signatures: context
//! extraction hands out a [`ContextExtraction`] that the reference rewrite
//! consumes, which in turn hands out the [`ContextRewrite`] the signature
//! pass requires. [`crate::domain::pipeline::Pipeline`] composes them.

pub mod assertions;
pub mod context_extraction;
pub mod context_rewrite;
pub mod import_removal;
pub mod lifecycle;
pub mod test_signature;

pub use context_extraction::ContextExtraction;
pub use context_rewrite::ContextRewrite;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::config::PrintStyle;
    use crate::domain::language::SourceKind;
    use crate::infrastructure::{SwcParser, SwcPrinter};
    use crate::ports::{ParsedSource, SourceParser, SourcePrinter};
    use swc_core::common::DUMMY_SP;
    use swc_core::ecma::ast::*;

    pub fn parse(src: &str) -> ParsedSource {
        SwcParser
            .parse("test.ts", src, SourceKind::TypeScript)
            .expect("test source should parse")
    }

    pub fn parse_expr(src: &str) -> Expr {
        let parsed = parse(src);
        match parsed.module.body.into_iter().next() {
            Some(ModuleItem::Stmt(Stmt::Expr(stmt))) => *stmt.expr,
            other => panic!("expected an expression statement, got {:?}", other),
        }
    }

    pub fn print(parsed: ParsedSource) -> String {
        SwcPrinter
            .print(parsed, PrintStyle::default())
            .expect("printing should succeed")
    }

    pub fn print_expr(expr: &Expr) -> String {
        let mut parsed = parse("");
        parsed.module.body = vec![ModuleItem::Stmt(Stmt::Expr(ExprStmt {
            span: DUMMY_SP,
            expr: Box::new(expr.clone()),
        }))];
        print(parsed).trim().to_string()
    }

    /// Drop all whitespace so assertions do not depend on generator layout.
    pub fn squash(code: &str) -> String {
        code.chars().filter(|c| !c.is_whitespace()).collect()
    }
}
