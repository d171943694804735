//! Removes the bindings of the origin framework's package.

use crate::domain::config::Conventions;
use crate::domain::query::{is_ident, unparen};
use swc_core::ecma::ast::*;

/// `require('<pkg>')`
fn is_require_of(init: Option<&Expr>, pkg: &str) -> bool {
    match init.map(unparen) {
        Some(Expr::Call(call)) => {
            let callee_is_require = matches!(&call.callee, Callee::Expr(c) if is_ident(c, "require"));
            let arg_is_pkg = matches!(
                call.args.as_slice(),
                [ExprOrSpread { spread: None, expr }] if matches!(&**expr, Expr::Lit(Lit::Str(s)) if &*s.value == pkg)
            );
            callee_is_require && arg_is_pkg
        }
        _ => false,
    }
}

/// Delete `import … from '<pkg>'`, `import x = require('<pkg>')` and
/// top-level `const x = require('<pkg>')` bindings. Returns how many
/// bindings were removed.
pub fn run(module: &mut Module, conv: &Conventions) -> usize {
    let pkg = conv.origin_package.as_str();
    let mut removed = 0;

    module.body.retain_mut(|item| match item {
        ModuleItem::ModuleDecl(ModuleDecl::Import(import)) if &*import.src.value == pkg => {
            removed += 1;
            false
        }
        ModuleItem::ModuleDecl(ModuleDecl::TsImportEquals(decl)) => match &decl.module_ref {
            TsModuleRef::TsExternalModuleRef(r) if &*r.expr.value == pkg => {
                removed += 1;
                false
            }
            _ => true,
        },
        ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) => {
            let before = var.decls.len();
            var.decls.retain(|d| !is_require_of(d.init.as_deref(), pkg));
            removed += before - var.decls.len();
            !var.decls.is_empty()
        }
        _ => true,
    });

    tracing::debug!(removed, package = pkg, "removed origin framework imports");
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::passes::test_support::{parse, print, squash};

    fn convert(src: &str) -> (String, usize) {
        let mut parsed = parse(src);
        let removed = run(&mut parsed.module, &Conventions::default());
        (print(parsed), removed)
    }

    #[test]
    fn test_removes_default_and_named_import() {
        let (out, removed) = convert(
            "import anyTest, {TestInterface} from 'ava'\nimport {join} from 'path'\nfoo()\n",
        );
        assert_eq!(removed, 1);
        assert!(!out.contains("ava"), "out: {}", out);
        assert!(out.contains("from 'path'"), "out: {}", out);
    }

    #[test]
    fn test_removes_require_binding_only() {
        let (out, removed) = convert("const test = require('ava'), path = require('path')\n");
        assert_eq!(removed, 1);
        assert_eq!(squash(&out), "constpath=require('path')");
    }

    #[test]
    fn test_removes_import_equals() {
        let (out, removed) = convert("import test = require('ava')\ntest('x', () => {})\n");
        assert_eq!(removed, 1);
        assert!(!out.contains("require"), "out: {}", out);
    }

    #[test]
    fn test_no_origin_import_is_noop_and_idempotent() {
        let src = "import {expect} from '@jest/globals'\nconst a = require('avalanche')\n";
        let (once, removed) = convert(src);
        assert_eq!(removed, 0);
        let (twice, removed_again) = convert(&once);
        assert_eq!(removed_again, 0);
        assert_eq!(once, twice);
    }
}
