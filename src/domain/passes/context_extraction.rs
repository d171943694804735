//! Shared-context extraction.
//!
//! Turns
//!
//! ```ts
//! const test = anyTest as TestInterface<{ db: Db; user: string }>
//! ```
//!
//! into
//!
//! ```ts
//! type Context = { db: Db; user: string }
//! let sharedContext: Context = { db: null, user: null }
//! ```
//!
//! Any shape other than a single inline type literal argument leaves the
//! declaration untouched.

use crate::domain::config::Conventions;
use crate::domain::diagnostics::{Diagnostics, PassId};
use crate::domain::query::{ident, null_lit, type_ref, unparen};
use swc_core::common::{Span, SyntaxContext, DUMMY_SP};
use swc_core::ecma::ast::*;

/// Proof that context extraction ran, and whether it produced the shared
/// variable. Only this pass can create one.
#[derive(Debug)]
pub struct ContextExtraction {
    synthesized: bool,
}

impl ContextExtraction {
    pub fn synthesized(&self) -> bool {
        self.synthesized
    }
}

enum Abort {
    NoTestVariable,
    NotTypeAsserted(Span),
    TypeArgumentCount(Span, usize),
    NotTypeLiteral(Span),
}

impl Abort {
    fn report(&self, conv: &Conventions, diags: &mut Diagnostics) {
        let test = &conv.test_ident;
        match self {
            Abort::NoTestVariable => diags.info(
                PassId::ContextExtraction,
                DUMMY_SP,
                format!("No `{}` variable declaration; shared context not extracted", test),
            ),
            Abort::NotTypeAsserted(span) => diags.warn(
                PassId::ContextExtraction,
                *span,
                format!("`{}` is not initialized with a type assertion; shared context not extracted", test),
            ),
            Abort::TypeArgumentCount(span, n) => diags.warn(
                PassId::ContextExtraction,
                *span,
                format!(
                    "Type of `{}` has {} type arguments, expected exactly one; shared context not extracted",
                    test, n
                ),
            ),
            Abort::NotTypeLiteral(span) => diags.warn(
                PassId::ContextExtraction,
                *span,
                format!(
                    "Context type of `{}` is not an inline type literal; shared context not extracted",
                    test
                ),
            ),
        }
    }
}

/// Top-level `var`/`let`/`const`, exported or not.
fn var_decl(item: &ModuleItem) -> Option<&VarDecl> {
    match item {
        ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) => Some(&**var),
        ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(ExportDecl {
            decl: Decl::Var(var),
            ..
        })) => Some(&**var),
        _ => None,
    }
}

fn var_decl_mut(item: &mut ModuleItem) -> Option<&mut VarDecl> {
    match item {
        ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) => Some(&mut **var),
        ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(ExportDecl {
            decl: Decl::Var(var),
            ..
        })) => Some(&mut **var),
        _ => None,
    }
}

/// Position of the test declarator: module item index, declarator index.
fn find_test_declarator(module: &Module, name: &str) -> Option<(usize, usize)> {
    module.body.iter().enumerate().find_map(|(i, item)| {
        var_decl(item)?
            .decls
            .iter()
            .position(|d| matches!(&d.name, Pat::Ident(b) if &*b.id.sym == name))
            .map(|j| (i, j))
    })
}

/// The inline type literal in `x as T<{…}>` / `<T<{…}>>x`.
fn context_type_literal(init: Option<&Expr>, decl_span: Span) -> Result<&TsTypeLit, Abort> {
    let asserted = match init.map(unparen) {
        Some(Expr::TsAs(e)) => &*e.type_ann,
        Some(Expr::TsTypeAssertion(e)) => &*e.type_ann,
        _ => return Err(Abort::NotTypeAsserted(decl_span)),
    };

    let params = match asserted {
        TsType::TsTypeRef(r) => r.type_params.as_ref().map(|p| p.params.as_slice()),
        _ => None,
    };
    let param = match params {
        Some([only]) => only,
        Some(many) => return Err(Abort::TypeArgumentCount(decl_span, many.len())),
        None => return Err(Abort::TypeArgumentCount(decl_span, 0)),
    };

    match &**param {
        TsType::TsTypeLit(lit) => Ok(lit),
        _ => Err(Abort::NotTypeLiteral(decl_span)),
    }
}

/// Field names of `name: type` property signatures, in declaration order.
fn field_names(lit: &TsTypeLit) -> Vec<String> {
    lit.members
        .iter()
        .filter_map(|m| match m {
            TsTypeElement::TsPropertySignature(sig) if !sig.computed && sig.type_ann.is_some() => {
                match &*sig.key {
                    Expr::Ident(id) => Some(id.sym.to_string()),
                    _ => None,
                }
            }
            _ => None,
        })
        .collect()
}

fn type_alias(name: &str, lit: TsTypeLit) -> ModuleItem {
    ModuleItem::Stmt(Stmt::Decl(Decl::TsTypeAlias(Box::new(TsTypeAliasDecl {
        span: DUMMY_SP,
        declare: false,
        id: ident(name),
        type_params: None,
        type_ann: Box::new(TsType::TsTypeLit(lit)),
    }))))
}

fn shared_context_var(var_name: &str, type_name: &str, fields: &[String]) -> ModuleItem {
    let props = fields
        .iter()
        .map(|f| {
            PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
                key: PropName::Ident(IdentName::new(f.as_str().into(), DUMMY_SP)),
                value: null_lit(),
            })))
        })
        .collect();

    ModuleItem::Stmt(Stmt::Decl(Decl::Var(Box::new(VarDecl {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        kind: VarDeclKind::Let,
        declare: false,
        decls: vec![VarDeclarator {
            span: DUMMY_SP,
            name: Pat::Ident(BindingIdent {
                id: ident(var_name),
                type_ann: Some(Box::new(TsTypeAnn {
                    span: DUMMY_SP,
                    type_ann: type_ref(type_name),
                })),
            }),
            init: Some(Box::new(Expr::Object(ObjectLit {
                span: DUMMY_SP,
                props,
            }))),
            definite: false,
        }],
    }))))
}

pub fn run(module: &mut Module, conv: &Conventions, diags: &mut Diagnostics) -> ContextExtraction {
    match extract(module, conv) {
        Ok(fields) => {
            tracing::debug!(fields = fields.len(), "extracted shared context");
            ContextExtraction { synthesized: true }
        }
        Err(abort) => {
            abort.report(conv, diags);
            ContextExtraction { synthesized: false }
        }
    }
}

fn extract(module: &mut Module, conv: &Conventions) -> Result<Vec<String>, Abort> {
    let (item_idx, decl_idx) =
        find_test_declarator(module, &conv.test_ident).ok_or(Abort::NoTestVariable)?;

    // All preconditions are checked before anything is mutated.
    let (lit, fields) = {
        let var = var_decl(&module.body[item_idx]).ok_or(Abort::NoTestVariable)?;
        let decl = &var.decls[decl_idx];
        let lit = context_type_literal(decl.init.as_deref(), decl.span)?;
        (lit.clone(), field_names(lit))
    };

    // An emptied `export const` goes away together with its export.
    let now_empty = match var_decl_mut(&mut module.body[item_idx]) {
        Some(var) => {
            var.decls.remove(decl_idx);
            var.decls.is_empty()
        }
        None => false,
    };

    let alias = type_alias(&conv.context_type_name, lit);
    let shared = shared_context_var(&conv.context_var_name, &conv.context_type_name, &fields);
    if now_empty {
        module.body[item_idx] = shared;
        module.body.insert(item_idx, alias);
    } else {
        module.body.insert(item_idx, alias);
        module.body.insert(item_idx + 2, shared);
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::passes::test_support::{parse, print, squash};

    fn convert(src: &str) -> (String, ContextExtraction, Diagnostics) {
        let mut parsed = parse(src);
        let mut diags = Diagnostics::new();
        let outcome = run(&mut parsed.module, &Conventions::default(), &mut diags);
        (print(parsed), outcome, diags)
    }

    #[test]
    fn test_extracts_type_alias_and_shared_variable() {
        let (out, outcome, diags) = convert(
            "const test = anyTest as TestInterface<{a: number, b: string}>\ntest('x', t => {})\n",
        );
        assert!(outcome.synthesized());
        assert!(diags.is_empty());

        let flat = squash(&out);
        assert!(flat.contains("typeContext="), "out: {}", out);
        assert!(flat.contains("a:number"), "out: {}", out);
        assert!(flat.contains("b:string"), "out: {}", out);
        assert!(flat.contains("letsharedContext:Context={a:null,b:null}"), "out: {}", out);
        assert!(!flat.contains("anyTest"), "out: {}", out);

        // alias, then variable, then the rest of the file
        let alias_at = flat.find("typeContext").unwrap();
        let var_at = flat.find("letsharedContext").unwrap();
        let test_at = flat.find("test('x'").unwrap();
        assert!(alias_at < var_at && var_at < test_at);
    }

    #[test]
    fn test_angle_bracket_assertion_and_skipped_members() {
        let (out, outcome, _) = convert(
            "const test = <TestInterface<{ok: boolean; [k: string]: unknown; run(): void}>>anyTest\n",
        );
        assert!(outcome.synthesized());
        assert!(squash(&out).contains("letsharedContext:Context={ok:null}"), "out: {}", out);
    }

    #[test]
    fn test_keeps_sibling_declarators() {
        let (out, outcome, _) =
            convert("const other = 1, test = anyTest as TestInterface<{a: number}>\n");
        assert!(outcome.synthesized());
        let flat = squash(&out);
        let alias_at = flat.find("typeContext").unwrap();
        let other_at = flat.find("constother=1").unwrap();
        let var_at = flat.find("letsharedContext").unwrap();
        assert!(alias_at < other_at && other_at < var_at, "out: {}", out);
    }

    #[test]
    fn test_exported_test_variable_is_extracted() {
        let (out, outcome, diags) = convert(
            "export const test = anyTest as TestInterface<{a: number}>\ntest('x', t => {})\n",
        );
        assert!(outcome.synthesized());
        assert!(diags.is_empty());

        let flat = squash(&out);
        assert!(flat.contains("letsharedContext:Context={a:null}"), "out: {}", out);
        assert!(!flat.contains("anyTest"), "out: {}", out);
        assert!(!flat.contains("export"), "out: {}", out);
    }

    #[test]
    fn test_missing_variable_is_soft_abort() {
        let src = "import test from 'ava'\ntest('x', t => {})\n";
        let (out, outcome, diags) = convert(src);
        assert!(!outcome.synthesized());
        assert_eq!(diags.len(), 1);
        assert!(!out.contains("sharedContext"));
    }

    #[test]
    fn test_no_type_arguments_leaves_declaration_untouched() {
        let src = "const test = anyTest as TestInterface\n";
        let (out, outcome, diags) = convert(src);
        assert!(!outcome.synthesized());
        assert_eq!(diags.len(), 1);
        assert_eq!(squash(&out), "consttest=anyTestasTestInterface");
    }

    #[test]
    fn test_non_literal_type_argument_leaves_declaration_untouched() {
        let (out, outcome, diags) = convert("const test = anyTest as TestInterface<MyContext>\n");
        assert!(!outcome.synthesized());
        assert_eq!(diags.len(), 1);
        assert_eq!(squash(&out), "consttest=anyTestasTestInterface<MyContext>");
    }

    #[test]
    fn test_untyped_initializer_leaves_declaration_untouched() {
        let (out, outcome, diags) = convert("const test = require('ava')\n");
        assert!(!outcome.synthesized());
        assert_eq!(diags.len(), 1);
        assert_eq!(squash(&out), "consttest=require('ava')");
    }
}
