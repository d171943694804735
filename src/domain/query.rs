//! Tree query glue.
//!
//! Small predicates and builders over the swc AST shared by the passes.
//! Matching is purely syntactic: identifiers are compared by name, not by
//! binding.

use swc_core::common::{Span, SyntaxContext, DUMMY_SP};
use swc_core::ecma::ast::*;

// ============================================================================
// Matching
// ============================================================================

/// Strip any number of wrapping parentheses.
pub fn unparen(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(p) => unparen(&p.expr),
        other => other,
    }
}

pub fn unparen_mut(expr: &mut Expr) -> &mut Expr {
    match expr {
        Expr::Paren(p) => unparen_mut(&mut p.expr),
        other => other,
    }
}

pub fn is_ident(expr: &Expr, name: &str) -> bool {
    matches!(expr, Expr::Ident(i) if &*i.sym == name)
}

/// For `obj.prop` with an identifier object named `obj`, returns `prop`.
pub fn member_of<'a>(expr: &'a Expr, obj: &str) -> Option<&'a str> {
    match expr {
        Expr::Member(MemberExpr {
            obj: base,
            prop: MemberProp::Ident(prop),
            ..
        }) if is_ident(base, obj) => Some(&*prop.sym),
        _ => None,
    }
}

/// The callee of a call when it is a plain expression (not `super`/`import`).
pub fn callee(call: &CallExpr) -> Option<&Expr> {
    match &call.callee {
        Callee::Expr(e) => Some(e),
        _ => None,
    }
}

/// Walk a chain like `a.b.c` down to its root identifier.
///
/// Returns the root name and the property names in source order
/// (`("a", ["b", "c"])`). Computed or private members break the chain.
pub fn member_chain(expr: &Expr) -> Option<(&str, Vec<&str>)> {
    let mut props = Vec::new();
    let mut cur = expr;
    loop {
        match cur {
            Expr::Member(MemberExpr {
                obj,
                prop: MemberProp::Ident(prop),
                ..
            }) => {
                props.push(&*prop.sym);
                cur = &**obj;
            }
            Expr::Ident(root) => {
                props.reverse();
                return Some((&*root.sym, props));
            }
            _ => return None,
        }
    }
}

pub fn is_function(expr: &Expr) -> bool {
    matches!(unparen(expr), Expr::Arrow(_) | Expr::Fn(_))
}

pub fn is_str_lit(expr: &Expr) -> bool {
    matches!(expr, Expr::Lit(Lit::Str(_)))
}

fn pat_name(pat: &Pat) -> Option<&str> {
    match pat {
        Pat::Ident(b) => Some(&*b.id.sym),
        _ => None,
    }
}

/// Name of the first parameter of a function value, when it is a plain
/// identifier.
pub fn first_param_name(expr: &Expr) -> Option<&str> {
    match unparen(expr) {
        Expr::Arrow(a) => a.params.first().and_then(pat_name),
        Expr::Fn(f) => f.function.params.first().and_then(|p| pat_name(&p.pat)),
        _ => None,
    }
}

/// Drop every parameter of a function value. Returns whether any existed.
pub fn clear_params(expr: &mut Expr) -> bool {
    match unparen_mut(expr) {
        Expr::Arrow(a) => {
            let had = !a.params.is_empty();
            a.params.clear();
            had
        }
        Expr::Fn(f) => {
            let had = !f.function.params.is_empty();
            f.function.params.clear();
            had
        }
        _ => false,
    }
}

/// Remove the first parameter of a function value if it is named `name`.
pub fn remove_first_param_named(expr: &mut Expr, name: &str) -> bool {
    if first_param_name(expr) != Some(name) {
        return false;
    }
    match unparen_mut(expr) {
        Expr::Arrow(a) => {
            a.params.remove(0);
            true
        }
        Expr::Fn(f) => {
            f.function.params.remove(0);
            true
        }
        _ => false,
    }
}

// ============================================================================
// Building
// ============================================================================

pub fn ident(name: &str) -> Ident {
    Ident::new(name.into(), DUMMY_SP, SyntaxContext::empty())
}

pub fn ident_expr(name: &str) -> Box<Expr> {
    Box::new(Expr::Ident(ident(name)))
}

/// Append a dotted property path to `base`: `member_path(x, "not.toBe")`
/// yields `x.not.toBe`.
pub fn member_path(base: Box<Expr>, path: &str) -> Box<Expr> {
    path.split('.')
        .filter(|seg| !seg.is_empty())
        .fold(base, |obj, seg| {
            Box::new(Expr::Member(MemberExpr {
                span: DUMMY_SP,
                obj,
                prop: MemberProp::Ident(IdentName::new(seg.into(), DUMMY_SP)),
            }))
        })
}

/// Build an expression from a dotted path: `"test.only"` → `test.only`.
pub fn dotted(path: &str) -> Box<Expr> {
    match path.split_once('.') {
        Some((root, rest)) => member_path(ident_expr(root), rest),
        None => ident_expr(path),
    }
}

pub fn arg(expr: Box<Expr>) -> ExprOrSpread {
    ExprOrSpread { spread: None, expr }
}

pub fn call(span: Span, callee: Box<Expr>, args: Vec<ExprOrSpread>) -> Expr {
    Expr::Call(CallExpr {
        span,
        ctxt: SyntaxContext::empty(),
        callee: Callee::Expr(callee),
        args,
        type_args: None,
    })
}

pub fn null_lit() -> Box<Expr> {
    Box::new(Expr::Lit(Lit::Null(Null { span: DUMMY_SP })))
}

/// `() => {}`
pub fn empty_arrow() -> Box<Expr> {
    Box::new(Expr::Arrow(ArrowExpr {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        params: vec![],
        body: Box::new(BlockStmtOrExpr::BlockStmt(BlockStmt {
            span: DUMMY_SP,
            ctxt: SyntaxContext::empty(),
            stmts: vec![],
        })),
        is_async: false,
        is_generator: false,
        type_params: None,
        return_type: None,
    }))
}

pub fn type_ref(name: &str) -> Box<TsType> {
    Box::new(TsType::TsTypeRef(TsTypeRef {
        span: DUMMY_SP,
        type_name: TsEntityName::Ident(ident(name)),
        type_params: None,
    }))
}
