//! Output style applied around the code generator.
//!
//! The generator always prints double-quoted strings (unless a raw form is
//! present) and terminates statements with `;`. Quote style is fixed up on
//! the tree before printing; semicolons are removed from the printed text
//! using statement spans from a re-parse of that text.

use crate::domain::language::SourceKind;
use crate::infrastructure::SwcParser;
use swc_core::common::sync::Lrc;
use swc_core::common::{FileName, SourceMap, Span, SyntaxContext};
use swc_core::ecma::ast::*;
use swc_core::ecma::parser::{lexer::Lexer, Parser, StringInput};
use swc_core::ecma::visit::{Visit, VisitMut, VisitMutWith, VisitWith};

// ============================================================================
// Quotes
// ============================================================================

/// Rewrites the raw form of every string literal to single quotes.
pub struct SingleQuoter;

impl VisitMut for SingleQuoter {
    fn visit_mut_str(&mut self, s: &mut Str) {
        s.raw = Some(single_quoted(&s.value).into());
    }

    // JSX attribute strings have no escape sequences; leave them alone.
    fn visit_mut_jsx_attr_value(&mut self, v: &mut JSXAttrValue) {
        if let JSXAttrValue::Lit(_) = v {
            return;
        }
        v.visit_mut_children_with(self);
    }
}

pub fn single_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

// ============================================================================
// Empty statement bodies
// ============================================================================

/// `if (x);` becomes `if (x) {}` so that dropping semicolons can never pull
/// the following statement into the body.
pub struct EmptyBodyFiller;

fn fill(body: &mut Box<Stmt>) {
    if let Stmt::Empty(e) = &**body {
        let span = e.span;
        **body = Stmt::Block(BlockStmt {
            span,
            ctxt: SyntaxContext::empty(),
            stmts: vec![],
        });
    }
}

impl VisitMut for EmptyBodyFiller {
    fn visit_mut_if_stmt(&mut self, n: &mut IfStmt) {
        n.visit_mut_children_with(self);
        fill(&mut n.cons);
        if let Some(alt) = &mut n.alt {
            fill(alt);
        }
    }

    fn visit_mut_for_stmt(&mut self, n: &mut ForStmt) {
        n.visit_mut_children_with(self);
        fill(&mut n.body);
    }

    fn visit_mut_for_in_stmt(&mut self, n: &mut ForInStmt) {
        n.visit_mut_children_with(self);
        fill(&mut n.body);
    }

    fn visit_mut_for_of_stmt(&mut self, n: &mut ForOfStmt) {
        n.visit_mut_children_with(self);
        fill(&mut n.body);
    }

    fn visit_mut_while_stmt(&mut self, n: &mut WhileStmt) {
        n.visit_mut_children_with(self);
        fill(&mut n.body);
    }

    fn visit_mut_labeled_stmt(&mut self, n: &mut LabeledStmt) {
        n.visit_mut_children_with(self);
        fill(&mut n.body);
    }
}

// ============================================================================
// Semicolons
// ============================================================================

/// Collects the spans of statements that end in a semicolon.
#[derive(Default)]
struct StatementEnds {
    spans: Vec<Span>,
}

impl Visit for StatementEnds {
    fn visit_stmt(&mut self, n: &Stmt) {
        match n {
            Stmt::Expr(_)
            | Stmt::Return(_)
            | Stmt::Throw(_)
            | Stmt::Break(_)
            | Stmt::Continue(_)
            | Stmt::Debugger(_)
            | Stmt::DoWhile(_)
            | Stmt::Decl(Decl::Var(_))
            | Stmt::Decl(Decl::TsTypeAlias(_)) => self.spans.push(span_of_stmt(n)),
            _ => {}
        }
        n.visit_children_with(self);
    }

    fn visit_module_decl(&mut self, n: &ModuleDecl) {
        match n {
            ModuleDecl::Import(d) => self.spans.push(d.span),
            ModuleDecl::ExportAll(d) => self.spans.push(d.span),
            ModuleDecl::ExportNamed(d) => self.spans.push(d.span),
            ModuleDecl::ExportDefaultExpr(d) => self.spans.push(d.span),
            ModuleDecl::ExportDecl(d) if matches!(d.decl, Decl::Var(_) | Decl::TsTypeAlias(_)) => {
                self.spans.push(d.span)
            }
            _ => {}
        }
        n.visit_children_with(self);
    }

    fn visit_class_prop(&mut self, n: &ClassProp) {
        self.spans.push(n.span);
        n.visit_children_with(self);
    }
}

fn span_of_stmt(n: &Stmt) -> Span {
    use swc_core::common::Spanned;
    n.span()
}

/// Characters that would continue the previous statement if it lost its
/// semicolon.
fn continues_statement(c: u8) -> bool {
    matches!(c, b'(' | b'[' | b'`' | b'+' | b'-' | b'/' | b'*' | b'%' | b'<')
}

/// Offset of the terminating `;` of a statement ending at byte `hi`.
fn semicolon_at(bytes: &[u8], hi: usize) -> Option<usize> {
    if hi > 0 && bytes.get(hi - 1) == Some(&b';') {
        return Some(hi - 1);
    }
    if bytes.get(hi) == Some(&b';') {
        return Some(hi);
    }
    None
}

/// Whether removing the `;` at `pos` keeps the program meaning. Comments
/// between the `;` and the next token are skipped; a block comment spanning
/// lines counts as a line break.
fn removable(bytes: &[u8], pos: usize) -> bool {
    let mut saw_newline = false;
    let mut i = pos + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => saw_newline = true,
            b' ' | b'\t' | b'\r' => {}
            b'}' => return true,
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                match bytes[i..].iter().position(|&b| b == b'\n') {
                    Some(n) => {
                        i += n;
                        continue;
                    }
                    None => return true,
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let body = &bytes[i + 2..];
                match body.windows(2).position(|w| w == b"*/") {
                    Some(n) => {
                        saw_newline |= body[..n].contains(&b'\n');
                        i += 2 + n + 2;
                        continue;
                    }
                    None => return false,
                }
            }
            other => return saw_newline && !continues_statement(other),
        }
        i += 1;
    }
    true
}

/// Remove statement-terminating semicolons from generated code.
///
/// The code is re-parsed to find statement ends, so semicolons inside
/// strings, templates, JSX text and `for` headers are never touched. If the
/// generated code does not re-parse, it is returned unchanged.
pub fn strip_semicolons(code: &str, kind: SourceKind) -> String {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(FileName::Anon.into(), code.to_string());
    let base = fm.start_pos.0 as usize;

    let module = {
        let lexer = Lexer::new(
            SwcParser::syntax(kind),
            EsVersion::latest(),
            StringInput::from(&*fm),
            None,
        );
        let mut parser = Parser::new_from(lexer);
        let result = parser.parse_module();
        let recovered = parser.take_errors();
        match result {
            Ok(m) if recovered.is_empty() => m,
            _ => {
                tracing::debug!("generated code did not re-parse; keeping semicolons");
                return code.to_string();
            }
        }
    };

    let mut ends = StatementEnds::default();
    module.visit_with(&mut ends);

    let bytes = code.as_bytes();
    let mut drop: Vec<usize> = ends
        .spans
        .iter()
        .filter(|s| !s.is_dummy() && s.hi.0 as usize >= base)
        .filter_map(|s| semicolon_at(bytes, s.hi.0 as usize - base))
        .filter(|&pos| removable(bytes, pos))
        .collect();
    drop.sort_unstable();
    drop.dedup();

    let mut out = String::with_capacity(code.len());
    let mut last = 0;
    for pos in drop {
        out.push_str(&code[last..pos]);
        last = pos + 1;
    }
    out.push_str(&code[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_quoted_escapes() {
        assert_eq!(single_quoted("ava"), "'ava'");
        assert_eq!(single_quoted("it's"), "'it\\'s'");
        assert_eq!(single_quoted("a\\b"), "'a\\\\b'");
        assert_eq!(single_quoted("say \"hi\""), "'say \"hi\"'");
        assert_eq!(single_quoted("line\nbreak"), "'line\\nbreak'");
    }

    #[test]
    fn test_strip_simple_statements() {
        let out = strip_semicolons("const a = 1;\nfoo(a);\n", SourceKind::TypeScript);
        assert_eq!(out, "const a = 1\nfoo(a)\n");
    }

    #[test]
    fn test_keeps_for_header_and_strings() {
        let code = "for(let i = 0; i < 3; i++){\n    log(\"a;\");\n}\n";
        let out = strip_semicolons(code, SourceKind::JavaScript);
        assert_eq!(out, "for(let i = 0; i < 3; i++){\n    log(\"a;\")\n}\n");
    }

    #[test]
    fn test_keeps_semicolon_before_hazard() {
        let code = "foo();\n[1, 2].forEach(bar);\n";
        let out = strip_semicolons(code, SourceKind::JavaScript);
        assert_eq!(out, "foo();\n[1, 2].forEach(bar)\n");
    }

    #[test]
    fn test_same_line_statements_keep_separator() {
        let out = strip_semicolons("a(); b();\n", SourceKind::JavaScript);
        assert_eq!(out, "a(); b()\n");
    }

    #[test]
    fn test_comments_after_semicolon_are_skipped() {
        let code = "const a = 1;\n// note\nfoo(a); // trailing\nbar(); /* c */\n}\n";
        let out = strip_semicolons(&format!("function f() {{\n{}", code), SourceKind::JavaScript);
        assert_eq!(
            out,
            "function f() {\nconst a = 1\n// note\nfoo(a) // trailing\nbar() /* c */\n}\n"
        );
    }

    #[test]
    fn test_comment_does_not_hide_hazard() {
        let code = "foo(); // first\n/* block */ [1].map(bar);\n";
        let out = strip_semicolons(code, SourceKind::JavaScript);
        assert_eq!(out, "foo(); // first\n/* block */ [1].map(bar)\n");
    }

    #[test]
    fn test_multiline_block_comment_is_a_line_break() {
        let out = strip_semicolons("a(); /* one\ntwo */ b();\n", SourceKind::JavaScript);
        assert_eq!(out, "a() /* one\ntwo */ b()\n");
    }

    #[test]
    fn test_unparseable_code_unchanged() {
        let code = "const = ;\n";
        assert_eq!(strip_semicolons(code, SourceKind::JavaScript), code);
    }

    #[test]
    fn test_jsx_text_semicolons_untouched() {
        let code = "const el = <p>\n    a;\n    b\n</p>;\n";
        let out = strip_semicolons(code, SourceKind::Jsx);
        assert_eq!(out, "const el = <p>\n    a;\n    b\n</p>\n");
    }
}
