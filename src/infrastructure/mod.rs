// Infrastructure implementations for ava2jest.

pub mod concurrency;
pub mod source_loader;
pub mod style;

use crate::domain::config::PrintStyle;
use crate::domain::language::SourceKind;
use crate::error::{ConvertError, ConvertResult};
use crate::ports::{ParsedSource, SourceParser, SourcePrinter};
use swc_core::common::comments::SingleThreadedComments;
use swc_core::common::sync::Lrc;
use swc_core::common::{FileName, SourceMap, Spanned};
use swc_core::ecma::ast::EsVersion;
use swc_core::ecma::codegen::text_writer::JsWriter;
use swc_core::ecma::codegen::{Config as CodegenConfig, Emitter};
use swc_core::ecma::parser::{lexer::Lexer, EsSyntax, Parser, StringInput, Syntax, TsSyntax};
use swc_core::ecma::visit::VisitMutWith;

pub struct SwcParser;

impl SwcParser {
    pub fn syntax(kind: SourceKind) -> Syntax {
        match kind {
            SourceKind::JavaScript | SourceKind::Jsx => Syntax::Es(EsSyntax {
                jsx: kind.has_jsx(),
                decorators: true,
                ..Default::default()
            }),
            SourceKind::TypeScript | SourceKind::Tsx => Syntax::Typescript(TsSyntax {
                tsx: kind.has_jsx(),
                decorators: true,
                ..Default::default()
            }),
        }
    }
}

impl SourceParser for SwcParser {
    fn parse(&self, file_name: &str, src: &str, kind: SourceKind) -> ConvertResult<ParsedSource> {
        let source_map: Lrc<SourceMap> = Default::default();
        let fm = source_map.new_source_file(
            FileName::Custom(file_name.to_string()).into(),
            src.to_string(),
        );
        let comments = SingleThreadedComments::default();

        let (result, recovered) = {
            let lexer = Lexer::new(
                Self::syntax(kind),
                EsVersion::latest(),
                StringInput::from(&*fm),
                Some(&comments),
            );
            let mut parser = Parser::new_from(lexer);
            let result = parser.parse_module();
            (result, parser.take_errors())
        };

        // Recovered errors still mean the text is not valid source.
        let first_error = match result {
            Err(e) => Some(e),
            Ok(_) if !recovered.is_empty() => recovered.into_iter().next(),
            Ok(module) => {
                return Ok(ParsedSource {
                    module,
                    source_map,
                    comments,
                    kind,
                })
            }
        };

        let message = match first_error {
            Some(e) => {
                let line = source_map.lookup_char_pos(e.span().lo).line;
                format!("{} (line {})", e.kind().msg(), line)
            }
            None => "unknown parse error".to_string(),
        };
        Err(ConvertError::Parse {
            file: file_name.to_string(),
            message,
        })
    }
}

pub struct SwcPrinter;

impl SourcePrinter for SwcPrinter {
    fn print(&self, mut parsed: ParsedSource, style: PrintStyle) -> ConvertResult<String> {
        parsed.module.visit_mut_with(&mut style::EmptyBodyFiller);
        if style.single_quote {
            parsed.module.visit_mut_with(&mut style::SingleQuoter);
        }

        let mut buf = Vec::new();
        {
            let wr = JsWriter::new(parsed.source_map.clone(), "\n", &mut buf, None);
            let mut emitter = Emitter {
                cfg: CodegenConfig::default().with_target(EsVersion::latest()),
                cm: parsed.source_map.clone(),
                comments: Some(&parsed.comments),
                wr,
            };
            emitter
                .emit_module(&parsed.module)
                .map_err(|e| ConvertError::Print(e.to_string()))?;
        }
        let code = String::from_utf8(buf).map_err(|e| ConvertError::Print(e.to_string()))?;

        if style.semicolons {
            Ok(code)
        } else {
            Ok(style::strip_semicolons(&code, parsed.kind))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reports_line() {
        let err = SwcParser
            .parse("broken.ts", "const a = 1\nconst = ;\n", SourceKind::TypeScript)
            .err()
            .expect("should fail");
        match err {
            ConvertError::Parse { file, message } => {
                assert_eq!(file, "broken.ts");
                assert!(message.contains("line 2"), "message: {}", message);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_typescript_syntax_only_in_ts() {
        let src = "const x = y as number\n";
        assert!(SwcParser.parse("a.ts", src, SourceKind::TypeScript).is_ok());
        assert!(SwcParser.parse("a.js", src, SourceKind::JavaScript).is_err());
    }

    #[test]
    fn test_round_trip_style() {
        let parsed = SwcParser
            .parse("a.ts", "const a = \"x\";\nfoo(a);\n", SourceKind::TypeScript)
            .unwrap();
        let out = SwcPrinter.print(parsed, PrintStyle::default()).unwrap();
        assert!(out.contains("'x'"), "out: {}", out);
        assert!(!out.contains(';'), "out: {}", out);
    }

    #[test]
    fn test_semicolons_kept_when_configured() {
        let parsed = SwcParser
            .parse("a.ts", "foo(\"a\");\n", SourceKind::TypeScript)
            .unwrap();
        let style = PrintStyle {
            single_quote: false,
            semicolons: true,
        };
        let out = SwcPrinter.print(parsed, style).unwrap();
        assert!(out.contains("foo(\"a\");"), "out: {}", out);
    }

    #[test]
    fn test_long_lines_are_not_wrapped() {
        let args: Vec<String> = (0..20).map(|i| format!("argument_{}", i)).collect();
        let src = format!("foo({});\n", args.join(", "));
        let parsed = SwcParser.parse("a.ts", &src, SourceKind::TypeScript).unwrap();
        let out = SwcPrinter.print(parsed, PrintStyle::default()).unwrap();
        assert_eq!(out.trim_end(), src.trim_end().trim_end_matches(';'));
    }

    #[test]
    fn test_comments_survive() {
        let parsed = SwcParser
            .parse("a.ts", "// keep me\nfoo();\n", SourceKind::TypeScript)
            .unwrap();
        let out = SwcPrinter.print(parsed, PrintStyle::default()).unwrap();
        assert!(out.contains("// keep me"), "out: {}", out);
    }
}
