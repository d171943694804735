use crate::domain::config::PrintStyle;
use crate::domain::language::SourceKind;
use crate::error::ConvertResult;
use swc_core::common::comments::SingleThreadedComments;
use swc_core::common::sync::Lrc;
use swc_core::common::{SourceMap, Span};
use swc_core::ecma::ast::Module;

/// One parsed input file. The tree is owned by a single conversion run.
pub struct ParsedSource {
    pub module: Module,
    pub source_map: Lrc<SourceMap>,
    pub comments: SingleThreadedComments,
    pub kind: SourceKind,
}

impl ParsedSource {
    /// 1-based line of a span in the original text, `None` for synthesized
    /// nodes.
    pub fn line_of(&self, span: Span) -> Option<usize> {
        if span.is_dummy() {
            return None;
        }
        Some(self.source_map.lookup_char_pos(span.lo).line)
    }
}

/// Text to tree. Implementations are shared across batch workers.
pub trait SourceParser: Send + Sync {
    fn parse(&self, file_name: &str, src: &str, kind: SourceKind) -> ConvertResult<ParsedSource>;
}

pub trait SourcePrinter: Send + Sync {
    fn print(&self, parsed: ParsedSource, style: PrintStyle) -> ConvertResult<String>;
}
