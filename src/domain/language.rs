/// Source Kind Module
///
/// Classifies input test files so the parser can pick the right syntax.

use std::path::Path;

/// Flavours of source the converter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
}

impl SourceKind {
    /// Infer kind from file extension.
    pub fn from_extension(ext: &str) -> Option<SourceKind> {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" => Some(SourceKind::JavaScript),
            "jsx" => Some(SourceKind::Jsx),
            "ts" | "mts" | "cts" => Some(SourceKind::TypeScript),
            "tsx" => Some(SourceKind::Tsx),
            _ => None,
        }
    }

    /// Infer kind from a file path.
    pub fn from_path(path: &Path) -> Option<SourceKind> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SourceKind::JavaScript => "JavaScript",
            SourceKind::Jsx => "JSX",
            SourceKind::TypeScript => "TypeScript",
            SourceKind::Tsx => "TSX",
        }
    }

    pub fn has_jsx(&self) -> bool {
        matches!(self, SourceKind::Jsx | SourceKind::Tsx)
    }
}

impl Default for SourceKind {
    fn default() -> Self {
        SourceKind::TypeScript
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
