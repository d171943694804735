//! Diagnostic channel shared by the passes.
//!
//! Every diagnostic is both recorded (so callers can report or count them)
//! and emitted as a `tracing` event.

use swc_core::common::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
        }
    }
}

/// Which pass produced a diagnostic. Only passes that can report are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassId {
    ContextExtraction,
    ContextRewrite,
    Assertions,
}

impl PassId {
    pub fn name(&self) -> &'static str {
        match self {
            PassId::ContextExtraction => "context-extraction",
            PassId::ContextRewrite => "context-rewrite",
            PassId::Assertions => "assertions",
        }
    }
}

/// A manual follow-up item found while converting.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub pass: PassId,
    pub message: String,
    /// Location in the parsed source; `DUMMY_SP` for file-level messages.
    pub span: Span,
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, pass: PassId, span: Span, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(pass = pass.name(), "{}", message);
        self.entries.push(Diagnostic {
            severity: Severity::Info,
            pass,
            message,
            span,
        });
    }

    pub fn warn(&mut self, pass: PassId, span: Span, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(pass = pass.name(), "{}", message);
        self.entries.push(Diagnostic {
            severity: Severity::Warning,
            pass,
            message,
            span,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn from_pass(&self, pass: PassId) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.pass == pass)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
