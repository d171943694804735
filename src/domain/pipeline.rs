//! Pipeline driver: runs the six passes over one tree, in order.

use crate::domain::config::Conventions;
use crate::domain::diagnostics::Diagnostics;
use crate::domain::passes::{
    assertions, context_extraction, context_rewrite, import_removal, lifecycle, test_signature,
};
use swc_core::ecma::ast::Module;

/// What each pass changed in one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub imports_removed: usize,
    pub context_extracted: bool,
    pub context_references: usize,
    pub signatures_cleared: usize,
    pub assertions_converted: usize,
    pub calls_rewritten: usize,
}

#[derive(Debug)]
pub struct PipelineOutcome {
    pub stats: ConversionStats,
    pub diagnostics: Diagnostics,
}

pub struct Pipeline<'a> {
    conventions: &'a Conventions,
}

impl<'a> Pipeline<'a> {
    pub fn new(conventions: &'a Conventions) -> Self {
        Self { conventions }
    }

    pub fn run(&self, module: &mut Module) -> PipelineOutcome {
        let conv = self.conventions;
        let mut diagnostics = Diagnostics::new();

        let imports_removed = import_removal::run(module, conv);
        let extraction = context_extraction::run(module, conv, &mut diagnostics);
        let context_extracted = extraction.synthesized();
        let rewrite = context_rewrite::run(module, conv, extraction, &mut diagnostics);
        let signatures_cleared = test_signature::run(module, conv, &rewrite);
        let assertions_converted = assertions::run(module, conv, &mut diagnostics);
        let calls_rewritten = lifecycle::run(module, conv);

        PipelineOutcome {
            stats: ConversionStats {
                imports_removed,
                context_extracted,
                context_references: rewrite.rewrites(),
                signatures_cleared,
                assertions_converted,
                calls_rewritten,
            },
            diagnostics,
        }
    }
}
