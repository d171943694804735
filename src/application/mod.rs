use crate::domain::config::Config;
use crate::domain::diagnostics::Diagnostic;
use crate::domain::language::SourceKind;
use crate::domain::pipeline::{ConversionStats, Pipeline};
use crate::error::{ConvertError, ConvertResult};
use crate::ports::{SourceParser, SourcePrinter};
use rayon::prelude::*;
use rayon::ThreadPool;
use std::path::{Path, PathBuf};
use swc_core::common::{Globals, GLOBALS};

/// A diagnostic resolved to a line of the input file.
#[derive(Debug, Clone)]
pub struct LocatedDiagnostic {
    pub diagnostic: Diagnostic,
    pub line: Option<usize>,
}

/// Result of converting one source text.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub output: String,
    pub diagnostics: Vec<LocatedDiagnostic>,
    pub stats: ConversionStats,
}

/// Outcome of one file in a batch. A failure never stops the batch.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: ConvertResult<Conversion>,
}

impl FileOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

pub struct ConvertUsecase<'a> {
    pub parser: &'a dyn SourceParser,
    pub printer: &'a dyn SourcePrinter,
    pub config: &'a Config,
}

impl<'a> ConvertUsecase<'a> {
    /// Parse, run the pipeline, print.
    pub fn convert(&self, file_name: &str, src: &str, kind: SourceKind) -> ConvertResult<Conversion> {
        GLOBALS.set(&Globals::new(), || -> ConvertResult<Conversion> {
            let mut parsed = self.parser.parse(file_name, src, kind)?;
            let outcome = Pipeline::new(&self.config.conventions).run(&mut parsed.module);

            let diagnostics = outcome
                .diagnostics
                .into_vec()
                .into_iter()
                .map(|diagnostic| LocatedDiagnostic {
                    line: parsed.line_of(diagnostic.span),
                    diagnostic,
                })
                .collect();

            let output = self.printer.print(parsed, self.config.style)?;
            tracing::debug!(file = file_name, %kind, stats = ?outcome.stats, "converted");

            Ok(Conversion {
                output,
                diagnostics,
                stats: outcome.stats,
            })
        })
    }

    /// Read and convert one file. Unknown extensions are parsed as
    /// TypeScript, which accepts plain JavaScript as well.
    pub fn convert_path(&self, path: &Path) -> ConvertResult<Conversion> {
        let src = std::fs::read_to_string(path).map_err(|source| ConvertError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let kind = SourceKind::from_path(path).unwrap_or_default();
        self.convert(&path.display().to_string(), &src, kind)
    }

    /// Convert every file on the given pool. Outcomes keep the input order.
    pub fn convert_batch(&self, paths: &[PathBuf], pool: &ThreadPool) -> Vec<FileOutcome> {
        pool.install(|| {
            paths
                .par_iter()
                .map(|path| {
                    let result = self.convert_path(path);
                    if let Err(e) = &result {
                        tracing::warn!(file = %path.display(), error = %e, "conversion failed");
                    }
                    FileOutcome {
                        path: path.clone(),
                        result,
                    }
                })
                .collect()
        })
    }
}
