use crate::application::{Conversion, FileOutcome, LocatedDiagnostic};
use crate::domain::pipeline::ConversionStats;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportDto {
    pub files: Vec<FileReportDto>,
    pub converted: usize,
    pub failed: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FileReportDto {
    pub path: String,
    /// `converted` or `failed`
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatsDto>,
    pub diagnostics: Vec<DiagnosticDto>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DiagnosticDto {
    pub severity: String,
    pub pass: String,
    pub message: String,
    pub line: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsDto {
    pub imports_removed: usize,
    pub context_extracted: bool,
    pub context_references: usize,
    pub signatures_cleared: usize,
    pub assertions_converted: usize,
    pub calls_rewritten: usize,
}

impl From<&LocatedDiagnostic> for DiagnosticDto {
    fn from(d: &LocatedDiagnostic) -> Self {
        DiagnosticDto {
            severity: d.diagnostic.severity.as_str().to_string(),
            pass: d.diagnostic.pass.name().to_string(),
            message: d.diagnostic.message.clone(),
            line: d.line,
        }
    }
}

impl From<ConversionStats> for StatsDto {
    fn from(s: ConversionStats) -> Self {
        StatsDto {
            imports_removed: s.imports_removed,
            context_extracted: s.context_extracted,
            context_references: s.context_references,
            signatures_cleared: s.signatures_cleared,
            assertions_converted: s.assertions_converted,
            calls_rewritten: s.calls_rewritten,
        }
    }
}

fn converted(path: String, conv: &Conversion) -> FileReportDto {
    FileReportDto {
        path,
        status: "converted".to_string(),
        error: None,
        stats: Some(conv.stats.into()),
        diagnostics: conv.diagnostics.iter().map(DiagnosticDto::from).collect(),
    }
}

impl From<&FileOutcome> for FileReportDto {
    fn from(outcome: &FileOutcome) -> Self {
        let path = outcome.path.display().to_string();
        match &outcome.result {
            Ok(conv) => converted(path, conv),
            Err(e) => FileReportDto {
                path,
                status: "failed".to_string(),
                error: Some(e.to_string()),
                stats: None,
                diagnostics: Vec::new(),
            },
        }
    }
}

impl From<&[FileOutcome]> for ReportDto {
    fn from(outcomes: &[FileOutcome]) -> Self {
        let files: Vec<FileReportDto> = outcomes.iter().map(FileReportDto::from).collect();
        let converted = outcomes.iter().filter(|o| o.is_ok()).count();
        ReportDto {
            failed: files.len() - converted,
            converted,
            files,
        }
    }
}
