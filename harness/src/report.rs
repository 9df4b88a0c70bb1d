//! Human summary block and the persisted JSON report.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::recorder::RunSummary;
use crate::verdict::Verdict;

const RULE: &str = "============================================================";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Render the summary block printed at the end of a run.
#[must_use]
pub fn render_summary(summary: &RunSummary) -> String {
    SummaryBlock(summary).to_string()
}

struct SummaryBlock<'a>(&'a RunSummary);

impl fmt::Display for SummaryBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        writeln!(f, "{RULE}\nTEST SUMMARY\n{RULE}")?;
        writeln!(f, "Total Tests: {}", summary.total)?;
        writeln!(f, "Passed: {}", summary.passed.len())?;
        writeln!(f, "Failed: {}", summary.failed.len())?;
        writeln!(f, "Warnings: {}", summary.warnings.len())?;

        if !summary.failed.is_empty() {
            writeln!(f, "\nFailed Tests:")?;
            for name in &summary.failed {
                writeln!(f, "  - {name}")?;
            }
        }

        write!(f, "\nSuccess Rate: {:.1}%", summary.success_rate)
    }
}

/// One line (plus an indented message line) per verdict, in record order.
#[must_use]
pub fn render_verdicts(verdicts: &[Verdict]) -> String {
    verdicts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Counts section of the persisted report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
    pub success_rate: f64,
}

/// The document written to `report.path`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub timestamp: DateTime<Utc>,
    pub summary: ReportSummary,
    pub passed: Vec<String>,
    pub failed: Vec<String>,
    pub warnings: Vec<String>,
}

impl Report {
    #[must_use]
    pub fn from_summary(summary: &RunSummary, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            summary: ReportSummary {
                total: summary.total,
                passed: summary.passed.len(),
                failed: summary.failed.len(),
                warnings: summary.warnings.len(),
                success_rate: summary.success_rate,
            },
            passed: summary.passed.clone(),
            failed: summary.failed.clone(),
            warnings: summary.warnings.clone(),
        }
    }
}

/// Write `report` as pretty JSON, replacing any existing file.
///
/// # Errors
/// Returns [`ReportError`] if serialization or the file write fails.
pub fn write_report(path: &Path, report: &Report) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "report written");
    Ok(())
}
