//! Verdict accumulation for a single run.

use serde::Serialize;

use crate::verdict::{Status, Verdict};

/// Append-only log of verdicts.
///
/// Created at run start, read at report time. Checks take it by `&mut`, so
/// there is exactly one writer at a time.
#[derive(Debug, Default)]
pub struct Recorder {
    verdicts: Vec<Verdict>,
}

impl Recorder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            verdicts: Vec::new(),
        }
    }

    /// Append one verdict.
    pub fn record(&mut self, name: impl Into<String>, status: Status, message: Option<String>) {
        let verdict = Verdict::new(name, status, message);
        let detail = verdict.message().unwrap_or_default();

        match status {
            Status::Pass => tracing::info!(check = verdict.name(), %status, detail, "check passed"),
            Status::Warn => tracing::warn!(check = verdict.name(), %status, detail, "check warned"),
            Status::Fail => tracing::error!(check = verdict.name(), %status, detail, "check failed"),
        }

        self.verdicts.push(verdict);
    }

    pub fn pass(&mut self, name: impl Into<String>) {
        self.record(name, Status::Pass, None);
    }

    pub fn pass_with(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.record(name, Status::Pass, Some(message.into()));
    }

    pub fn warn(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.record(name, Status::Warn, Some(message.into()));
    }

    pub fn fail(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.record(name, Status::Fail, Some(message.into()));
    }

    /// Verdicts in insertion order.
    #[must_use]
    pub fn verdicts(&self) -> &[Verdict] {
        &self.verdicts
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.verdicts.len()
    }

    /// Summary derived from the current verdicts.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        let names = |status: Status| -> Vec<String> {
            self.verdicts
                .iter()
                .filter(|v| v.status() == status)
                .map(|v| v.name().to_string())
                .collect()
        };

        let passed = names(Status::Pass);
        let failed = names(Status::Fail);
        let warnings = names(Status::Warn);
        let total = self.verdicts.len();

        #[allow(clippy::cast_precision_loss)]
        let success_rate = if total == 0 {
            0.0
        } else {
            passed.len() as f64 / total as f64 * 100.0
        };

        RunSummary {
            total,
            passed,
            failed,
            warnings,
            success_rate,
        }
    }
}

/// Counts and names per status, derived from a [`Recorder`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: Vec<String>,
    pub failed: Vec<String>,
    pub warnings: Vec<String>,
    /// Percentage of passed verdicts, `0.0` for an empty run.
    pub success_rate: f64,
}
