//! Result aggregation and reporting.
//!
//! Collects suite results and generates summaries and exit codes.

use crate::checks::classify::InstanceReport;
use crate::checks::ValidationRun;
use crate::{PreflightError, Suite, Verdict};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Result summary statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
    pub total: u32,
    pub total_duration_ms: u64,
}

/// Result of one suite
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteReport {
    pub suite: Suite,
    #[serde(flatten)]
    pub verdict: Verdict,
    pub instance_count: usize,
    pub skipped: usize,
    pub instances: Vec<InstanceReport>,
    pub duration_ms: u64,
}

impl SuiteReport {
    /// Wrap a completed validator run
    pub fn from_run(suite: Suite, run: ValidationRun, duration_ms: u64) -> Self {
        SuiteReport {
            suite,
            verdict: run.verdict,
            instance_count: run.instance_count,
            skipped: run.skipped,
            instances: run.instances,
            duration_ms,
        }
    }

    /// A suite aborted by a driver or fixture error
    pub fn from_error(suite: Suite, error: &PreflightError, duration_ms: u64) -> Self {
        SuiteReport {
            suite,
            verdict: Verdict::Fail {
                message: error.to_string(),
            },
            instance_count: 0,
            skipped: 0,
            instances: Vec::new(),
            duration_ms,
        }
    }
}

/// Validation report containing all suite results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub timestamp: DateTime<Utc>,
    /// Driver backend the suites ran against
    pub backend: String,
    pub suites: Vec<SuiteReport>,
    pub total_duration_ms: u64,
}

impl ValidationReport {
    /// Create a new empty report
    pub fn new(backend: impl Into<String>) -> Self {
        ValidationReport {
            timestamp: Utc::now(),
            backend: backend.into(),
            suites: Vec::new(),
            total_duration_ms: 0,
        }
    }

    /// Calculate summary statistics
    pub fn summary(&self) -> ResultSummary {
        let mut summary = ResultSummary::default();

        for suite in &self.suites {
            summary.total += 1;
            summary.total_duration_ms += suite.duration_ms;

            match suite.verdict {
                Verdict::Pass { .. } => summary.passed += 1,
                Verdict::Fail { .. } => summary.failed += 1,
                Verdict::Skipped { .. } => summary.skipped += 1,
            }
        }

        summary
    }

    /// Get only failed suites
    pub fn failures(&self) -> Vec<&SuiteReport> {
        self.suites.iter().filter(|s| s.verdict.is_fail()).collect()
    }

    /// Process exit code: 0 passed, 1 any failure, 2 skipped without failures
    pub fn exit_code(&self) -> u8 {
        let summary = self.summary();
        if summary.failed > 0 {
            1
        } else if summary.skipped > 0 {
            2
        } else {
            0
        }
    }
}
