//! Run summary
//!
//! Aggregated pass/fail statistics over one orchestration batch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::RunOutcome;

/// Summary of one orchestration run.
///
/// Derived from the collected outcomes; `passed + failed == total` always
/// holds, and `total == outcomes.len()`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// When the summary was produced
    pub execution_time: DateTime<Utc>,

    /// Total suite runs that produced an outcome
    pub total: usize,

    /// Suites that exited successfully
    pub passed: usize,

    /// Suites that failed or were terminated
    pub failed: usize,

    /// Percentage of passed suites (0.0 when nothing ran)
    pub success_rate: f64,

    /// Individual outcomes in completion order
    pub outcomes: Vec<RunOutcome>,
}

impl RunSummary {
    /// Build a summary from collected outcomes.
    pub fn from_outcomes(outcomes: Vec<RunOutcome>) -> Self {
        let total = outcomes.len();
        let passed = outcomes.iter().filter(|o| o.succeeded).count();
        let failed = total - passed;
        let success_rate = if total == 0 {
            0.0
        } else {
            (passed as f64 / total as f64) * 100.0
        };

        Self {
            execution_time: Utc::now(),
            total,
            passed,
            failed,
            success_rate,
            outcomes,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total: {} | Pass: {} | Fail: {} | Success Rate: {:.1}%",
            self.total, self.passed, self.failed, self.success_rate
        )
    }
}
