//! Suite run outcomes
//!
//! The terminal result record of one dispatched test-run request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::TestRunRequest;

/// Result of one suite execution.
///
/// Created exactly once, when the child process exits or is terminated.
/// `log_location` points at the run's log file, or carries the error text
/// when the process could never be started.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// The request this outcome answers
    pub request: TestRunRequest,

    /// Whether the suite process exited with status 0
    pub succeeded: bool,

    /// Path of the run log, or an error description if no log exists
    pub log_location: String,

    /// When the outcome was recorded
    pub completed_at: DateTime<Utc>,

    /// Non-fatal HTML artifact relocation failure, if any
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub artifact_error: Option<String>,
}

impl RunOutcome {
    /// Record a completed run with the given success flag.
    pub fn completed(request: TestRunRequest, succeeded: bool, log_location: impl Into<String>) -> Self {
        Self {
            request,
            succeeded,
            log_location: log_location.into(),
            completed_at: Utc::now(),
            artifact_error: None,
        }
    }

    /// Record a run that failed before or during execution.
    pub fn failed(request: TestRunRequest, log_location: impl Into<String>) -> Self {
        Self::completed(request, false, log_location)
    }

    /// Attach a non-fatal artifact relocation error.
    pub fn with_artifact_error(mut self, error: impl Into<String>) -> Self {
        self.artifact_error = Some(error.into());
        self
    }

    pub fn status_symbol(&self) -> &'static str {
        if self.succeeded {
            "✅"
        } else {
            "❌"
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}] - {}",
            self.status_symbol(),
            self.request.kind.name(),
            self.request.filter_or_all(),
            self.log_location
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SuiteKind;

    #[test]
    fn test_completed_outcome() {
        let request = TestRunRequest::new(SuiteKind::Gradle);
        let outcome = RunOutcome::completed(request, true, "logs/gradle_tests_1.log");
        assert!(outcome.succeeded);
        assert_eq!(outcome.log_location, "logs/gradle_tests_1.log");
        assert!(outcome.artifact_error.is_none());
    }

    #[test]
    fn test_failed_outcome_carries_error_text() {
        let request = TestRunRequest::new(SuiteKind::Pytest);
        let outcome = RunOutcome::failed(request, "spawn failed: No such file");
        assert!(!outcome.succeeded);
        assert!(outcome.log_location.contains("spawn failed"));
    }

    #[test]
    fn test_artifact_error_does_not_flip_success() {
        let request = TestRunRequest::new(SuiteKind::Gradle);
        let outcome = RunOutcome::completed(request, true, "logs/x.log")
            .with_artifact_error("copy failed");
        assert!(outcome.succeeded);
        assert_eq!(outcome.artifact_error.as_deref(), Some("copy failed"));
    }
}
