//! Test run requests
//!
//! Describes one suite execution the orchestrator has been asked to perform.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default TestNG suite manifest passed to Gradle when none is given.
pub const DEFAULT_TESTNG_SUITES: &str = "testng.xml";

/// The two supported suite technologies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuiteKind {
    /// Java/TestNG tests driven through the Gradle `test` task.
    Gradle,
    /// Python tests driven through `uv run pytest`.
    Pytest,
}

impl SuiteKind {
    /// Short label used for log file stems and report subdirectories.
    pub fn label(&self) -> &'static str {
        match self {
            SuiteKind::Gradle => "gradle",
            SuiteKind::Pytest => "pytest",
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            SuiteKind::Gradle => "Java/TestNG (Gradle)",
            SuiteKind::Pytest => "Python/pytest",
        }
    }

    /// Prefix attached to every live output line of this suite.
    pub fn tag(&self) -> &'static str {
        match self {
            SuiteKind::Gradle => "☕",
            SuiteKind::Pytest => "🐍",
        }
    }

    /// Get all suite kinds
    pub fn all() -> Vec<SuiteKind> {
        vec![SuiteKind::Gradle, SuiteKind::Pytest]
    }
}

impl fmt::Display for SuiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One declarative suite execution request.
///
/// Immutable once built; the coordinator may queue any number of them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRunRequest {
    /// Which suite technology to run
    pub kind: SuiteKind,

    /// Suite manifest override (Gradle only; `testng.xml` when absent)
    pub suites: Option<String>,

    /// Free-text or keyword test filter
    pub filter: Option<String>,

    /// Intra-suite parallelism hint forwarded to the suite's own runtime
    pub fork_count: usize,
}

impl TestRunRequest {
    /// Create a request with default manifest, no filter, and a single fork.
    pub fn new(kind: SuiteKind) -> Self {
        Self {
            kind,
            suites: None,
            filter: None,
            fork_count: 1,
        }
    }

    /// Set the suite manifest
    pub fn with_suites(mut self, suites: impl Into<String>) -> Self {
        self.suites = Some(suites.into());
        self
    }

    /// Set the test filter
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Set the fork count (clamped to at least 1)
    pub fn with_fork_count(mut self, fork_count: usize) -> Self {
        self.fork_count = fork_count.max(1);
        self
    }

    /// Filter description for reports ("All" when unfiltered).
    pub fn filter_or_all(&self) -> &str {
        self.filter.as_deref().unwrap_or("All")
    }
}

impl fmt::Display for TestRunRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.name())?;
        if let Some(suites) = &self.suites {
            write!(f, " (suites: {suites})")?;
        }
        if let Some(filter) = &self.filter {
            write!(f, " (filter: {filter})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(SuiteKind::Gradle.label(), "gradle");
        assert_eq!(SuiteKind::Pytest.label(), "pytest");
        assert_eq!(SuiteKind::all().len(), 2);
    }

    #[test]
    fn test_request_builder() {
        let request = TestRunRequest::new(SuiteKind::Gradle)
            .with_suites("smoke.xml")
            .with_filter("quickstart")
            .with_fork_count(8);

        assert_eq!(request.kind, SuiteKind::Gradle);
        assert_eq!(request.suites.as_deref(), Some("smoke.xml"));
        assert_eq!(request.filter.as_deref(), Some("quickstart"));
        assert_eq!(request.fork_count, 8);
    }

    #[test]
    fn test_fork_count_clamped() {
        let request = TestRunRequest::new(SuiteKind::Pytest).with_fork_count(0);
        assert_eq!(request.fork_count, 1);
    }

    #[test]
    fn test_structural_equality() {
        let a = TestRunRequest::new(SuiteKind::Pytest).with_filter("ios");
        let b = TestRunRequest::new(SuiteKind::Pytest).with_filter("ios");
        assert_eq!(a, b);
    }

    #[test]
    fn test_filter_or_all() {
        let request = TestRunRequest::new(SuiteKind::Gradle);
        assert_eq!(request.filter_or_all(), "All");
        assert_eq!(request.with_filter("android").filter_or_all(), "android");
    }
}
