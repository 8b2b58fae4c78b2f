//! CLI argument parsing
//!
//! Defines the command-line interface using clap and turns the parsed flags
//! into the list of suite run requests to dispatch.

use clap::Parser;
use std::path::PathBuf;

use crate::models::{SuiteKind, TestRunRequest};

/// Parallel orchestrator for Appium test suites
#[derive(Parser, Debug)]
#[command(name = "appium-runner")]
#[command(version)]
#[command(about = "Run the Java/TestNG and Python/pytest Appium suites in parallel")]
#[command(long_about = None)]
pub struct Args {
    /// Run all suites (Java/TestNG and Python/pytest); the default when no
    /// suite flag is given
    #[arg(long)]
    pub all: bool,

    /// Run the Gradle-driven Java/TestNG suite only
    #[arg(long)]
    pub gradle: bool,

    /// Run the Python/pytest suite only
    #[arg(long)]
    pub pytest: bool,

    /// TestNG suite XML manifest (default: testng.xml)
    #[arg(long)]
    pub suites: Option<String>,

    /// Test filter: quickstart, advanced, optional, android, ios, or a
    /// test-name fragment
    #[arg(long)]
    pub tests: Option<String>,

    /// Platform filter (android, ios); used when --tests is absent
    #[arg(long)]
    pub platform: Option<String>,

    /// Number of parallel suite processes
    #[arg(long, default_value = "4")]
    pub parallel: usize,

    /// Re-render reports from the last persisted summary without running
    /// any tests
    #[arg(long)]
    pub generate_reports_only: bool,

    /// Workspace root containing java/, python/, reports/ and logs/
    #[arg(long, default_value = ".")]
    pub base_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Suite kinds selected by the mode flags.
    pub fn selected_kinds(&self) -> Vec<SuiteKind> {
        if self.all || (!self.gradle && !self.pytest) {
            return SuiteKind::all();
        }

        let mut kinds = Vec::new();
        if self.gradle {
            kinds.push(SuiteKind::Gradle);
        }
        if self.pytest {
            kinds.push(SuiteKind::Pytest);
        }
        kinds
    }

    /// Build the execution plan from the parsed flags.
    pub fn requests(&self) -> Vec<TestRunRequest> {
        let filter = self.tests.as_deref().or(self.platform.as_deref());

        self.selected_kinds()
            .into_iter()
            .map(|kind| {
                let mut request = TestRunRequest::new(kind).with_fork_count(self.parallel);
                if kind == SuiteKind::Gradle {
                    if let Some(suites) = &self.suites {
                        request = request.with_suites(suites);
                    }
                }
                if let Some(filter) = filter {
                    request = request.with_filter(filter);
                }
                request
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("appium-runner").chain(argv.iter().copied()))
    }

    #[test]
    fn test_default_runs_all_suites() {
        let args = parse(&[]);
        let requests = args.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].kind, SuiteKind::Gradle);
        assert_eq!(requests[1].kind, SuiteKind::Pytest);
        assert_eq!(args.parallel, 4);
    }

    #[test]
    fn test_single_suite_selection() {
        let gradle_only = parse(&["--gradle"]).requests();
        assert_eq!(gradle_only.len(), 1);
        assert_eq!(gradle_only[0].kind, SuiteKind::Gradle);

        let pytest_only = parse(&["--pytest"]).requests();
        assert_eq!(pytest_only.len(), 1);
        assert_eq!(pytest_only[0].kind, SuiteKind::Pytest);
    }

    #[test]
    fn test_all_flag_overrides_single_selection() {
        let requests = parse(&["--all", "--gradle"]).requests();
        assert_eq!(requests.len(), 2);
    }

    #[test]
    fn test_filter_applies_to_both_kinds() {
        let requests = parse(&["--tests", "quickstart"]).requests();
        assert!(requests
            .iter()
            .all(|r| r.filter.as_deref() == Some("quickstart")));
    }

    #[test]
    fn test_platform_is_fallback_filter() {
        let requests = parse(&["--platform", "android"]).requests();
        assert!(requests
            .iter()
            .all(|r| r.filter.as_deref() == Some("android")));

        let requests = parse(&["--tests", "login", "--platform", "android"]).requests();
        assert!(requests.iter().all(|r| r.filter.as_deref() == Some("login")));
    }

    #[test]
    fn test_suites_override_reaches_gradle_only() {
        let requests = parse(&["--suites", "smoke.xml"]).requests();
        let gradle = requests.iter().find(|r| r.kind == SuiteKind::Gradle).unwrap();
        let pytest = requests.iter().find(|r| r.kind == SuiteKind::Pytest).unwrap();
        assert_eq!(gradle.suites.as_deref(), Some("smoke.xml"));
        assert!(pytest.suites.is_none());
    }

    #[test]
    fn test_parallel_feeds_fork_count() {
        let requests = parse(&["--parallel", "8"]).requests();
        assert!(requests.iter().all(|r| r.fork_count == 8));
    }

    #[test]
    fn test_report_only_flag() {
        let args = parse(&["--generate-reports-only"]);
        assert!(args.generate_reports_only);
    }
}
