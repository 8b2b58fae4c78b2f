//! Suite adapters
//!
//! Translate a declarative test-run request into the concrete command line
//! and working directory for one suite technology. Pure functions: no I/O,
//! deterministic for the same request and workspace.

mod gradle;
mod pytest;

pub use gradle::test_name_glob;
pub use pytest::selection_args;

use std::path::PathBuf;

use crate::config::Workspace;
use crate::models::{SuiteKind, TestRunRequest};

/// A concrete child process invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    /// Program and arguments
    pub command: Vec<String>,
    /// Working directory the process starts in
    pub cwd: PathBuf,
}

/// Relocation of a suite-produced HTML report directory into the shared
/// reports area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactRelocation {
    /// Where the suite deposits its own HTML report
    pub source: PathBuf,
    /// Suite-specific subdirectory of the shared reports root
    pub target: PathBuf,
}

/// Build the command line and working directory for a request.
pub fn build_invocation(request: &TestRunRequest, workspace: &Workspace) -> Invocation {
    match request.kind {
        SuiteKind::Gradle => gradle::invocation(request, workspace),
        SuiteKind::Pytest => pytest::invocation(request, workspace),
    }
}

/// HTML artifacts to relocate after a successful run, if the suite kind
/// writes them outside the shared reports area.
pub fn html_artifact(kind: SuiteKind, workspace: &Workspace) -> Option<ArtifactRelocation> {
    match kind {
        // Gradle writes its HTML report inside the project build directory
        SuiteKind::Gradle => Some(ArtifactRelocation {
            source: workspace
                .java_dir()
                .join("build")
                .join("reports")
                .join("tests")
                .join("test"),
            target: workspace.report_subdir(SuiteKind::Gradle),
        }),
        // pytest is pointed straight at the shared reports area
        SuiteKind::Pytest => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace() -> Workspace {
        Workspace::new("/work")
    }

    #[test]
    fn test_invocation_is_deterministic() {
        let request = TestRunRequest::new(SuiteKind::Gradle)
            .with_filter("quickstart")
            .with_fork_count(4);

        let first = build_invocation(&request, &workspace());
        let second = build_invocation(&request, &workspace());
        assert_eq!(first, second);
    }

    #[test]
    fn test_gradle_artifact_relocation() {
        let artifact = html_artifact(SuiteKind::Gradle, &workspace()).unwrap();
        assert_eq!(
            artifact.source,
            PathBuf::from("/work/java/build/reports/tests/test")
        );
        assert_eq!(artifact.target, PathBuf::from("/work/reports/gradle"));
    }

    #[test]
    fn test_pytest_has_no_relocation() {
        assert!(html_artifact(SuiteKind::Pytest, &workspace()).is_none());
    }
}
