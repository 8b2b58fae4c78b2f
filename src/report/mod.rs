//! Report generation and persistence
//!
//! Turns the collected outcomes into a machine-readable JSON summary, an
//! HTML summary, and the final console table.

mod html;

pub use html::render_summary;

use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tracing::info;

use crate::config::Workspace;
use crate::models::RunSummary;

/// File name of the structured summary inside the reports root.
pub const SUMMARY_JSON: &str = "test_summary.json";
/// File name of the HTML summary inside the reports root.
pub const SUMMARY_HTML: &str = "test_summary.html";

/// Writes and re-reads the persisted summary documents.
pub struct SummaryWriter {
    workspace: Workspace,
}

impl SummaryWriter {
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }

    pub fn json_path(&self) -> PathBuf {
        self.workspace.reports_dir().join(SUMMARY_JSON)
    }

    pub fn html_path(&self) -> PathBuf {
        self.workspace.reports_dir().join(SUMMARY_HTML)
    }

    /// Persist both summary documents.
    ///
    /// Each file is written whole through a temporary file and renamed into
    /// place, so a concurrent reader never observes a partial document.
    pub fn persist(&self, summary: &RunSummary) -> Result<()> {
        let json =
            serde_json::to_vec_pretty(summary).context("failed to serialize summary to JSON")?;
        self.write_atomic(&self.json_path(), &json)?;

        let html = render_summary(summary);
        self.write_atomic(&self.html_path(), html.as_bytes())?;

        info!("📊 summary written to {}", self.json_path().display());
        Ok(())
    }

    /// Load the previously persisted structured summary, if any.
    pub fn load(&self) -> Result<Option<RunSummary>> {
        let path = self.json_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let summary = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(Some(summary))
    }

    /// Print the final tabular summary with pointers to the artifacts.
    pub fn print_console(&self, summary: &RunSummary) {
        let bar = "=".repeat(60);
        println!("\n{bar}");
        println!("📋 TEST SUITES EXECUTION SUMMARY");
        println!("{bar}");
        println!("Test Suites: {}", summary.total);
        println!("Suites Passed: {} ✅", summary.passed);
        println!("Suites Failed: {} ❌", summary.failed);
        println!("Suite Success Rate: {:.1}%", summary.success_rate);
        for outcome in &summary.outcomes {
            println!("  {outcome}");
        }
        println!("Test Case Reports: {}", self.workspace.reports_dir().display());
        println!("Test Run Logs: {}", self.workspace.logs_dir().display());
        println!("{bar}");
    }

    fn write_atomic(&self, path: &std::path::Path, content: &[u8]) -> Result<()> {
        let dir = self.workspace.reports_dir();
        let mut file = NamedTempFile::new_in(&dir)
            .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
        file.write_all(content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        file.persist(path)
            .with_context(|| format!("failed to move summary into place at {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RunOutcome, SuiteKind, TestRunRequest};
    use tempfile::TempDir;

    fn summary() -> RunSummary {
        RunSummary::from_outcomes(vec![
            RunOutcome::completed(
                TestRunRequest::new(SuiteKind::Gradle).with_filter("quickstart"),
                true,
                "logs/gradle_tests_1.log",
            ),
            RunOutcome::completed(
                TestRunRequest::new(SuiteKind::Pytest),
                false,
                "logs/pytest_tests_1.log",
            ),
        ])
    }

    fn writer_in(tmp: &TempDir) -> SummaryWriter {
        let workspace = Workspace::new(tmp.path());
        workspace.ensure_dirs().unwrap();
        SummaryWriter::new(workspace)
    }

    #[test]
    fn test_persisted_json_round_trips() {
        let tmp = TempDir::new().unwrap();
        let writer = writer_in(&tmp);
        let original = summary();

        writer.persist(&original).unwrap();
        let loaded = writer.load().unwrap().unwrap();

        assert_eq!(loaded.total, original.total);
        assert_eq!(loaded.passed, original.passed);
        assert_eq!(loaded.failed, original.failed);
        assert_eq!(loaded.success_rate, original.success_rate);
        assert_eq!(loaded.outcomes, original.outcomes);
    }

    #[test]
    fn test_load_without_prior_run() {
        let tmp = TempDir::new().unwrap();
        let writer = writer_in(&tmp);
        assert!(writer.load().unwrap().is_none());
    }

    #[test]
    fn test_both_documents_are_written() {
        let tmp = TempDir::new().unwrap();
        let writer = writer_in(&tmp);

        writer.persist(&summary()).unwrap();

        assert!(writer.json_path().is_file());
        assert!(writer.html_path().is_file());

        // No stray temp files once persisted.
        let staging_leftovers = std::fs::read_dir(tmp.path().join("reports"))
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| {
                let name = e.file_name().to_string_lossy().into_owned();
                name != SUMMARY_JSON && name != SUMMARY_HTML
            })
            .count();
        assert_eq!(staging_leftovers, 0);
    }

    #[test]
    fn test_unrounded_rate_survives_serialization() {
        let tmp = TempDir::new().unwrap();
        let writer = writer_in(&tmp);
        let original = RunSummary::from_outcomes(vec![
            RunOutcome::completed(TestRunRequest::new(SuiteKind::Gradle), true, "a.log"),
            RunOutcome::completed(TestRunRequest::new(SuiteKind::Pytest), false, "b.log"),
            RunOutcome::completed(TestRunRequest::new(SuiteKind::Pytest), false, "c.log"),
        ]);

        writer.persist(&original).unwrap();
        let loaded = writer.load().unwrap().unwrap();
        assert!((loaded.success_rate - 100.0 / 3.0).abs() < 1e-9);
    }
}
