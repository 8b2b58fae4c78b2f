//! Workspace layout
//!
//! Resolves the suite source, report, and log directories from a single
//! user-supplied base directory. Nothing in here is hard-coded to an
//! absolute location.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::SuiteKind;

// Disambiguates log files when several suites start within the same second.
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

/// Directory layout of one orchestration workspace.
#[derive(Clone, Debug)]
pub struct Workspace {
    base_dir: PathBuf,
}

impl Workspace {
    /// Create a workspace rooted at the given base directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Java/TestNG project directory
    pub fn java_dir(&self) -> PathBuf {
        self.base_dir.join("java")
    }

    /// Python/pytest project directory
    pub fn python_dir(&self) -> PathBuf {
        self.base_dir.join("python")
    }

    /// Shared reports root
    pub fn reports_dir(&self) -> PathBuf {
        self.base_dir.join("reports")
    }

    /// Shared logs root
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Source directory for the given suite kind.
    pub fn suite_dir(&self, kind: SuiteKind) -> PathBuf {
        match kind {
            SuiteKind::Gradle => self.java_dir(),
            SuiteKind::Pytest => self.python_dir(),
        }
    }

    /// Per-kind subdirectory of the shared reports root.
    pub fn report_subdir(&self, kind: SuiteKind) -> PathBuf {
        self.reports_dir().join(kind.label())
    }

    /// Timestamped log file path for one suite run.
    pub fn log_file(&self, kind: SuiteKind) -> PathBuf {
        let seq = LOG_SEQ.fetch_add(1, Ordering::Relaxed);
        self.logs_dir().join(format!(
            "{}_tests_{}_{}.log",
            kind.label(),
            Utc::now().timestamp(),
            seq
        ))
    }

    /// Create the reports and logs directories.
    ///
    /// Failure here aborts the whole run before anything is dispatched.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [self.reports_dir(), self.logs_dir()] {
            fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create directory {}", dir.display()))?;
        }
        Ok(())
    }

    /// Check that the requested suite source directories exist.
    pub fn validate(&self, kinds: &[SuiteKind]) -> Result<()> {
        for kind in kinds {
            let dir = self.suite_dir(*kind);
            if !dir.is_dir() {
                bail!(
                    "required directory for {} not found: {}",
                    kind.name(),
                    dir.display()
                );
            }
        }
        Ok(())
    }
}
