//! Suite execution engine
//!
//! Runs external suite processes with live output streaming, relocates their
//! HTML artifacts, and coordinates parallel execution across a bounded
//! worker pool.

mod artifacts;
mod parallel;
mod process;

pub use artifacts::relocate_dir;
pub use parallel::Coordinator;
pub use process::{ExecError, SuiteExecutor};
