//! Data models for suite orchestration
//!
//! This module contains all data structures used throughout the application.

mod outcome;
mod request;
mod summary;

pub use outcome::RunOutcome;
pub use request::{SuiteKind, TestRunRequest, DEFAULT_TESTNG_SUITES};
pub use summary::RunSummary;
