//! Configuration module
//!
//! Workspace layout and environment pass-through configuration.

pub mod env;
mod workspace;

pub use env::CloudEnv;
pub use workspace::Workspace;
