//! Story harness - ordered integration tests for the Story HTTP API
//!
//! This library authenticates against the API, runs a fixed sequence of
//! dependent CRUD steps through one bearer-authenticated session and
//! reports per-step pass/fail with diagnostics.

pub mod api;
pub mod cli;
pub mod commands;
pub mod common;
pub mod testing;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use testing::{run, RunOptions, RunReport};
