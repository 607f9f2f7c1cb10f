//! Ordered Story scenario
//!
//! Runs the fixed CRUD sequence against a live API through one
//! authenticated session, with soft assertions and a per-step report.

mod assertion;
mod report;
mod runner;
mod state;
mod steps;

pub use assertion::{CheckOutcome, Checks};
pub use report::{RunReport, StepFailure, StepReport};
pub use runner::{run, run_steps, RunOptions};
pub use state::RunState;
pub use steps::{BodySource, Contract, Effect, PathId, StepDescriptor, PLAN};
