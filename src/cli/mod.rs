//! Command-line workflow, independent of argument parsing

pub mod orchestration;

pub use orchestration::{ReleaseAction, Stage, Workflow, WorkflowArgs, WorkflowOutcome};
