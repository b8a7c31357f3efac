// src/exec/mod.rs

//! External process layer.
//!
//! - [`backend`] provides the `SubmitBackend` trait and the production
//!   `ShellSubmitter`, which hands a controller script to a shell. Tests can
//!   substitute a fake backend that never spawns anything.
//! - [`git`] reads the version tag of a source checkout for provenance.

pub mod backend;
pub mod git;

pub use backend::{ShellSubmitter, SubmitBackend, SubmitOutcome};
pub use git::describe_tags;
