// src/dag/mod.rs

//! Job dependency graph.
//!
//! - [`job`] holds the description of a single batch job.
//! - [`graph`] owns the jobs in submission order and compiles them into
//!   wrapper scripts plus a controller script.

pub mod graph;
pub mod job;

pub use graph::{CompiledWorkflow, JobGraph};
pub use job::{Job, JobId};
