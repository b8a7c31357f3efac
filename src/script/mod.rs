// src/script/mod.rs

//! Shell text generation for Slurm.
//!
//! - [`wrapper`] renders the per-job batch script.
//! - [`controller`] renders the submission script that threads scheduler
//!   job ids between dependent submissions.
//!
//! Everything here is pure string building; writing files is the job of
//! [`crate::dag::JobGraph::compile`].

pub mod controller;
pub mod wrapper;

pub use controller::{dependency_expression, job_id_var, parse_job_id, render_stanza};
pub use wrapper::render_wrapper;

/// First line of every generated script.
pub const SHEBANG: &str = "#! /bin/bash";

/// Scheduler directive prefix used in wrapper scripts.
pub const DIRECTIVE_PREFIX: &str = "#SBATCH";

/// Scheduler submission command used by the controller.
pub const SUBMIT_COMMAND: &str = "sbatch";

/// Placeholder in a job's invocation that is replaced by the tool root.
pub const ROOT_PLACEHOLDER: &str = "$foresight-home$";
