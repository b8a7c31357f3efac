// src/config/mod.rs

//! Experiment description loading and validation.
//!
//! Responsibilities:
//! - Define the JSON-backed data model (`model.rs`).
//! - Load a description from disk (`loader.rs`).
//! - Validate required fields once, at load time (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{
    directive_pairs, AnalysisTool, CbenchOutput, CbenchSection, CinemaPlotsSection,
    CompressorConfig, ConfigFile, InputFile, InputSection, PatSection, RawConfigFile,
};
