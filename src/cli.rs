// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `slurmflow`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "slurmflow",
    version,
    about = "Generate Slurm job scripts and a submission controller for compression experiments.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SLURMFLOW_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Build the job scripts and the controller script for an experiment.
    Generate {
        /// Path to the experiment description (JSON).
        #[arg(long, value_name = "PATH")]
        config: PathBuf,

        /// Workflow name; used for the controller and provenance file names.
        #[arg(long, value_name = "NAME", default_value = "workflow")]
        name: String,

        /// Where scripts are written.
        ///
        /// Default: `<project-home><wflow-path>` from the experiment file.
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Hand the controller script to the shell once it is written.
        #[arg(long)]
        submit: bool,

        /// Parse + validate, print the jobs, but don't write any files.
        #[arg(long, conflicts_with = "submit")]
        dry_run: bool,
    },

    /// Run a previously generated controller script.
    Submit {
        #[arg(long, value_name = "PATH")]
        script: PathBuf,
    },

    /// Copy plots, data and provenance into the cinema database.
    Cinema {
        /// Path to the experiment description (JSON).
        #[arg(long, value_name = "PATH")]
        config: PathBuf,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
