// src/lib.rs

pub mod cinema;
pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod script;
pub mod tabular;
pub mod workflow;

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::cli::{CliArgs, Command};
use crate::config::load_and_validate;
use crate::dag::JobGraph;
use crate::errors::{Result, SlurmflowError};
use crate::exec::{ShellSubmitter, SubmitBackend};
use crate::fs::RealFileSystem;
use crate::workflow::Experiment;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - experiment loading + validation
/// - job construction
/// - script compilation
/// - (optional) submission
pub async fn run(args: CliArgs) -> Result<()> {
    let fs = RealFileSystem;

    match args.command {
        Command::Generate {
            config,
            name,
            output_dir,
            submit,
            dry_run,
        } => {
            let graph = build_workflow(&fs, &config, &name, output_dir, !dry_run).await?;

            if dry_run {
                print_dry_run(&graph)?;
                return Ok(());
            }

            let compiled = graph.compile(&fs)?;
            if submit {
                let mut backend = ShellSubmitter::default();
                submit_controller(&mut backend, &compiled.controller).await?;
            }
            Ok(())
        }
        Command::Submit { script } => {
            let mut backend = ShellSubmitter::default();
            submit_controller(&mut backend, &script).await
        }
        Command::Cinema { config } => {
            let cfg = load_and_validate(&fs, &config)?;
            let report = cinema::create_cinema(&fs, &cfg, &config)?;
            if !report.is_complete() {
                warn!(failed = ?report.failed, "some files were not copied into the cinema database");
            }
            Ok(())
        }
    }
}

/// Load an experiment and build its job graph.
///
/// With `tag_version`, `git describe --tags` of `foresight-home` is stored in
/// the provenance data.
pub async fn build_workflow(
    fs: &dyn fs::FileSystem,
    config_path: &Path,
    name: &str,
    output_dir: Option<PathBuf>,
    tag_version: bool,
) -> Result<JobGraph> {
    let cfg = load_and_validate(fs, config_path)?;
    info!(config = %config_path.display(), workflow = %name, "loaded experiment");

    let foresight_home = PathBuf::from(&cfg.foresight_home);
    let mut experiment = Experiment::new(name, cfg, output_dir);

    if tag_version {
        if let Some(tag) = exec::describe_tags(&foresight_home).await {
            experiment.set_git_tag(tag);
        }
    }

    experiment.add_cbench_job()?;
    experiment.add_analysis_jobs()?;
    experiment.into_graph()
}

/// Hand `controller` to `backend`; a non-zero exit becomes an error.
pub async fn submit_controller(backend: &mut dyn SubmitBackend, controller: &Path) -> Result<()> {
    let outcome = backend.submit(controller).await?;
    if outcome.success() {
        Ok(())
    } else {
        Err(SlurmflowError::Submission(format!(
            "{} exited with {:?}",
            controller.display(),
            outcome.exit_code
        )))
    }
}

/// Simple dry-run output: print jobs, directories and dependencies.
fn print_dry_run(graph: &JobGraph) -> Result<()> {
    let names = graph.resolved_names()?;

    println!("slurmflow dry-run");
    println!("  workflow = {}", graph.name());
    println!("  output_dir = {}", graph.output_dir().display());
    println!("  controller = {}", graph.controller_path().display());
    println!();

    println!("jobs ({}):", graph.len());
    for (index, (job, name)) in graph.jobs().iter().zip(&names).enumerate() {
        println!("  - [{index}] {name}");
        println!("      dir: {}", job.execute_dir());
        println!("      exec: {} {}", job.executable(), job.arguments().join(" "));
        let parents = graph.parent_indices(index);
        if !parents.is_empty() {
            let parent_names: Vec<&str> = parents.iter().map(|&p| names[p].as_str()).collect();
            println!("      after: {:?}", parent_names);
        }
        if let Some(env) = job.environment() {
            println!("      environment: {env}");
        }
        for (key, value) in job.configurations() {
            println!("      --{key}={value}");
        }
    }

    debug!("dry-run complete (no files written)");
    Ok(())
}
