// src/workflow/mod.rs

//! Experiment workflows.
//!
//! An [`Experiment`] couples a validated [`ConfigFile`] with the
//! [`JobGraph`] built from it. The config is mutated while jobs are added
//! (input-file list, version tag) and becomes the graph's provenance
//! metadata in [`Experiment::into_graph`].

pub mod jobs;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{ConfigFile, InputFile};
use crate::dag::{Job, JobGraph, JobId};
use crate::errors::Result;
use crate::fs::{absolute_path, split_at_last};
use crate::script::ROOT_PLACEHOLDER;

#[derive(Debug)]
pub struct Experiment {
    config: ConfigFile,
    graph: JobGraph,
    provenance_path: String,
    cbench: Option<JobId>,
}

impl Experiment {
    /// Start an empty workflow called `name`.
    ///
    /// Scripts go to `output_dir`, or `<project-home><wflow-path>` when not
    /// given. The provenance copy always lives under the workflow root, and
    /// its path is absolute because CBench receives it as an argument.
    pub fn new(name: &str, config: ConfigFile, output_dir: Option<PathBuf>) -> Self {
        let output_dir = output_dir.unwrap_or_else(|| PathBuf::from(config.workflow_root()));
        let provenance_path = absolute_path(Path::new(&config.provenance_path(name)))
            .to_string_lossy()
            .into_owned();
        let graph = JobGraph::new(name, output_dir)
            .with_provenance_path(&provenance_path)
            .with_substitution(ROOT_PLACEHOLDER, config.foresight_home.as_str());

        Self {
            config,
            graph,
            provenance_path,
            cbench: None,
        }
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    pub fn graph(&self) -> &JobGraph {
        &self.graph
    }

    pub fn provenance_path(&self) -> &str {
        &self.provenance_path
    }

    pub fn set_git_tag(&mut self, tag: impl Into<String>) {
        self.config.set_git_tag(tag);
    }

    /// Register a caller-built job.
    pub fn add_job(&mut self, job: Job) -> Result<JobId> {
        self.graph.register(job)
    }

    /// Add the CBench sweep job and refresh `pat.input-files`.
    pub fn add_cbench_job(&mut self) -> Result<JobId> {
        let job = jobs::cbench_job(&self.config, &self.provenance_path);
        let id = self.graph.register(job)?;
        self.cbench = Some(id);
        self.fill_input_files();
        Ok(id)
    }

    /// Add one analysis job per configured analytic, each after CBench.
    pub fn add_analysis_jobs(&mut self) -> Result<Vec<JobId>> {
        let built = jobs::analysis_jobs(&self.config, &self.provenance_path, self.cbench);
        if built.is_empty() {
            debug!("no analysis jobs configured");
        }
        built.into_iter().map(|job| self.graph.register(job)).collect()
    }

    /// Rebuild `pat.input-files`: the original input first, then the
    /// decompressed output of every compressor.
    pub fn fill_input_files(&mut self) {
        let base = self.config.workflow_root();
        let original = self.config.input.filename.clone();
        let (_, file_name) = split_at_last(&original, '/');
        let decompressed_dir = format!(
            "{base}/cbench/{}",
            self.config.cbench.output.output_decompressed_location
        );

        let mut files = vec![InputFile {
            output_prefix: "orig".to_string(),
            path: original.clone(),
        }];
        files.extend(self.config.compressors.iter().map(|c| InputFile {
            output_prefix: c.output_prefix.clone(),
            path: format!("{decompressed_dir}/{}__{file_name}", c.output_prefix),
        }));

        info!(count = files.len(), "filled analysis input files");
        self.config.pat_mut().input_files = files;
    }

    /// Finish construction: the current config becomes the provenance data.
    pub fn into_graph(self) -> Result<JobGraph> {
        let mut graph = self.graph;
        graph.set_metadata(self.config.to_json()?);
        Ok(graph)
    }
}
