// src/dag/graph.rs

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use tracing::{debug, info};

use super::job::{Job, JobId};
use crate::errors::{Result, SlurmflowError};
use crate::fs::{self, FileSystem};
use crate::script::{self, SHEBANG};

static NEXT_GRAPH_SERIAL: AtomicU64 = AtomicU64::new(1);

/// Ordered collection of jobs that compiles into Slurm scripts.
///
/// Jobs are owned by the graph; dependencies are [`JobId`]s into this
/// arena. Registration order is submission order, and [`register`]
/// only accepts parents that are already registered, so every edge points
/// backwards and the graph is acyclic by construction.
///
/// A clone is a separate workflow: it gets its own serial, so handles from
/// the original are not accepted by the copy.
///
/// [`register`]: JobGraph::register
#[derive(Debug)]
pub struct JobGraph {
    serial: u64,
    name: String,
    output_dir: PathBuf,
    provenance_path: PathBuf,
    metadata: Value,
    substitutions: Vec<(String, String)>,
    jobs: Vec<Job>,
}

impl Clone for JobGraph {
    fn clone(&self) -> Self {
        Self {
            serial: NEXT_GRAPH_SERIAL.fetch_add(1, Ordering::Relaxed),
            name: self.name.clone(),
            output_dir: self.output_dir.clone(),
            provenance_path: self.provenance_path.clone(),
            metadata: self.metadata.clone(),
            substitutions: self.substitutions.clone(),
            jobs: self.jobs.clone(),
        }
    }
}

/// Files written by [`JobGraph::compile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledWorkflow {
    pub controller: PathBuf,
    pub provenance: PathBuf,
    /// One wrapper per job, in registration order.
    pub wrappers: Vec<PathBuf>,
}

impl JobGraph {
    /// Empty graph writing into `output_dir`.
    ///
    /// The provenance file defaults to `<output_dir>/<name>.json`. Relative
    /// paths are anchored at the current directory here, since job scripts
    /// run from wherever the scheduler starts them.
    pub fn new(name: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        let name = name.into();
        let output_dir = fs::absolute_path(&output_dir.into());
        let provenance_path = output_dir.join(format!("{name}.json"));
        Self {
            serial: NEXT_GRAPH_SERIAL.fetch_add(1, Ordering::Relaxed),
            name,
            output_dir,
            provenance_path,
            metadata: Value::Null,
            substitutions: Vec::new(),
            jobs: Vec::new(),
        }
    }

    pub fn with_provenance_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.provenance_path = fs::absolute_path(&path.into());
        self
    }

    /// Replace `placeholder` with `value` in every job's invocation line.
    pub fn with_substitution(mut self, placeholder: impl Into<String>, value: impl Into<String>) -> Self {
        self.substitutions.push((placeholder.into(), value.into()));
        self
    }

    /// Caller-owned document persisted verbatim as the provenance file.
    pub fn set_metadata(&mut self, metadata: Value) {
        self.metadata = metadata;
    }

    /// Append a job. Returns the handle dependents use as their parent.
    ///
    /// Fails when a parent was not registered with this graph before `job`,
    /// or when the job's explicit name is already taken.
    pub fn register(&mut self, job: Job) -> Result<JobId> {
        let label = job.name().unwrap_or("<unnamed>");

        for parent in job.parents() {
            if parent.graph != self.serial {
                return Err(SlurmflowError::Dependency(format!(
                    "job '{label}' depends on {parent} from a different workflow"
                )));
            }
            if parent.index >= self.jobs.len() {
                return Err(SlurmflowError::Dependency(format!(
                    "job '{label}' depends on {parent} which is not registered yet ({} jobs registered)",
                    self.jobs.len()
                )));
            }
        }

        if let Some(name) = job.name() {
            if self.jobs.iter().any(|j| j.name() == Some(name)) {
                return Err(SlurmflowError::DuplicateJob(name.to_string()));
            }
        }

        let id = JobId {
            graph: self.serial,
            index: self.jobs.len(),
        };
        debug!(job = %label, index = id.index, parents = job.parents().len(), "registered job");
        self.jobs.push(job);
        Ok(id)
    }

    pub fn job(&self, id: JobId) -> Option<&Job> {
        if id.graph != self.serial {
            return None;
        }
        self.jobs.get(id.index)
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn metadata(&self) -> &Value {
        &self.metadata
    }

    pub fn controller_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.sh", self.name))
    }

    /// Final job names: explicit ones as given, others `job_<index>`.
    ///
    /// Fails if two jobs end up with the same name (an explicit `job_3`
    /// colliding with the generated one, for instance).
    pub fn resolved_names(&self) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        let mut names = Vec::with_capacity(self.jobs.len());
        for (index, job) in self.jobs.iter().enumerate() {
            let name = job
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("job_{index}"));
            if !seen.insert(name.clone()) {
                return Err(SlurmflowError::DuplicateJob(name));
            }
            names.push(name);
        }
        Ok(names)
    }

    /// Sorted, deduplicated parent indices of the job at `index`.
    pub fn parent_indices(&self, index: usize) -> Vec<usize> {
        let mut parents: Vec<usize> = self
            .jobs
            .get(index)
            .map(|j| j.parents().iter().map(JobId::index).collect())
            .unwrap_or_default();
        parents.sort_unstable();
        parents.dedup();
        parents
    }

    /// Write the provenance file, one wrapper per job and the controller.
    ///
    /// Names are resolved before anything touches disk. Directory creation
    /// problems are logged and ignored; failing to write a file is an error.
    /// Running it again overwrites the same paths.
    pub fn compile(&self, fs: &dyn FileSystem) -> Result<CompiledWorkflow> {
        let names = self.resolved_names()?;

        fs::create_folder(fs, &self.output_dir);
        if let Some(dir) = self.provenance_path.parent() {
            fs::create_folder(fs, dir);
        }
        fs::write_json_pretty(fs, &self.provenance_path, &self.metadata)?;

        let mut controller = format!("{SHEBANG}\ncd \"$(dirname \"$0\")\"\n");
        let mut wrappers = Vec::with_capacity(self.jobs.len());

        for (index, (job, name)) in self.jobs.iter().zip(&names).enumerate() {
            let parents = self.parent_indices(index);
            if let Some(&bad) = parents.iter().find(|&&p| p >= index) {
                return Err(SlurmflowError::Dependency(format!(
                    "job '{name}' (#{index}) depends on #{bad}, which is not compiled before it"
                )));
            }

            let exec_dir = self.output_dir.join(job.execute_dir());
            fs::create_folder(fs, &exec_dir);

            let script_name = format!("{name}.sh");
            let wrapper_path = exec_dir.join(&script_name);
            let text = script::render_wrapper(job, &self.output_dir, &self.substitutions);
            fs.write(&wrapper_path, text.as_bytes())?;

            let rel_dir = Path::new(job.execute_dir());
            controller.push_str(&script::render_stanza(
                index,
                name,
                &parents,
                &rel_dir.join(&script_name),
                &rel_dir.join(format!("{name}.slurm.out")),
            ));

            debug!(job = %name, index, ?parents, path = %wrapper_path.display(), "wrote job script");
            wrappers.push(wrapper_path);
        }

        let controller_path = self.controller_path();
        fs.write(&controller_path, controller.as_bytes())?;

        info!(
            workflow = %self.name,
            jobs = self.jobs.len(),
            controller = %controller_path.display(),
            "compiled workflow"
        );

        Ok(CompiledWorkflow {
            controller: controller_path,
            provenance: self.provenance_path.clone(),
            wrappers,
        })
    }
}
