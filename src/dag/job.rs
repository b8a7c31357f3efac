// src/dag/job.rs

//! A single schedulable unit of work.

use std::fmt;

/// Handle to a job registered with a [`JobGraph`](super::JobGraph).
///
/// Carries the owning graph's serial so a handle from one graph cannot be
/// used as a parent in another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId {
    pub(crate) graph: u64,
    pub(crate) index: usize,
}

impl JobId {
    /// Position of the job in its graph's registration order.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// Description of one batch job.
///
/// Built by the caller, then handed to [`JobGraph::register`](super::JobGraph::register).
/// `execute_dir` is relative to the graph's output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    name: Option<String>,
    execute_dir: String,
    executable: String,
    arguments: Vec<String>,
    configurations: Vec<(String, String)>,
    environment: Option<String>,
    commands: Vec<String>,
    parents: Vec<JobId>,
}

impl Job {
    pub fn new<A>(
        name: impl Into<String>,
        execute_dir: impl Into<String>,
        executable: impl Into<String>,
        arguments: A,
    ) -> Self
    where
        A: IntoIterator,
        A::Item: ToString,
    {
        let mut job = Self::unnamed(execute_dir, executable, arguments);
        job.name = Some(name.into());
        job
    }

    /// A job whose name is assigned at compile time (`job_<index>`).
    pub fn unnamed<A>(execute_dir: impl Into<String>, executable: impl Into<String>, arguments: A) -> Self
    where
        A: IntoIterator,
        A::Item: ToString,
    {
        Self {
            name: None,
            execute_dir: execute_dir.into(),
            executable: executable.into(),
            arguments: arguments.into_iter().map(|a| a.to_string()).collect(),
            configurations: Vec::new(),
            environment: None,
            commands: Vec::new(),
            parents: Vec::new(),
        }
    }

    /// Scheduler directives; one `#SBATCH --key=value` line each, in order.
    pub fn with_configurations<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.configurations = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn with_parent(mut self, parent: JobId) -> Self {
        self.parents.push(parent);
        self
    }

    pub fn with_parents(mut self, parents: impl IntoIterator<Item = JobId>) -> Self {
        self.parents.extend(parents);
        self
    }

    /// Append a shell line run before the invocation. Not validated.
    pub fn add_command(&mut self, cmd: impl Into<String>) {
        self.commands.push(cmd.into());
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn execute_dir(&self) -> &str {
        &self.execute_dir
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn configurations(&self) -> &[(String, String)] {
        &self.configurations
    }

    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn parents(&self) -> &[JobId] {
        &self.parents
    }
}
