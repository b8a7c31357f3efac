// src/workflow/jobs.rs

//! Job builders for the compression benchmark pipeline.

use serde_json::Value;

use crate::config::{directive_pairs, ConfigFile};
use crate::dag::{Job, JobId};

pub const CBENCH_JOB: &str = "cbench";
pub const CBENCH_DIR: &str = "cbench";
pub const ANALYSIS_DIR: &str = "analysis";

/// The single CBench job that runs the whole compressor sweep.
///
/// Its only argument is the provenance JSON, which CBench reads back.
pub fn cbench_job(cfg: &ConfigFile, provenance_path: &str) -> Job {
    let cbench = &cfg.cbench;
    let mut job = Job::new(CBENCH_JOB, CBENCH_DIR, cbench.path.as_str(), [provenance_path])
        .with_configurations(directive_pairs(cbench.configuration.as_ref()));

    if let Some(env) = &cbench.evn_path {
        job = job.with_environment(format!("{}{}", cfg.foresight_home, env));
    }
    job.add_command("mkdir -p logs");
    job
}

/// One job per entry of `pat.analysis-tool.analytics`, in document order.
///
/// Empty when the analysis tool has no `path`. Each job depends on `parent`
/// when given.
pub fn analysis_jobs(cfg: &ConfigFile, provenance_path: &str, parent: Option<JobId>) -> Vec<Job> {
    let Some(pat) = &cfg.pat else {
        return Vec::new();
    };
    let Some(tool) = &pat.analysis_tool else {
        return Vec::new();
    };
    let Some(executable) = &tool.path else {
        return Vec::new();
    };

    tool.analytics
        .iter()
        .map(|(name, entry)| {
            let configuration = entry.get("configuration").and_then(Value::as_object);
            let mut job = Job::new(
                name.as_str(),
                ANALYSIS_DIR,
                executable.as_str(),
                [provenance_path, name.as_str()],
            )
            .with_configurations(directive_pairs(configuration))
            .with_parents(parent);

            if let Some(env) = &pat.evn_path {
                job = job.with_environment(env.as_str());
            }
            job
        })
        .collect()
}
