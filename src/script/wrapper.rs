// src/script/wrapper.rs

use std::fmt::Write;
use std::path::Path;

use super::{DIRECTIVE_PREFIX, SHEBANG};
use crate::dag::Job;

/// Render the batch script for one job.
///
/// Layout: shebang, one directive per configuration pair (in order), `date`,
/// `mkdir -p` + `cd` into `<output_dir>/<execute_dir>`, the job's commands,
/// the optional `source` line, the invocation, and a closing `date`.
///
/// Every `(placeholder, value)` in `substitutions` is replaced in the
/// invocation line only.
pub fn render_wrapper(job: &Job, output_dir: &Path, substitutions: &[(String, String)]) -> String {
    let mut out = String::new();
    let work_dir = output_dir.join(job.execute_dir());

    line(&mut out, SHEBANG);
    for (key, value) in job.configurations() {
        line(&mut out, &format!("{DIRECTIVE_PREFIX} --{key}={value}"));
    }

    line(&mut out, "date");
    line(&mut out, &format!("mkdir -p {}", work_dir.display()));
    line(&mut out, &format!("cd {}", work_dir.display()));

    for cmd in job.commands() {
        line(&mut out, cmd);
    }

    if let Some(env) = job.environment() {
        line(&mut out, &format!("source {env}"));
    }

    line(&mut out, &substitute(&invocation(job), substitutions));
    line(&mut out, "date");
    out
}

fn invocation(job: &Job) -> String {
    let mut cmd = job.executable().to_string();
    for arg in job.arguments() {
        cmd.push(' ');
        cmd.push_str(arg);
    }
    cmd
}

fn substitute(text: &str, substitutions: &[(String, String)]) -> String {
    substitutions
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from.as_str(), to))
}

fn line(out: &mut String, text: &str) {
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{text}");
}
