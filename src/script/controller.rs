// src/script/controller.rs

//! Controller script pieces.
//!
//! Slurm only hands out job ids at submission time, so the controller
//! captures the `sbatch` response of job `i` into `$jid<i>` and later
//! stanzas refer to those variables in their `--dependency` clause.

use std::path::Path;

use super::SUBMIT_COMMAND;

/// Shell variable holding the scheduler id of the job at `index`.
pub fn job_id_var(index: usize) -> String {
    format!("jid{index}")
}

/// `--dependency=afterok:$jid<a>:$jid<b>...` for the given parent indices,
/// or an empty string when there are none.
///
/// Indices are emitted in the order given; callers pass them sorted and
/// deduplicated.
pub fn dependency_expression(parents: &[usize]) -> String {
    if parents.is_empty() {
        return String::new();
    }
    let refs: Vec<String> = parents
        .iter()
        .map(|&i| format!("${}", job_id_var(i)))
        .collect();
    format!("--dependency=afterok:{}", refs.join(":"))
}

/// Submission stanza for one job.
///
/// `script` and `log` are paths relative to the controller's directory.
pub fn render_stanza(index: usize, name: &str, parents: &[usize], script: &Path, log: &Path) -> String {
    let var = job_id_var(index);
    let mut submit = vec![SUBMIT_COMMAND.to_string()];
    let deps = dependency_expression(parents);
    if !deps.is_empty() {
        submit.push(deps);
    }
    submit.push(format!("--output {}", log.display()));
    submit.push(script.display().to_string());

    format!(
        "\n# {name}\n{var}=$({})\n{var}=$(echo ${var} | rev | cut -f 1 -d ' ' | rev)\n",
        submit.join(" ")
    )
}

/// Extract the job id from a scheduler submission response.
///
/// Mirrors what the controller does in shell: the id is the last
/// whitespace-delimited token, whatever precedes it.
pub fn parse_job_id(response: &str) -> Option<&str> {
    response.split_whitespace().next_back()
}
