// src/exec/backend.rs

//! Pluggable submission backend.
//!
//! The CLI talks to a `SubmitBackend` instead of spawning a shell directly,
//! so tests can record submissions without a scheduler installed.
//!
//! Submission is fire-and-forget from the scheduler's point of view: the
//! controller's own exit status is reported back, but nothing here waits
//! for or inspects the jobs it queued.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{info, warn};

use crate::errors::{Result, SlurmflowError};

/// Exit status of a controller run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// `None` when the shell was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl SubmitOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Trait abstracting how a controller script is run.
pub trait SubmitBackend: Send {
    fn submit<'a>(
        &'a mut self,
        controller: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<SubmitOutcome>> + Send + 'a>>;
}

/// Runs the controller with a shell (`bash` by default).
///
/// The child's working directory is the controller's directory, so the
/// relative job paths inside the script resolve without touching the
/// current directory of this process.
#[derive(Debug, Clone)]
pub struct ShellSubmitter {
    shell: PathBuf,
}

impl Default for ShellSubmitter {
    fn default() -> Self {
        Self {
            shell: PathBuf::from("bash"),
        }
    }
}

impl ShellSubmitter {
    pub fn with_shell(shell: impl Into<PathBuf>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl SubmitBackend for ShellSubmitter {
    fn submit<'a>(
        &'a mut self,
        controller: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<SubmitOutcome>> + Send + 'a>> {
        Box::pin(async move {
            let work_dir = controller
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            // The shell resolves its script argument against `work_dir`.
            let script = controller
                .file_name()
                .map(Path::new)
                .unwrap_or(controller);

            info!(
                controller = %controller.display(),
                shell = %self.shell.display(),
                "submitting workflow"
            );

            let status = Command::new(&self.shell)
                .arg(script)
                .current_dir(work_dir)
                .stdin(Stdio::null())
                .status()
                .await
                .map_err(|e| {
                    SlurmflowError::Submission(format!(
                        "spawning {} for {}: {e}",
                        self.shell.display(),
                        controller.display()
                    ))
                })?;

            let outcome = SubmitOutcome {
                exit_code: status.code(),
            };
            if outcome.success() {
                info!(controller = %controller.display(), "controller finished");
            } else {
                warn!(
                    controller = %controller.display(),
                    exit_code = ?outcome.exit_code,
                    "controller exited unsuccessfully"
                );
            }
            Ok(outcome)
        })
    }
}
