// src/exec/git.rs

use std::path::Path;

use tokio::process::Command;
use tracing::{debug, warn};

/// `git describe --tags` of the checkout at `repo`, trimmed.
///
/// Best effort: a missing git binary, a directory that is not a checkout or
/// a repository without tags all yield `None` with a warning.
pub async fn describe_tags(repo: &Path) -> Option<String> {
    let output = match Command::new("git")
        .args(["describe", "--tags"])
        .current_dir(repo)
        .output()
        .await
    {
        Ok(output) => output,
        Err(err) => {
            warn!(repo = %repo.display(), error = %err, "could not run git describe");
            return None;
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!(repo = %repo.display(), stderr = %stderr.trim(), "git describe failed");
        return None;
    }

    let tag = String::from_utf8_lossy(&output.stdout).trim().to_string();
    debug!(repo = %repo.display(), %tag, "resolved version tag");
    (!tag.is_empty()).then_some(tag)
}
