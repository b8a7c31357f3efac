use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use slurmflow::errors::SlurmflowError;
use slurmflow::exec::{ShellSubmitter, SubmitBackend};
use slurmflow::submit_controller;
use slurmflow_test_utils::fake_submitter::FakeSubmitter;
use slurmflow_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[tokio::test]
async fn fake_backend_records_controller() -> TestResult {
    init_tracing();
    let submitted = Arc::new(Mutex::new(Vec::new()));
    let mut backend = FakeSubmitter::new(Arc::clone(&submitted), 0);

    submit_controller(&mut backend, &PathBuf::from("/out/wf.sh")).await?;

    assert_eq!(*submitted.lock().unwrap(), vec![PathBuf::from("/out/wf.sh")]);
    Ok(())
}

#[tokio::test]
async fn non_zero_exit_surfaces_as_error() {
    let submitted = Arc::new(Mutex::new(Vec::new()));
    let mut backend = FakeSubmitter::new(submitted, 1);

    let err = submit_controller(&mut backend, &PathBuf::from("/out/wf.sh"))
        .await
        .unwrap_err();
    assert!(matches!(err, SlurmflowError::Submission(ref m) if m.contains("Some(1)")));
}

#[cfg(unix)]
#[tokio::test]
async fn shell_runs_controller_from_its_own_directory() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let controller = dir.path().join("wf.sh");
    std::fs::write(&controller, "pwd > where.txt\nexit 3\n")?;

    let mut backend = ShellSubmitter::with_shell("sh");
    let outcome = backend.submit(&controller).await?;

    assert_eq!(outcome.exit_code, Some(3));
    assert!(!outcome.success());
    let recorded = std::fs::read_to_string(dir.path().join("where.txt"))?;
    assert_eq!(
        std::fs::canonicalize(recorded.trim())?,
        std::fs::canonicalize(dir.path())?
    );
    Ok(())
}

#[tokio::test]
async fn missing_shell_is_a_submission_error() {
    let mut backend = ShellSubmitter::with_shell("/no/such/shell-binary");
    let err = backend
        .submit(&PathBuf::from("/tmp/wf.sh"))
        .await
        .unwrap_err();
    assert!(matches!(err, SlurmflowError::Submission(_)));
}

#[cfg(unix)]
#[tokio::test]
async fn shell_runs_controller_given_by_relative_path() -> TestResult {
    init_tracing();
    let cwd = std::env::current_dir()?;
    let dir = tempfile::tempdir_in(&cwd)?;
    std::fs::write(dir.path().join("wf.sh"), "echo ran > marker.txt\n")?;

    let relative = dir.path().strip_prefix(&cwd)?.join("wf.sh");
    assert!(relative.is_relative());

    let mut backend = ShellSubmitter::with_shell("sh");
    let outcome = backend.submit(&relative).await?;

    assert_eq!(outcome.exit_code, Some(0));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("marker.txt"))?.trim(),
        "ran"
    );
    Ok(())
}
