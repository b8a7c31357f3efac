use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use slurmflow::errors::Result;
use slurmflow::exec::{SubmitBackend, SubmitOutcome};

/// A fake submission backend that:
/// - records which controller scripts were "submitted"
/// - reports a fixed exit code without spawning anything.
pub struct FakeSubmitter {
    submitted: Arc<Mutex<Vec<PathBuf>>>,
    exit_code: i32,
}

impl FakeSubmitter {
    pub fn new(submitted: Arc<Mutex<Vec<PathBuf>>>, exit_code: i32) -> Self {
        Self {
            submitted,
            exit_code,
        }
    }
}

impl SubmitBackend for FakeSubmitter {
    fn submit<'a>(
        &'a mut self,
        controller: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<SubmitOutcome>> + Send + 'a>> {
        let submitted = Arc::clone(&self.submitted);
        let exit_code = self.exit_code;

        Box::pin(async move {
            submitted.lock().unwrap().push(controller.to_path_buf());
            Ok(SubmitOutcome {
                exit_code: Some(exit_code),
            })
        })
    }
}
