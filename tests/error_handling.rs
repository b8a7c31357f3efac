// tests/error_handling.rs

use std::io::Write;

use slurmflow::config::load_and_validate;
use slurmflow::dag::{Job, JobGraph};
use slurmflow::errors::SlurmflowError;
use slurmflow::fs::mock::MockFileSystem;
use slurmflow::fs::RealFileSystem;
use tempfile::NamedTempFile;

fn job(name: &str) -> Job {
    Job::new(name, "work", "true", Vec::<String>::new())
}

#[test]
fn parent_from_another_graph_is_rejected_before_any_write() {
    let fs = MockFileSystem::new();

    let mut other = JobGraph::new("other", "/other");
    let foreign = other.register(job("x")).unwrap();

    let mut graph = JobGraph::new("wf", "/out");
    graph.register(job("a")).unwrap();

    match graph.register(job("b").with_parent(foreign)) {
        Err(SlurmflowError::Dependency(msg)) => {
            assert!(msg.contains("'b'"));
            assert!(msg.contains("different workflow"));
        }
        Err(e) => panic!("Expected Dependency error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }

    assert_eq!(graph.len(), 1);
    assert!(fs.files().is_empty());
}

#[test]
fn parent_registered_later_in_a_sibling_graph_is_rejected() {
    // Same index, different graph: index 1 exists in `other` only.
    let mut other = JobGraph::new("other", "/other");
    other.register(job("x")).unwrap();
    let later = other.register(job("y")).unwrap();

    let mut graph = JobGraph::new("wf", "/out");
    graph.register(job("a")).unwrap();
    graph.register(job("b")).unwrap();

    let err = graph.register(job("c").with_parent(later)).unwrap_err();
    assert!(matches!(err, SlurmflowError::Dependency(_)));
}

#[test]
fn duplicate_explicit_name_is_rejected() {
    let mut graph = JobGraph::new("wf", "/out");
    graph.register(job("cbench")).unwrap();

    match graph.register(job("cbench")) {
        Err(SlurmflowError::DuplicateJob(name)) => assert_eq!(name, "cbench"),
        other => panic!("Expected DuplicateJob, got: {:?}", other),
    }
}

#[test]
fn malformed_json_returns_json_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "project-home": "/p/", "#).unwrap();

    let result = load_and_validate(&RealFileSystem, file.path());
    assert!(matches!(result, Err(SlurmflowError::Json(_))), "got {result:?}");
}

#[test]
fn missing_required_section_returns_json_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
    "project-home": "/p/",
    "wflow-path": "run",
    "foresight-home": "/f/",
    "input": {{ "filename": "/d/x.f32" }}
}}"#
    )
    .unwrap();

    match load_and_validate(&RealFileSystem, file.path()) {
        Err(SlurmflowError::Json(e)) => assert!(e.to_string().contains("cbench")),
        other => panic!("Expected Json error, got: {:?}", other),
    }
}

#[test]
fn empty_cbench_path_returns_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
    "project-home": "/p/",
    "wflow-path": "run",
    "foresight-home": "/f/",
    "input": {{ "filename": "/d/x.f32" }},
    "cbench": {{ "path": "", "output": {{ "output-decompressed-location": "dec" }} }}
}}"#
    )
    .unwrap();

    match load_and_validate(&RealFileSystem, file.path()) {
        Err(SlurmflowError::Config(msg)) => assert!(msg.contains("cbench.path")),
        other => panic!("Expected Config error, got: {:?}", other),
    }
}

#[test]
fn missing_file_is_reported() {
    let result = load_and_validate(&RealFileSystem, "/definitely/not/here.json");
    assert!(matches!(result, Err(SlurmflowError::Other(_))));
}
