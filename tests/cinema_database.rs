use std::path::{Path, PathBuf};

use slurmflow::cinema::{create_cinema, create_cinema_database};
use slurmflow::errors::SlurmflowError;
use slurmflow::fs::mock::MockFileSystem;
use slurmflow::fs::{FileSystem, RealFileSystem};
use slurmflow_test_utils::builders::ExperimentConfigBuilder;
use slurmflow_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn copies_plots_data_and_provenance() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("/proj/run/plots/ratio.png", b"png1");
    fs.add_file("/proj/run/plots/psnr.png", b"png2");
    fs.add_file("/proj/run/plots/readme.txt", b"skip");
    fs.add_file("/proj/run/cinema/data.csv", b"a,b\n1,2\n");
    fs.add_file("/proj/exp.json", b"{}");

    let cfg = ExperimentConfigBuilder::new("/proj/").cinema_db("nyx").build();
    let report = create_cinema(&fs, &cfg, Path::new("/proj/exp.json"))?;

    assert!(report.is_complete());
    assert_eq!(report.database, PathBuf::from("/proj/run/nyx.cdb"));
    assert_eq!(report.copied.len(), 4);
    assert_eq!(fs.read_to_string(Path::new("/proj/run/nyx.cdb/psnr.png"))?, "png2");
    assert_eq!(fs.read_to_string(Path::new("/proj/run/nyx.cdb/data.csv"))?, "a,b\n1,2\n");
    assert_eq!(fs.read_to_string(Path::new("/proj/run/nyx.cdb/wflow.json"))?, "{}");
    assert!(!fs.exists(Path::new("/proj/run/nyx.cdb/readme.txt")));
    Ok(())
}

#[test]
fn failed_copies_are_reported_and_the_rest_continue() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("/src/a.png", b"a");
    fs.add_file("/src/wflow.json", b"{}");

    let report = create_cinema_database(
        &fs,
        Path::new("/db.cdb"),
        Path::new("/src/missing.csv"),
        &[PathBuf::from("/src/a.png"), PathBuf::from("/src/gone.png")],
        Path::new("/src/wflow.json"),
    );

    assert!(!report.is_complete());
    assert_eq!(
        report.failed,
        vec![PathBuf::from("/src/gone.png"), PathBuf::from("/src/missing.csv")]
    );
    assert!(fs.is_file(Path::new("/db.cdb/a.png")));
    assert!(fs.is_file(Path::new("/db.cdb/wflow.json")));
    Ok(())
}

#[test]
fn cinema_section_is_required() {
    let fs = MockFileSystem::new();
    let cfg = ExperimentConfigBuilder::new("/proj/").build();
    let err = create_cinema(&fs, &cfg, Path::new("/proj/exp.json")).unwrap_err();
    assert!(matches!(err, SlurmflowError::Config(_)));
}

#[test]
fn real_filesystem_copy() -> TestResult {
    let dir = tempfile::tempdir()?;
    let root = dir.path().join("run");
    std::fs::create_dir_all(root.join("plots"))?;
    std::fs::create_dir_all(root.join("cinema"))?;
    std::fs::write(root.join("plots/one.png"), b"x")?;
    std::fs::write(root.join("cinema/data.csv"), b"c\n1\n")?;
    let config_path = dir.path().join("exp.json");
    std::fs::write(&config_path, b"{}")?;

    let cfg = ExperimentConfigBuilder::new(&format!("{}/", dir.path().display()))
        .cinema_db("db")
        .build();
    let report = create_cinema(&RealFileSystem, &cfg, &config_path)?;

    assert!(report.is_complete());
    assert!(root.join("db.cdb/one.png").is_file());
    assert_eq!(std::fs::read_to_string(root.join("db.cdb/data.csv"))?, "c\n1\n");
    Ok(())
}
