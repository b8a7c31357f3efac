use std::path::{Path, PathBuf};

use serde_json::json;
use slurmflow::build_workflow;
use slurmflow::config::InputFile;
use slurmflow::fs::mock::MockFileSystem;
use slurmflow::fs::{FileSystem, RealFileSystem};
use slurmflow::workflow::Experiment;
use slurmflow_test_utils::builders::ExperimentConfigBuilder;
use slurmflow_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn cbench_job_fills_input_files() -> TestResult {
    init_tracing();
    let cfg = ExperimentConfigBuilder::new("/proj/")
        .compressor("sz_1e-3")
        .compressor("zfp_8")
        .build();

    let mut exp = Experiment::new("wf", cfg, None);
    exp.add_cbench_job()?;

    let files = &exp.config().pat.as_ref().unwrap().input_files;
    assert_eq!(
        files,
        &vec![
            InputFile {
                output_prefix: "orig".into(),
                path: "/data/nyx/density.f32".into(),
            },
            InputFile {
                output_prefix: "sz_1e-3".into(),
                path: "/proj/run/cbench/decompressed/sz_1e-3__density.f32".into(),
            },
            InputFile {
                output_prefix: "zfp_8".into(),
                path: "/proj/run/cbench/decompressed/zfp_8__density.f32".into(),
            },
        ]
    );
    Ok(())
}

#[test]
fn cbench_wrapper_carries_directives_environment_and_provenance_argument() -> TestResult {
    let fs = MockFileSystem::new();
    let cfg = ExperimentConfigBuilder::new("/proj/")
        .cbench_directive("nodes", json!(4))
        .cbench_directive("partition", json!("scaling"))
        .cbench_env("env/cbench.sh")
        .build();

    let mut exp = Experiment::new("nyx", cfg, None);
    exp.add_cbench_job()?;
    let graph = exp.into_graph()?;
    let compiled = graph.compile(&fs)?;

    assert_eq!(compiled.controller, PathBuf::from("/proj/run/nyx.sh"));
    assert_eq!(compiled.provenance, PathBuf::from("/proj/run/nyx.json"));

    let wrapper = fs.read_to_string(Path::new("/proj/run/cbench/cbench.sh"))?;
    let lines: Vec<&str> = wrapper.lines().collect();
    assert_eq!(lines[1], "#SBATCH --nodes=4");
    assert_eq!(lines[2], "#SBATCH --partition=scaling");
    assert!(lines.contains(&"mkdir -p logs"));
    assert!(lines.contains(&"source /opt/foresight/env/cbench.sh"));
    assert!(lines.contains(&"build/CBench /proj/run/nyx.json"));
    Ok(())
}

#[test]
fn relative_project_home_gives_cbench_an_absolute_provenance_path() -> TestResult {
    let fs = MockFileSystem::new();
    let cwd = std::env::current_dir()?;
    let cfg = ExperimentConfigBuilder::new("proj/").build();

    let mut exp = Experiment::new("nyx", cfg, None);
    exp.add_cbench_job()?;
    let provenance = cwd.join("proj/run/nyx.json");
    assert_eq!(Path::new(exp.provenance_path()), provenance);

    let compiled = exp.into_graph()?.compile(&fs)?;
    assert_eq!(compiled.provenance, provenance);
    let wrapper = fs.read_to_string(&cwd.join("proj/run/cbench/cbench.sh"))?;
    assert!(wrapper
        .lines()
        .any(|l| l == format!("build/CBench {}", provenance.display())));
    Ok(())
}

#[test]
fn analysis_jobs_depend_on_cbench() -> TestResult {
    let fs = MockFileSystem::new();
    let cfg = ExperimentConfigBuilder::new("/proj/")
        .analysis_tool("$foresight-home$analysis/pat")
        .analytic("ssim", Some(json!({ "time": "00:30:00" })))
        .analytic("spectrum", None)
        .pat_env("/opt/pat/env.sh")
        .build();

    let mut exp = Experiment::new("wf", cfg, None);
    let cbench = exp.add_cbench_job()?;
    let analysis = exp.add_analysis_jobs()?;
    assert_eq!(analysis.len(), 2);
    for id in &analysis {
        assert_eq!(exp.graph().job(*id).unwrap().parents(), &[cbench]);
    }

    let compiled = exp.into_graph()?.compile(&fs)?;
    let controller = fs.read_to_string(&compiled.controller)?;
    assert!(controller.contains(
        "\n# ssim\njid1=$(sbatch --dependency=afterok:$jid0 --output analysis/ssim.slurm.out analysis/ssim.sh)\n"
    ));
    assert!(controller.contains(
        "\n# spectrum\njid2=$(sbatch --dependency=afterok:$jid0 --output analysis/spectrum.slurm.out analysis/spectrum.sh)\n"
    ));

    let ssim = fs.read_to_string(Path::new("/proj/run/analysis/ssim.sh"))?;
    assert!(ssim.contains("#SBATCH --time=00:30:00\n"));
    assert!(ssim.contains("source /opt/pat/env.sh\n"));
    assert!(ssim.contains("\n/opt/foresight/analysis/pat /proj/run/wf.json ssim\n"));
    Ok(())
}

#[test]
fn provenance_contains_filled_config_and_git_tag() -> TestResult {
    let fs = MockFileSystem::new();
    let cfg = ExperimentConfigBuilder::new("/proj/")
        .compressor("sz")
        .extra("notes", json!("calibration run"))
        .build();

    let mut exp = Experiment::new("wf", cfg, Some(PathBuf::from("/scratch/wf")));
    exp.set_git_tag("v1.2.0");
    exp.add_cbench_job()?;
    let compiled = exp.into_graph()?.compile(&fs)?;

    // Scripts follow the override; provenance stays under the workflow root.
    assert_eq!(compiled.controller, PathBuf::from("/scratch/wf/wf.sh"));
    let doc: serde_json::Value =
        serde_json::from_str(&fs.read_to_string(Path::new("/proj/run/wf.json"))?)?;
    assert_eq!(doc["git-tag"], "v1.2.0");
    assert_eq!(doc["notes"], "calibration run");
    assert_eq!(doc["pat"]["input-files"][1]["output-prefix"], "sz");
    Ok(())
}

#[test]
fn no_analysis_tool_means_no_analysis_jobs() -> TestResult {
    let cfg = ExperimentConfigBuilder::new("/proj/").build();
    let mut exp = Experiment::new("wf", cfg, None);
    exp.add_cbench_job()?;
    assert!(exp.add_analysis_jobs()?.is_empty());
    assert_eq!(exp.graph().len(), 1);
    Ok(())
}

#[tokio::test]
async fn build_workflow_from_file_on_disk() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let home = format!("{}/", dir.path().display());
    let doc = ExperimentConfigBuilder::new(&home)
        .compressor("sz")
        .analysis_tool("pat")
        .analytic("ssim", None)
        .json();
    let config_path = dir.path().join("experiment.json");
    std::fs::write(&config_path, serde_json::to_string_pretty(&doc)?)?;

    let fs = RealFileSystem;
    let graph = build_workflow(&fs, &config_path, "exp", None, false).await?;
    assert_eq!(graph.resolved_names()?, vec!["cbench", "ssim"]);

    let compiled = graph.compile(&fs)?;
    let root = dir.path().join("run");
    assert_eq!(compiled.controller, root.join("exp.sh"));
    assert!(root.join("cbench/cbench.sh").is_file());
    assert!(root.join("analysis/ssim.sh").is_file());
    assert!(root.join("exp.json").is_file());
    Ok(())
}
