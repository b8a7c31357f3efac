// src/config/model.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Side-channel for keys the tool does not interpret.
///
/// They are kept so the provenance copy written next to the workflow matches
/// what the caller supplied.
pub type Extra = Map<String, Value>;

/// Experiment description as read from JSON.
///
/// ```json
/// {
///     "project-home": "/projects/exp/",
///     "wflow-path": "run1",
///     "foresight-home": "/opt/foresight/",
///     "input": { "filename": "/data/field.f32" },
///     "compressors": [ { "output-prefix": "sz_abs_1e-3" } ],
///     "cbench": {
///         "path": "build/CBench",
///         "configuration": { "nodes": 1, "partition": "scaling" },
///         "output": { "output-decompressed-location": "decompressed" }
///     },
///     "pat": { "input-files": [] }
/// }
/// ```
///
/// Use [`ConfigFile`] (validated) everywhere outside the loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawConfigFile {
    #[serde(rename = "project-home")]
    pub project_home: String,

    #[serde(rename = "wflow-path")]
    pub wflow_path: String,

    #[serde(rename = "foresight-home")]
    pub foresight_home: String,

    pub input: InputSection,

    #[serde(default)]
    pub compressors: Vec<CompressorConfig>,

    pub cbench: CbenchSection,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pat: Option<PatSection>,

    #[serde(
        rename = "cinema-plots",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cinema_plots: Option<CinemaPlotsSection>,

    /// Version of the tool checkout that generated the workflow.
    #[serde(rename = "git-tag", default, skip_serializing_if = "Option::is_none")]
    pub git_tag: Option<String>,

    #[serde(flatten)]
    pub extra: Extra,
}

/// `input` block: the dataset every compressor runs against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSection {
    pub filename: String,

    #[serde(flatten)]
    pub extra: Extra,
}

/// One entry of `compressors`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressorConfig {
    #[serde(rename = "output-prefix")]
    pub output_prefix: String,

    #[serde(flatten)]
    pub extra: Extra,
}

/// `cbench` block: how the benchmark binary is run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CbenchSection {
    /// Executable path.
    pub path: String,

    /// Scheduler directives, in document order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<Map<String, Value>>,

    /// Environment file, relative to `foresight-home`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evn_path: Option<String>,

    pub output: CbenchOutput,

    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CbenchOutput {
    #[serde(rename = "output-decompressed-location")]
    pub output_decompressed_location: String,

    #[serde(flatten)]
    pub extra: Extra,
}

/// `pat` block: post-processing and analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatSection {
    /// Filled in by the workflow builder; anything supplied is replaced.
    #[serde(rename = "input-files", default)]
    pub input_files: Vec<InputFile>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evn_path: Option<String>,

    #[serde(
        rename = "analysis-tool",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub analysis_tool: Option<AnalysisTool>,

    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputFile {
    #[serde(rename = "output-prefix")]
    pub output_prefix: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisTool {
    /// Analysis executable; without it no analysis jobs are generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Named analytics, in document order.
    #[serde(default)]
    pub analytics: Map<String, Value>,

    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CinemaPlotsSection {
    #[serde(rename = "cinema-db-name")]
    pub cinema_db_name: String,

    #[serde(flatten)]
    pub extra: Extra,
}

/// Validated experiment description.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (see `validate.rs`).
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ConfigFile {
    inner: RawConfigFile,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(inner: RawConfigFile) -> Self {
        Self { inner }
    }

    /// `<project-home><wflow-path>`; the root every workflow path hangs off.
    ///
    /// The two strings are concatenated as-is, the same way experiment files
    /// have always been written (`project-home` carries the trailing slash).
    pub fn workflow_root(&self) -> String {
        format!("{}{}", self.inner.project_home, self.inner.wflow_path)
    }

    /// Location of the provenance copy for a workflow called `name`.
    pub fn provenance_path(&self, name: &str) -> String {
        format!("{}/{}.json", self.workflow_root(), name)
    }

    pub fn pat_mut(&mut self) -> &mut PatSection {
        self.inner.pat.get_or_insert_with(PatSection::default)
    }

    pub fn set_git_tag(&mut self, tag: impl Into<String>) {
        self.inner.git_tag = Some(tag.into());
    }

    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(&self.inner)
    }
}

impl std::ops::Deref for ConfigFile {
    type Target = RawConfigFile;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Turn a JSON object of scheduler settings into ordered `(key, value)` pairs.
///
/// String values are used verbatim; anything else is rendered as JSON
/// (`1`, `true`, ...).
pub fn directive_pairs(configuration: Option<&Map<String, Value>>) -> Vec<(String, String)> {
    configuration
        .map(|map| {
            map.iter()
                .map(|(k, v)| {
                    let value = match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (k.clone(), value)
                })
                .collect()
        })
        .unwrap_or_default()
}
