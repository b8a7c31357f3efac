#![allow(dead_code)]

use serde_json::{json, Map, Value};
use slurmflow::config::{ConfigFile, RawConfigFile};

/// Builder for experiment documents to simplify test setup.
///
/// Starts from a minimal valid document rooted at `project_home`.
pub struct ExperimentConfigBuilder {
    doc: Value,
}

impl ExperimentConfigBuilder {
    pub fn new(project_home: &str) -> Self {
        Self {
            doc: json!({
                "project-home": project_home,
                "wflow-path": "run",
                "foresight-home": "/opt/foresight/",
                "input": { "filename": "/data/nyx/density.f32" },
                "compressors": [],
                "cbench": {
                    "path": "build/CBench",
                    "output": { "output-decompressed-location": "decompressed" }
                },
                "pat": { "input-files": [] }
            }),
        }
    }

    pub fn wflow_path(mut self, path: &str) -> Self {
        self.doc["wflow-path"] = json!(path);
        self
    }

    pub fn compressor(mut self, prefix: &str) -> Self {
        if let Some(list) = self.doc["compressors"].as_array_mut() {
            list.push(json!({ "output-prefix": prefix }));
        }
        self
    }

    /// Scheduler directives for the CBench job, in the given order.
    pub fn cbench_directive(mut self, key: &str, value: Value) -> Self {
        let cbench = &mut self.doc["cbench"];
        if cbench.get("configuration").is_none() {
            cbench["configuration"] = Value::Object(Map::new());
        }
        cbench["configuration"][key] = value;
        self
    }

    pub fn cbench_env(mut self, evn_path: &str) -> Self {
        self.doc["cbench"]["evn_path"] = json!(evn_path);
        self
    }

    pub fn analysis_tool(mut self, path: &str) -> Self {
        self.doc["pat"]["analysis-tool"] = json!({ "path": path, "analytics": {} });
        self
    }

    pub fn analytic(mut self, name: &str, configuration: Option<Value>) -> Self {
        let entry = match configuration {
            Some(cfg) => json!({ "configuration": cfg }),
            None => json!({}),
        };
        self.doc["pat"]["analysis-tool"]["analytics"][name] = entry;
        self
    }

    pub fn pat_env(mut self, evn_path: &str) -> Self {
        self.doc["pat"]["evn_path"] = json!(evn_path);
        self
    }

    pub fn cinema_db(mut self, name: &str) -> Self {
        self.doc["cinema-plots"] = json!({ "cinema-db-name": name });
        self
    }

    pub fn extra(mut self, key: &str, value: Value) -> Self {
        self.doc[key] = value;
        self
    }

    /// The raw JSON document, e.g. for writing to disk.
    pub fn json(&self) -> Value {
        self.doc.clone()
    }

    pub fn build(self) -> ConfigFile {
        let raw: RawConfigFile =
            serde_json::from_value(self.doc).expect("builder produced invalid document");
        ConfigFile::try_from(raw).expect("Failed to build valid config from builder")
    }
}
