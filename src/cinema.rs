// src/cinema.rs

//! Cinema database creation.
//!
//! A cinema database is a plain directory: the plot images, the data table
//! renamed to `data.csv`, and the experiment description as `wflow.json`.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::ConfigFile;
use crate::errors::{Result, SlurmflowError};
use crate::fs::{self, FileSystem};

pub const DATA_FILE: &str = "data.csv";
pub const PROVENANCE_FILE: &str = "wflow.json";

/// What happened while filling a cinema database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CinemaReport {
    pub database: PathBuf,
    pub copied: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

impl CinemaReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Copy `images`, `csv_file` and `provenance` into `database`.
///
/// A copy that fails is logged and recorded in the report; the remaining
/// files are still copied.
pub fn create_cinema_database(
    fs: &dyn FileSystem,
    database: &Path,
    csv_file: &Path,
    images: &[PathBuf],
    provenance: &Path,
) -> CinemaReport {
    fs::create_folder(fs, database);

    let mut report = CinemaReport {
        database: database.to_path_buf(),
        ..CinemaReport::default()
    };

    let mut copy = |from: &Path, to: PathBuf| match fs.copy(from, &to) {
        Ok(()) => report.copied.push(to),
        Err(err) => {
            warn!(from = %from.display(), to = %to.display(), error = %err, "copy into cinema database failed");
            report.failed.push(from.to_path_buf());
        }
    };

    for img in images {
        match img.file_name() {
            Some(file_name) => copy(img, database.join(file_name)),
            None => warn!(path = %img.display(), "skipping image path without a file name"),
        }
    }
    copy(csv_file, database.join(DATA_FILE));
    copy(provenance, database.join(PROVENANCE_FILE));

    info!(
        database = %database.display(),
        copied = report.copied.len(),
        failed = report.failed.len(),
        "created cinema database"
    );
    report
}

/// Build the cinema database for an experiment.
///
/// Layout under the workflow root: `plots/*.png`, `cinema/data.csv`, and
/// the database itself at `<cinema-db-name>.cdb`. `config_path` is the
/// experiment file copied in for provenance.
pub fn create_cinema(fs: &dyn FileSystem, cfg: &ConfigFile, config_path: &Path) -> Result<CinemaReport> {
    let cinema = cfg.cinema_plots.as_ref().ok_or_else(|| {
        SlurmflowError::Config("`cinema-plots` section is required to build a cinema database".to_string())
    })?;

    let root = PathBuf::from(cfg.workflow_root());
    let database = root.join(format!("{}.cdb", cinema.cinema_db_name));
    let plots = root.join("plots");
    let images = if fs.is_dir(&plots) {
        fs::list_files_with_extension(fs, &plots, ".png")?
    } else {
        warn!(path = %plots.display(), "plots directory missing; no images to copy");
        Vec::new()
    };
    let csv_file = root.join("cinema").join(DATA_FILE);

    Ok(create_cinema_database(fs, &database, &csv_file, &images, config_path))
}
