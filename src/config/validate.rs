// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, SlurmflowError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = SlurmflowError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_paths(cfg)?;
    validate_compressors(cfg)?;
    validate_cbench(cfg)?;
    validate_cinema(cfg)?;
    Ok(())
}

fn ensure_paths(cfg: &RawConfigFile) -> Result<()> {
    for (key, value) in [
        ("project-home", &cfg.project_home),
        ("foresight-home", &cfg.foresight_home),
        ("input.filename", &cfg.input.filename),
    ] {
        if value.trim().is_empty() {
            return Err(SlurmflowError::Config(format!("`{key}` must not be empty")));
        }
    }
    Ok(())
}

fn validate_compressors(cfg: &RawConfigFile) -> Result<()> {
    for (i, c) in cfg.compressors.iter().enumerate() {
        if c.output_prefix.trim().is_empty() {
            return Err(SlurmflowError::Config(format!(
                "compressor #{i} has an empty `output-prefix`"
            )));
        }
    }
    Ok(())
}

fn validate_cbench(cfg: &RawConfigFile) -> Result<()> {
    if cfg.cbench.path.trim().is_empty() {
        return Err(SlurmflowError::Config(
            "`cbench.path` must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_cinema(cfg: &RawConfigFile) -> Result<()> {
    if let Some(cinema) = &cfg.cinema_plots {
        if cinema.cinema_db_name.trim().is_empty() {
            return Err(SlurmflowError::Config(
                "`cinema-plots.cinema-db-name` must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}
