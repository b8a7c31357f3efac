// src/tabular.rs

//! Minimal delimited-text readers for benchmark result tables.
//!
//! Fields are split on a single delimiter character; quoting is not
//! supported (benchmark output never quotes).

use std::path::Path;

use tracing::warn;

use crate::errors::{Result, SlurmflowError};
use crate::fs::FileSystem;

/// Every row's `col`-th field parsed as a number.
///
/// A missing file is `Ok(None)` (logged). A missing or non-numeric field is
/// a [`SlurmflowError::Csv`]; callers should treat it as fatal.
pub fn extract_column(
    fs: &dyn FileSystem,
    path: &Path,
    delimiter: char,
    col: usize,
) -> Result<Option<Vec<f64>>> {
    let Some(contents) = read_table(fs, path)? else {
        return Ok(None);
    };

    let mut values = Vec::new();
    for (row, line) in rows(&contents).enumerate() {
        let field = line.split(delimiter).nth(col).ok_or_else(|| {
            SlurmflowError::Csv(format!(
                "{}: row {row} has no column {col}",
                path.display()
            ))
        })?;
        let value = field.trim().parse::<f64>().map_err(|e| {
            SlurmflowError::Csv(format!(
                "{}: row {row}, column {col}: {field:?} is not a number ({e})",
                path.display()
            ))
        })?;
        values.push(value);
    }
    Ok(Some(values))
}

/// Raw text of the field at (`row`, `col`); `None` if the file or the cell
/// does not exist.
pub fn extract_cell(
    fs: &dyn FileSystem,
    path: &Path,
    delimiter: char,
    row: usize,
    col: usize,
) -> Result<Option<String>> {
    let Some(contents) = read_table(fs, path)? else {
        return Ok(None);
    };
    Ok(rows(&contents)
        .nth(row)
        .and_then(|line| line.split(delimiter).nth(col))
        .map(str::to_string))
}

fn read_table(fs: &dyn FileSystem, path: &Path) -> Result<Option<String>> {
    if !fs.is_file(path) {
        warn!(path = %path.display(), "table file does not exist");
        return Ok(None);
    }
    Ok(Some(fs.read_to_string(path)?))
}

fn rows(contents: &str) -> impl Iterator<Item = &str> {
    contents
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.is_empty())
}
