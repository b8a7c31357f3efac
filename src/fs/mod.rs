// src/fs/mod.rs

//! Filesystem access for script generation and archive copies.
//!
//! Everything that touches disk goes through [`FileSystem`], so the compiler
//! can be exercised against [`mock::MockFileSystem`] in tests. Paths are
//! always composed explicitly; nothing here changes the process working
//! directory.

use std::fmt::Debug;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

pub mod mock;

/// Abstract filesystem interface.
pub trait FileSystem: Send + Sync + Debug {
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Write `contents` to `path`, creating parent directories as needed.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn remove_dir_all(&self, path: &Path) -> Result<()>;

    /// Copy a file; `to` is the full destination path, not a directory.
    fn copy(&self, from: &Path, to: &Path) -> Result<()>;

    fn exists(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;

    /// Return a list of entries in a directory.
    /// Returns full paths.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("reading file {:?}", path))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating dir {:?}", parent))?;
            }
        }
        let mut file =
            fs::File::create(path).with_context(|| format!("creating file {:?}", path))?;
        file.write_all(contents)
            .with_context(|| format!("writing to file {:?}", path))?;
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).with_context(|| format!("creating dir {:?}", path))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        fs::remove_dir_all(path).with_context(|| format!("removing dir {:?}", path))
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<()> {
        fs::copy(from, to)
            .map(|_| ())
            .with_context(|| format!("copying {:?} to {:?}", from, to))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).with_context(|| format!("reading dir {:?}", path))? {
            let entry = entry?;
            entries.push(entry.path());
        }
        Ok(entries)
    }
}

/// Create `path` (and its parents) if it does not exist yet.
///
/// Failures are logged and swallowed; callers continue with whatever state
/// the directory is in. Returns whether the directory exists afterwards.
pub fn create_folder(fs: &dyn FileSystem, path: &Path) -> bool {
    if fs.is_dir(path) {
        return true;
    }
    match fs.create_dir_all(path) {
        Ok(()) => {
            info!(path = %path.display(), "created directory");
            true
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "creation of directory failed");
            false
        }
    }
}

/// Remove `path` recursively if it exists. Failures are logged, not returned.
pub fn delete_folder(fs: &dyn FileSystem, path: &Path) -> bool {
    if !fs.exists(path) {
        warn!(path = %path.display(), "directory to delete does not exist");
        return false;
    }
    match fs.remove_dir_all(path) {
        Ok(()) => {
            info!(path = %path.display(), "deleted directory");
            true
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "deletion of directory failed");
            false
        }
    }
}

/// Recursively list files under `folder` whose name ends with `extension`.
///
/// The result is sorted so callers get a stable copy order.
pub fn list_files_with_extension(
    fs: &dyn FileSystem,
    folder: &Path,
    extension: &str,
) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let mut pending = vec![folder.to_path_buf()];

    while let Some(dir) = pending.pop() {
        for entry in fs.read_dir(&dir)? {
            if fs.is_dir(&entry) {
                pending.push(entry);
            } else if entry
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(extension))
            {
                found.push(entry);
            }
        }
    }

    found.sort();
    Ok(found)
}

/// Serialize `value` as JSON with four-space indentation and write it.
pub fn write_json_pretty<T: Serialize + ?Sized>(
    fs: &dyn FileSystem,
    path: &Path,
    value: &T,
) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .with_context(|| format!("serializing JSON for {:?}", path))?;
    fs.write(path, &buf)
}

/// `path` made absolute against the current directory, without touching
/// the filesystem. Falls back to `path` unchanged if the current directory
/// cannot be read (or `path` is empty).
pub fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Split `s` right after the last occurrence of `sep`.
///
/// `("a/b/c.bin", '/')` becomes `("a/b/", "c.bin")`; without a separator the
/// head is empty.
pub fn split_at_last(s: &str, sep: char) -> (&str, &str) {
    match s.rfind(sep) {
        Some(k) => s.split_at(k + sep.len_utf8()),
        None => ("", s),
    }
}
