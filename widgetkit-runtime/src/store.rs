//! Content store seam and a directory-backed implementation.
//!
//! Store paths are `/`-separated directory paths relative to the store root
//! (`<provider>[/<widget>][/<theme>]`); the file name is kept separately.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{io_err, RuntimeError};

/// A file in the live content store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreFile {
    /// Directory path relative to the store root, `/`-separated.
    pub path: String,
    pub file_name: String,
}

impl StoreFile {
    pub fn new(path: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            file_name: file_name.into(),
        }
    }
}

/// Read-side query interface of the live content store.
pub trait ContentStore {
    /// Every file at or below `prefix`, recursively.
    fn list_files(&self, prefix: &str) -> Result<Vec<StoreFile>, RuntimeError>;
}

/// A content store laid out as plain directories under `root`.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem location of a store directory path.
    pub fn resolve(&self, store_path: &str) -> PathBuf {
        store_path
            .split('/')
            .filter(|s| !s.is_empty())
            .fold(self.root.clone(), |acc, s| acc.join(s))
    }
}

impl ContentStore for DirectoryStore {
    fn list_files(&self, prefix: &str) -> Result<Vec<StoreFile>, RuntimeError> {
        let base = self.resolve(prefix);
        if !base.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&base).sort_by_file_name() {
            let entry = entry.map_err(|source| RuntimeError::Walk {
                path: base.clone(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .map_err(|_| {
                    io_err(
                        entry.path(),
                        std::io::Error::other("store entry outside store root"),
                    )
                })?;
            let Some(file_name) = relative.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let dirs: Option<Vec<&str>> = relative.parent().map_or(Some(Vec::new()), |p| {
                p.components().map(|c| c.as_os_str().to_str()).collect()
            });
            let Some(dirs) = dirs else {
                continue;
            };
            files.push(StoreFile::new(dirs.join("/"), file_name));
        }
        Ok(files)
    }
}
