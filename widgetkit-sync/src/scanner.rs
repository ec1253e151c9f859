//! Asset tree scanner.
//!
//! Walks `<source_root>/defaultwidgets` (or one provider's subtree of it),
//! classifies every file by path shape and stamps it with a version derived
//! from its modification time. Files whose path does not classify are
//! skipped without error, as are names containing `\`, the storage-path
//! separator.
//!
//! Traversal is lazy and in file-name order. Each call to
//! [`AssetScanner::iter`] re-reads the filesystem.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use widgetkit_core::{
    classify, derive_version_from_system_time, AssetLocation, AssetRecord, Guid, VersionStamp,
};

use crate::error::{io_err, SyncError};
use crate::paths;

/// A classified source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedAsset {
    pub location: AssetLocation,
    pub version: VersionStamp,
    /// Absolute (or root-relative, as given) path of the source file.
    pub source: PathBuf,
}

impl ScannedAsset {
    /// Canonical descriptor storage path of this asset.
    pub fn storage_path(&self) -> String {
        paths::storage_path(&self.location)
    }

    /// Live record whose resource path is the canonical storage path.
    pub fn to_record(&self) -> AssetRecord {
        self.location
            .clone()
            .into_record(self.version, self.storage_path())
    }
}

/// Scans a source root, optionally restricted to one provider.
#[derive(Debug, Clone)]
pub struct AssetScanner {
    store_root: PathBuf,
    provider: Option<Guid>,
}

impl AssetScanner {
    /// Scan every provider under `<source_root>/defaultwidgets`.
    pub fn new(source_root: &Path) -> Self {
        Self {
            store_root: paths::store_root(source_root),
            provider: None,
        }
    }

    /// Scan only `<source_root>/defaultwidgets/<provider>`.
    pub fn for_provider(source_root: &Path, provider: Guid) -> Self {
        Self {
            store_root: paths::store_root(source_root),
            provider: Some(provider),
        }
    }

    /// Directory the walk starts from.
    pub fn scan_root(&self) -> PathBuf {
        match self.provider {
            Some(provider) => self.store_root.join(provider.simple()),
            None => self.store_root.clone(),
        }
    }

    /// Lazily yield every classified asset. A missing scan root yields
    /// nothing; any traversal or metadata failure is yielded as an error.
    pub fn iter(&self) -> Box<dyn Iterator<Item = Result<ScannedAsset, SyncError>> + '_> {
        let root = self.scan_root();
        if !root.is_dir() {
            tracing::debug!("no asset directory at {}", root.display());
            return Box::new(std::iter::empty());
        }

        Box::new(
            WalkDir::new(root)
                .sort_by_file_name()
                .into_iter()
                .filter_map(move |entry| match entry {
                    Ok(entry) if entry.file_type().is_file() => self.scan_entry(&entry).transpose(),
                    Ok(_) => None,
                    Err(err) => {
                        let path = err
                            .path()
                            .map(Path::to_path_buf)
                            .unwrap_or_else(|| self.store_root.clone());
                        Some(Err(SyncError::Walk { path, source: err }))
                    }
                }),
        )
    }

    /// Collect the whole scan, stopping at the first error.
    pub fn scan(&self) -> Result<Vec<ScannedAsset>, SyncError> {
        self.iter().collect()
    }

    fn scan_entry(&self, entry: &DirEntry) -> Result<Option<ScannedAsset>, SyncError> {
        let path = entry.path();
        let Some(segments) = self.relative_segments(path) else {
            tracing::debug!("skipping non-utf8 path {}", path.display());
            return Ok(None);
        };
        if segments.iter().any(|s| s.contains(paths::SEPARATOR)) {
            tracing::debug!("skipping name with a storage separator {}", path.display());
            return Ok(None);
        }
        let Some(location) = classify(&segments) else {
            tracing::debug!("skipping unrecognised asset path {}", path.display());
            return Ok(None);
        };

        let modified = entry
            .metadata()
            .map_err(|err| SyncError::Walk {
                path: path.to_path_buf(),
                source: err,
            })?
            .modified()
            .map_err(|e| io_err(path, e))?;

        Ok(Some(ScannedAsset {
            location,
            version: derive_version_from_system_time(modified),
            source: path.to_path_buf(),
        }))
    }

    fn relative_segments(&self, path: &Path) -> Option<Vec<String>> {
        let relative = path.strip_prefix(&self.store_root).ok()?;
        relative
            .components()
            .map(|c| c.as_os_str().to_str().map(str::to_owned))
            .collect()
    }
}
