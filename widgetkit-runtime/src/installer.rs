//! Directory-backed host installer.
//!
//! Materializes records into a [`DirectoryStore`]: live records whose file is
//! missing are created, those newer than the previous install are
//! overwritten, and deleted records have their file removed.

use std::path::PathBuf;

use widgetkit_core::{AssetRecord, Guid, VersionStamp};

use crate::error::{io_err, BoxError, RuntimeError};
use crate::host::HostInstaller;
use crate::resources::ResourceSource;
use crate::store::DirectoryStore;

/// Installs records from a [`ResourceSource`] into a [`DirectoryStore`].
#[derive(Debug, Clone)]
pub struct StoreInstaller<R> {
    store: DirectoryStore,
    resources: R,
}

#[derive(Debug, Default)]
struct Tally {
    created: usize,
    updated: usize,
    retired: usize,
}

impl<R: ResourceSource> StoreInstaller<R> {
    pub fn new(store: DirectoryStore, resources: R) -> Self {
        Self { store, resources }
    }

    pub fn store(&self) -> &DirectoryStore {
        &self.store
    }

    fn target(&self, record: &AssetRecord) -> PathBuf {
        self.store
            .resolve(&record.store_path())
            .join(record.file_name())
    }

    fn write(&self, record: &AssetRecord, resource_path: &str) -> Result<(), RuntimeError> {
        let dest = self.target(record);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
        let mut reader = self.resources.open(resource_path)?;
        let mut file = std::fs::File::create(&dest).map_err(|e| io_err(&dest, e))?;
        std::io::copy(&mut reader, &mut file).map_err(|e| io_err(&dest, e))?;
        Ok(())
    }

    fn apply(
        &self,
        previous: VersionStamp,
        record: &AssetRecord,
        tally: &mut Tally,
    ) -> Result<(), RuntimeError> {
        let dest = self.target(record);
        match record.resource_path() {
            Some(resource_path) if !dest.exists() => {
                self.write(record, resource_path)?;
                tally.created += 1;
            }
            Some(resource_path) if record.version() > previous => {
                self.write(record, resource_path)?;
                tally.updated += 1;
            }
            Some(_) => {}
            None if dest.exists() => {
                std::fs::remove_file(&dest).map_err(|e| io_err(&dest, e))?;
                tally.retired += 1;
            }
            None => {}
        }
        Ok(())
    }
}

impl<R: ResourceSource> HostInstaller for StoreInstaller<R> {
    fn update(
        &mut self,
        previous: VersionStamp,
        records: &[AssetRecord],
    ) -> Result<Option<String>, BoxError> {
        let mut tally = Tally::default();
        for record in records {
            self.apply(previous, record, &mut tally)?;
        }

        tracing::debug!(?tally, "store install finished");
        let touched = tally.created + tally.updated + tally.retired;
        if previous.is_zero() || touched == 0 {
            return Ok(None);
        }
        Ok(Some(format!(
            "<p>{} file(s) added, {} updated, {} removed.</p>",
            tally.created, tally.updated, tally.retired
        )))
    }

    fn delete_all_files(&mut self, provider: Guid) -> Result<(), BoxError> {
        let dir = self.store.resolve(&provider.simple());
        if dir.is_dir() {
            std::fs::remove_dir_all(&dir).map_err(|e| io_err(&dir, e))?;
        }
        Ok(())
    }
}
