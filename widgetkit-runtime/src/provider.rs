//! Factory-default widget provider: version, install and uninstall.

use widgetkit_core::{aggregate_version, AssetRecord, Guid, RecordSet, VersionStamp};

use crate::deletions::detect_deleted;
use crate::error::RuntimeError;
use crate::host::{HostInstaller, Notifier};
use crate::store::ContentStore;

/// What an install did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The provider has no records; nothing was installed.
    NothingToDo,
    Installed {
        version: VersionStamp,
        /// Number of synthesized deleted records handed to the host.
        deleted: usize,
        summary: Option<String>,
        /// True if this replaced an earlier install and a notice was posted.
        upgraded: bool,
    },
}

/// A provider's slice of the generated manifest listing.
#[derive(Debug, Clone)]
pub struct FactoryDefaultProvider {
    id: Guid,
    name: String,
    records: RecordSet,
    version: VersionStamp,
}

impl FactoryDefaultProvider {
    /// Keep the records of `manifest` that belong to `id`.
    pub fn new(
        id: Guid,
        name: impl Into<String>,
        manifest: impl IntoIterator<Item = AssetRecord>,
    ) -> Self {
        let records: RecordSet = manifest
            .into_iter()
            .filter(|r| r.provider_id() == id)
            .collect();
        let version = aggregate_version(&records);
        Self {
            id,
            name: name.into(),
            records,
            version,
        }
    }

    pub fn id(&self) -> Guid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    /// Aggregate version; [`VersionStamp::ZERO`] means "nothing to install".
    pub fn version(&self) -> VersionStamp {
        self.version
    }

    /// Install or upgrade from `last_installed`.
    ///
    /// Store files missing from the listing are passed to the host as
    /// deleted records stamped with the provider version. Host failures are
    /// returned as-is; nothing is retried.
    pub fn install<S, H, N>(
        &self,
        last_installed: VersionStamp,
        store: &S,
        host: &mut H,
        notifier: &mut N,
    ) -> Result<InstallOutcome, RuntimeError>
    where
        S: ContentStore + ?Sized,
        H: HostInstaller + ?Sized,
        N: Notifier + ?Sized,
    {
        if self.version.is_zero() {
            return Ok(InstallOutcome::NothingToDo);
        }

        let deleted = detect_deleted(self.id, self.version, &self.records, store)?;
        let deleted_count = deleted.len();
        let mut records = self.records.clone();
        records.extend(deleted);

        let summary = host
            .update(last_installed, records.as_slice())
            .map_err(RuntimeError::Host)?;

        let upgraded = last_installed > VersionStamp::ZERO;
        if upgraded {
            notifier.notify(
                &format!("{} Upgraded", self.name),
                &format!(
                    "<p>{} has been upgraded to {}.</p>{}",
                    self.name,
                    self.version,
                    summary.as_deref().unwrap_or("")
                ),
            );
        }

        tracing::info!(
            provider = %self.id.simple(),
            version = %self.version,
            deleted = deleted_count,
            "installed factory default widgets"
        );

        Ok(InstallOutcome::Installed {
            version: self.version,
            deleted: deleted_count,
            summary,
            upgraded,
        })
    }

    /// Remove every installed file. Returns `false` when there was nothing
    /// to remove.
    pub fn uninstall<H>(&self, host: &mut H) -> Result<bool, RuntimeError>
    where
        H: HostInstaller + ?Sized,
    {
        if self.version.is_zero() {
            return Ok(false);
        }
        host.delete_all_files(self.id).map_err(RuntimeError::Host)?;
        Ok(true)
    }
}
