//! Build-time manifest reconciler.
//!
//! Brings one provider's declarations in the project descriptor, and the
//! mirrored copies under the project directory, in line with a scan:
//!
//! 1. **Purge**: declarations under `filestorage\defaultwidgets\<provider>\`
//!    that the scan no longer produces are removed along with their mirrored
//!    file. The mirrored provider directory is then deleted outright so that
//!    orphaned files and directories do not survive.
//! 2. **Embed**: every scanned asset is copied to its canonical storage
//!    path (always, even when unchanged). A missing declaration is appended;
//!    a declaration of a different element kind at the same path is dropped
//!    first.
//!
//! The descriptor is only mutated in memory; persisting it is the caller's
//! job and should happen only when [`ReconcileOutcome::changed`] is set.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;

use widgetkit_core::Guid;

use crate::descriptor::Descriptor;
use crate::error::{io_err, SyncError};
use crate::paths;
use crate::scanner::ScannedAsset;

/// Outcome of embedding a single asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedResult {
    /// A new declaration was appended.
    Added { path: String },
    /// The declaration already existed; only the mirrored copy was refreshed.
    AlreadyEmbedded { path: String },
    /// Conflicting declarations of another kind were dropped, then a new
    /// declaration was appended.
    Replaced { path: String, removed: usize },
}

impl EmbedResult {
    pub fn path(&self) -> &str {
        match self {
            EmbedResult::Added { path }
            | EmbedResult::AlreadyEmbedded { path }
            | EmbedResult::Replaced { path, .. } => path,
        }
    }
}

/// Result of reconciling one provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// True if the descriptor was modified and needs saving.
    pub changed: bool,
    /// Storage paths whose declarations were purged.
    pub removed: Vec<String>,
    /// Per-asset embed outcomes, in scan order.
    pub embedded: Vec<EmbedResult>,
}

/// Reconcile `provider`'s declarations and mirrored copies against `assets`.
///
/// Assets belonging to other providers are ignored. Fails with
/// [`SyncError::MissingContainer`] before touching anything if the descriptor
/// has nowhere to add declarations.
pub fn reconcile_provider(
    project_dir: &Path,
    provider: Guid,
    descriptor: &mut Descriptor,
    assets: &[ScannedAsset],
) -> Result<ReconcileOutcome, SyncError> {
    if !descriptor.has_container() {
        return Err(SyncError::MissingContainer);
    }

    let own: Vec<&ScannedAsset> = assets
        .iter()
        .filter(|a| a.location.provider_id == provider)
        .collect();

    let mut outcome = ReconcileOutcome::default();
    purge(project_dir, provider, descriptor, &own, &mut outcome)?;
    for asset in own {
        let result = embed(project_dir, descriptor, asset, &mut outcome)?;
        outcome.embedded.push(result);
    }
    Ok(outcome)
}

fn purge(
    project_dir: &Path,
    provider: Guid,
    descriptor: &mut Descriptor,
    own: &[&ScannedAsset],
    outcome: &mut ReconcileOutcome,
) -> Result<(), SyncError> {
    let provider_path = paths::provider_storage_path(provider);
    let wanted: HashSet<String> = own.iter().map(|a| a.storage_path()).collect();

    let prefix = format!("{provider_path}{}", paths::SEPARATOR);
    let stale: Vec<String> = descriptor
        .embedded_under(&prefix)
        .into_iter()
        .filter(|path| !wanted.contains(&paths::normalize(path)))
        .collect();

    if !stale.is_empty() {
        tracing::info!(
            "found {} stale embedded file(s) for provider {}; removing",
            stale.len(),
            provider.simple()
        );
    }

    for path in stale {
        remove_file_if_present(&paths::to_fs_path(project_dir, &path))?;
        descriptor.remove_embedded(&path);
        tracing::info!("removed: {path}");
        outcome.removed.push(path);
        outcome.changed = true;
    }

    let mirror_dir = paths::to_fs_path(project_dir, &provider_path);
    if mirror_dir.is_dir() {
        std::fs::remove_dir_all(&mirror_dir).map_err(|e| io_err(&mirror_dir, e))?;
    }
    Ok(())
}

fn embed(
    project_dir: &Path,
    descriptor: &mut Descriptor,
    asset: &ScannedAsset,
    outcome: &mut ReconcileOutcome,
) -> Result<EmbedResult, SyncError> {
    let path = asset.storage_path();
    let dest = paths::to_fs_path(project_dir, &path);

    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    std::fs::copy(&asset.source, &dest).map_err(|e| io_err(&asset.source, e))?;

    if descriptor.has_embedded(&path) {
        tracing::debug!("file already embedded: {path}");
        return Ok(EmbedResult::AlreadyEmbedded { path });
    }

    let removed = descriptor.remove_declarations_at(&path);
    if removed > 0 {
        tracing::info!("removed {removed} existing record(s) in project for file: {path}");
    }

    descriptor.append_embedded(&path)?;
    outcome.changed = true;
    tracing::info!("added embedded resource: {path}");

    Ok(if removed > 0 {
        EmbedResult::Replaced { path, removed }
    } else {
        EmbedResult::Added { path }
    })
}

fn remove_file_if_present(path: &Path) -> Result<(), SyncError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(io_err(path, err)),
    }
}
