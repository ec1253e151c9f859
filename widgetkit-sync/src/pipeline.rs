//! Build pipeline: scan → reconcile → emit → persist.

use std::path::{Path, PathBuf};

use widgetkit_core::{Guid, RecordSet};
use widgetkit_renderer::ManifestRenderer;

use crate::descriptor::Descriptor;
use crate::error::{ConfigError, SyncError};
use crate::reconcile::{reconcile_provider, ReconcileOutcome};
use crate::scanner::AssetScanner;
use crate::writer::{write_if_changed, WriteResult};

/// Inputs of one build run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Project descriptor; its directory is where mirrored copies live.
    pub project_file: PathBuf,
    /// Provider whose assets are embedded.
    pub provider_id: Guid,
    /// Source root containing `defaultwidgets/`.
    pub source_root: PathBuf,
    /// Generated listing destination.
    pub output: PathBuf,
}

impl BuildConfig {
    /// Check every input before anything is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.project_file.as_os_str().is_empty() || !self.project_file.is_file() {
            return Err(ConfigError::ProjectFileMissing {
                path: self.project_file.clone(),
            });
        }
        if self.source_root.as_os_str().is_empty() || !self.source_root.is_dir() {
            return Err(ConfigError::SourceRootMissing {
                path: self.source_root.clone(),
            });
        }
        if self.output.as_os_str().is_empty() {
            return Err(ConfigError::OutputMissing);
        }
        if self.provider_id.is_nil() {
            return Err(ConfigError::NilProvider);
        }
        Ok(())
    }

    /// Directory containing the project file.
    pub fn project_dir(&self) -> PathBuf {
        match self.project_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

/// What a build run did.
#[derive(Debug)]
pub struct BuildSummary {
    pub provider_id: Guid,
    pub reconcile: ReconcileOutcome,
    /// Number of records in the emitted listing (all providers).
    pub listed: usize,
    pub listing: WriteResult,
    /// True if the descriptor was written back.
    pub descriptor_saved: bool,
}

/// Run one full build pass for `config`.
///
/// The descriptor is saved last, and only if reconciliation changed it. Any
/// failure aborts the run; mirrored-file changes already made are not rolled
/// back.
pub fn run(config: &BuildConfig) -> Result<BuildSummary, SyncError> {
    config.validate()?;

    let mut descriptor = Descriptor::load(&config.project_file)?;
    if !descriptor.has_container() {
        return Err(SyncError::MissingContainer);
    }

    let own = AssetScanner::for_provider(&config.source_root, config.provider_id).scan()?;
    tracing::debug!(
        "scanned {} asset(s) for provider {}",
        own.len(),
        config.provider_id.simple()
    );

    let reconcile = reconcile_provider(
        &config.project_dir(),
        config.provider_id,
        &mut descriptor,
        &own,
    )?;

    // The listing covers every provider, not only the embedded one.
    let assets = AssetScanner::new(&config.source_root).scan()?;
    let records: RecordSet = assets.iter().map(|a| a.to_record()).collect();
    let listing = emit(&config.output, &records)?;

    let descriptor_saved = reconcile.changed;
    if descriptor_saved {
        descriptor.save(&config.project_file)?;
        tracing::info!("saved {}", config.project_file.display());
    }

    Ok(BuildSummary {
        provider_id: config.provider_id,
        reconcile,
        listed: records.len(),
        listing,
        descriptor_saved,
    })
}

fn emit(output: &Path, records: &RecordSet) -> Result<WriteResult, SyncError> {
    let renderer = ManifestRenderer::new()?;
    let source = renderer.render(records.as_slice())?;
    write_if_changed(output, &source)
}
