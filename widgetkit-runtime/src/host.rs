//! Host-side collaborators of an install.

use widgetkit_core::{AssetRecord, Guid, VersionStamp};

use crate::error::BoxError;

/// The host's installation routine.
pub trait HostInstaller {
    /// Create, update or retire installed items for `records`, given the
    /// version that was installed before. Returns an optional human-readable
    /// summary of what changed.
    fn update(
        &mut self,
        previous: VersionStamp,
        records: &[AssetRecord],
    ) -> Result<Option<String>, BoxError>;

    /// Remove every installed file belonging to `provider`.
    fn delete_all_files(&mut self, provider: Guid) -> Result<(), BoxError>;
}

/// Receives the upgrade notice posted after a successful upgrade install.
pub trait Notifier {
    fn notify(&mut self, title: &str, body: &str);
}

/// Notifier that writes notices to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, title: &str, body: &str) {
        tracing::info!(title, "{body}");
    }
}
