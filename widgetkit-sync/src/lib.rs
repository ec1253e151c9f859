//! # widgetkit-sync
//!
//! Build-time reconciliation of a widget asset tree against a project
//! descriptor and its mirrored embedded copies.
//!
//! Call [`pipeline::run`] for the full scan → reconcile → emit pass, or use
//! the pieces directly: [`AssetScanner`], [`Descriptor`],
//! [`reconcile_provider`] and [`write_if_changed`].

pub mod descriptor;
pub mod error;
pub mod paths;
pub mod pipeline;
pub mod reconcile;
pub mod scanner;
pub mod writer;

pub use descriptor::{Declaration, Descriptor, DescriptorError};
pub use error::{ConfigError, SyncError};
pub use pipeline::{BuildConfig, BuildSummary};
pub use reconcile::{reconcile_provider, EmbedResult, ReconcileOutcome};
pub use scanner::{AssetScanner, ScannedAsset};
pub use writer::{write_if_changed, WriteResult};
