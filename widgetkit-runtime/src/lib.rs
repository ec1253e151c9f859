//! # widgetkit-runtime
//!
//! Install-time reconciliation of the generated manifest listing against a
//! live content store.
//!
//! A [`FactoryDefaultProvider`] owns the listing filtered to its id. On
//! install it stamps store files missing from the listing as deleted records
//! and hands everything to a [`HostInstaller`], which decides per record
//! whether to create, update or retire the installed item.

pub mod deletions;
pub mod error;
pub mod host;
pub mod installer;
pub mod provider;
pub mod resources;
pub mod store;

pub use deletions::detect_deleted;
pub use error::{BoxError, RuntimeError};
pub use host::{HostInstaller, LogNotifier, Notifier};
pub use installer::StoreInstaller;
pub use provider::{FactoryDefaultProvider, InstallOutcome};
pub use resources::{MirrorResources, ResourceSource};
pub use store::{ContentStore, DirectoryStore, StoreFile};
