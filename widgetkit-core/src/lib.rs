//! widgetkit core library: asset records, path classification, versions.
//!
//! Public API surface:
//! - [`types`]: `Guid`, `VersionStamp`, the `AssetRecord` sum type, `RecordSet`
//! - [`classify`]: path-shape classifier for store-relative asset paths
//! - [`version`]: date-based version derivation and aggregation
//! - [`error`]: [`CoreError`]

pub mod classify;
pub mod error;
pub mod types;
pub mod version;

// Generated manifest listings reach `uuid::uuid!` through this re-export so
// consumers do not need their own `uuid` dependency.
pub use uuid;

pub use classify::{classify, AssetLocation};
pub use error::CoreError;
pub use types::{
    AssetRecord, DeletedSupplementaryFile, DeletedWidgetDefinitionFile, Guid, RecordKey,
    RecordKind, RecordSet, SupplementaryFile, VersionStamp, WidgetDefinitionFile,
};
pub use version::{aggregate_version, derive_version, derive_version_from_system_time};
