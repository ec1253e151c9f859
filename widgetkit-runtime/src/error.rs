//! Error types for widgetkit-runtime.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error returned by host-side collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// All errors that can arise during install or uninstall.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The content store query failed.
    #[error("content store error: {0}")]
    Store(#[source] BoxError),

    /// The host update routine failed. The host's error is the source,
    /// unchanged.
    #[error("host update failed: {0}")]
    Host(#[source] BoxError),

    /// No embedded content exists for a resource path.
    #[error("no embedded resource at {resource_path}")]
    ResourceNotFound { resource_path: String },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal of a filesystem-backed store failed.
    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Convenience constructor for [`RuntimeError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RuntimeError {
    RuntimeError::Io {
        path: path.into(),
        source,
    }
}
