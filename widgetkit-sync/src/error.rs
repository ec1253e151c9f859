//! Error types for widgetkit-sync.

use std::path::PathBuf;

use thiserror::Error;

use widgetkit_renderer::RenderError;

use crate::descriptor::DescriptorError;

/// Missing or invalid build inputs. Raised before anything is mutated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("project file was not provided or does not exist: {path}")]
    ProjectFileMissing { path: PathBuf },

    #[error("source root was not provided or is not a directory: {path}")]
    SourceRootMissing { path: PathBuf },

    #[error("output filename was not provided")]
    OutputMissing,

    #[error("provider id was not provided or is the nil GUID")]
    NilProvider,
}

/// All errors that can arise from a build run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An error from the listing renderer.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Descriptor could not be parsed or serialized.
    #[error("descriptor error at {path}: {source}")]
    Descriptor {
        path: PathBuf,
        #[source]
        source: DescriptorError,
    },

    /// The descriptor has no container to add declarations to.
    #[error("couldn't add embedded resource: no <Project>/<ItemGroup> container in descriptor")]
    MissingContainer,

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed below the asset root.
    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
