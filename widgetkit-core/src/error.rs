//! Error types for widgetkit-core.

use thiserror::Error;

/// Errors raised while interpreting core values from external input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The string is not a GUID in any accepted form.
    #[error("'{value}' is not a valid GUID")]
    InvalidGuid { value: String },
}
