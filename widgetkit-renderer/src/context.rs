//! Template context: serializable rendering payload built from records.
//!
//! String fields that land inside Rust string literals are pre-escaped here
//! (`file_name`, `resource_path` include their surrounding quotes) so the
//! template never has to know Rust's escaping rules.

use serde::{Deserialize, Serialize};

use widgetkit_core::AssetRecord;

/// Payload for the listing template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingContext {
    pub records: Vec<RecordCtx>,
}

/// One record, flattened for the template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordCtx {
    /// `widget_definition`, `supplementary`, `deleted_widget_definition` or
    /// `deleted_supplementary`.
    pub kind: String,
    /// Quoted Rust string literal.
    pub file_name: String,
    /// `[year, month, day, minute_of_day]`.
    pub version: [u32; 4],
    /// Hyphenated lowercase GUID.
    pub provider_id: String,
    pub widget_id: Option<String>,
    pub theme_id: Option<String>,
    /// Quoted Rust string literal; absent for deleted records.
    pub resource_path: Option<String>,
}

impl ListingContext {
    pub fn from_records(records: &[AssetRecord]) -> Self {
        Self {
            records: records.iter().map(RecordCtx::from_record).collect(),
        }
    }

    pub(crate) fn to_tera(&self) -> Result<tera::Context, crate::RenderError> {
        let value = serde_json::to_value(self)?;
        Ok(tera::Context::from_value(value)?)
    }
}

impl RecordCtx {
    pub fn from_record(record: &AssetRecord) -> Self {
        Self {
            kind: record.kind().to_string(),
            file_name: rust_literal(record.file_name()),
            version: record.version().components(),
            provider_id: record.provider_id().to_string(),
            widget_id: record.widget_id().map(|g| g.to_string()),
            theme_id: record.theme_id().map(|g| g.to_string()),
            resource_path: record.resource_path().map(rust_literal),
        }
    }
}

fn rust_literal(s: &str) -> String {
    format!("{s:?}")
}
