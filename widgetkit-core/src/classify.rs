//! Path-shape classifier.
//!
//! An asset path below the store root has 2–4 segments, the last one being
//! the file name:
//!
//! | Segments                          | Result                          |
//! |-----------------------------------|---------------------------------|
//! | `provider/file`                   | widget definition file          |
//! | `provider/widget/file`            | supplementary file              |
//! | `provider/widget/theme/file`      | theme-scoped supplementary file |
//!
//! Every directory segment must parse as a GUID. Anything else is not an
//! asset and yields `None`. Classification never looks at extensions or
//! content.

use crate::types::{
    AssetRecord, DeletedSupplementaryFile, DeletedWidgetDefinitionFile, Guid, RecordKind,
    SupplementaryFile, VersionStamp, WidgetDefinitionFile,
};

/// Where an asset lives, as decoded from its path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetLocation {
    pub provider_id: Guid,
    pub widget_id: Option<Guid>,
    pub theme_id: Option<Guid>,
    pub file_name: String,
}

/// Classify `segments` (directories followed by the file name).
pub fn classify<S: AsRef<str>>(segments: &[S]) -> Option<AssetLocation> {
    let (file_name, dirs) = segments.split_last()?;
    let file_name = file_name.as_ref();
    if file_name.is_empty() {
        return None;
    }

    let (provider_id, widget_id, theme_id) = match dirs {
        [provider] => (Guid::parse(provider.as_ref())?, None, None),
        [provider, widget] => (
            Guid::parse(provider.as_ref())?,
            Some(Guid::parse(widget.as_ref())?),
            None,
        ),
        [provider, widget, theme] => (
            Guid::parse(provider.as_ref())?,
            Some(Guid::parse(widget.as_ref())?),
            Some(Guid::parse(theme.as_ref())?),
        ),
        _ => return None,
    };

    Some(AssetLocation {
        provider_id,
        widget_id,
        theme_id,
        file_name: file_name.to_owned(),
    })
}

impl AssetLocation {
    /// The live record kind this location maps to.
    pub fn kind(&self) -> RecordKind {
        match self.widget_id {
            None => RecordKind::WidgetDefinition,
            Some(_) => RecordKind::Supplementary,
        }
    }

    /// Canonical relative segments in 32-hex form, file name last.
    pub fn segments(&self) -> Vec<String> {
        let mut segments = vec![self.provider_id.simple()];
        if let Some(widget) = self.widget_id {
            segments.push(widget.simple());
        }
        if let Some(theme) = self.theme_id {
            segments.push(theme.simple());
        }
        segments.push(self.file_name.clone());
        segments
    }

    pub fn into_record(self, version: VersionStamp, resource_path: String) -> AssetRecord {
        match self.widget_id {
            None => AssetRecord::WidgetDefinition(WidgetDefinitionFile {
                file_name: self.file_name,
                last_modified_version: version,
                provider_id: self.provider_id,
                resource_path,
            }),
            Some(widget_id) => AssetRecord::Supplementary(SupplementaryFile {
                file_name: self.file_name,
                last_modified_version: version,
                provider_id: self.provider_id,
                widget_id,
                theme_id: self.theme_id,
                resource_path,
            }),
        }
    }

    pub fn into_deleted(self, version: VersionStamp) -> AssetRecord {
        match self.widget_id {
            None => AssetRecord::DeletedWidgetDefinition(DeletedWidgetDefinitionFile {
                file_name: self.file_name,
                last_modified_version: version,
                provider_id: self.provider_id,
            }),
            Some(widget_id) => AssetRecord::DeletedSupplementary(DeletedSupplementaryFile {
                file_name: self.file_name,
                last_modified_version: version,
                provider_id: self.provider_id,
                widget_id,
                theme_id: self.theme_id,
            }),
        }
    }
}
