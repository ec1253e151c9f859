//! Domain types for widget asset reconciliation.
//!
//! Every asset known to the build tool or the runtime is an [`AssetRecord`].
//! Records are recomputed from scratch on every scan; nothing here is cached
//! across runs.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A 128-bit identifier for providers, widgets and themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Guid(Uuid);

impl Guid {
    /// The all-zero identifier, used as "not provided".
    pub const NIL: Guid = Guid(Uuid::nil());

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Lenient parse accepting hyphenated, 32-hex, braced and urn forms in
    /// either case. Returns `None` instead of an error so callers can treat a
    /// non-GUID path segment as "no match".
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s.trim()).ok().map(Self)
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// 32 lowercase hex digits, no separators. This is the form used for
    /// every directory segment on disk and in the content store.
    pub fn simple(&self) -> String {
        self.0.simple().to_string()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for Guid {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CoreError::InvalidGuid {
            value: s.to_owned(),
        })
    }
}

impl From<Uuid> for Guid {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Date-based four-component version: `(year, month, day, minute of day)`.
///
/// Field order gives the derived ordering, so later timestamps compare
/// greater at one-minute granularity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct VersionStamp {
    pub year: u32,
    pub month: u32,
    pub day: u32,
    pub minute_of_day: u32,
}

impl VersionStamp {
    pub const ZERO: VersionStamp = VersionStamp::new(0, 0, 0, 0);

    pub const fn new(year: u32, month: u32, day: u32, minute_of_day: u32) -> Self {
        Self {
            year,
            month,
            day,
            minute_of_day,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn components(&self) -> [u32; 4] {
        [self.year, self.month, self.day, self.minute_of_day]
    }
}

impl fmt::Display for VersionStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.year, self.month, self.day, self.minute_of_day
        )
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A widget definition file, stored directly under its provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetDefinitionFile {
    pub file_name: String,
    pub last_modified_version: VersionStamp,
    pub provider_id: Guid,
    /// Locator of the embedded copy.
    pub resource_path: String,
}

/// A supplementary file of one widget, optionally scoped to a theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementaryFile {
    pub file_name: String,
    pub last_modified_version: VersionStamp,
    pub provider_id: Guid,
    pub widget_id: Guid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_id: Option<Guid>,
    pub resource_path: String,
}

/// A widget definition file that existed in the store but is gone from the
/// source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedWidgetDefinitionFile {
    pub file_name: String,
    pub last_modified_version: VersionStamp,
    pub provider_id: Guid,
}

/// A supplementary file that existed in the store but is gone from the
/// source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedSupplementaryFile {
    pub file_name: String,
    pub last_modified_version: VersionStamp,
    pub provider_id: Guid,
    pub widget_id: Guid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_id: Option<Guid>,
}

/// Discriminant of an [`AssetRecord`], handy for logging and templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    WidgetDefinition,
    Supplementary,
    DeletedWidgetDefinition,
    DeletedSupplementary,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::WidgetDefinition => write!(f, "widget_definition"),
            RecordKind::Supplementary => write!(f, "supplementary"),
            RecordKind::DeletedWidgetDefinition => write!(f, "deleted_widget_definition"),
            RecordKind::DeletedSupplementary => write!(f, "deleted_supplementary"),
        }
    }
}

/// The unit of reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetRecord {
    WidgetDefinition(WidgetDefinitionFile),
    Supplementary(SupplementaryFile),
    DeletedWidgetDefinition(DeletedWidgetDefinitionFile),
    DeletedSupplementary(DeletedSupplementaryFile),
}

impl AssetRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            AssetRecord::WidgetDefinition(_) => RecordKind::WidgetDefinition,
            AssetRecord::Supplementary(_) => RecordKind::Supplementary,
            AssetRecord::DeletedWidgetDefinition(_) => RecordKind::DeletedWidgetDefinition,
            AssetRecord::DeletedSupplementary(_) => RecordKind::DeletedSupplementary,
        }
    }

    pub fn file_name(&self) -> &str {
        match self {
            AssetRecord::WidgetDefinition(f) => &f.file_name,
            AssetRecord::Supplementary(f) => &f.file_name,
            AssetRecord::DeletedWidgetDefinition(f) => &f.file_name,
            AssetRecord::DeletedSupplementary(f) => &f.file_name,
        }
    }

    pub fn version(&self) -> VersionStamp {
        match self {
            AssetRecord::WidgetDefinition(f) => f.last_modified_version,
            AssetRecord::Supplementary(f) => f.last_modified_version,
            AssetRecord::DeletedWidgetDefinition(f) => f.last_modified_version,
            AssetRecord::DeletedSupplementary(f) => f.last_modified_version,
        }
    }

    pub fn provider_id(&self) -> Guid {
        match self {
            AssetRecord::WidgetDefinition(f) => f.provider_id,
            AssetRecord::Supplementary(f) => f.provider_id,
            AssetRecord::DeletedWidgetDefinition(f) => f.provider_id,
            AssetRecord::DeletedSupplementary(f) => f.provider_id,
        }
    }

    /// `None` for widget definition files.
    pub fn widget_id(&self) -> Option<Guid> {
        match self {
            AssetRecord::Supplementary(f) => Some(f.widget_id),
            AssetRecord::DeletedSupplementary(f) => Some(f.widget_id),
            AssetRecord::WidgetDefinition(_) | AssetRecord::DeletedWidgetDefinition(_) => None,
        }
    }

    pub fn theme_id(&self) -> Option<Guid> {
        match self {
            AssetRecord::Supplementary(f) => f.theme_id,
            AssetRecord::DeletedSupplementary(f) => f.theme_id,
            AssetRecord::WidgetDefinition(_) | AssetRecord::DeletedWidgetDefinition(_) => None,
        }
    }

    /// `None` for deleted records, which have no embedded content.
    pub fn resource_path(&self) -> Option<&str> {
        match self {
            AssetRecord::WidgetDefinition(f) => Some(&f.resource_path),
            AssetRecord::Supplementary(f) => Some(&f.resource_path),
            AssetRecord::DeletedWidgetDefinition(_) | AssetRecord::DeletedSupplementary(_) => None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(
            self,
            AssetRecord::DeletedWidgetDefinition(_) | AssetRecord::DeletedSupplementary(_)
        )
    }

    /// Identity of the asset regardless of deletion state or version.
    pub fn key(&self) -> RecordKey {
        RecordKey {
            provider_id: self.provider_id(),
            widget_id: self.widget_id(),
            theme_id: self.theme_id(),
            file_name: self.file_name().to_owned(),
        }
    }

    /// Content-store directory of this record:
    /// `<provider>[/<widget>][/<theme>]`, all in 32-hex form.
    pub fn store_path(&self) -> String {
        let mut path = self.provider_id().simple();
        if let Some(widget) = self.widget_id() {
            path.push('/');
            path.push_str(&widget.simple());
        }
        if let Some(theme) = self.theme_id() {
            path.push('/');
            path.push_str(&theme.simple());
        }
        path
    }
}

/// Uniqueness key: `(provider, widget?, theme?, file name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub provider_id: Guid,
    pub widget_id: Option<Guid>,
    pub theme_id: Option<Guid>,
    pub file_name: String,
}

// ---------------------------------------------------------------------------
// RecordSet
// ---------------------------------------------------------------------------

/// Insertion-ordered records, unique by [`RecordKey`].
///
/// Inserting a record whose key is already present replaces the earlier
/// record at its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    records: Vec<AssetRecord>,
    index: HashMap<RecordKey, usize>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. Returns the record that was replaced, if any.
    pub fn insert(&mut self, record: AssetRecord) -> Option<AssetRecord> {
        let key = record.key();
        match self.index.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.records[pos], record)),
            None => {
                self.index.insert(key, self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    pub fn contains_key(&self, key: &RecordKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &RecordKey) -> Option<&AssetRecord> {
        self.index.get(key).map(|&pos| &self.records[pos])
    }

    /// True if some record lives at `store_path` with `file_name`.
    pub fn contains_store_file(&self, store_path: &str, file_name: &str) -> bool {
        self.records
            .iter()
            .any(|r| r.file_name() == file_name && r.store_path() == store_path)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AssetRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn as_slice(&self) -> &[AssetRecord] {
        &self.records
    }

    pub fn into_vec(self) -> Vec<AssetRecord> {
        self.records
    }
}

impl FromIterator<AssetRecord> for RecordSet {
    fn from_iter<I: IntoIterator<Item = AssetRecord>>(iter: I) -> Self {
        let mut set = RecordSet::new();
        for record in iter {
            set.insert(record);
        }
        set
    }
}

impl Extend<AssetRecord> for RecordSet {
    fn extend<I: IntoIterator<Item = AssetRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a AssetRecord;
    type IntoIter = std::slice::Iter<'a, AssetRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
