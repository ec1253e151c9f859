//! Deleted-file detection.

use widgetkit_core::{classify, AssetRecord, Guid, RecordSet, VersionStamp};

use crate::error::RuntimeError;
use crate::store::ContentStore;

/// Synthesize deleted records for store files under `provider` that no
/// record in `records` accounts for.
///
/// A store file matches a record when both its directory path and file name
/// are equal. Unmatched files are classified by path shape like source
/// files; files whose path does not classify are left alone. Every
/// synthesized record is stamped with `version`.
pub fn detect_deleted<S>(
    provider: Guid,
    version: VersionStamp,
    records: &RecordSet,
    store: &S,
) -> Result<Vec<AssetRecord>, RuntimeError>
where
    S: ContentStore + ?Sized,
{
    let mut deleted = Vec::new();
    for file in store.list_files(&provider.simple())? {
        if records.contains_store_file(&file.path, &file.file_name) {
            continue;
        }

        let segments: Vec<&str> = file
            .path
            .split('/')
            .filter(|s| !s.is_empty())
            .chain([file.file_name.as_str()])
            .collect();
        let Some(location) = classify(&segments) else {
            tracing::debug!("ignoring unrecognised store file {}/{}", file.path, file.file_name);
            continue;
        };
        if location.provider_id != provider {
            continue;
        }

        let record = location.into_deleted(version);
        if records.contains_key(&record.key()) {
            continue;
        }
        tracing::debug!("detected deleted file {}/{}", file.path, file.file_name);
        deleted.push(record);
    }
    Ok(deleted)
}
