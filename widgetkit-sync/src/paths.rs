//! Storage-path helpers shared by the scanner and the reconciler.
//!
//! Descriptor storage paths are relative to the project directory and use
//! `\` separators:
//!
//! ```text
//! filestorage\defaultwidgets\<provider>[\<widget>][\<theme>]\<file>
//! ```

use std::path::{Path, PathBuf};

use widgetkit_core::{AssetLocation, Guid};

/// Directory below the source root that holds every provider subtree.
pub const STORE_DIR: &str = "defaultwidgets";

/// Leading segments of every mirrored storage path.
pub const MIRROR_ROOT: [&str; 2] = ["filestorage", STORE_DIR];

/// Separator used inside descriptor storage paths.
pub const SEPARATOR: char = '\\';

/// `<source_root>/defaultwidgets`
pub fn store_root(source_root: &Path) -> PathBuf {
    source_root.join(STORE_DIR)
}

/// `filestorage\defaultwidgets\<provider>`
pub fn provider_storage_path(provider: Guid) -> String {
    join(MIRROR_ROOT.iter().map(|s| s.to_string()).chain([provider.simple()]))
}

/// Canonical storage path of a classified asset.
pub fn storage_path(location: &AssetLocation) -> String {
    join(
        MIRROR_ROOT
            .iter()
            .map(|s| s.to_string())
            .chain(location.segments()),
    )
}

/// Normalize `/` to `\` so descriptor entries written either way compare equal.
pub fn normalize(storage_path: &str) -> String {
    storage_path.replace('/', "\\")
}

/// Resolve a storage path to a filesystem path below `project_dir`.
pub fn to_fs_path(project_dir: &Path, storage_path: &str) -> PathBuf {
    storage_path
        .split(['\\', '/'])
        .filter(|s| !s.is_empty())
        .fold(project_dir.to_path_buf(), |acc, s| acc.join(s))
}

fn join(segments: impl Iterator<Item = String>) -> String {
    segments.collect::<Vec<_>>().join(&SEPARATOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use widgetkit_core::classify;

    const PROVIDER: &str = "fa801aba84a0474692ccb418a7106c0b";
    const WIDGET: &str = "0c647246673542f9875dc8b991fe739b";

    #[test]
    fn storage_path_uses_backslashes() {
        let location = classify(&[PROVIDER, WIDGET, "ui.js"]).unwrap();
        assert_eq!(
            storage_path(&location),
            format!(r"filestorage\defaultwidgets\{PROVIDER}\{WIDGET}\ui.js")
        );
    }

    #[test]
    fn provider_prefix() {
        let provider = Guid::parse(PROVIDER).unwrap();
        assert_eq!(
            provider_storage_path(provider),
            format!(r"filestorage\defaultwidgets\{PROVIDER}")
        );
    }

    #[rstest]
    #[case::backslashes(r"filestorage\defaultwidgets\a.xml")]
    #[case::slashes("filestorage/defaultwidgets/a.xml")]
    #[case::mixed_and_doubled(r"filestorage\\defaultwidgets/a.xml")]
    fn fs_path_accepts_either_separator(#[case] storage: &str) {
        let base = Path::new("/proj");
        let expected = base.join("filestorage").join("defaultwidgets").join("a.xml");
        assert_eq!(to_fs_path(base, storage), expected);
    }
}
