//! Install / uninstall behaviour against in-memory and on-disk stores.

use std::collections::BTreeMap;
use std::fs;
use std::io::{Cursor, Read};

use rstest::rstest;
use tempfile::TempDir;

use widgetkit_core::{
    AssetRecord, Guid, RecordKind, SupplementaryFile, VersionStamp, WidgetDefinitionFile,
};
use widgetkit_runtime::{
    BoxError, ContentStore, DirectoryStore, FactoryDefaultProvider, HostInstaller,
    InstallOutcome, MirrorResources, Notifier, ResourceSource, RuntimeError, StoreFile,
    StoreInstaller,
};

const PROVIDER: &str = "fa801aba84a0474692ccb418a7106c0b";
const OTHER: &str = "22222222222222222222222222222222";
const WIDGET: &str = "0c647246673542f9875dc8b991fe739b";
const THEME: &str = "424eb7d9138d417bb0ab4c8a3a8c4a4f";

fn guid(s: &str) -> Guid {
    Guid::parse(s).unwrap()
}

fn definition(provider: &str, name: &str, version: VersionStamp) -> AssetRecord {
    AssetRecord::WidgetDefinition(WidgetDefinitionFile {
        file_name: name.into(),
        last_modified_version: version,
        provider_id: guid(provider),
        resource_path: format!(r"filestorage\defaultwidgets\{provider}\{name}"),
    })
}

fn supplementary(name: &str, theme: Option<&str>, version: VersionStamp) -> AssetRecord {
    let mut resource = format!(r"filestorage\defaultwidgets\{PROVIDER}\{WIDGET}");
    if let Some(theme) = theme {
        resource.push('\\');
        resource.push_str(theme);
    }
    resource.push('\\');
    resource.push_str(name);
    AssetRecord::Supplementary(SupplementaryFile {
        file_name: name.into(),
        last_modified_version: version,
        provider_id: guid(PROVIDER),
        widget_id: guid(WIDGET),
        theme_id: theme.map(guid),
        resource_path: resource,
    })
}

const V1: VersionStamp = VersionStamp::new(2023, 11, 2, 600);
const V2: VersionStamp = VersionStamp::new(2024, 3, 9, 817);

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MemoryStore {
    files: Vec<StoreFile>,
}

impl MemoryStore {
    fn with(files: &[(&str, &str)]) -> Self {
        Self {
            files: files.iter().map(|(p, n)| StoreFile::new(*p, *n)).collect(),
        }
    }
}

impl ContentStore for MemoryStore {
    fn list_files(&self, prefix: &str) -> Result<Vec<StoreFile>, RuntimeError> {
        Ok(self
            .files
            .iter()
            .filter(|f| f.path == prefix || f.path.starts_with(&format!("{prefix}/")))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct RecordingHost {
    calls: Vec<(VersionStamp, Vec<AssetRecord>)>,
    wiped: Vec<Guid>,
    summary: Option<String>,
    fail: bool,
}

impl HostInstaller for RecordingHost {
    fn update(
        &mut self,
        previous: VersionStamp,
        records: &[AssetRecord],
    ) -> Result<Option<String>, BoxError> {
        if self.fail {
            return Err("host refused the update".into());
        }
        self.calls.push((previous, records.to_vec()));
        Ok(self.summary.clone())
    }

    fn delete_all_files(&mut self, provider: Guid) -> Result<(), BoxError> {
        if self.fail {
            return Err("host refused the delete".into());
        }
        self.wiped.push(provider);
        Ok(())
    }
}

#[derive(Default)]
struct RecordingNotifier {
    notices: Vec<(String, String)>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, title: &str, body: &str) {
        self.notices.push((title.to_owned(), body.to_owned()));
    }
}

struct MemoryResources(BTreeMap<String, Vec<u8>>);

impl ResourceSource for MemoryResources {
    fn open(&self, resource_path: &str) -> Result<Box<dyn Read + Send>, RuntimeError> {
        self.0
            .get(resource_path)
            .map(|bytes| Box::new(Cursor::new(bytes.clone())) as Box<dyn Read + Send>)
            .ok_or_else(|| RuntimeError::ResourceNotFound {
                resource_path: resource_path.to_owned(),
            })
    }
}

fn provider(manifest: Vec<AssetRecord>) -> FactoryDefaultProvider {
    FactoryDefaultProvider::new(guid(PROVIDER), "Sample Widgets", manifest)
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

#[test]
fn provider_keeps_only_its_own_records() {
    let p = provider(vec![
        definition(PROVIDER, "a.xml", V1),
        definition(OTHER, "b.xml", V2),
    ]);
    assert_eq!(p.records().len(), 1);
    assert_eq!(p.version(), V1);
}

#[test]
fn empty_provider_installs_nothing() {
    let p = provider(vec![definition(OTHER, "b.xml", V2)]);
    let mut host = RecordingHost::default();
    let mut notifier = RecordingNotifier::default();

    let outcome = p
        .install(V1, &MemoryStore::default(), &mut host, &mut notifier)
        .unwrap();
    assert_eq!(outcome, InstallOutcome::NothingToDo);
    assert!(host.calls.is_empty());
    assert!(notifier.notices.is_empty());
    assert!(!p.uninstall(&mut host).unwrap());
    assert!(host.wiped.is_empty());
}

#[test]
fn store_file_missing_from_manifest_becomes_deleted_record() {
    let p = provider(vec![
        definition(PROVIDER, "keep.xml", V1),
        supplementary("ui.js", None, V2),
    ]);
    let widget_dir = format!("{PROVIDER}/{WIDGET}");
    let store = MemoryStore::with(&[
        (PROVIDER, "keep.xml"),
        (PROVIDER, "gone.xml"),
        (widget_dir.as_str(), "ui.js"),
        (widget_dir.as_str(), "old.css"),
    ]);
    let mut host = RecordingHost::default();

    let outcome = p
        .install(VersionStamp::ZERO, &store, &mut host, &mut RecordingNotifier::default())
        .unwrap();
    assert!(matches!(outcome, InstallOutcome::Installed { deleted: 2, .. }));

    let (previous, records) = &host.calls[0];
    assert_eq!(*previous, VersionStamp::ZERO);
    assert_eq!(records.len(), 4);

    let deleted: Vec<_> = records.iter().filter(|r| r.is_deleted()).collect();
    assert_eq!(deleted.len(), 2);
    assert!(deleted.iter().all(|r| r.version() == V2));
    assert_eq!(deleted[0].kind(), RecordKind::DeletedWidgetDefinition);
    assert_eq!(deleted[0].file_name(), "gone.xml");
    assert_eq!(deleted[1].kind(), RecordKind::DeletedSupplementary);
    assert_eq!(deleted[1].file_name(), "old.css");
}

#[test]
fn theme_files_and_unrecognised_store_files() {
    let p = provider(vec![supplementary("style.css", Some(THEME), V1)]);
    let theme_dir = format!("{PROVIDER}/{WIDGET}/{THEME}");
    let images_dir = format!("{PROVIDER}/images");
    let store = MemoryStore::with(&[
        (theme_dir.as_str(), "style.css"),
        (theme_dir.as_str(), "retired.css"),
        (images_dir.as_str(), "logo.png"),
        (OTHER, "theirs.xml"),
    ]);
    let mut host = RecordingHost::default();

    p.install(VersionStamp::ZERO, &store, &mut host, &mut RecordingNotifier::default())
        .unwrap();

    let deleted: Vec<_> = host.calls[0].1.iter().filter(|r| r.is_deleted()).cloned().collect();
    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted[0].file_name(), "retired.css");
    assert_eq!(deleted[0].theme_id(), Some(guid(THEME)));
    assert_eq!(deleted[0].store_path(), theme_dir);
}

#[rstest]
#[case::first_install(VersionStamp::ZERO, false)]
#[case::upgrade(V1, true)]
fn upgrade_posts_notice(#[case] last_installed: VersionStamp, #[case] expect_notice: bool) {
    let p = provider(vec![definition(PROVIDER, "a.xml", V2)]);
    let mut host = RecordingHost {
        summary: Some("<p>1 file(s) updated.</p>".into()),
        ..RecordingHost::default()
    };
    let mut notifier = RecordingNotifier::default();

    let outcome = p
        .install(last_installed, &MemoryStore::default(), &mut host, &mut notifier)
        .unwrap();
    assert!(matches!(
        outcome,
        InstallOutcome::Installed { upgraded, .. } if upgraded == expect_notice
    ));

    if expect_notice {
        assert_eq!(
            notifier.notices,
            vec![(
                "Sample Widgets Upgraded".to_owned(),
                "<p>Sample Widgets has been upgraded to 2024.3.9.817.</p><p>1 file(s) updated.</p>"
                    .to_owned()
            )]
        );
    } else {
        assert!(notifier.notices.is_empty());
    }
}

#[test]
fn host_failure_propagates() {
    let p = provider(vec![definition(PROVIDER, "a.xml", V1)]);
    let mut host = RecordingHost {
        fail: true,
        ..RecordingHost::default()
    };
    let mut notifier = RecordingNotifier::default();

    let err = p
        .install(V1, &MemoryStore::default(), &mut host, &mut notifier)
        .expect_err("host failure");
    assert!(matches!(err, RuntimeError::Host(_)));
    assert!(err.to_string().contains("host refused the update"));
    assert!(notifier.notices.is_empty());

    assert!(matches!(p.uninstall(&mut host), Err(RuntimeError::Host(_))));
}

#[test]
fn uninstall_wipes_provider() {
    let p = provider(vec![definition(PROVIDER, "a.xml", V1)]);
    let mut host = RecordingHost::default();
    assert!(p.uninstall(&mut host).unwrap());
    assert_eq!(host.wiped, vec![guid(PROVIDER)]);
}

// ---------------------------------------------------------------------------
// StoreInstaller
// ---------------------------------------------------------------------------

fn resources(entries: &[(&AssetRecord, &str)]) -> MemoryResources {
    MemoryResources(
        entries
            .iter()
            .map(|(r, body)| (r.resource_path().unwrap().to_owned(), body.as_bytes().to_vec()))
            .collect(),
    )
}

#[test]
fn store_installer_round_trip() {
    let tmp = TempDir::new().unwrap();
    let store = DirectoryStore::new(tmp.path());

    let def = definition(PROVIDER, "a.xml", V1);
    let css = supplementary("style.css", Some(THEME), V1);
    let mut installer = StoreInstaller::new(
        store.clone(),
        resources(&[(&def, "<widget/>"), (&css, "body{}")]),
    );
    let p = provider(vec![def.clone(), css.clone()]);

    let first = p
        .install(VersionStamp::ZERO, &store, &mut installer, &mut RecordingNotifier::default())
        .unwrap();
    assert!(matches!(first, InstallOutcome::Installed { summary: None, deleted: 0, .. }));
    let css_path = tmp
        .path()
        .join(PROVIDER)
        .join(WIDGET)
        .join(THEME)
        .join("style.css");
    assert_eq!(fs::read_to_string(&css_path).unwrap(), "body{}");

    // Next release drops the stylesheet and bumps the definition.
    let def2 = definition(PROVIDER, "a.xml", V2);
    let mut installer = StoreInstaller::new(store.clone(), resources(&[(&def2, "<widget v2/>")]));
    let p2 = provider(vec![def2]);
    let mut notifier = RecordingNotifier::default();

    let second = p2.install(V1, &store, &mut installer, &mut notifier).unwrap();
    assert!(matches!(second, InstallOutcome::Installed { deleted: 1, upgraded: true, .. }));
    assert!(!css_path.exists());
    assert_eq!(
        fs::read_to_string(tmp.path().join(PROVIDER).join("a.xml")).unwrap(),
        "<widget v2/>"
    );
    assert!(notifier.notices[0].1.ends_with("<p>0 file(s) added, 1 updated, 1 removed.</p>"));

    assert!(p2.uninstall(&mut installer).unwrap());
    assert!(!tmp.path().join(PROVIDER).exists());
}

#[test]
fn store_installer_reads_mirrored_copies() {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("Samples");
    let mirrored = project
        .join("filestorage")
        .join("defaultwidgets")
        .join(PROVIDER);
    fs::create_dir_all(&mirrored).unwrap();
    fs::write(mirrored.join("a.xml"), "<widget/>").unwrap();

    let store = DirectoryStore::new(tmp.path().join("store"));
    let mut installer = StoreInstaller::new(store.clone(), MirrorResources::new(&project));
    let summary = installer
        .update(VersionStamp::ZERO, &[definition(PROVIDER, "a.xml", V1)])
        .unwrap();
    assert_eq!(summary, None);
    assert_eq!(
        fs::read_to_string(store.resolve(PROVIDER).join("a.xml")).unwrap(),
        "<widget/>"
    );

    let missing = installer.update(V1, &[definition(PROVIDER, "nope.xml", V2)]);
    assert!(missing.is_err());
}
