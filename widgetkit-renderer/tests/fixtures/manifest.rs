// @generated by widgetkit. Do not edit by hand; rerun the build step instead.

use widgetkit_core::uuid::uuid;
#[allow(unused_imports)]
use widgetkit_core::{
    AssetRecord, DeletedSupplementaryFile, DeletedWidgetDefinitionFile, Guid, SupplementaryFile,
    VersionStamp, WidgetDefinitionFile,
};

/// Every asset record known at build time.
pub fn files() -> Vec<AssetRecord> {
    #[allow(unused_mut)]
    let mut files = Vec::new();
    files.push(AssetRecord::WidgetDefinition(WidgetDefinitionFile { file_name: "widget.xml".to_string(), last_modified_version: VersionStamp::new(2024, 3, 9, 817), provider_id: Guid::from_uuid(uuid!("fa801aba-84a0-4746-92cc-b418a7106c0b")), resource_path: "filestorage\\defaultwidgets\\fa801aba84a0474692ccb418a7106c0b\\widget.xml".to_string() }));
    files.push(AssetRecord::Supplementary(SupplementaryFile { file_name: "ui.js".to_string(), last_modified_version: VersionStamp::new(2024, 3, 9, 817), provider_id: Guid::from_uuid(uuid!("fa801aba-84a0-4746-92cc-b418a7106c0b")), widget_id: Guid::from_uuid(uuid!("0c647246-6735-42f9-875d-c8b991fe739b")), theme_id: None, resource_path: "filestorage\\defaultwidgets\\fa801aba84a0474692ccb418a7106c0b\\0c647246673542f9875dc8b991fe739b\\ui.js".to_string() }));
    files.push(AssetRecord::Supplementary(SupplementaryFile { file_name: "style.css".to_string(), last_modified_version: VersionStamp::new(2024, 3, 10, 0), provider_id: Guid::from_uuid(uuid!("fa801aba-84a0-4746-92cc-b418a7106c0b")), widget_id: Guid::from_uuid(uuid!("0c647246-6735-42f9-875d-c8b991fe739b")), theme_id: Some(Guid::from_uuid(uuid!("424eb7d9-138d-417b-b0ab-4c8a3a8c4a4f"))), resource_path: "filestorage\\defaultwidgets\\fa801aba84a0474692ccb418a7106c0b\\0c647246673542f9875dc8b991fe739b\\424eb7d9138d417bb0ab4c8a3a8c4a4f\\style.css".to_string() }));
    files.push(AssetRecord::Supplementary(SupplementaryFile { file_name: "we\"ird\tnameé.xml".to_string(), last_modified_version: VersionStamp::new(2023, 11, 2, 600), provider_id: Guid::from_uuid(uuid!("fa801aba-84a0-4746-92cc-b418a7106c0b")), widget_id: Guid::from_uuid(uuid!("0c647246-6735-42f9-875d-c8b991fe739b")), theme_id: None, resource_path: "filestorage\\defaultwidgets\\fa801aba84a0474692ccb418a7106c0b\\0c647246673542f9875dc8b991fe739b\\we\"ird\tnameé.xml".to_string() }));
    files.push(AssetRecord::DeletedWidgetDefinition(DeletedWidgetDefinitionFile { file_name: "old.xml".to_string(), last_modified_version: VersionStamp::new(2023, 11, 2, 600), provider_id: Guid::from_uuid(uuid!("fa801aba-84a0-4746-92cc-b418a7106c0b")) }));
    files.push(AssetRecord::DeletedSupplementary(DeletedSupplementaryFile { file_name: "old.css".to_string(), last_modified_version: VersionStamp::new(2023, 11, 2, 600), provider_id: Guid::from_uuid(uuid!("fa801aba-84a0-4746-92cc-b418a7106c0b")), widget_id: Guid::from_uuid(uuid!("0c647246-6735-42f9-875d-c8b991fe739b")), theme_id: Some(Guid::from_uuid(uuid!("424eb7d9-138d-417b-b0ab-4c8a3a8c4a4f"))) }));

    files
}
