//! End-to-end tests through the `simstore` facade
//!
//! A project directory with a config file, documents in both encodings,
//! and a link file shared between projects.

use simstore::prelude::*;
use simstore::{ErrorKind, CONFIG_FILE_NAME};
use tempfile::TempDir;

fn library() -> MaterialLibrary {
    let mut copper = Material::new(2, "Copper", 8960.0, 385.0);
    copper.conductivity = LabeledTable::new("Temperature", "K", "Conductivity", "W/m K")
        .with_point(300.0, 401.0)
        .with_point(600.0, 379.0);
    copper.emissivity = 0.05;
    MaterialLibrary::new(vec![copper, Material::new(3, "FR-4", 1850.0, 1100.0)])
}

#[test]
fn test_config_dir_creates_and_reads_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::from_config_dir(temp_dir.path()).unwrap();
    assert!(temp_dir.path().join(CONFIG_FILE_NAME).exists());
    assert_eq!(store.defaults(), &FormatDefaults::default());
}

#[test]
fn test_config_dir_respects_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join(CONFIG_FILE_NAME),
        "vendor = \"orbit thermal\"\ncurrent_version = \"1.2.0\"\nmax_link_depth = 2\n",
    )
    .unwrap();
    let store = Store::from_config_dir(temp_dir.path()).unwrap();
    assert_eq!(store.defaults().vendor, "orbit thermal");
    assert_eq!(store.defaults().max_link_depth, 2);

    let path = temp_dir.path().join("lib.smat");
    store.save(&path, Encoding::Text, &library()).unwrap();
    let header = store.header(&path, Encoding::Text).unwrap();
    assert_eq!(header.kind, FileKind::Material);
    assert_eq!(header.information, "orbit thermal 1.2.0");
}

#[test]
fn test_invalid_config_rejected() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "max_link_depth = 0\n").unwrap();
    assert!(Store::from_config_dir(temp_dir.path()).is_err());
}

#[test]
fn test_shared_library_through_link() {
    let temp_dir = TempDir::new().unwrap();
    let shared = temp_dir.path().join("shared");
    let project = temp_dir.path().join("projects").join("box");
    std::fs::create_dir_all(&shared).unwrap();
    std::fs::create_dir_all(&project).unwrap();
    let store = Store::default();

    store
        .save(shared.join("metals.smab"), Encoding::Binary, &library())
        .unwrap();
    store
        .link(project.join("metals.slnk"), "../../shared/metals.smab", Encoding::Binary)
        .unwrap();

    let loaded: MaterialLibrary = store.load(project.join("metals.slnk"), Encoding::Binary).unwrap();
    assert_eq!(loaded, library());
    assert_eq!(loaded.by_name("Copper").map(|m| m.emissivity), Some(0.05));

    let link_header = store.header(project.join("metals.slnk"), Encoding::Binary).unwrap();
    assert!(link_header.is_link());
}

#[test]
fn test_wrong_document_type_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::default();
    let path = temp_dir.path().join("lib.smat");
    store.save(&path, Encoding::Text, &library()).unwrap();

    let err = store.load::<Mesh>(&path, Encoding::Text).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = Store::default()
        .load::<Model>(temp_dir.path().join("absent.smdl"), Encoding::Text)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OpenFailed);
}
