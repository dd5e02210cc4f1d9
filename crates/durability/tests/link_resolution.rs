//! Link resolution tests
//!
//! Links are followed relative to the link file's own directory, chains are
//! followed up to the configured hop limit, and failures name the resolved
//! target rather than the link.

use simstore_core::{Encoding, Error, ErrorKind, FileKind, FormatDefaults, Result};
use simstore_durability::{
    load_document, open_document, save_document, write_link, Document, ReadHandle, Record,
    WriteHandle,
};
use std::io::{BufRead, Write};
use tempfile::TempDir;

#[derive(Debug, PartialEq)]
struct Density(f64);

impl Record for Density {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        w.put(&self.0)
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        Ok(Density(r.get()?))
    }
}

impl Document for Density {
    const KIND: FileKind = FileKind::Material;
}

#[test]
fn test_relative_link_ignores_working_directory() {
    let temp_dir = TempDir::new().unwrap();
    let shared = temp_dir.path().join("shared");
    let project = temp_dir.path().join("project");
    std::fs::create_dir_all(&shared).unwrap();
    std::fs::create_dir_all(&project).unwrap();
    let defaults = FormatDefaults::default();

    save_document(
        shared.join("steel.smat"),
        Encoding::Text,
        &Density(7850.0),
        &defaults,
    )
    .unwrap();
    let link = project.join("steel.slnk");
    write_link(&link, "../shared/steel.smat", Encoding::Text, &defaults).unwrap();

    // The process working directory is unrelated to both files.
    let loaded: Density = load_document(&link, Encoding::Text, &defaults).unwrap();
    assert_eq!(loaded, Density(7850.0));

    let opened = open_document(&link, Encoding::Text, FileKind::Material, &defaults).unwrap();
    assert_eq!(opened.path, temp_dir.path().join("shared").join("steel.smat"));
    assert_eq!(opened.links_followed, 1);
}

#[test]
fn test_link_chain_in_binary() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    let defaults = FormatDefaults::default();

    save_document(dir.join("real.smab"), Encoding::Binary, &Density(2700.0), &defaults).unwrap();
    write_link(dir.join("c.slnk"), "real.smab", Encoding::Binary, &defaults).unwrap();
    write_link(dir.join("b.slnk"), "c.slnk", Encoding::Binary, &defaults).unwrap();
    write_link(dir.join("a.slnk"), dir.join("b.slnk"), Encoding::Binary, &defaults).unwrap();

    let opened =
        open_document(dir.join("a.slnk"), Encoding::Binary, FileKind::Material, &defaults).unwrap();
    assert_eq!(opened.links_followed, 3);
    let mut handle = opened.handle;
    assert_eq!(Density::read(&mut handle).unwrap(), Density(2700.0));
}

#[test]
fn test_cycle_hits_hop_limit() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    let defaults = FormatDefaults::default().with_max_link_depth(4);

    write_link(dir.join("a.slnk"), "b.slnk", Encoding::Text, &defaults).unwrap();
    write_link(dir.join("b.slnk"), "a.slnk", Encoding::Text, &defaults).unwrap();

    let err = load_document::<Density>(dir.join("a.slnk"), Encoding::Text, &defaults).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);
}

#[test]
fn test_chain_at_hop_limit_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    let defaults = FormatDefaults::default().with_max_link_depth(2);

    save_document(dir.join("real.smat"), Encoding::Text, &Density(1.0), &defaults).unwrap();
    write_link(dir.join("l2.slnk"), "real.smat", Encoding::Text, &defaults).unwrap();
    write_link(dir.join("l1.slnk"), "l2.slnk", Encoding::Text, &defaults).unwrap();
    write_link(dir.join("l0.slnk"), "l1.slnk", Encoding::Text, &defaults).unwrap();

    assert!(load_document::<Density>(dir.join("l1.slnk"), Encoding::Text, &defaults).is_ok());
    let err = load_document::<Density>(dir.join("l0.slnk"), Encoding::Text, &defaults).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);
}

#[test]
fn test_missing_target_names_resolved_path() {
    let temp_dir = TempDir::new().unwrap();
    let links = temp_dir.path().join("links");
    std::fs::create_dir_all(&links).unwrap();
    let defaults = FormatDefaults::default();

    write_link(links.join("gone.slnk"), "../data/gone.smat", Encoding::Text, &defaults).unwrap();

    match load_document::<Density>(links.join("gone.slnk"), Encoding::Text, &defaults) {
        Err(Error::OpenFailed { path, .. }) => {
            assert_eq!(path, temp_dir.path().join("data").join("gone.smat"));
        }
        other => panic!("expected OpenFailed, got {:?}", other.err()),
    }
}

#[test]
fn test_linked_kind_mismatch() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    let defaults = FormatDefaults::default();

    save_document(dir.join("real.smat"), Encoding::Text, &Density(1.0), &defaults).unwrap();
    write_link(dir.join("model.slnk"), "real.smat", Encoding::Text, &defaults).unwrap();

    let err = open_document(dir.join("model.slnk"), Encoding::Text, FileKind::Model, &defaults)
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);
}

#[test]
fn test_expecting_link_opens_link_itself() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    let defaults = FormatDefaults::default();

    write_link(dir.join("a.slnk"), "nowhere.smat", Encoding::Text, &defaults).unwrap();
    let opened = open_document(dir.join("a.slnk"), Encoding::Text, FileKind::Link, &defaults).unwrap();
    assert_eq!(opened.header.information, "nowhere.smat");
    assert_eq!(opened.links_followed, 0);
}
