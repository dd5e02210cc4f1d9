//! Opening and saving whole documents
//!
//! Reading a file walks the state machine
//! `Unopened → HeaderRead → {Resolved, Linked}`. A `Linked` step hands back
//! the resolved target; [`open_document`] closes the link and repeats the
//! sequence against it until a non-link file is reached or the hop limit
//! in [`FormatDefaults`] is exceeded.
//!
//! Saving stamps the configured current version and vendor banner into the
//! header and publishes the file with an atomic commit.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use simstore_core::{Encoding, Error, FileKind, FormatDefaults, Result};
use tracing::{debug, info};

use crate::codec::{Document, Record};
use crate::format::{read_header, resolve_link_target, write_header, FileHeader};
use crate::handle::{ReadHandle, WriteHandle};

/// A file opened for reading, positioned just after its header.
pub struct OpenedFile {
    /// Path of the file actually read (after following links)
    pub path: PathBuf,
    /// Its decoded header
    pub header: FileHeader,
    /// Handle positioned at the first record
    pub handle: ReadHandle<BufReader<File>>,
    /// Number of link files followed to reach it
    pub links_followed: usize,
}

/// Outcome of one open step.
pub enum OpenStep {
    /// The header names real content
    Resolved(OpenedFile),
    /// The header is a link; `target` must be opened instead
    Linked {
        /// Header of the link file
        link: FileHeader,
        /// Resolved target path
        target: PathBuf,
    },
}

/// Open one file and decode its header.
///
/// With `follow_links` unset a link file is returned as `Resolved`, which
/// is how link files themselves are inspected.
pub fn open_step(path: &Path, encoding: Encoding, follow_links: bool) -> Result<OpenStep> {
    let mut handle = ReadHandle::open(path, encoding)?;
    let header = read_header(&mut handle)?;

    if header.is_link() && follow_links {
        let target = resolve_link_target(path, &header.information)?;
        return Ok(OpenStep::Linked {
            link: header,
            target,
        });
    }

    Ok(OpenStep::Resolved(OpenedFile {
        path: path.to_path_buf(),
        header,
        handle,
        links_followed: 0,
    }))
}

/// Open `path`, follow any links, and check the final header's kind.
///
/// Link targets are opened with the same encoding as the link. A missing
/// target fails with `OpenFailed` naming the resolved target path. A kind
/// other than `expected` fails with `InvalidFormat` before any record data
/// is read. Asking for [`FileKind::Link`] opens the link file itself.
pub fn open_document(
    path: impl AsRef<Path>,
    encoding: Encoding,
    expected: FileKind,
    defaults: &FormatDefaults,
) -> Result<OpenedFile> {
    let follow_links = expected != FileKind::Link;
    let mut current = path.as_ref().to_path_buf();
    let mut hops = 0usize;

    loop {
        match open_step(&current, encoding, follow_links)? {
            OpenStep::Resolved(mut opened) => {
                if opened.header.kind != expected {
                    return Err(Error::InvalidFormat(format!(
                        "{:?} holds {}, expected {}",
                        opened.path, opened.header.kind, expected
                    )));
                }
                opened.links_followed = hops;
                debug!(
                    target: "simstore::io",
                    path = %opened.path.display(),
                    kind = %opened.header.kind,
                    version = %opened.header.version,
                    "Opened document"
                );
                return Ok(opened);
            }
            OpenStep::Linked { target, .. } => {
                hops += 1;
                if hops > defaults.max_link_depth {
                    return Err(Error::InvalidFormat(format!(
                        "more than {} links followed from {:?}",
                        defaults.max_link_depth,
                        path.as_ref()
                    )));
                }
                info!(
                    target: "simstore::link",
                    link = %current.display(),
                    resolved = %target.display(),
                    hop = hops,
                    "Following link"
                );
                current = target;
            }
        }
    }
}

/// Open and decode a document of type `T`.
pub fn load_document<T: Document>(
    path: impl AsRef<Path>,
    encoding: Encoding,
    defaults: &FormatDefaults,
) -> Result<T> {
    load_document_as(path, encoding, T::KIND, defaults)
}

/// Open a file of kind `kind` and decode its body as `T`.
pub fn load_document_as<T: Record>(
    path: impl AsRef<Path>,
    encoding: Encoding,
    kind: FileKind,
    defaults: &FormatDefaults,
) -> Result<T> {
    let mut opened = open_document(path, encoding, kind, defaults)?;
    T::read(&mut opened.handle)
}

/// Write `value` as a complete file and publish it atomically.
///
/// The header carries `defaults.current_version` and `defaults.banner()`.
/// Defaults that fail [`FormatDefaults::validate`] are rejected with
/// `WriteFailed` before anything is written. On any error the file at
/// `path` is left as it was.
pub fn save_document<T: Document>(
    path: impl AsRef<Path>,
    encoding: Encoding,
    value: &T,
    defaults: &FormatDefaults,
) -> Result<PathBuf> {
    defaults
        .validate()
        .map_err(|e| Error::WriteFailed(e.to_string()))?;
    let mut w = WriteHandle::create(path, encoding)?;
    write_header(&mut w, T::KIND, defaults.current_version, &defaults.banner())?;
    value.write(&mut w)?;
    w.newline()?;
    let path = w.commit()?;
    let kind = T::KIND;
    info!(
        target: "simstore::io",
        path = %path.display(),
        %kind,
        %encoding,
        "Saved document"
    );
    Ok(path)
}

/// Create a link file at `link_path` pointing at `target`.
///
/// `target` is stored as given; a relative target is resolved against the
/// link file's directory when the link is followed.
pub fn write_link(
    link_path: impl AsRef<Path>,
    target: impl AsRef<Path>,
    encoding: Encoding,
    defaults: &FormatDefaults,
) -> Result<PathBuf> {
    let target = target.as_ref();
    let information = target
        .to_str()
        .ok_or_else(|| Error::InvalidPath(format!("link target {:?} is not UTF-8", target)))?;
    if information.is_empty() {
        return Err(Error::InvalidPath("empty link target".to_string()));
    }

    let mut w = WriteHandle::create(link_path, encoding)?;
    write_header(&mut w, FileKind::Link, defaults.current_version, information)?;
    let path = w.commit()?;
    debug!(
        target: "simstore::link",
        link = %path.display(),
        points_to = information,
        "Wrote link"
    );
    Ok(path)
}
