//! File header
//!
//! Every file starts with the same three fields, in this order:
//!
//! ```text
//! text:   "<version>" <kind tag> "<information>"\n
//! binary: major u32 | minor u32 | patch u32 | stage u32 | kind i32 | len u32 | information
//! ```
//!
//! The version decoded here becomes the handle's version, which record
//! codecs consult for version-gated fields.

use std::io::{BufRead, Write};

use simstore_core::{
    Encoding, Error, FileKind, FormatVersion, Result, Stage, DEFAULT_DELIMITER,
};
use tracing::warn;

use crate::codec::Record;
use crate::handle::{ReadHandle, WriteHandle};

/// Mandatory first record of every file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    /// Kind of content following the header
    pub kind: FileKind,
    /// Format version the file was written with
    pub version: FormatVersion,
    /// Free-form text; the target path when `kind` is [`FileKind::Link`]
    pub information: String,
}

impl FileHeader {
    /// Create a header.
    pub fn new(kind: FileKind, version: FormatVersion, information: impl Into<String>) -> Self {
        FileHeader {
            kind,
            version,
            information: information.into(),
        }
    }

    /// Header of a link file pointing at `target`.
    pub fn link(version: FormatVersion, target: impl Into<String>) -> Self {
        FileHeader::new(FileKind::Link, version, target)
    }

    /// True for link files
    pub fn is_link(&self) -> bool {
        self.kind == FileKind::Link
    }
}

impl Record for FormatVersion {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        match w.encoding() {
            Encoding::Text => w.put(&self.format(DEFAULT_DELIMITER)),
            Encoding::Binary => {
                w.put(&self.major())?;
                w.put(&self.minor())?;
                w.put(&self.patch())?;
                w.put(&self.stage().code())
            }
        }
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        match r.encoding() {
            Encoding::Text => {
                let text: String = r.get()?;
                Ok(FormatVersion::parse(&text, DEFAULT_DELIMITER))
            }
            Encoding::Binary => {
                let major = r.get()?;
                let minor = r.get()?;
                let patch = r.get()?;
                let code: u32 = r.get()?;
                let stage = Stage::from_code(code).ok_or_else(|| {
                    Error::InvalidFormat(format!("unknown release stage code {}", code))
                })?;
                Ok(FormatVersion::new(major, minor, patch, stage))
            }
        }
    }
}

impl Record for FileKind {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        w.put(&self.tag())
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        let tag: i32 = r.get()?;
        FileKind::from_tag(tag)
            .ok_or_else(|| Error::InvalidFormat(format!("unknown file kind tag {}", tag)))
    }
}

impl Record for FileHeader {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        w.record(&self.version)?;
        w.space()?;
        w.record(&self.kind)?;
        w.space()?;
        w.put(&self.information)
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        let version = r.record()?;
        let kind = r.record()?;
        let information = r.get()?;
        Ok(FileHeader {
            kind,
            version,
            information,
        })
    }
}

/// Write the header and switch the handle to `version`.
pub fn write_header<W: Write>(
    w: &mut WriteHandle<W>,
    kind: FileKind,
    version: FormatVersion,
    information: &str,
) -> Result<()> {
    let header = FileHeader::new(kind, version, information);
    header.write(w)?;
    w.newline()?;
    w.set_version(version);
    Ok(())
}

/// Read the header and switch the handle to the file's version.
pub fn read_header<R: BufRead>(r: &mut ReadHandle<R>) -> Result<FileHeader> {
    let header = FileHeader::read(r)?;
    if !header.version.is_valid() {
        warn!(
            target: "simstore::io",
            version = %header.version,
            kind = %header.kind,
            "File header carries no usable version"
        );
    }
    r.set_version(header.version);
    Ok(header)
}
