//! File kinds and physical encodings
//!
//! The header of every file names its [`FileKind`]; the caller picks the
//! [`Encoding`] when opening a handle. Extensions are a convention for
//! collaborators only: the engine trusts the header, never the file name.

use std::fmt;

/// Kind of content stored after the file header.
///
/// Tags are part of the wire format and must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// No content
    None,
    /// Complete simulation model
    Model,
    /// Material library
    Material,
    /// Radiation view-factor matrix
    ViewFactorMatrix,
    /// Display properties for the model editor
    DisplayProperties,
    /// Redirect: the header information is the path of the real file
    Link,
    /// Mesh (nodes, elements, entity groups)
    Mesh,
}

impl FileKind {
    /// All kinds, in tag order
    pub const ALL: [FileKind; 7] = [
        FileKind::None,
        FileKind::Model,
        FileKind::Material,
        FileKind::ViewFactorMatrix,
        FileKind::DisplayProperties,
        FileKind::Link,
        FileKind::Mesh,
    ];

    /// Integer tag written to the header
    pub const fn tag(self) -> i32 {
        match self {
            FileKind::None => 0,
            FileKind::Model => 1,
            FileKind::Material => 2,
            FileKind::ViewFactorMatrix => 3,
            FileKind::DisplayProperties => 4,
            FileKind::Link => 5,
            FileKind::Mesh => 6,
        }
    }

    /// Inverse of [`FileKind::tag`]
    pub const fn from_tag(tag: i32) -> Option<Self> {
        match tag {
            0 => Some(FileKind::None),
            1 => Some(FileKind::Model),
            2 => Some(FileKind::Material),
            3 => Some(FileKind::ViewFactorMatrix),
            4 => Some(FileKind::DisplayProperties),
            5 => Some(FileKind::Link),
            6 => Some(FileKind::Mesh),
            _ => None,
        }
    }

    /// Conventional file extension for this kind in the given encoding.
    ///
    /// Links use one extension for both encodings.
    pub const fn conventional_extension(self, encoding: Encoding) -> Option<&'static str> {
        let text = matches!(encoding, Encoding::Text);
        match self {
            FileKind::None => None,
            FileKind::Model => Some(if text { "smdl" } else { "smdb" }),
            FileKind::Material => Some(if text { "smat" } else { "smab" }),
            FileKind::ViewFactorMatrix => Some(if text { "svft" } else { "svfb" }),
            FileKind::DisplayProperties => Some(if text { "sdsp" } else { "sdsb" }),
            FileKind::Link => Some("slnk"),
            FileKind::Mesh => Some(if text { "smsh" } else { "smsb" }),
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileKind::None => "none",
            FileKind::Model => "model",
            FileKind::Material => "material",
            FileKind::ViewFactorMatrix => "view-factor-matrix",
            FileKind::DisplayProperties => "display-properties",
            FileKind::Link => "link",
            FileKind::Mesh => "mesh",
        };
        f.write_str(name)
    }
}

/// Physical encoding of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Whitespace-delimited tokens, quoted strings, human-diffable
    Text,
    /// Native fixed-width values, length-prefixed strings
    Binary,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Text => f.write_str("text"),
            Encoding::Binary => f.write_str("binary"),
        }
    }
}
