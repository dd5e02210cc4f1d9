//! Core types for simstore
//!
//! This crate defines the foundational types shared by every codec:
//! - FormatVersion: ordered version tag stored in every file
//! - FileKind / Encoding: header kind tags and physical encodings
//! - Error: error type hierarchy
//! - FormatDefaults: vendor banner, current version and link hop limit

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod kind;
pub mod version;

pub use config::{
    ConfigError, FormatDefaults, CONFIG_FILE_NAME, CURRENT_FORMAT_VERSION, DEFAULT_MAX_LINK_DEPTH,
};
pub use error::{Error, ErrorKind, Result};
pub use kind::{Encoding, FileKind};
pub use version::{FormatVersion, Stage, DEFAULT_DELIMITER, STAGE_SEPARATOR};
