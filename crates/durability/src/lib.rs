//! Durability layer for simstore
//!
//! This crate handles everything that touches bytes and disk:
//!
//! - Handles: buffered read/write handles carrying encoding and format version
//! - Atomic commit: temp file, fsync, rename, fsync directory
//! - Codecs: primitive, container and record codecs for both encodings
//! - File header and link resolution
//! - Documents: open (following links) / load / save whole files

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod document;
pub mod format;
pub mod handle;

pub use codec::{
    read_records, read_sequence, read_sparse, write_records, write_sequence, write_sparse,
    Document, Record, Scalar,
};
pub use document::{
    load_document, load_document_as, open_document, open_step, save_document, write_link,
    OpenStep, OpenedFile,
};
pub use format::{normalize, read_header, resolve_link_target, write_header, FileHeader};
pub use handle::{AtomicFile, ReadHandle, WriteHandle};
