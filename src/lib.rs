//! simstore - versioned dual-encoding persistence for simulation models
//!
//! simstore reads and writes simulation documents (models, meshes,
//! material libraries, view-factor matrices, display properties) in a
//! human-readable text encoding or a compact binary encoding, tolerates
//! files from older format versions, follows link files, and publishes
//! every write atomically.
//!
//! # Quick Start
//!
//! ```ignore
//! use simstore::prelude::*;
//!
//! let store = Store::new(FormatDefaults::default());
//!
//! let mut library = MaterialLibrary::default();
//! library.materials.push(Material::new(1, "Steel", 7850.0, 490.0));
//! store.save("steel.smat", Encoding::Text, &library)?;
//!
//! let loaded: MaterialLibrary = store.load("steel.smat", Encoding::Text)?;
//! ```
//!
//! # Architecture
//!
//! - `simstore-core`: versions, kinds, errors, configuration
//! - `simstore-durability`: handles, codecs, header, links, atomic commit
//! - `simstore-primitives`: the persisted record types
//!
//! [`Store`] bundles a [`FormatDefaults`] with the document operations.

use std::path::{Path, PathBuf};

pub use simstore_core::*;
pub use simstore_durability as durability;
pub use simstore_durability::{
    load_document, load_document_as, open_document, save_document, write_link, Document,
    FileHeader, ReadHandle, Record, Scalar, WriteHandle,
};
pub use simstore_primitives as primitives;

use tracing::debug;

/// Commonly used items
pub mod prelude {
    pub use crate::Store;
    pub use simstore_core::{Encoding, Error, FileKind, FormatDefaults, FormatVersion, Result};
    pub use simstore_durability::{Document, Record};
    pub use simstore_primitives::*;
}

/// Document operations bound to one set of format defaults.
#[derive(Debug, Clone, Default)]
pub struct Store {
    defaults: FormatDefaults,
}

impl Store {
    /// Store using `defaults` for every save and open.
    pub fn new(defaults: FormatDefaults) -> Self {
        Store { defaults }
    }

    /// Store configured from `dir/simstore.toml`, creating the file with
    /// default values if it does not exist.
    pub fn from_config_dir(dir: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        FormatDefaults::write_default_if_missing(&path)?;
        let defaults = FormatDefaults::from_file(&path)?;
        debug!(
            target: "simstore::config",
            vendor = %defaults.vendor,
            max_link_depth = defaults.max_link_depth,
            "Store configured"
        );
        Ok(Store { defaults })
    }

    /// Active format defaults
    pub fn defaults(&self) -> &FormatDefaults {
        &self.defaults
    }

    /// Save `value` atomically at `path`.
    pub fn save<T: Document>(
        &self,
        path: impl AsRef<Path>,
        encoding: Encoding,
        value: &T,
    ) -> Result<PathBuf> {
        save_document(path, encoding, value, &self.defaults)
    }

    /// Load a `T` from `path`, following links.
    pub fn load<T: Document>(&self, path: impl AsRef<Path>, encoding: Encoding) -> Result<T> {
        load_document(path, encoding, &self.defaults)
    }

    /// Read only the header of `path` (links are not followed).
    pub fn header(&self, path: impl AsRef<Path>, encoding: Encoding) -> Result<FileHeader> {
        let mut handle = ReadHandle::open(path, encoding)?;
        simstore_durability::read_header(&mut handle)
    }

    /// Create a link file at `link_path` pointing at `target`.
    pub fn link(
        &self,
        link_path: impl AsRef<Path>,
        target: impl AsRef<Path>,
        encoding: Encoding,
    ) -> Result<PathBuf> {
        write_link(link_path, target, encoding, &self.defaults)
    }
}
