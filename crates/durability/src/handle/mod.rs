//! Read and write handles
//!
//! Handles remember the active encoding and the format version of the
//! file, and are borrowed by every codec for the length of one call.

mod reader;
mod writer;

pub use reader::ReadHandle;
pub use writer::{AtomicFile, WriteHandle};

pub(crate) use reader::is_space;
