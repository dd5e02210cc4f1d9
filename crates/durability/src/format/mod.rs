//! On-disk framing shared by every file.
//!
//! - `header`: the [`FileHeader`] every file starts with
//! - `link`: resolving link-file targets

pub mod header;
pub mod link;

pub use header::{read_header, write_header, FileHeader};
pub use link::{normalize, resolve_link_target};
