//! Codec layer: how values become bytes.
//!
//! - `traits`: [`Scalar`], [`Record`] and [`Document`]
//! - `scalar`: primitive codecs for numbers, characters, booleans and text
//! - `container`: sequences, sparse sequences and record sequences

pub mod container;
mod scalar;
mod traits;

pub use container::{
    read_records, read_sequence, read_sparse, write_records, write_sequence, write_sparse,
};
pub use traits::{Document, Record, Scalar};
