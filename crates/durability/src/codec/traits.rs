//! Codec trait definitions.
//!
//! The codec registry is resolved at compile time: every persisted type
//! implements one of these traits, and composed codecs reach their
//! children through generics. There is no runtime dispatch table.

use std::io::{BufRead, Write};

use simstore_core::{Encoding, Error, FileKind, Result};

use crate::handle::{ReadHandle, WriteHandle};

/// Primitive codec for one scalar type.
///
/// Each scalar provides a read/write pair per encoding. The text writers
/// never emit separators; callers place spaces between values with
/// [`WriteHandle::space`].
pub trait Scalar: Sized {
    /// Type name used in decode errors
    const NAME: &'static str;

    /// Write `value` as a text token, optionally followed by a newline.
    fn write_text<W: Write>(w: &mut WriteHandle<W>, value: &Self, add_newline: bool)
        -> Result<()>;

    /// Write `value` in its binary form.
    fn write_binary<W: Write>(w: &mut WriteHandle<W>, value: &Self) -> Result<()>;

    /// Read one value from a text stream.
    fn read_text<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self>;

    /// Read one value from a binary stream.
    fn read_binary<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self>;

    /// Write in the handle's encoding. `add_newline` only affects text.
    fn write<W: Write>(w: &mut WriteHandle<W>, value: &Self, add_newline: bool) -> Result<()> {
        match w.encoding() {
            Encoding::Text => Self::write_text(w, value, add_newline),
            Encoding::Binary => Self::write_binary(w, value),
        }
    }

    /// Read in the handle's encoding.
    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        match r.encoding() {
            Encoding::Text => Self::read_text(r),
            Encoding::Binary => Self::read_binary(r),
        }
    }
}

/// Record codec for one domain type.
///
/// Implementations call their fields' codecs in declaration order; the
/// read order must match the write order exactly. Scalars dispatch on the
/// handle's encoding, so most records need only this pair; framing that
/// differs between encodings branches on `encoding()`.
pub trait Record: Sized {
    /// Write every field in declaration order.
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()>;

    /// Read every field in declaration order.
    ///
    /// Optional trailing fields are read only when `r.version()` is newer
    /// than the version that introduced them.
    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self>;

    /// Write to a text handle.
    fn write_text<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        expect_encoding(Encoding::Text, w.encoding())?;
        self.write(w)
    }

    /// Write to a binary handle.
    fn write_binary<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        expect_encoding(Encoding::Binary, w.encoding())?;
        self.write(w)
    }

    /// Read from a text handle.
    fn read_text<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        expect_encoding(Encoding::Text, r.encoding())?;
        Self::read(r)
    }

    /// Read from a binary handle.
    fn read_binary<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        expect_encoding(Encoding::Binary, r.encoding())?;
        Self::read(r)
    }
}

/// A record that is the top-level content of a file.
pub trait Document: Record {
    /// Header kind of files holding this document
    const KIND: FileKind;
}

fn expect_encoding(wanted: Encoding, actual: Encoding) -> Result<()> {
    if wanted != actual {
        return Err(Error::InvalidFormat(format!(
            "{} codec used on a {} handle",
            wanted, actual
        )));
    }
    Ok(())
}
