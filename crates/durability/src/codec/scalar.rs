//! Primitive codecs
//!
//! # Text
//!
//! Numbers use Rust's default base-10 `Display`, which for floats is the
//! shortest representation that parses back to the same value (`-2.0` is
//! written `-2`). Text values are double-quoted; an empty string is `""`.
//! Characters and booleans are single raw bytes.
//!
//! # Binary
//!
//! Fixed-width values are written in native byte order with no padding.
//! Files are therefore only portable between hosts of the same endianness;
//! this matches the files already in circulation and is kept as-is.
//! Text values are a `u32` byte count followed by UTF-8 bytes.

use std::io::{BufRead, Write};

use byteorder::{NativeEndian, ReadBytesExt, WriteBytesExt};
use simstore_core::{Error, Result};

use crate::codec::Scalar;
use crate::handle::{is_space, ReadHandle, WriteHandle};

macro_rules! numeric_scalar {
    ($ty:ty, $name:literal, $read:ident, $write:ident) => {
        impl Scalar for $ty {
            const NAME: &'static str = $name;

            fn write_text<W: Write>(
                w: &mut WriteHandle<W>,
                value: &Self,
                add_newline: bool,
            ) -> Result<()> {
                w.write_raw(value.to_string().as_bytes())?;
                if add_newline {
                    w.newline()?;
                }
                Ok(())
            }

            fn write_binary<W: Write>(w: &mut WriteHandle<W>, value: &Self) -> Result<()> {
                w.sink_mut()
                    .$write::<NativeEndian>(*value)
                    .map_err(Error::write)
            }

            fn read_text<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
                let token = r.next_token()?;
                token.parse::<$ty>().map_err(|_| {
                    Error::ReadFailed(format!("expected {}, found {:?}", $name, token))
                })
            }

            fn read_binary<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
                r.source_mut()
                    .$read::<NativeEndian>()
                    .map_err(Error::read)
            }
        }
    };
}

numeric_scalar!(i32, "i32", read_i32, write_i32);
numeric_scalar!(u32, "u32", read_u32, write_u32);
numeric_scalar!(i64, "i64", read_i64, write_i64);
numeric_scalar!(u64, "u64", read_u64, write_u64);
numeric_scalar!(f32, "f32", read_f32, write_f32);
numeric_scalar!(f64, "f64", read_f64, write_f64);

/// Character: one raw byte in both encodings.
impl Scalar for u8 {
    const NAME: &'static str = "char";

    fn write_text<W: Write>(w: &mut WriteHandle<W>, value: &Self, add_newline: bool) -> Result<()> {
        if is_space(*value) {
            return Err(Error::WriteFailed(format!(
                "character 0x{:02x} is whitespace and cannot be written as text",
                value
            )));
        }
        w.write_raw(&[*value])?;
        if add_newline {
            w.newline()?;
        }
        Ok(())
    }

    fn write_binary<W: Write>(w: &mut WriteHandle<W>, value: &Self) -> Result<()> {
        w.sink_mut().write_u8(*value).map_err(Error::write)
    }

    fn read_text<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        r.next_char()
    }

    fn read_binary<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        r.source_mut().read_u8().map_err(Error::read)
    }
}

/// Boolean: the byte 0 or 1, written raw in text as well as binary.
///
/// Text files in circulation store the raw byte; it is decoded as
/// `byte != 0` so that the value read back is the value written.
impl Scalar for bool {
    const NAME: &'static str = "bool";

    fn write_text<W: Write>(w: &mut WriteHandle<W>, value: &Self, add_newline: bool) -> Result<()> {
        w.write_raw(&[u8::from(*value)])?;
        if add_newline {
            w.newline()?;
        }
        Ok(())
    }

    fn write_binary<W: Write>(w: &mut WriteHandle<W>, value: &Self) -> Result<()> {
        w.sink_mut().write_u8(u8::from(*value)).map_err(Error::write)
    }

    fn read_text<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        Ok(r.next_char()? != 0)
    }

    fn read_binary<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        Ok(r.source_mut().read_u8().map_err(Error::read)? != 0)
    }
}

impl Scalar for String {
    const NAME: &'static str = "text";

    fn write_text<W: Write>(w: &mut WriteHandle<W>, value: &Self, add_newline: bool) -> Result<()> {
        if value.contains('"') {
            return Err(Error::WriteFailed(format!(
                "text {:?} contains a double quote, which the text encoding cannot represent",
                value
            )));
        }
        w.write_raw(b"\"")?;
        w.write_raw(value.as_bytes())?;
        w.write_raw(b"\"")?;
        if add_newline {
            w.newline()?;
        }
        Ok(())
    }

    fn write_binary<W: Write>(w: &mut WriteHandle<W>, value: &Self) -> Result<()> {
        let len = u32::try_from(value.len()).map_err(|_| {
            Error::WriteFailed(format!("text of {} bytes exceeds the u32 length prefix", value.len()))
        })?;
        u32::write_binary(w, &len)?;
        w.write_raw(value.as_bytes())
    }

    fn read_text<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        r.next_text()
    }

    fn read_binary<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        let len = u32::read_binary(r)? as usize;
        let bytes = r.read_bytes(len)?;
        String::from_utf8(bytes).map_err(|e| Error::ReadFailed(format!("invalid UTF-8: {}", e)))
    }
}
