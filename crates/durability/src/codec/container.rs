//! Container codecs
//!
//! Generic combinators built only from the primitive codecs. Every compound
//! form is "write the count, then each element"; reading is the exact
//! inverse, so new record types never need framing code of their own.
//!
//! # Format
//!
//! ```text
//! fixed sequence   text:   [count ]e e … e[\n]     (count only when write_size)
//!                  binary: count(u32) e e … e
//! sparse sequence  both:   count (index value){count}
//! record sequence  text:   count\n record\n record\n …
//!                  binary: count(u32) record record …
//! ```

use std::io::{BufRead, Write};

use simstore_core::{Encoding, Error, Result};

use crate::codec::{Record, Scalar};
use crate::handle::{ReadHandle, WriteHandle};

/// Upper bound on capacity reserved up front from an untrusted count.
const MAX_PREALLOCATE: usize = 4096;

fn count_of(len: usize) -> Result<u32> {
    u32::try_from(len)
        .map_err(|_| Error::WriteFailed(format!("{} elements exceed the u32 count", len)))
}

/// Write a fixed sequence of scalars.
///
/// In text, the count is written only when `write_size` is set; nested
/// rows whose length the reader already knows pass `false`. Binary always
/// writes the count.
pub fn write_sequence<T: Scalar, W: Write>(
    w: &mut WriteHandle<W>,
    values: &[T],
    write_size: bool,
    add_newline: bool,
) -> Result<()> {
    let count = count_of(values.len())?;
    match w.encoding() {
        Encoding::Text => {
            let mut first = true;
            if write_size {
                u32::write_text(w, &count, false)?;
                first = false;
            }
            for value in values {
                if !first {
                    w.space()?;
                }
                T::write_text(w, value, false)?;
                first = false;
            }
            if add_newline {
                w.newline()?;
            }
        }
        Encoding::Binary => {
            u32::write_binary(w, &count)?;
            for value in values {
                T::write_binary(w, value)?;
            }
        }
    }
    Ok(())
}

/// Read a fixed sequence of scalars.
///
/// `known_len = None` reads the count from the stream (the text form was
/// written with `write_size`). `Some(n)` supplies the length of a text
/// sequence written without its count; binary always carries the count,
/// and a count different from `n` is rejected.
pub fn read_sequence<T: Scalar, R: BufRead>(
    r: &mut ReadHandle<R>,
    known_len: Option<usize>,
) -> Result<Vec<T>> {
    let count = match (r.encoding(), known_len) {
        (Encoding::Text, Some(len)) => len,
        (Encoding::Text, None) => u32::read_text(r)? as usize,
        (Encoding::Binary, known) => {
            let count = u32::read_binary(r)? as usize;
            if let Some(len) = known {
                if len != count {
                    return Err(Error::InvalidFormat(format!(
                        "sequence holds {} elements, expected {}",
                        count, len
                    )));
                }
            }
            count
        }
    };

    let mut values = Vec::with_capacity(count.min(MAX_PREALLOCATE));
    for _ in 0..count {
        values.push(T::read(r)?);
    }
    Ok(values)
}

/// Write a sparse sequence of `(index, value)` pairs.
///
/// Indices need not be sorted or contiguous.
pub fn write_sparse<T: Scalar, W: Write>(
    w: &mut WriteHandle<W>,
    entries: &[(u32, T)],
    add_newline: bool,
) -> Result<()> {
    let count = count_of(entries.len())?;
    u32::write(w, &count, false)?;
    for (index, value) in entries {
        w.space()?;
        u32::write(w, index, false)?;
        w.space()?;
        T::write(w, value, false)?;
    }
    if add_newline {
        w.newline()?;
    }
    Ok(())
}

/// Read a sparse sequence of `(index, value)` pairs.
pub fn read_sparse<T: Scalar, R: BufRead>(r: &mut ReadHandle<R>) -> Result<Vec<(u32, T)>> {
    let count = u32::read(r)? as usize;
    let mut entries = Vec::with_capacity(count.min(MAX_PREALLOCATE));
    for _ in 0..count {
        let index = u32::read(r)?;
        let value = T::read(r)?;
        entries.push((index, value));
    }
    Ok(entries)
}

/// Write a sequence of records, one per line in text.
pub fn write_records<T: Record, W: Write>(w: &mut WriteHandle<W>, items: &[T]) -> Result<()> {
    let count = count_of(items.len())?;
    u32::write(w, &count, true)?;
    for item in items {
        item.write(w)?;
        w.newline()?;
    }
    Ok(())
}

/// Read a sequence of records.
pub fn read_records<T: Record, R: BufRead>(r: &mut ReadHandle<R>) -> Result<Vec<T>> {
    let count = u32::read(r)? as usize;
    let mut items = Vec::with_capacity(count.min(MAX_PREALLOCATE));
    for _ in 0..count {
        items.push(T::read(r)?);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use simstore_core::ErrorKind;

    #[test]
    fn test_sequence_text_with_size() {
        let mut w = WriteHandle::new(Vec::new(), Encoding::Text);
        write_sequence(&mut w, &[1.5f64, -2.0, 0.0], true, true).unwrap();
        let bytes = w.into_inner();
        assert_eq!(bytes, b"3 1.5 -2 0\n");

        let mut r = ReadHandle::new(&bytes[..], Encoding::Text);
        let values: Vec<f64> = read_sequence(&mut r, None).unwrap();
        assert_eq!(values, vec![1.5, -2.0, 0.0]);
    }

    #[test]
    fn test_sequence_text_without_size() {
        let mut w = WriteHandle::new(Vec::new(), Encoding::Text);
        write_sequence(&mut w, &[4u32, 5], false, false).unwrap();
        let bytes = w.into_inner();
        assert_eq!(bytes, b"4 5");

        let mut r = ReadHandle::new(&bytes[..], Encoding::Text);
        let values: Vec<u32> = read_sequence(&mut r, Some(2)).unwrap();
        assert_eq!(values, vec![4, 5]);
    }

    #[test]
    fn test_empty_sequence_text() {
        let mut w = WriteHandle::new(Vec::new(), Encoding::Text);
        write_sequence::<f64, _>(&mut w, &[], true, true).unwrap();
        assert_eq!(w.into_inner(), b"0\n");
    }

    #[test]
    fn test_sequence_binary_always_counts() {
        let mut w = WriteHandle::new(Vec::new(), Encoding::Binary);
        write_sequence(&mut w, &[7i32, 8], false, true).unwrap();
        let bytes = w.into_inner();
        assert_eq!(bytes.len(), 4 + 2 * 4);
        assert_eq!(&bytes[..4], &2u32.to_ne_bytes());

        let mut r = ReadHandle::new(&bytes[..], Encoding::Binary);
        let values: Vec<i32> = read_sequence(&mut r, Some(2)).unwrap();
        assert_eq!(values, vec![7, 8]);
    }

    #[test]
    fn test_binary_count_mismatch() {
        let mut w = WriteHandle::new(Vec::new(), Encoding::Binary);
        write_sequence(&mut w, &[7i32, 8], false, false).unwrap();
        let bytes = w.into_inner();

        let mut r = ReadHandle::new(&bytes[..], Encoding::Binary);
        let err = read_sequence::<i32, _>(&mut r, Some(3)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn test_truncated_sequence_fails() {
        let mut r = ReadHandle::new(&b"4 1 2"[..], Encoding::Text);
        let err = read_sequence::<u32, _>(&mut r, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ReadFailed);
    }

    #[test]
    fn test_huge_count_does_not_preallocate() {
        let bytes = u32::MAX.to_ne_bytes();
        let mut r = ReadHandle::new(&bytes[..], Encoding::Binary);
        assert!(read_sequence::<f64, _>(&mut r, None).is_err());
    }

    #[test]
    fn test_sparse_text_form() {
        let mut w = WriteHandle::new(Vec::new(), Encoding::Text);
        write_sparse(&mut w, &[(9u32, 0.25f64), (2, 0.5)], true).unwrap();
        let bytes = w.into_inner();
        assert_eq!(bytes, b"2 9 0.25 2 0.5\n");

        let mut r = ReadHandle::new(&bytes[..], Encoding::Text);
        let entries: Vec<(u32, f64)> = read_sparse(&mut r).unwrap();
        assert_eq!(entries, vec![(9, 0.25), (2, 0.5)]);
    }

    #[test]
    fn test_sparse_binary_round_trip() {
        let entries = vec![(0u32, 1.0f64), (100_000, 0.125)];
        let mut w = WriteHandle::new(Vec::new(), Encoding::Binary);
        write_sparse(&mut w, &entries, false).unwrap();
        let bytes = w.into_inner();
        assert_eq!(bytes.len(), 4 + 2 * (4 + 8));

        let mut r = ReadHandle::new(&bytes[..], Encoding::Binary);
        assert_eq!(read_sparse::<f64, _>(&mut r).unwrap(), entries);
    }

    #[derive(Debug, PartialEq)]
    struct Label(String);

    impl Record for Label {
        fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
            w.put(&self.0)
        }

        fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
            Ok(Label(r.get()?))
        }
    }

    #[test]
    fn test_records_text_form() {
        let labels = vec![Label("top face".into()), Label(String::new())];
        let mut w = WriteHandle::new(Vec::new(), Encoding::Text);
        write_records(&mut w, &labels).unwrap();
        let bytes = w.into_inner();
        assert_eq!(bytes, b"2\n\"top face\"\n\"\"\n");

        let mut r = ReadHandle::new(&bytes[..], Encoding::Text);
        assert_eq!(read_records::<Label, _>(&mut r).unwrap(), labels);
    }

    #[test]
    fn test_records_binary_round_trip() {
        let labels = vec![Label("a".into()), Label("bc".into()), Label("def".into())];
        let mut w = WriteHandle::new(Vec::new(), Encoding::Binary);
        write_records(&mut w, &labels).unwrap();
        let bytes = w.into_inner();

        let mut r = ReadHandle::new(&bytes[..], Encoding::Binary);
        assert_eq!(read_records::<Label, _>(&mut r).unwrap(), labels);
    }
}
