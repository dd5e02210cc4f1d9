//! Geometric values: 3-vectors and dense matrices

use std::io::{BufRead, Write};

use simstore_core::{Error, Result};
use simstore_durability::{read_sequence, write_sequence, ReadHandle, Record, WriteHandle};

/// Point or direction in model space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Vector3 {
    /// Create a vector
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3 { x, y, z }
    }
}

impl Record for Vector3 {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        w.put(&self.x)?;
        w.space()?;
        w.put(&self.y)?;
        w.space()?;
        w.put(&self.z)
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        Ok(Vector3 {
            x: r.get()?,
            y: r.get()?,
            z: r.get()?,
        })
    }
}

/// Dense row-major matrix.
///
/// Persisted as `rows cols` followed by one line per row. Rows are written
/// without their own count in text, since the reader already knows `cols`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: u32,
    cols: u32,
    data: Vec<Vec<f64>>,
}

impl Matrix {
    /// All-zero matrix of the given shape
    pub fn zeros(rows: u32, cols: u32) -> Self {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols as usize]; rows as usize],
        }
    }

    /// Build from rows; every row must have the same length.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Self> {
        let cols = data.first().map_or(0, Vec::len);
        if let Some(bad) = data.iter().position(|row| row.len() != cols) {
            return Err(Error::InvalidFormat(format!(
                "row {} has {} columns, expected {}",
                bad,
                data[bad].len(),
                cols
            )));
        }
        let rows = u32::try_from(data.len())
            .map_err(|_| Error::InvalidFormat("too many matrix rows".to_string()))?;
        let cols = u32::try_from(cols)
            .map_err(|_| Error::InvalidFormat("too many matrix columns".to_string()))?;
        Ok(Matrix { rows, cols, data })
    }

    /// Number of rows
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Element at (`row`, `col`), if in range
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Overwrite the element at (`row`, `col`). Returns false if out of range.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> bool {
        match self.data.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Rows as slices
    pub fn row_slices(&self) -> impl Iterator<Item = &[f64]> {
        self.data.iter().map(Vec::as_slice)
    }
}

impl Record for Matrix {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        w.put(&self.rows)?;
        w.space()?;
        w.put(&self.cols)?;
        w.newline()?;
        for row in &self.data {
            write_sequence(w, row, false, true)?;
        }
        Ok(())
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        let rows: u32 = r.get()?;
        let cols: u32 = r.get()?;
        let mut data = Vec::with_capacity((rows as usize).min(4096));
        for _ in 0..rows {
            data.push(read_sequence(r, Some(cols as usize))?);
        }
        Ok(Matrix { rows, cols, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simstore_core::{Encoding, ErrorKind};

    #[test]
    fn test_vector_text_form() {
        let mut w = WriteHandle::new(Vec::new(), Encoding::Text);
        w.record(&Vector3::new(1.0, -0.5, 2.25)).unwrap();
        assert_eq!(w.into_inner(), b"1 -0.5 2.25");
    }

    #[test]
    fn test_matrix_text_form() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.5, 0.0]]).unwrap();
        let mut w = WriteHandle::new(Vec::new(), Encoding::Text);
        w.record(&m).unwrap();
        let bytes = w.into_inner();
        assert_eq!(bytes, b"2 2\n1 2\n3.5 0\n");

        let mut r = ReadHandle::new(&bytes[..], Encoding::Text);
        assert_eq!(r.record::<Matrix>().unwrap(), m);
    }

    #[test]
    fn test_matrix_binary_round_trip() {
        let mut m = Matrix::zeros(3, 2);
        assert!(m.set(2, 1, -4.0));
        assert!(!m.set(3, 0, 1.0));

        let mut w = WriteHandle::new(Vec::new(), Encoding::Binary);
        w.record(&m).unwrap();
        let bytes = w.into_inner();
        // rows, cols, then each row with its count
        assert_eq!(bytes.len(), 8 + 3 * (4 + 2 * 8));

        let mut r = ReadHandle::new(&bytes[..], Encoding::Binary);
        let back: Matrix = r.record().unwrap();
        assert_eq!(back.get(2, 1), Some(-4.0));
        assert_eq!(back, m);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Matrix::from_rows(vec![vec![1.0], vec![1.0, 2.0]]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn test_binary_row_length_checked() {
        // header says 1x3, row carries 2 values
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1u32.to_ne_bytes());
        bytes.extend_from_slice(&3u32.to_ne_bytes());
        bytes.extend_from_slice(&2u32.to_ne_bytes());
        bytes.extend_from_slice(&1.0f64.to_ne_bytes());
        bytes.extend_from_slice(&2.0f64.to_ne_bytes());

        let mut r = ReadHandle::new(&bytes[..], Encoding::Binary);
        let err = r.record::<Matrix>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn test_empty_matrix() {
        let m = Matrix::zeros(0, 0);
        let mut w = WriteHandle::new(Vec::new(), Encoding::Text);
        w.record(&m).unwrap();
        let bytes = w.into_inner();
        let mut r = ReadHandle::new(&bytes[..], Encoding::Text);
        assert_eq!(r.record::<Matrix>().unwrap(), m);
    }
}
