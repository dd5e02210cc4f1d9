//! Radiation patches and view-factor matrices
//!
//! View-factor rows are mostly zero, so each row is persisted as a sparse
//! sequence of `(column, factor)` pairs.

use std::io::{BufRead, Write};

use simstore_core::{Error, FileKind, Result};
use simstore_durability::{
    read_records, read_sequence, read_sparse, write_records, write_sequence, write_sparse,
    Document, ReadHandle, Record, WriteHandle,
};

use crate::geometry::Vector3;

/// Planar patch taking part in radiation exchange.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiationPatch {
    /// Patch id
    pub id: u32,
    /// Radiative surface the patch belongs to
    pub surface_id: i32,
    /// Area in m²
    pub area: f64,
    /// Centroid
    pub centroid: Vector3,
    /// Unit normal
    pub normal: Vector3,
}

impl Record for RadiationPatch {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        w.put(&self.id)?;
        w.space()?;
        w.put(&self.surface_id)?;
        w.space()?;
        w.put(&self.area)?;
        w.space()?;
        w.record(&self.centroid)?;
        w.space()?;
        w.record(&self.normal)
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        Ok(RadiationPatch {
            id: r.get()?,
            surface_id: r.get()?,
            area: r.get()?,
            centroid: r.record()?,
            normal: r.record()?,
        })
    }
}

/// One row of a view-factor matrix: the non-zero `(column, factor)` pairs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewFactorRow {
    /// Non-zero entries, in column order when built with [`ViewFactorRow::from_dense`]
    pub entries: Vec<(u32, f64)>,
}

impl ViewFactorRow {
    /// Keep the entries of `values` whose magnitude exceeds `threshold`.
    pub fn from_dense(values: &[f64], threshold: f64) -> Self {
        let entries = values
            .iter()
            .zip(0u32..)
            .filter(|(v, _)| v.abs() > threshold)
            .map(|(&v, col)| (col, v))
            .collect();
        ViewFactorRow { entries }
    }

    /// Expand to `len` columns; columns outside the range are dropped.
    pub fn to_dense(&self, len: usize) -> Vec<f64> {
        let mut dense = vec![0.0; len];
        for &(col, value) in &self.entries {
            if let Some(cell) = dense.get_mut(col as usize) {
                *cell = value;
            }
        }
        dense
    }

    /// Factor towards `col`, 0.0 when not stored
    pub fn get(&self, col: u32) -> f64 {
        self.entries
            .iter()
            .find(|(c, _)| *c == col)
            .map_or(0.0, |&(_, v)| v)
    }

    /// Sum of the stored factors (1.0 for a closed enclosure)
    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }
}

impl Record for ViewFactorRow {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        write_sparse(w, &self.entries, false)
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        Ok(ViewFactorRow {
            entries: read_sparse(r)?,
        })
    }
}

/// View factors between radiation patches; row `i` belongs to `patch_ids[i]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewFactorMatrix {
    /// Patch id of each row (and column)
    pub patch_ids: Vec<u32>,
    /// One row per patch
    pub rows: Vec<ViewFactorRow>,
}

impl ViewFactorMatrix {
    /// Factor from row `row` to column `col`, 0.0 when not stored
    pub fn get(&self, row: usize, col: u32) -> f64 {
        self.rows.get(row).map_or(0.0, |r| r.get(col))
    }

    /// Row index of the patch with the given id
    pub fn index_of(&self, patch_id: u32) -> Option<usize> {
        self.patch_ids.iter().position(|&id| id == patch_id)
    }
}

impl Record for ViewFactorMatrix {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        if self.rows.len() != self.patch_ids.len() {
            return Err(Error::WriteFailed(format!(
                "{} rows for {} patches",
                self.rows.len(),
                self.patch_ids.len()
            )));
        }
        write_sequence(w, &self.patch_ids, true, true)?;
        write_records(w, &self.rows)
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        let patch_ids: Vec<u32> = read_sequence(r, None)?;
        let rows: Vec<ViewFactorRow> = read_records(r)?;
        if rows.len() != patch_ids.len() {
            return Err(Error::InvalidFormat(format!(
                "{} rows for {} patches",
                rows.len(),
                patch_ids.len()
            )));
        }
        Ok(ViewFactorMatrix { patch_ids, rows })
    }
}

impl Document for ViewFactorMatrix {
    const KIND: FileKind = FileKind::ViewFactorMatrix;
}
