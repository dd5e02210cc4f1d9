//! Labeled lookup tables (property vs temperature, load vs time, ...)

use std::io::{BufRead, Write};

use simstore_core::Result;
use simstore_durability::{read_records, write_records, ReadHandle, Record, WriteHandle};

/// One `(key, value)` sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TablePoint {
    /// Independent variable
    pub key: f64,
    /// Dependent variable
    pub value: f64,
}

impl Record for TablePoint {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        w.put(&self.key)?;
        w.space()?;
        w.put(&self.value)
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        Ok(TablePoint {
            key: r.get()?,
            value: r.get()?,
        })
    }
}

/// Sampled function with named, unit-tagged axes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabeledTable {
    /// Name of the key axis
    pub key_name: String,
    /// Units of the key axis
    pub key_units: String,
    /// Name of the value axis
    pub value_name: String,
    /// Units of the value axis
    pub value_units: String,
    /// Samples, in key order
    pub points: Vec<TablePoint>,
}

impl LabeledTable {
    /// Empty table with the given axis labels
    pub fn new(
        key_name: impl Into<String>,
        key_units: impl Into<String>,
        value_name: impl Into<String>,
        value_units: impl Into<String>,
    ) -> Self {
        LabeledTable {
            key_name: key_name.into(),
            key_units: key_units.into(),
            value_name: value_name.into(),
            value_units: value_units.into(),
            points: Vec::new(),
        }
    }

    /// Append a sample
    pub fn with_point(mut self, key: f64, value: f64) -> Self {
        self.points.push(TablePoint { key, value });
        self
    }

    /// Linear interpolation at `key`, clamped to the first and last sample.
    ///
    /// Assumes points are sorted by key. `None` for an empty table.
    pub fn value_at(&self, key: f64) -> Option<f64> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        if key <= first.key {
            return Some(first.value);
        }
        if key >= last.key {
            return Some(last.value);
        }
        let upper = self.points.iter().position(|p| p.key >= key)?;
        let (a, b) = (self.points[upper - 1], self.points[upper]);
        if b.key == a.key {
            return Some(b.value);
        }
        let t = (key - a.key) / (b.key - a.key);
        Some(a.value + t * (b.value - a.value))
    }
}

impl Record for LabeledTable {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        w.put(&self.key_name)?;
        w.space()?;
        w.put(&self.key_units)?;
        w.space()?;
        w.put(&self.value_name)?;
        w.space()?;
        w.put(&self.value_units)?;
        w.newline()?;
        write_records(w, &self.points)
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        Ok(LabeledTable {
            key_name: r.get()?,
            key_units: r.get()?,
            value_name: r.get()?,
            value_units: r.get()?,
            points: read_records(r)?,
        })
    }
}
