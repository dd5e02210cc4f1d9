//! Complete simulation model

use std::io::{BufRead, Write};

use simstore_core::{FileKind, Result};
use simstore_durability::{read_records, write_records, Document, ReadHandle, Record, WriteHandle};

use crate::condition::BoundaryCondition;
use crate::material::MaterialLibrary;
use crate::mesh::{Mesh, RadiativeSurface};
use crate::radiation::RadiationPatch;

/// Everything the solver needs for one analysis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    /// Model title
    pub title: String,
    /// Geometry
    pub mesh: Mesh,
    /// Materials referenced by surfaces
    pub materials: MaterialLibrary,
    /// Surfaces taking part in radiation exchange
    pub surfaces: Vec<RadiativeSurface>,
    /// Boundary conditions
    pub conditions: Vec<BoundaryCondition>,
    /// Radiation patches
    pub patches: Vec<RadiationPatch>,
}

impl Model {
    /// Empty model with a title
    pub fn new(title: impl Into<String>) -> Self {
        Model {
            title: title.into(),
            ..Model::default()
        }
    }

    /// Enabled conditions applied to `group_id`
    pub fn conditions_on(&self, group_id: i32) -> impl Iterator<Item = &BoundaryCondition> {
        self.conditions
            .iter()
            .filter(move |c| c.base().enabled && c.base().group_id == group_id)
    }
}

impl Record for Model {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        w.put(&self.title)?;
        w.newline()?;
        w.record(&self.mesh)?;
        w.record(&self.materials)?;
        write_records(w, &self.surfaces)?;
        write_records(w, &self.conditions)?;
        write_records(w, &self.patches)
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        Ok(Model {
            title: r.get()?,
            mesh: r.record()?,
            materials: r.record()?,
            surfaces: read_records(r)?,
            conditions: read_records(r)?,
            patches: read_records(r)?,
        })
    }
}

impl Document for Model {
    const KIND: FileKind = FileKind::Model;
}
