//! Materials and material libraries

use std::io::{BufRead, Write};

use simstore_core::{FileKind, Result};
use simstore_durability::{read_records, write_records, Document, ReadHandle, Record, WriteHandle};
use tracing::debug;

use crate::table::LabeledTable;
use crate::versions::{has_field, MATERIAL_OPTICAL_SINCE};

/// Emissivity assumed for materials from files that predate optical data.
pub const DEFAULT_EMISSIVITY: f64 = 1.0;

/// Absorptivity assumed for materials from files that predate optical data.
pub const DEFAULT_ABSORPTIVITY: f64 = 1.0;

/// Thermal and optical properties of one material.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Material id, referenced by surfaces
    pub id: i32,
    /// Display name
    pub name: String,
    /// Density in kg/m³
    pub density: f64,
    /// Specific heat in J/kg K
    pub specific_heat: f64,
    /// Conductivity vs temperature
    pub conductivity: LabeledTable,
    /// Hemispherical emissivity; introduced after 1.0.0
    pub emissivity: f64,
    /// Solar absorptivity; introduced after 1.0.0
    pub absorptivity: f64,
}

impl Material {
    /// Material with default optical properties and an empty conductivity table
    pub fn new(id: i32, name: impl Into<String>, density: f64, specific_heat: f64) -> Self {
        Material {
            id,
            name: name.into(),
            density,
            specific_heat,
            conductivity: LabeledTable::new("Temperature", "K", "Conductivity", "W/m K"),
            emissivity: DEFAULT_EMISSIVITY,
            absorptivity: DEFAULT_ABSORPTIVITY,
        }
    }
}

impl Record for Material {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        w.put(&self.id)?;
        w.space()?;
        w.put(&self.name)?;
        w.space()?;
        w.put(&self.density)?;
        w.space()?;
        w.put(&self.specific_heat)?;
        w.newline()?;
        w.record(&self.conductivity)?;
        w.put(&self.emissivity)?;
        w.space()?;
        w.put(&self.absorptivity)
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        let mut material = Material {
            id: r.get()?,
            name: r.get()?,
            density: r.get()?,
            specific_heat: r.get()?,
            conductivity: r.record()?,
            emissivity: DEFAULT_EMISSIVITY,
            absorptivity: DEFAULT_ABSORPTIVITY,
        };
        if has_field(r, MATERIAL_OPTICAL_SINCE) {
            material.emissivity = r.get()?;
            material.absorptivity = r.get()?;
        } else {
            debug!(
                target: "simstore::io",
                id = material.id,
                version = %r.version(),
                "Material predates optical properties, using defaults"
            );
        }
        Ok(material)
    }
}

/// Collection of materials stored as one file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MaterialLibrary {
    /// Materials in file order
    pub materials: Vec<Material>,
}

impl MaterialLibrary {
    /// Library holding `materials`
    pub fn new(materials: Vec<Material>) -> Self {
        MaterialLibrary { materials }
    }

    /// Material with the given id
    pub fn by_id(&self, id: i32) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == id)
    }

    /// First material with the given name
    pub fn by_name(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.name == name)
    }
}

impl Record for MaterialLibrary {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        write_records(w, &self.materials)
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        Ok(MaterialLibrary {
            materials: read_records(r)?,
        })
    }
}

impl Document for MaterialLibrary {
    const KIND: FileKind = FileKind::Material;
}
