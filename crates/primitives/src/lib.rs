//! Persisted record types for simstore
//!
//! Every type here implements [`Record`](simstore_durability::Record), and
//! the top-level file contents also implement
//! [`Document`](simstore_durability::Document):
//!
//! | Document | File kind |
//! |----------|-----------|
//! | [`Model`] | `Model` |
//! | [`MaterialLibrary`] | `Material` |
//! | [`Mesh`] | `Mesh` |
//! | [`ViewFactorMatrix`] | `ViewFactorMatrix` |
//! | [`DisplayProperties`] | `DisplayProperties` |
//!
//! ## Composition
//!
//! Derived records embed their base record and write it first
//! ([`RadiativeSurface`] over [`EntityGroup`], the condition kinds over
//! [`Condition`]). Mixed lists are persisted through tagged enums
//! ([`BoundaryCondition`]).
//!
//! ## Schema evolution
//!
//! Fields added after the first release sit at the end of their record
//! and are read only when the file is newer than the version that
//! introduced them; see [`versions`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod condition;
pub mod display;
pub mod geometry;
pub mod material;
pub mod mesh;
pub mod model;
pub mod radiation;
pub mod table;
pub mod versions;

pub use condition::{
    BoundaryCondition, Condition, ConvectionCondition, HeatLoadCondition, TemperatureCondition,
};
pub use display::{Color, DisplayProperties, GroupColor};
pub use geometry::{Matrix, Vector3};
pub use material::{Material, MaterialLibrary, DEFAULT_ABSORPTIVITY, DEFAULT_EMISSIVITY};
pub use mesh::{Element, ElementKind, EntityGroup, EntityKind, Mesh, Node, RadiativeSurface};
pub use model::Model;
pub use radiation::{RadiationPatch, ViewFactorMatrix, ViewFactorRow};
pub use table::{LabeledTable, TablePoint};
pub use versions::{CONDITION_SCHEDULE_SINCE, MATERIAL_OPTICAL_SINCE};
