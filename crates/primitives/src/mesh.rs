//! Mesh: nodes, elements and named entity groups

use std::io::{BufRead, Write};

use simstore_core::{Error, FileKind, Result};
use simstore_durability::{
    read_records, read_sequence, write_records, write_sequence, Document, ReadHandle, Record,
    WriteHandle,
};

use crate::geometry::Vector3;

/// What the members of an [`EntityGroup`] refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Node ids
    Node,
    /// Element ids
    Element,
    /// Element faces
    Face,
}

impl EntityKind {
    /// Wire tag
    pub const fn tag(self) -> i32 {
        match self {
            EntityKind::Node => 0,
            EntityKind::Element => 1,
            EntityKind::Face => 2,
        }
    }

    /// Inverse of [`EntityKind::tag`]
    pub const fn from_tag(tag: i32) -> Option<Self> {
        match tag {
            0 => Some(EntityKind::Node),
            1 => Some(EntityKind::Element),
            2 => Some(EntityKind::Face),
            _ => None,
        }
    }
}

impl Record for EntityKind {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        w.put(&self.tag())
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        let tag: i32 = r.get()?;
        EntityKind::from_tag(tag)
            .ok_or_else(|| Error::InvalidFormat(format!("unknown entity kind tag {}", tag)))
    }
}

/// Named set of mesh entities.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityGroup {
    /// Group id, referenced by conditions and surfaces
    pub id: i32,
    /// Display name
    pub name: String,
    /// Kind of entity listed in `members`
    pub entity_kind: EntityKind,
    /// Member ids
    pub members: Vec<u32>,
}

impl EntityGroup {
    /// Group over `members`
    pub fn new(id: i32, name: impl Into<String>, entity_kind: EntityKind, members: Vec<u32>) -> Self {
        EntityGroup {
            id,
            name: name.into(),
            entity_kind,
            members,
        }
    }
}

impl Record for EntityGroup {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        w.put(&self.id)?;
        w.space()?;
        w.put(&self.name)?;
        w.space()?;
        w.record(&self.entity_kind)?;
        w.newline()?;
        write_sequence(w, &self.members, true, false)
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        Ok(EntityGroup {
            id: r.get()?,
            name: r.get()?,
            entity_kind: r.record()?,
            members: read_sequence(r, None)?,
        })
    }
}

/// Entity group that takes part in radiation exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiativeSurface {
    /// Underlying group
    pub group: EntityGroup,
    /// Material supplying the optical properties
    pub material_id: i32,
    /// Radiate from the front side only
    pub front_only: bool,
}

impl Record for RadiativeSurface {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        w.record(&self.group)?;
        w.newline()?;
        w.put(&self.material_id)?;
        w.space()?;
        w.put(&self.front_only)
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        Ok(RadiativeSurface {
            group: r.record()?,
            material_id: r.get()?,
            front_only: r.get()?,
        })
    }
}

/// Mesh node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    /// Node id
    pub id: u32,
    /// Position in model space
    pub position: Vector3,
}

impl Record for Node {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        w.put(&self.id)?;
        w.space()?;
        w.record(&self.position)
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        Ok(Node {
            id: r.get()?,
            position: r.record()?,
        })
    }
}

/// Element topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// 3-node triangle
    Triangle,
    /// 4-node quadrilateral
    Quad,
    /// 4-node tetrahedron
    Tetra,
    /// 8-node hexahedron
    Hexa,
}

impl ElementKind {
    /// Wire tag
    pub const fn tag(self) -> i32 {
        match self {
            ElementKind::Triangle => 0,
            ElementKind::Quad => 1,
            ElementKind::Tetra => 2,
            ElementKind::Hexa => 3,
        }
    }

    /// Inverse of [`ElementKind::tag`]
    pub const fn from_tag(tag: i32) -> Option<Self> {
        match tag {
            0 => Some(ElementKind::Triangle),
            1 => Some(ElementKind::Quad),
            2 => Some(ElementKind::Tetra),
            3 => Some(ElementKind::Hexa),
            _ => None,
        }
    }

    /// Nodes per element
    pub const fn node_count(self) -> usize {
        match self {
            ElementKind::Triangle => 3,
            ElementKind::Quad | ElementKind::Tetra => 4,
            ElementKind::Hexa => 8,
        }
    }
}

/// Mesh element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Element id
    pub id: u32,
    /// Topology
    pub kind: ElementKind,
    /// Node ids, `kind.node_count()` of them
    pub nodes: Vec<u32>,
}

impl Record for Element {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        if self.nodes.len() != self.kind.node_count() {
            return Err(Error::WriteFailed(format!(
                "element {} has {} nodes, {:?} needs {}",
                self.id,
                self.nodes.len(),
                self.kind,
                self.kind.node_count()
            )));
        }
        w.put(&self.id)?;
        w.space()?;
        w.put(&self.kind.tag())?;
        w.space()?;
        write_sequence(w, &self.nodes, true, false)
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        let id = r.get()?;
        let tag: i32 = r.get()?;
        let kind = ElementKind::from_tag(tag)
            .ok_or_else(|| Error::InvalidFormat(format!("unknown element kind tag {}", tag)))?;
        let nodes: Vec<u32> = read_sequence(r, None)?;
        if nodes.len() != kind.node_count() {
            return Err(Error::InvalidFormat(format!(
                "element {} lists {} nodes, {:?} needs {}",
                id,
                nodes.len(),
                kind,
                kind.node_count()
            )));
        }
        Ok(Element { id, kind, nodes })
    }
}

/// Finite-element mesh.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    /// Nodes
    pub nodes: Vec<Node>,
    /// Elements
    pub elements: Vec<Element>,
    /// Entity groups
    pub groups: Vec<EntityGroup>,
}

impl Mesh {
    /// Node with the given id
    pub fn node(&self, id: u32) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Element with the given id
    pub fn element(&self, id: u32) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Group with the given id
    pub fn group(&self, id: i32) -> Option<&EntityGroup> {
        self.groups.iter().find(|g| g.id == id)
    }
}

impl Record for Mesh {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        write_records(w, &self.nodes)?;
        write_records(w, &self.elements)?;
        write_records(w, &self.groups)
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        Ok(Mesh {
            nodes: read_records(r)?,
            elements: read_records(r)?,
            groups: read_records(r)?,
        })
    }
}

impl Document for Mesh {
    const KIND: FileKind = FileKind::Mesh;
}
