//! Display properties for the model editor

use std::io::{BufRead, Write};

use simstore_core::{FileKind, Result};
use simstore_durability::{read_records, write_records, Document, ReadHandle, Record, WriteHandle};

/// RGB color, one component per `u32` (0..=255 in practice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red
    pub r: u32,
    /// Green
    pub g: u32,
    /// Blue
    pub b: u32,
}

impl Color {
    /// Create a color
    pub const fn rgb(r: u32, g: u32, b: u32) -> Self {
        Color { r, g, b }
    }
}

impl Record for Color {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        w.put(&self.r)?;
        w.space()?;
        w.put(&self.g)?;
        w.space()?;
        w.put(&self.b)
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        Ok(Color {
            r: r.get()?,
            g: r.get()?,
            b: r.get()?,
        })
    }
}

/// Color assigned to one entity group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupColor {
    /// Entity group id
    pub group_id: i32,
    /// Its color
    pub color: Color,
}

impl Record for GroupColor {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        w.put(&self.group_id)?;
        w.space()?;
        w.record(&self.color)
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        Ok(GroupColor {
            group_id: r.get()?,
            color: r.record()?,
        })
    }
}

/// Editor display settings stored beside a model.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayProperties {
    /// Draw element edges
    pub show_edges: bool,
    /// Surface opacity, 0.0 to 1.0
    pub opacity: f64,
    /// Viewport background
    pub background: Color,
    /// Per-group colors
    pub group_colors: Vec<GroupColor>,
}

impl Default for DisplayProperties {
    fn default() -> Self {
        DisplayProperties {
            show_edges: true,
            opacity: 1.0,
            background: Color::rgb(255, 255, 255),
            group_colors: Vec::new(),
        }
    }
}

impl DisplayProperties {
    /// Color assigned to `group_id`, if any
    pub fn color_of(&self, group_id: i32) -> Option<Color> {
        self.group_colors
            .iter()
            .find(|gc| gc.group_id == group_id)
            .map(|gc| gc.color)
    }
}

impl Record for DisplayProperties {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        w.put(&self.show_edges)?;
        w.space()?;
        w.put(&self.opacity)?;
        w.space()?;
        w.record(&self.background)?;
        w.newline()?;
        write_records(w, &self.group_colors)
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        Ok(DisplayProperties {
            show_edges: r.get()?,
            opacity: r.get()?,
            background: r.record()?,
            group_colors: read_records(r)?,
        })
    }
}

impl Document for DisplayProperties {
    const KIND: FileKind = FileKind::DisplayProperties;
}

#[cfg(test)]
mod tests {
    use super::*;
    use simstore_core::Encoding;

    #[test]
    fn test_round_trip_and_lookup() {
        let props = DisplayProperties {
            show_edges: false,
            opacity: 0.5,
            background: Color::rgb(20, 20, 28),
            group_colors: vec![
                GroupColor {
                    group_id: 10,
                    color: Color::rgb(200, 40, 40),
                },
                GroupColor {
                    group_id: 11,
                    color: Color::rgb(0, 128, 255),
                },
            ],
        };
        for encoding in [Encoding::Text, Encoding::Binary] {
            let mut w = WriteHandle::new(Vec::new(), encoding);
            w.record(&props).unwrap();
            let bytes = w.into_inner();
            let mut r = ReadHandle::new(&bytes[..], encoding);
            let back: DisplayProperties = r.record().unwrap();
            assert_eq!(back, props);
            assert_eq!(back.color_of(11), Some(Color::rgb(0, 128, 255)));
            assert_eq!(back.color_of(12), None);
        }
    }

    #[test]
    fn test_binary_width() {
        let mut w = WriteHandle::new(Vec::new(), Encoding::Binary);
        w.record(&DisplayProperties::default()).unwrap();
        // bool, f64, three u32, empty record count
        assert_eq!(w.into_inner().len(), 1 + 8 + 12 + 4);
    }
}
