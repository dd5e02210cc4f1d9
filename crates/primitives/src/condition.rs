//! Boundary conditions
//!
//! Every condition starts with the shared [`Condition`] fields; the
//! specific kinds embed it and write it first. [`BoundaryCondition`] tags
//! the kind so mixed lists can be persisted in one sequence.

use std::io::{BufRead, Write};

use simstore_core::{Error, Result};
use simstore_durability::{ReadHandle, Record, WriteHandle};

use crate::table::LabeledTable;
use crate::versions::{has_field, CONDITION_SCHEDULE_SINCE};

/// Fields shared by every boundary condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Condition id
    pub id: i32,
    /// Display name
    pub name: String,
    /// Entity group the condition applies to
    pub group_id: i32,
    /// Disabled conditions are kept but not applied
    pub enabled: bool,
}

impl Condition {
    /// Enabled condition on `group_id`
    pub fn new(id: i32, name: impl Into<String>, group_id: i32) -> Self {
        Condition {
            id,
            name: name.into(),
            group_id,
            enabled: true,
        }
    }
}

impl Record for Condition {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        w.put(&self.id)?;
        w.space()?;
        w.put(&self.name)?;
        w.space()?;
        w.put(&self.group_id)?;
        w.space()?;
        w.put(&self.enabled)
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        Ok(Condition {
            id: r.get()?,
            name: r.get()?,
            group_id: r.get()?,
            enabled: r.get()?,
        })
    }
}

/// Fixed temperature, optionally following a time schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureCondition {
    /// Shared fields
    pub base: Condition,
    /// Temperature, or the schedule's scale factor when a schedule is set
    pub temperature: f64,
    /// Temperature vs time; absent in files up to 1.1.0
    pub schedule: Option<LabeledTable>,
}

impl Record for TemperatureCondition {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        w.record(&self.base)?;
        w.space()?;
        w.put(&self.temperature)?;
        w.space()?;
        w.put(&self.schedule.is_some())?;
        if let Some(schedule) = &self.schedule {
            w.newline()?;
            w.record(schedule)?;
        }
        Ok(())
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        let base = r.record()?;
        let temperature = r.get()?;
        let mut schedule = None;
        if has_field(r, CONDITION_SCHEDULE_SINCE) && r.get::<bool>()? {
            schedule = Some(r.record()?);
        }
        Ok(TemperatureCondition {
            base,
            temperature,
            schedule,
        })
    }
}

/// Applied heat load.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatLoadCondition {
    /// Shared fields
    pub base: Condition,
    /// Power in W, or W/m² when `per_area` is set
    pub power: f64,
    /// Interpret `power` as a flux
    pub per_area: bool,
}

impl Record for HeatLoadCondition {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        w.record(&self.base)?;
        w.space()?;
        w.put(&self.power)?;
        w.space()?;
        w.put(&self.per_area)
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        Ok(HeatLoadCondition {
            base: r.record()?,
            power: r.get()?,
            per_area: r.get()?,
        })
    }
}

/// Convective exchange with an ambient fluid.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvectionCondition {
    /// Shared fields
    pub base: Condition,
    /// Film coefficient in W/m² K
    pub coefficient: f64,
    /// Ambient temperature
    pub ambient: f64,
}

impl Record for ConvectionCondition {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        w.record(&self.base)?;
        w.space()?;
        w.put(&self.coefficient)?;
        w.space()?;
        w.put(&self.ambient)
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        Ok(ConvectionCondition {
            base: r.record()?,
            coefficient: r.get()?,
            ambient: r.get()?,
        })
    }
}

/// Any boundary condition, persisted as an `i32` tag and the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryCondition {
    /// Tag 1
    Temperature(TemperatureCondition),
    /// Tag 2
    HeatLoad(HeatLoadCondition),
    /// Tag 3
    Convection(ConvectionCondition),
}

impl BoundaryCondition {
    /// Wire tag of the variant
    pub fn tag(&self) -> i32 {
        match self {
            BoundaryCondition::Temperature(_) => 1,
            BoundaryCondition::HeatLoad(_) => 2,
            BoundaryCondition::Convection(_) => 3,
        }
    }

    /// Shared fields of whichever variant this is
    pub fn base(&self) -> &Condition {
        match self {
            BoundaryCondition::Temperature(c) => &c.base,
            BoundaryCondition::HeatLoad(c) => &c.base,
            BoundaryCondition::Convection(c) => &c.base,
        }
    }
}

impl Record for BoundaryCondition {
    fn write<W: Write>(&self, w: &mut WriteHandle<W>) -> Result<()> {
        w.put(&self.tag())?;
        w.space()?;
        match self {
            BoundaryCondition::Temperature(c) => w.record(c),
            BoundaryCondition::HeatLoad(c) => w.record(c),
            BoundaryCondition::Convection(c) => w.record(c),
        }
    }

    fn read<R: BufRead>(r: &mut ReadHandle<R>) -> Result<Self> {
        let tag: i32 = r.get()?;
        match tag {
            1 => Ok(BoundaryCondition::Temperature(r.record()?)),
            2 => Ok(BoundaryCondition::HeatLoad(r.record()?)),
            3 => Ok(BoundaryCondition::Convection(r.record()?)),
            other => Err(Error::InvalidFormat(format!(
                "unknown boundary condition tag {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simstore_core::{Encoding, ErrorKind, FormatVersion};

    fn round_trip(value: &BoundaryCondition, encoding: Encoding) -> BoundaryCondition {
        let mut w = WriteHandle::new(Vec::new(), encoding);
        w.record(value).unwrap();
        let bytes = w.into_inner();
        let mut r = ReadHandle::new(&bytes[..], encoding);
        r.record().unwrap()
    }

    fn scheduled() -> BoundaryCondition {
        BoundaryCondition::Temperature(TemperatureCondition {
            base: Condition::new(4, "Sink plate", 12),
            temperature: 1.0,
            schedule: Some(
                LabeledTable::new("Time", "s", "Temperature", "K")
                    .with_point(0.0, 293.0)
                    .with_point(60.0, 350.0),
            ),
        })
    }

    #[test]
    fn test_all_variants_round_trip() {
        let mut disabled = Condition::new(7, "Fan off", 3);
        disabled.enabled = false;
        let values = [
            scheduled(),
            BoundaryCondition::HeatLoad(HeatLoadCondition {
                base: Condition::new(5, "Board power", 2),
                power: 12.5,
                per_area: false,
            }),
            BoundaryCondition::Convection(ConvectionCondition {
                base: disabled,
                coefficient: 25.0,
                ambient: 300.0,
            }),
        ];
        for encoding in [Encoding::Text, Encoding::Binary] {
            for value in &values {
                assert_eq!(&round_trip(value, encoding), value);
            }
        }
    }

    #[test]
    fn test_base_written_first() {
        let value = BoundaryCondition::HeatLoad(HeatLoadCondition {
            base: Condition::new(5, "Board", 2),
            power: 3.0,
            per_area: true,
        });
        let mut w = WriteHandle::new(Vec::new(), Encoding::Text);
        w.record(&value).unwrap();
        assert_eq!(w.into_inner(), b"2 5 \"Board\" 2 \x01 3 \x01");
    }

    #[test]
    fn test_unknown_tag() {
        let mut r = ReadHandle::new(&b"9 1 \"x\" 1 \x01"[..], Encoding::Text);
        let err = r.record::<BoundaryCondition>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn test_schedule_absent_before_gate() {
        // 1.1.0 files end the temperature condition after the temperature
        let mut r = ReadHandle::new(&b"1 4 \"Sink\" 12 \x01 350"[..], Encoding::Text);
        r.set_version(FormatVersion::release(1, 1, 0));
        match r.record::<BoundaryCondition>().unwrap() {
            BoundaryCondition::Temperature(c) => {
                assert_eq!(c.temperature, 350.0);
                assert!(c.schedule.is_none());
            }
            other => panic!("unexpected variant {:?}", other),
        }
    }
}
