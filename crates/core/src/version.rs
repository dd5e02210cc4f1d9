//! Format version identifiers
//!
//! Every persisted file carries the [`FormatVersion`] it was written at.
//! Record codecs compare the version of the file being read against the
//! version that introduced an optional field to decide whether the field is
//! present on the wire.
//!
//! ## Ordering
//!
//! Versions are totally ordered by major, then minor, then [`Stage`], then
//! patch. The stage outranks the patch number: a `Release` 1.2.0 is newer
//! than a `ReleaseCandidate` 1.2.9.
//!
//! ## Text form
//!
//! `major.minor[.stage_tag_]patch`, e.g. `1.2.0` or `1.3.rc_2`. Release
//! versions carry no stage tag.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Separator between a stage tag and the patch number (`rc_2`).
pub const STAGE_SEPARATOR: char = '_';

/// Delimiter between version fields in the canonical text form.
pub const DEFAULT_DELIMITER: char = '.';

/// Release stage of a format version.
///
/// Declaration order is the ordering: `Alpha < Beta < ReleaseCandidate < Release`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Early development build
    Alpha,
    /// Feature-complete preview
    Beta,
    /// Release candidate
    ReleaseCandidate,
    /// Final release (no tag in the text form)
    Release,
}

impl Stage {
    /// Short text tag, `None` for `Release`.
    pub const fn tag(self) -> Option<&'static str> {
        match self {
            Stage::Alpha => Some("alpha"),
            Stage::Beta => Some("beta"),
            Stage::ReleaseCandidate => Some("rc"),
            Stage::Release => None,
        }
    }

    /// Look up a stage by its text tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "alpha" => Some(Stage::Alpha),
            "beta" => Some(Stage::Beta),
            "rc" => Some(Stage::ReleaseCandidate),
            _ => None,
        }
    }

    /// Numeric code used by the binary encoding.
    pub const fn code(self) -> u32 {
        match self {
            Stage::Alpha => 0,
            Stage::Beta => 1,
            Stage::ReleaseCandidate => 2,
            Stage::Release => 3,
        }
    }

    /// Inverse of [`Stage::code`].
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Stage::Alpha),
            1 => Some(Stage::Beta),
            2 => Some(Stage::ReleaseCandidate),
            3 => Some(Stage::Release),
            _ => None,
        }
    }
}

/// Version of the persisted file format.
///
/// ## Invariants
///
/// - The zero version (0.0.0, Release) means "unknown"; see [`FormatVersion::is_valid`]
/// - Values are immutable once constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FormatVersion {
    major: u32,
    minor: u32,
    patch: u32,
    stage: Stage,
}

impl FormatVersion {
    /// The reserved "unknown/invalid" version.
    pub const UNKNOWN: FormatVersion = FormatVersion::new(0, 0, 0, Stage::Release);

    /// Create a version.
    pub const fn new(major: u32, minor: u32, patch: u32, stage: Stage) -> Self {
        FormatVersion {
            major,
            minor,
            patch,
            stage,
        }
    }

    /// Create a `Release` version.
    pub const fn release(major: u32, minor: u32, patch: u32) -> Self {
        FormatVersion::new(major, minor, patch, Stage::Release)
    }

    /// Major component
    pub const fn major(&self) -> u32 {
        self.major
    }

    /// Minor component
    pub const fn minor(&self) -> u32 {
        self.minor
    }

    /// Patch component
    pub const fn patch(&self) -> u32 {
        self.patch
    }

    /// Release stage
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// True unless major, minor and patch are all zero.
    pub const fn is_valid(&self) -> bool {
        !(self.major == 0 && self.minor == 0 && self.patch == 0)
    }

    /// Parse a version, splitting fields on `delimiter`.
    ///
    /// Lenient: fields that are missing or not numbers read as 0, and an
    /// unrecognised stage tag reads as `Release`. Use [`FormatVersion::parse_strict`]
    /// to reject such input.
    pub fn parse(text: &str, delimiter: char) -> Self {
        let mut fields = text.trim().split(delimiter);
        let major = lenient_number(fields.next());
        let minor = lenient_number(fields.next());
        let (stage, patch) = match fields.next() {
            Some(field) => match field.split_once(STAGE_SEPARATOR) {
                Some((tag, patch)) => (
                    Stage::from_tag(tag.trim()).unwrap_or(Stage::Release),
                    lenient_number(Some(patch)),
                ),
                None => (Stage::Release, lenient_number(Some(field))),
            },
            None => (Stage::Release, 0),
        };
        FormatVersion::new(major, minor, patch, stage)
    }

    /// Parse a version, failing with `InvalidFormat` on any malformed field.
    pub fn parse_strict(text: &str, delimiter: char) -> Result<Self> {
        let invalid = || Error::InvalidFormat(format!("malformed format version {:?}", text));
        let fields: Vec<&str> = text.trim().split(delimiter).collect();
        if fields.len() != 3 {
            return Err(invalid());
        }
        let major = fields[0].parse().map_err(|_| invalid())?;
        let minor = fields[1].parse().map_err(|_| invalid())?;
        let (stage, patch) = match fields[2].split_once(STAGE_SEPARATOR) {
            Some((tag, patch)) => (
                Stage::from_tag(tag).ok_or_else(invalid)?,
                patch.parse().map_err(|_| invalid())?,
            ),
            None => (Stage::Release, fields[2].parse().map_err(|_| invalid())?),
        };
        Ok(FormatVersion::new(major, minor, patch, stage))
    }

    /// Format with `delimiter` between fields. Inverse of [`FormatVersion::parse`].
    pub fn format(&self, delimiter: char) -> String {
        match self.stage.tag() {
            Some(tag) => format!(
                "{}{d}{}{d}{}{}{}",
                self.major,
                self.minor,
                tag,
                STAGE_SEPARATOR,
                self.patch,
                d = delimiter
            ),
            None => format!(
                "{}{d}{}{d}{}",
                self.major,
                self.minor,
                self.patch,
                d = delimiter
            ),
        }
    }
}

fn lenient_number(field: Option<&str>) -> u32 {
    field.and_then(|f| f.trim().parse().ok()).unwrap_or(0)
}

impl Default for FormatVersion {
    fn default() -> Self {
        FormatVersion::UNKNOWN
    }
}

impl PartialOrd for FormatVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FormatVersion {
    /// major, minor, stage, patch
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.cmp(&other.minor))
            .then_with(|| self.stage.cmp(&other.stage))
            .then_with(|| self.patch.cmp(&other.patch))
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(DEFAULT_DELIMITER))
    }
}

impl FromStr for FormatVersion {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(FormatVersion::parse(s, DEFAULT_DELIMITER))
    }
}

impl From<String> for FormatVersion {
    fn from(s: String) -> Self {
        FormatVersion::parse(&s, DEFAULT_DELIMITER)
    }
}

impl From<FormatVersion> for String {
    fn from(v: FormatVersion) -> Self {
        v.to_string()
    }
}
