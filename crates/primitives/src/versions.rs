//! Format versions that introduced optional trailing fields.
//!
//! A gated field is read only when the file's version is strictly newer
//! than the version named here. Writers always emit it, since files are
//! never written below the current format version.

use std::io::BufRead;

use simstore_core::FormatVersion;
use simstore_durability::ReadHandle;

/// Emissivity and absorptivity on [`Material`](crate::Material)
pub const MATERIAL_OPTICAL_SINCE: FormatVersion = FormatVersion::release(1, 0, 0);

/// Time schedule on [`TemperatureCondition`](crate::TemperatureCondition)
pub const CONDITION_SCHEDULE_SINCE: FormatVersion = FormatVersion::release(1, 1, 0);

/// True when the file being read carries fields introduced after `since`.
pub fn has_field<R: BufRead>(r: &ReadHandle<R>, since: FormatVersion) -> bool {
    r.version() > since
}
