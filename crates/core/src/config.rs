//! Format defaults via `simstore.toml`
//!
//! The vendor banner and the format version stamped into newly written
//! files are configuration, not global state: a [`FormatDefaults`] is built
//! once at startup and passed by reference into every save.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::version::{FormatVersion, Stage};

/// Format version written by this release of the engine.
pub const CURRENT_FORMAT_VERSION: FormatVersion = FormatVersion::new(1, 2, 0, Stage::Release);

/// Default bound on chained link files.
pub const DEFAULT_MAX_LINK_DEPTH: usize = 8;

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "simstore.toml";

/// Defaults applied when writing and opening files.
///
/// # Example
///
/// ```toml
/// vendor = "simstore"
/// current_version = "1.2.0"
/// max_link_depth = 8
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatDefaults {
    /// Vendor banner written as the header information of new files
    #[serde(default = "default_vendor")]
    pub vendor: String,
    /// Version stamped into every file this process writes; never older
    /// than [`CURRENT_FORMAT_VERSION`]
    #[serde(default = "default_current_version")]
    pub current_version: FormatVersion,
    /// Maximum number of link files followed before giving up
    #[serde(default = "default_max_link_depth")]
    pub max_link_depth: usize,
}

fn default_vendor() -> String {
    "simstore".to_string()
}

fn default_current_version() -> FormatVersion {
    CURRENT_FORMAT_VERSION
}

fn default_max_link_depth() -> usize {
    DEFAULT_MAX_LINK_DEPTH
}

impl Default for FormatDefaults {
    fn default() -> Self {
        FormatDefaults {
            vendor: default_vendor(),
            current_version: default_current_version(),
            max_link_depth: default_max_link_depth(),
        }
    }
}

impl FormatDefaults {
    /// Set the vendor banner
    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = vendor.into();
        self
    }

    /// Set the version stamped into new files
    pub fn with_current_version(mut self, version: FormatVersion) -> Self {
        self.current_version = version;
        self
    }

    /// Set the link hop limit
    pub fn with_max_link_depth(mut self, depth: usize) -> Self {
        self.max_link_depth = depth;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.current_version.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "current_version {} is not a valid format version",
                self.current_version
            )));
        }
        if self.current_version < CURRENT_FORMAT_VERSION {
            return Err(ConfigError::Invalid(format!(
                "current_version {} is older than the supported format {}",
                self.current_version, CURRENT_FORMAT_VERSION
            )));
        }
        if self.vendor.contains('"') {
            return Err(ConfigError::Invalid(format!(
                "vendor {:?} must not contain '\"'",
                self.vendor
            )));
        }
        if self.max_link_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_link_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Header information written into new files.
    pub fn banner(&self) -> String {
        format!("{} {}", self.vendor, self.current_version)
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# simstore format defaults
#
# Vendor banner written into the header of every new file.
vendor = "simstore"

# Format version stamped into new files: major.minor[.stage_]patch
current_version = "1.2.0"

# Maximum number of chained link files followed when opening a file.
max_link_depth = 8
"#
    }

    /// Parse and validate defaults from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let defaults: FormatDefaults =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        defaults.validate()?;
        Ok(defaults)
    }

    /// Read and parse defaults from a file path.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::Read(format!("'{}': {}", path.display(), e))
        })?;
        let defaults = Self::from_toml_str(&content)?;
        debug!(target: "simstore::config", path = %path.display(), version = %defaults.current_version, "Loaded format defaults");
        Ok(defaults)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                ConfigError::Read(format!("failed to write '{}': {}", path.display(), e))
            })?;
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read or written
    #[error("Config I/O error: {0}")]
    Read(String),

    /// The config file is not valid TOML for [`FormatDefaults`]
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// Parsed values are out of range
    #[error("Invalid config: {0}")]
    Invalid(String),
}
