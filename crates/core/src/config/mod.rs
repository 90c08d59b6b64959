use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MAX_WIDTH: u64 = 16;
pub const DEFAULT_WORD_SIZE: u64 = 8;
pub const DEFAULT_MAX_ALIGN: u64 = 8;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be a positive number of bytes (got {value})")]
    NonPositive { field: &'static str, value: u64 },
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },
}

/// Size model parameters for one run.
///
/// Built once (defaults, then an optional config file, then CLI flags) and
/// passed by reference everywhere afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeConfig {
    /// Structs strictly larger than this many bytes are wide.
    pub max_width: u64,
    /// Bytes per machine word; also the size of every pointer.
    pub word_size: u64,
    /// Upper bound on any field or aggregate alignment.
    pub max_align: u64,
}

impl Default for SizeConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            word_size: DEFAULT_WORD_SIZE,
            max_align: DEFAULT_MAX_ALIGN,
        }
    }
}

impl SizeConfig {
    pub fn new(max_width: u64, word_size: u64, max_align: u64) -> Self {
        Self { max_width, word_size, max_align }
    }

    /// Reject zero values before any analysis runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("max_width", self.max_width),
            ("word_size", self.word_size),
            ("max_align", self.max_align),
        ] {
            if value == 0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        Ok(())
    }

    /// Like `validate`, but hands the config back for chaining.
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    /// Load a config file. `.json` files are parsed as JSON, anything else
    /// as YAML. Keys that are absent keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: display.clone(), source })?;

        let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
        let parsed = if is_json {
            serde_json::from_str(&text).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str(&text).map_err(|e| e.to_string())
        };
        parsed.map_err(|message| ConfigError::Parse { path: display, message })
    }

    /// Apply per-field overrides (typically CLI flags) on top of this config.
    pub fn with_overrides(
        mut self,
        max_width: Option<u64>,
        word_size: Option<u64>,
        max_align: Option<u64>,
    ) -> Self {
        if let Some(v) = max_width {
            self.max_width = v;
        }
        if let Some(v) = word_size {
            self.word_size = v;
        }
        if let Some(v) = max_align {
            self.max_align = v;
        }
        self
    }
}
