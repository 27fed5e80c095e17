//! mirth_options: scanner options and `mirth.json` parsing.
//!
//! Options are plain serde structs with camelCase field names. Every field
//! has a default, so a missing or partial config file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default limit on open template-string interpolations before a warning is
/// recorded.
pub const DEFAULT_MAX_INTERPOLATION_DEPTH: usize = 5;

/// Options consumed by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScannerOptions {
    /// Number of simultaneously open `${` interpolations allowed before the
    /// nesting warning fires.
    pub max_interpolation_depth: usize,
}

impl Default for ScannerOptions {
    fn default() -> Self {
        Self {
            max_interpolation_depth: DEFAULT_MAX_INTERPOLATION_DEPTH,
        }
    }
}

/// The `mirth.json` file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MirthConfig {
    pub scanner: ScannerOptions,
    pub files: Option<Vec<String>>,
}

impl MirthConfig {
    /// Files listed in the config, or an empty slice.
    pub fn files(&self) -> &[String] {
        self.files.as_deref().unwrap_or(&[])
    }
}

/// Errors raised while loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse a mirth.json file from a string.
pub fn parse_config(content: &str) -> Result<MirthConfig, ConfigError> {
    Ok(serde_json::from_str(content)?)
}

/// Parse a mirth.json file from a path.
pub fn parse_config_file(path: &Path) -> Result<MirthConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}
