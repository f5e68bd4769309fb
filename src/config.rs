//! Configuration file loading.
//!
//! An optional `stampfs.toml` next to the input directory supplies defaults
//! that individual CLI flags override.

use crate::error::StampError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StampConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Glob patterns excluded from every run
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Default digest algorithm (md5, sha256, sha512)
    #[serde(default)]
    pub algorithm: Option<String>,

    /// Name of the constant in the generated map source
    #[serde(default = "default_var_name")]
    pub var_name: String,
}

fn default_var_name() -> String {
    "ASSET_NAMES".to_string()
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            ignore: Vec::new(),
            algorithm: None,
            var_name: default_var_name(),
        }
    }
}

/// Loads `StampConfig` from disk.
pub struct ConfigLoader;

impl ConfigLoader {
    pub const FILE_NAME: &'static str = "stampfs.toml";

    /// Load `stampfs.toml` from `dir`, falling back to defaults when the
    /// file does not exist. A file that exists but fails to parse is an
    /// error, not a silent fallback.
    pub fn load(dir: &Path) -> Result<StampConfig, StampError> {
        let path = dir.join(Self::FILE_NAME);
        if !path.is_file() {
            return Ok(StampConfig::default());
        }
        Self::load_from_file(&path)
    }

    pub fn load_from_file(path: &Path) -> Result<StampConfig, StampError> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| StampError::Config(format!("{}: {e}", path.display())))
    }
}
