//! Configuration file support for confgrep.
//!
//! # Configuration File Format
//!
//! ```toml
//! [corpus]
//! path = "~/.local/share/confgrep/papers.jsonl"
//!
//! [search]
//! include_abstract = true
//! language = "english"
//!
//! [display]
//! color = "auto"
//! hyperlinks = true
//!
//! [ranking]
//! conferences = ["RAID", "ESORICS", "ACSAC", "AsiaCCS", "PETS", "WWW",
//!                "IEEE EuroS&P", "NDSS", "IEEE S&P", "USENIX", "CCS"]
//! ```

use std::path::Path;

use super::Config;

impl Config {
    /// Load configuration from a TOML file, without environment overrides
    pub fn from_file(path: &Path) -> Result<Self, ConfigFileError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigFileError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigFileError::Parse(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigFileError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigFileError::Serialize(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
    }
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}
