//! Configuration management.
//!
//! Settings come from an optional TOML file, overridden by environment
//! variables prefixed with `CONFGREP_` (nested keys joined by `__`, e.g.
//! `CONFGREP_CORPUS__PATH`).

mod file_config;

pub use file_config::ConfigFileError;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ranking::{ConferenceTable, CONFERENCES};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Paper corpus location
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Query defaults
    #[serde(default)]
    pub search: SearchConfig,

    /// Output settings
    #[serde(default)]
    pub display: DisplayConfig,

    /// Conference ranking table
    #[serde(default)]
    pub ranking: RankingConfig,
}

/// Corpus configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Path of the newline-delimited JSON corpus
    #[serde(default = "default_corpus_path")]
    pub path: PathBuf,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: default_corpus_path(),
        }
    }
}

/// Search configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Whether abstracts take part in matching
    #[serde(default = "default_true")]
    pub include_abstract: bool,

    /// Stemming language
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            include_abstract: true,
            language: default_language(),
        }
    }
}

/// When to emit color escape sequences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolve against whether stdout is a terminal
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            ColorChoice::Auto => is_terminal,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub color: ColorChoice,

    /// Wrap titles with a URL in terminal hyperlinks
    #[serde(default = "default_true")]
    pub hyperlinks: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: ColorChoice::Auto,
            hyperlinks: true,
        }
    }
}

/// Ranking configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Conferences from lowest to highest prestige
    #[serde(default = "default_conferences")]
    pub conferences: Vec<String>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            conferences: default_conferences(),
        }
    }
}

impl RankingConfig {
    pub fn table(&self) -> ConferenceTable {
        ConferenceTable::new(self.conferences.iter().cloned())
    }
}

fn default_true() -> bool {
    true
}

fn default_language() -> String {
    "english".to_string()
}

fn default_conferences() -> Vec<String> {
    CONFERENCES.iter().map(|c| c.to_string()).collect()
}

/// Default corpus location: `<data dir>/confgrep/papers.jsonl`
pub fn default_corpus_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("confgrep")
        .join("papers.jsonl")
}

/// Default config file location: `<config dir>/confgrep/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("confgrep")
        .join("config.toml")
}

/// Locate a config file from `CONFGREP_CONFIG` or the default location
pub fn find_config_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("CONFGREP_CONFIG") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
        tracing::warn!("CONFGREP_CONFIG points to missing file {}", path.display());
    }

    let path = default_config_path();
    path.exists().then_some(path)
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("CONFGREP")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Load configuration from a file, then apply environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(environment())
        .build()?;

    settings.try_deserialize()
}

/// Get the configuration from environment variables and defaults only
pub fn get_config() -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(environment())
        .build()?;

    settings.try_deserialize()
}
