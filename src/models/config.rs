//! Configuration models for quizboard.
//!
//! All I^R (resolvable ignorance) is parameterized here.
//! The player resolves these unknowns at runtime via config file or flags.

use crate::models::RoundParams;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for quizboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Question bank settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Board shape and display settings
    #[serde(default)]
    pub board: BoardConfig,
}

/// Where categories come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the jService-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// How many category summaries to request for the candidate pool
    #[serde(default = "default_candidate_count")]
    pub candidate_count: usize,

    /// Where in the bank's category listing the candidate pool starts
    #[serde(default)]
    pub candidate_offset: usize,

    /// Upper bound on category fetches in flight at once
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,

    /// Offline JSON-lines bank; when set the API is not used
    #[serde(default)]
    pub bank: Option<PathBuf>,
}

fn default_base_url() -> String {
    "http://jservice.io/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_candidate_count() -> usize {
    100
}

fn default_max_concurrent_fetches() -> usize {
    6
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            candidate_count: default_candidate_count(),
            candidate_offset: 0,
            max_concurrent_fetches: default_max_concurrent_fetches(),
            bank: None,
        }
    }
}

/// Board shape and rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Categories per round (K)
    #[serde(default = "default_categories")]
    pub categories: usize,

    /// Clues per category (N)
    #[serde(default = "default_clues_per_category")]
    pub clues_per_category: usize,

    /// Text shown in a cell that has not been revealed
    #[serde(default = "default_placeholder")]
    pub hidden_placeholder: String,

    /// Characters per rendered column
    #[serde(default = "default_column_width")]
    pub column_width: usize,
}

fn default_categories() -> usize {
    6
}

fn default_clues_per_category() -> usize {
    5
}

fn default_placeholder() -> String {
    "?".to_string()
}

fn default_column_width() -> usize {
    18
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            clues_per_category: default_clues_per_category(),
            hidden_placeholder: default_placeholder(),
            column_width: default_column_width(),
        }
    }
}

impl BoardConfig {
    pub fn round_params(&self) -> RoundParams {
        RoundParams {
            categories: self.categories,
            clues_per_category: self.clues_per_category,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// B_i(file exists) → Result
    /// B_i(file is valid TOML) → Result
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_owned(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_owned(),
            source: e,
        })
    }

    /// Check the values can produce a playable round.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.categories == 0 {
            return Err(ConfigError::Invalid(
                "board.categories must be at least 1".to_string(),
            ));
        }
        if self.board.clues_per_category == 0 {
            return Err(ConfigError::Invalid(
                "board.clues_per_category must be at least 1".to_string(),
            ));
        }
        if self.source.candidate_count < self.board.categories {
            return Err(ConfigError::Invalid(format!(
                "source.candidate_count ({}) is smaller than board.categories ({})",
                self.source.candidate_count, self.board.categories
            )));
        }
        if self.source.max_concurrent_fetches == 0 {
            return Err(ConfigError::Invalid(
                "source.max_concurrent_fetches must be at least 1".to_string(),
            ));
        }
        if self.board.column_width < 4 {
            return Err(ConfigError::Invalid(
                "board.column_width must be at least 4".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration errors.
///
/// Epistemic origin:
/// - B_i falsified: File not found, parse error
/// - K_i violated: Values that cannot produce a board
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
