//! Error types for quizboard.
//!
//! Epistemic taxonomy:
//! - B_i falsified: The round cannot be dealt (pool too small, bad category data)
//! - B_i stale: An address no longer matches the board (ignorable)
//! - I^B materialized: Infrastructure failures (network, file, API status)
//! - K_i violated: Internal invariant violations (bugs)

use crate::models::CategoryId;
use thiserror::Error;

/// Top-level error type for quizboard.
#[derive(Debug, Error)]
pub enum QuizError {
    // ═══════════════════════════════════════════════════════════════════
    // B_i FALSIFIED — The round cannot be assembled
    // ═══════════════════════════════════════════════════════════════════

    #[error("Candidate pool too small: need {required} distinct categories, have {available}")]
    InsufficientPool { required: usize, available: usize },

    #[error("Malformed data for category {id}: {reason}")]
    MalformedCategoryData { id: CategoryId, reason: String },

    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    #[error("No round has been started yet")]
    NoRoundStarted,

    #[error("Configuration error: {0}")]
    Config(#[from] super::ConfigError),

    #[error("Parse error: {0}")]
    ParseError(String),

    // ═══════════════════════════════════════════════════════════════════
    // B_i STALE — Addressing raced with a restart (recovered locally)
    // ═══════════════════════════════════════════════════════════════════

    #[error("No clue at column {category}, row {clue}")]
    IndexOutOfRange { category: usize, clue: usize },

    // ═══════════════════════════════════════════════════════════════════
    // I^B MATERIALIZED — Bounded ignorance became known-bad
    // ═══════════════════════════════════════════════════════════════════

    #[error("Question bank error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timeout after {0:?}")]
    Timeout(std::time::Duration),

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // ═══════════════════════════════════════════════════════════════════
    // K_i VIOLATED — Invariant broken (bug, should not happen)
    // ═══════════════════════════════════════════════════════════════════

    #[error("Internal error: {0}")]
    Internal(String),
}

impl QuizError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a malformed-data error for a category.
    pub fn malformed(id: CategoryId, reason: impl Into<String>) -> Self {
        Self::MalformedCategoryData {
            id,
            reason: reason.into(),
        }
    }

    /// Errors the interaction layer drops on the floor.
    ///
    /// Only stale addressing qualifies: it means a click raced a restart.
    pub fn is_ignorable(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. })
    }

    /// Errors that abort round assembly and must be shown to the player.
    pub fn is_round_fatal(&self) -> bool {
        !self.is_ignorable()
    }
}

/// Result type alias for quizboard.
pub type Result<T> = std::result::Result<T, QuizError>;
