//! Core data models for quizboard.
//!
//! Epistemic mapping:
//! - K_i (Knowledge): Board shape and reveal states as concrete types
//! - B_i (Beliefs): Bank data wrapped in Result until validated
//! - I^R (Resolvable): Board size and source settings from config
//! - I^B (Bounded): Error variants for network and file failures

mod bank;
mod board;
mod config;
mod error;

pub use bank::*;
pub use board::*;
pub use config::*;
pub use error::*;
