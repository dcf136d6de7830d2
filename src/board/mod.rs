//! Board module - round state and the reveal state machine.
//!
//! Provides:
//! - `CategoryStore`: The published board, swapped atomically per round
//! - `RevealEngine`: Position-addressed clue transitions

mod reveal;
mod store;

pub use reveal::*;
pub use store::*;
