//! quizboard - Trivia board with staged question/answer reveals.
//!
//! ## Architecture
//!
//! - **Sampler**: Draws K distinct categories from a candidate pool (Fisher–Yates)
//! - **Fetcher**: Loads the K categories concurrently, all or nothing
//! - **CategoryStore**: Holds the published board, swapped atomically per round
//! - **RevealEngine**: Hidden → Question → Answer per clue, addressed by position
//! - **BoardController**: Ties the above together and discards superseded rounds
//!
//! ## Sources
//!
//! - **jService API**: `JServiceClient` over HTTP
//! - **Offline bank**: `BankFile`, one category per JSON line
//!
//! ## Epistemic Design
//!
//! - K_i (Knowledge): Compile-time enforced invariants (types, enums)
//! - B_i (Beliefs): Runtime fallible operations (Result, Option)
//! - I^R (Resolvable): User-configurable parameters
//! - I^B (Bounded): Network and file uncertainties

pub mod board;
pub mod client;
pub mod controller;
pub mod display;
pub mod models;
pub mod pool;

// Re-exports for convenience
pub use board::{CategoryStore, RevealEngine};
pub use client::{BankFile, CategorySource, JServiceClient};
pub use controller::{BoardController, RoundOutcome};
pub use models::{
    Board, Category, CategoryId, Clue, Config, QuizError, Result, Reveal, RevealState,
    RoundParams,
};
pub use pool::{CategoryFetcher, Sampler, select_category_ids};
