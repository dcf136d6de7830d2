//! Controller module - round orchestration.

mod round;

pub use round::*;
