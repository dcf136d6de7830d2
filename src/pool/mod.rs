//! Pool module - category sampling and concurrent fetching.

mod fetcher;
mod sampler;

pub use fetcher::*;
pub use sampler::*;
