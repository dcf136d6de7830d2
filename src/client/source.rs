//! The seam between round assembly and wherever categories live.

use crate::models::{CategoryDetail, CategoryId, CategorySummary, Result};
use async_trait::async_trait;

/// A question bank that can list and fetch categories.
///
/// Implementations own their own timeout policy; callers see a
/// result-or-error per call and nothing else.
#[async_trait]
pub trait CategorySource: Send + Sync {
    /// Up to `count` category summaries to sample a round from.
    async fn list_candidate_categories(&self, count: usize) -> Result<Vec<CategorySummary>>;

    /// Full detail, including clues, for one category.
    async fn fetch_category_detail(&self, id: CategoryId) -> Result<CategoryDetail>;
}
