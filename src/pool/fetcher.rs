//! Concurrent category fetching.
//!
//! Epistemic foundation:
//! - K_i: Category fetches are independent and may run in parallel
//! - K_i: A round needs every category or none of them
//! - B_i: Each fetch may fail or return short data → Result
//! - I^R: Fan-out width is configurable

use crate::client::CategorySource;
use crate::models::{Category, CategoryId, QuizError, Result};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Fetches and validates the categories of a round.
pub struct CategoryFetcher {
    /// Question bank (shared)
    source: Arc<dyn CategorySource>,
    /// Semaphore for concurrency control
    semaphore: Arc<Semaphore>,
}

impl CategoryFetcher {
    pub fn new(source: Arc<dyn CategorySource>, max_concurrent: usize) -> Self {
        Self {
            source,
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    pub fn source(&self) -> &Arc<dyn CategorySource> {
        &self.source
    }

    /// Fetch every id and build its category, preserving the order of `ids`.
    ///
    /// Fails on the first fetch or validation error; fetches still in
    /// flight are aborted.
    pub async fn fetch_all(
        &self,
        ids: &[CategoryId],
        clues_per_category: usize,
    ) -> Result<Vec<Category>> {
        let start = Instant::now();
        let mut tasks = JoinSet::new();

        for (index, &id) in ids.iter().enumerate() {
            let source = Arc::clone(&self.source);
            let semaphore = Arc::clone(&self.semaphore);
            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|_| QuizError::Internal("Semaphore closed".to_string()))?;

                let category = source
                    .fetch_category_detail(id)
                    .await
                    .and_then(|detail| Category::from_detail(detail, clues_per_category))
                    .inspect_err(|e| warn!(category = %id, error = %e, "Category fetch failed"))?;

                Ok::<_, QuizError>((index, category))
            });
        }

        let mut slots: Vec<Option<Category>> = vec![None; ids.len()];
        while let Some(joined) = tasks.join_next().await {
            let (index, category) =
                joined.map_err(|e| QuizError::Internal(format!("Fetch task failed: {e}")))??;
            slots[index] = Some(category);
        }

        debug!(
            categories = ids.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Fetched all categories"
        );

        slots
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| QuizError::Internal("Fetch finished with empty slots".to_string()))
    }
}
