//! Round orchestration.
//!
//! Round flow:
//! Candidate pool → Sampler → K ids → Fetcher (fan-out/fan-in) → Board → Store
//!
//! Epistemic foundation:
//! - K_i: Each round carries a generation; newer generations win
//! - K_i: A board is published whole or not at all
//! - B_i: Sampling and fetching may fail → Result, store untouched
//! - I^B: A restart can overtake a round that is still fetching

use crate::board::{CategoryStore, RevealEngine};
use crate::client::CategorySource;
use crate::models::{
    Board, CategoryId, CategorySummary, Config, ConfigError, QuizError, Result, RoundParams,
};
use crate::pool::{CategoryFetcher, Sampler};
use rand::Rng;
use rand::rngs::SmallRng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tracing::{info, warn};

/// How a round request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The board is now the published one
    Published(Board),
    /// A newer round was requested first; this result was dropped
    Superseded { generation: u64, newest: u64 },
}

impl RoundOutcome {
    pub fn board(&self) -> Option<&Board> {
        match self {
            Self::Published(board) => Some(board),
            Self::Superseded { .. } => None,
        }
    }
}

/// What `restart` replays.
#[derive(Debug, Clone)]
struct RoundRequest {
    pool: Vec<CategoryId>,
    params: RoundParams,
}

/// Runs rounds against a category source and publishes them to a store.
pub struct BoardController<R = SmallRng> {
    fetcher: CategoryFetcher,
    store: Arc<CategoryStore>,
    sampler: Mutex<Sampler<R>>,
    /// Newest generation handed out
    generation: AtomicU64,
    last_request: Mutex<Option<RoundRequest>>,
    /// Summaries requested by `new_round`
    candidate_count: usize,
}

impl BoardController<SmallRng> {
    /// Controller configured from file/CLI settings.
    ///
    /// `seed` makes category selection reproducible.
    pub fn from_config(
        source: Arc<dyn CategorySource>,
        config: &Config,
        seed: Option<u64>,
    ) -> Self {
        let sampler = match seed {
            Some(seed) => Sampler::seeded(seed),
            None => Sampler::from_entropy(),
        };
        Self::with_sampler(
            source,
            sampler,
            config.source.max_concurrent_fetches,
            config.source.candidate_count,
        )
    }
}

impl<R: Rng> BoardController<R> {
    pub fn with_sampler(
        source: Arc<dyn CategorySource>,
        sampler: Sampler<R>,
        max_concurrent_fetches: usize,
        candidate_count: usize,
    ) -> Self {
        Self {
            fetcher: CategoryFetcher::new(source, max_concurrent_fetches),
            store: Arc::new(CategoryStore::new()),
            sampler: Mutex::new(sampler),
            generation: AtomicU64::new(0),
            last_request: Mutex::new(None),
            candidate_count,
        }
    }

    pub fn store(&self) -> &Arc<CategoryStore> {
        &self.store
    }

    /// Reveal engine over this controller's board.
    pub fn engine(&self) -> RevealEngine {
        RevealEngine::new(Arc::clone(&self.store))
    }

    /// Newest generation handed out so far (0 before any round).
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>> {
        mutex
            .lock()
            .map_err(|_| QuizError::Internal(format!("{what} lock poisoned")))
    }

    /// Category summaries straight from the source.
    pub async fn list_candidates(&self, count: usize) -> Result<Vec<CategorySummary>> {
        self.fetcher.source().list_candidate_categories(count).await
    }

    /// Build the candidate pool from the source, then start a round on it.
    ///
    /// Summaries advertising fewer than N clues are left out of the pool.
    pub async fn new_round(&self, params: RoundParams) -> Result<RoundOutcome> {
        let summaries = self.list_candidates(self.candidate_count).await?;
        let listed = summaries.len();

        let pool: Vec<CategoryId> = summaries
            .into_iter()
            .filter(|s| {
                s.clues_count
                    .is_none_or(|count| count >= params.clues_per_category)
            })
            .map(|s| s.id)
            .collect();

        info!(listed, eligible = pool.len(), "Built candidate pool");
        self.start_round(pool, params).await
    }

    /// Deal a round from `pool` and publish it if it is still the newest.
    pub async fn start_round(
        &self,
        pool: Vec<CategoryId>,
        params: RoundParams,
    ) -> Result<RoundOutcome> {
        if params.categories == 0 || params.clues_per_category == 0 {
            return Err(ConfigError::Invalid(format!(
                "a round needs at least one category and one clue, got {}×{}",
                params.categories, params.clues_per_category
            ))
            .into());
        }

        // A pool that cannot be sampled never becomes a round
        let ids = Self::lock(&self.sampler, "Sampler")?
            .select(&pool, params.categories)
            .inspect_err(|e| warn!(error = %e, "Round not started"))?;

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let start = Instant::now();
        *Self::lock(&self.last_request, "Round request")? = Some(RoundRequest { pool, params });

        info!(
            generation,
            categories = params.categories,
            clues = params.clues_per_category,
            "Starting round"
        );

        let fetched = self.fetcher.fetch_all(&ids, params.clues_per_category).await;

        let newest = self.latest_generation();
        if newest != generation {
            info!(generation, newest, "Discarding superseded round");
            return Ok(RoundOutcome::Superseded { generation, newest });
        }

        let categories = fetched.inspect_err(|e| warn!(generation, error = %e, "Round failed"))?;
        let board = Board::assemble(generation, categories, params)?;

        if !self.store.replace_board(board.clone())? {
            let newest = self.latest_generation();
            info!(generation, newest, "Discarding superseded round");
            return Ok(RoundOutcome::Superseded { generation, newest });
        }

        info!(
            generation,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Round ready"
        );
        Ok(RoundOutcome::Published(board))
    }

    /// Deal again from the last requested pool and size.
    pub async fn restart(&self) -> Result<RoundOutcome> {
        let request = Self::lock(&self.last_request, "Round request")?
            .clone()
            .ok_or(QuizError::NoRoundStarted)?;
        self.start_round(request.pool, request.params).await
    }
}
