//! End-to-end round behaviour against in-memory sources.

use async_trait::async_trait;
use quizboard::models::{CategoryDetail, CategorySummary, ClueDetail};
use quizboard::{
    BankFile, BoardController, CategoryId, CategorySource, QuizError, Reveal, RevealState,
    RoundOutcome, RoundParams, Sampler,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Semaphore;

fn detail(id: u64, title: &str, clues: usize) -> CategoryDetail {
    CategoryDetail {
        id: CategoryId(id),
        title: title.to_string(),
        clues: (0..clues)
            .map(|i| ClueDetail {
                question: format!("{title} question {i}"),
                answer: format!("{title} answer {i}"),
            })
            .collect(),
    }
}

fn params(categories: usize, clues_per_category: usize) -> RoundParams {
    RoundParams {
        categories,
        clues_per_category,
    }
}

/// Source whose fetches can be parked until the test releases them.
///
/// Fetches issued while `hold` is set wait on `gate` and answer with
/// "slow" titles; the rest answer immediately with "fast" titles.
struct GatedSource {
    hold: AtomicBool,
    gate: Semaphore,
    parked: AtomicUsize,
}

impl GatedSource {
    fn new() -> Self {
        Self {
            hold: AtomicBool::new(false),
            gate: Semaphore::new(0),
            parked: AtomicUsize::new(0),
        }
    }

    async fn wait_parked(&self, n: usize) {
        while self.parked.load(Ordering::SeqCst) < n {
            tokio::task::yield_now().await;
        }
    }

    fn release(&self) {
        self.gate.add_permits(1);
    }
}

#[async_trait]
impl CategorySource for GatedSource {
    async fn list_candidate_categories(&self, count: usize) -> quizboard::Result<Vec<CategorySummary>> {
        Ok((1..=count as u64)
            .map(|id| CategorySummary {
                id: CategoryId(id),
                title: format!("c{id}"),
                clues_count: None,
            })
            .collect())
    }

    async fn fetch_category_detail(&self, id: CategoryId) -> quizboard::Result<CategoryDetail> {
        if self.hold.load(Ordering::SeqCst) {
            self.parked.fetch_add(1, Ordering::SeqCst);
            let _permit = self
                .gate
                .acquire()
                .await
                .map_err(|_| QuizError::Internal("gate closed".to_string()))?;
            return Ok(detail(id.0, "slow", 2));
        }
        Ok(detail(id.0, "fast", 2))
    }
}

fn gated_controller(source: Arc<GatedSource>) -> Arc<BoardController> {
    Arc::new(BoardController::with_sampler(
        source,
        Sampler::seeded(11),
        8,
        10,
    ))
}

#[tokio::test]
async fn test_full_round_from_bank() {
    let bank = BankFile::from_categories(vec![
        detail(1, "Math", 5),
        detail(2, "Literature", 5),
        detail(3, "Geography", 6),
        detail(4, "Music", 5),
    ]);
    let controller = BoardController::with_sampler(Arc::new(bank), Sampler::seeded(3), 4, 100);

    let outcome = controller.new_round(params(3, 5)).await.unwrap();
    let board = outcome.board().expect("round published").clone();
    assert_eq!(board.shape(), (3, 5));

    let engine = controller.engine();
    let title = controller.store().title(0).unwrap();
    assert_eq!(
        engine.address(0, 4).unwrap(),
        Reveal::Question(format!("{title} question 4"))
    );
    assert_eq!(
        engine.address(0, 4).unwrap(),
        Reveal::Answer(format!("{title} answer 4"))
    );
    assert_eq!(engine.address(0, 4).unwrap(), Reveal::Unchanged);

    assert!(engine.address(3, 0).unwrap_err().is_ignorable());
    assert_eq!(
        controller.store().clue(0, 4).unwrap().state,
        RevealState::Answer
    );
}

#[tokio::test]
async fn test_pending_round_never_overwrites_restart() {
    let source = Arc::new(GatedSource::new());
    let controller = gated_controller(Arc::clone(&source));
    let pool: Vec<_> = (1..=4).map(CategoryId).collect();

    source.hold.store(true, Ordering::SeqCst);
    let first = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.start_round(pool, params(3, 2)).await })
    };
    source.wait_parked(3).await;

    // The restart completes while the first round is still parked
    source.hold.store(false, Ordering::SeqCst);
    let second = controller.restart().await.unwrap();
    let published = second.board().expect("restart published").clone();
    assert_eq!(published.generation, 2);
    assert!(published.categories.iter().all(|c| c.title == "fast"));

    source.release();
    let stale = first.await.unwrap().unwrap();
    assert_eq!(
        stale,
        RoundOutcome::Superseded {
            generation: 1,
            newest: 2
        }
    );

    let current = controller.store().snapshot().unwrap().unwrap();
    assert_eq!(current, published);
}

#[tokio::test]
async fn test_stale_round_resolving_first_is_dropped() {
    let source = Arc::new(GatedSource::new());
    let controller = gated_controller(Arc::clone(&source));
    let pool: Vec<_> = (1..=4).map(CategoryId).collect();

    // Both rounds park; the older one is released first
    source.hold.store(true, Ordering::SeqCst);
    let first = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.start_round(pool, params(2, 2)).await })
    };
    source.wait_parked(2).await;

    let second = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.restart().await })
    };
    source.wait_parked(4).await;

    source.release();
    let stale = first.await.unwrap().unwrap();
    assert!(matches!(
        stale,
        RoundOutcome::Superseded { generation: 1, .. }
    ));

    let fresh = second.await.unwrap().unwrap();
    assert_eq!(fresh.board().map(|b| b.generation), Some(2));
    assert_eq!(controller.store().generation().unwrap(), Some(2));
    assert_eq!(controller.latest_generation(), 2);
}

#[tokio::test]
async fn test_unsampleable_request_leaves_pending_round_alone() {
    let source = Arc::new(GatedSource::new());
    let controller = gated_controller(Arc::clone(&source));
    let pool: Vec<_> = (1..=4).map(CategoryId).collect();

    source.hold.store(true, Ordering::SeqCst);
    let pending = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.start_round(pool, params(2, 2)).await })
    };
    source.wait_parked(2).await;

    let err = controller
        .start_round(vec![CategoryId(1)], params(2, 2))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        QuizError::InsufficientPool {
            required: 2,
            available: 1
        }
    ));
    assert_eq!(controller.latest_generation(), 1);

    source.release();
    let outcome = pending.await.unwrap().unwrap();
    assert_eq!(outcome.board().map(|b| b.generation), Some(1));
    assert_eq!(controller.store().generation().unwrap(), Some(1));

    // Restart still replays the round that was actually dealt
    source.hold.store(false, Ordering::SeqCst);
    let replay = controller.restart().await.unwrap();
    let board = replay.board().expect("restart published");
    assert_eq!(board.generation, 2);
    assert_eq!(board.shape(), (2, 2));
}

#[tokio::test]
async fn test_new_round_with_tiny_source_fails_cleanly() {
    let bank = BankFile::from_categories(vec![detail(1, "Only", 5)]);
    let controller = BoardController::with_sampler(Arc::new(bank), Sampler::seeded(1), 4, 100);

    let err = controller.new_round(params(6, 5)).await.unwrap_err();
    assert!(matches!(
        err,
        QuizError::InsufficientPool {
            required: 6,
            available: 1
        }
    ));
    assert!(err.is_round_fatal());
    assert!(controller.store().snapshot().unwrap().is_none());
}
