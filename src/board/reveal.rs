//! Clue reveal state machine.
//!
//! Hidden → Question → Answer, then nothing. No cycle, no un-reveal.

use crate::board::CategoryStore;
use crate::models::{Clue, Result, Reveal};
use std::sync::Arc;
use tracing::debug;

/// The only path by which clue state changes.
#[derive(Debug, Clone)]
pub struct RevealEngine {
    store: Arc<CategoryStore>,
}

impl RevealEngine {
    pub fn new(store: Arc<CategoryStore>) -> Self {
        Self { store }
    }

    /// Advance the clue at a position by one step.
    ///
    /// `IndexOutOfRange` means the position is not on the current board,
    /// usually because a restart replaced it; nothing is modified.
    pub fn address(&self, category: usize, clue: usize) -> Result<Reveal> {
        let reveal = self.store.with_clue_mut(category, clue, Clue::reveal)?;
        debug!(category, clue, changed = reveal.is_change(), "Clue addressed");
        Ok(reveal)
    }

    /// Like [`address`](Self::address), but stale positions come back as
    /// `Unchanged` instead of an error.
    pub fn address_or_ignore(&self, category: usize, clue: usize) -> Result<Reveal> {
        match self.address(category, clue) {
            Err(e) if e.is_ignorable() => {
                debug!(category, clue, error = %e, "Ignoring stale address");
                Ok(Reveal::Unchanged)
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Board, Category, CategoryId, QuizError, RevealState, RoundParams};

    fn engine_with_board() -> (RevealEngine, Arc<CategoryStore>) {
        let store = Arc::new(CategoryStore::new());
        let categories = (0..2)
            .map(|c| Category {
                id: CategoryId(c),
                title: format!("C{c}"),
                clues: (0..3)
                    .map(|r| Clue::new(format!("q{c}{r}"), format!("a{c}{r}")))
                    .collect(),
            })
            .collect();
        let params = RoundParams {
            categories: 2,
            clues_per_category: 3,
        };
        store
            .replace_board(Board::assemble(1, categories, params).unwrap())
            .unwrap();
        (RevealEngine::new(Arc::clone(&store)), store)
    }

    #[test]
    fn test_question_then_answer_then_nothing() {
        let (engine, store) = engine_with_board();

        assert_eq!(
            engine.address(1, 2).unwrap(),
            Reveal::Question("q12".to_string())
        );
        assert_eq!(store.clue(1, 2).unwrap().state, RevealState::Question);

        assert_eq!(
            engine.address(1, 2).unwrap(),
            Reveal::Answer("a12".to_string())
        );
        assert_eq!(store.clue(1, 2).unwrap().state, RevealState::Answer);

        for _ in 0..3 {
            assert_eq!(engine.address(1, 2).unwrap(), Reveal::Unchanged);
        }
        assert_eq!(store.clue(1, 2).unwrap().state, RevealState::Answer);
    }

    #[test]
    fn test_clues_are_independent() {
        let (engine, store) = engine_with_board();
        engine.address(0, 0).unwrap();
        assert_eq!(store.clue(0, 0).unwrap().state, RevealState::Question);
        assert_eq!(store.clue(0, 1).unwrap().state, RevealState::Hidden);
        assert_eq!(store.clue(1, 0).unwrap().state, RevealState::Hidden);
    }

    #[test]
    fn test_out_of_range_changes_nothing() {
        let (engine, store) = engine_with_board();
        engine.address(0, 0).unwrap();
        let before = store.snapshot().unwrap();

        assert!(matches!(
            engine.address(2, 0),
            Err(QuizError::IndexOutOfRange { category: 2, clue: 0 })
        ));
        assert!(matches!(
            engine.address(0, 3),
            Err(QuizError::IndexOutOfRange { category: 0, clue: 3 })
        ));

        assert_eq!(store.snapshot().unwrap(), before);
    }

    #[test]
    fn test_address_or_ignore_swallows_stale_positions() {
        let (engine, _store) = engine_with_board();
        assert_eq!(engine.address_or_ignore(9, 9).unwrap(), Reveal::Unchanged);
        assert_eq!(
            engine.address_or_ignore(0, 0).unwrap(),
            Reveal::Question("q00".to_string())
        );
    }

    #[test]
    fn test_no_board_is_out_of_range() {
        let engine = RevealEngine::new(Arc::new(CategoryStore::new()));
        assert!(engine.address(0, 0).unwrap_err().is_ignorable());
    }
}
