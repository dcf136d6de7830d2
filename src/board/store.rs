//! In-memory board state for the current round.
//!
//! Epistemic foundation:
//! - K_i: Readers see either the old board or the new one, never a mix
//! - K_i: Board shape is fixed between replacements; only reveal state moves
//! - K_i: Generations only move forward
//! - B_i: A position may not exist on the current board → Result

use crate::models::{Board, Clue, QuizError, Result};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

/// Owns the board of the current round.
#[derive(Debug, Default)]
pub struct CategoryStore {
    board: RwLock<Option<Board>>,
}

impl CategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Option<Board>>> {
        self.board
            .read()
            .map_err(|_| QuizError::Internal("Board lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Option<Board>>> {
        self.board
            .write()
            .map_err(|_| QuizError::Internal("Board lock poisoned".to_string()))
    }

    /// Swap in a whole new board.
    ///
    /// Returns `false`, leaving the current board in place, when `board`
    /// belongs to an older generation than the one already published.
    pub fn replace_board(&self, board: Board) -> Result<bool> {
        let mut slot = self.write()?;

        if let Some(current) = slot.as_ref() {
            if board.generation < current.generation {
                debug!(
                    offered = board.generation,
                    published = current.generation,
                    "Rejected board from an older round"
                );
                return Ok(false);
            }
        }

        let (categories, clues) = board.shape();
        info!(
            generation = board.generation,
            categories,
            clues,
            "Board published"
        );
        *slot = Some(board);
        Ok(true)
    }

    /// Copy of the clue at a position.
    pub fn clue(&self, category: usize, clue: usize) -> Result<Clue> {
        let slot = self.read()?;
        slot.as_ref()
            .ok_or(QuizError::IndexOutOfRange { category, clue })?
            .clue(category, clue)
            .cloned()
    }

    /// Title of a column.
    pub fn title(&self, category: usize) -> Result<String> {
        let slot = self.read()?;
        slot.as_ref()
            .ok_or(QuizError::IndexOutOfRange { category, clue: 0 })?
            .title(category)
            .map(str::to_string)
    }

    /// Run `f` against one clue under the write lock.
    pub(crate) fn with_clue_mut<T>(
        &self,
        category: usize,
        clue: usize,
        f: impl FnOnce(&mut Clue) -> T,
    ) -> Result<T> {
        let mut slot = self.write()?;
        let board = slot
            .as_mut()
            .ok_or(QuizError::IndexOutOfRange { category, clue })?;
        Ok(f(board.clue_mut(category, clue)?))
    }

    /// Copy of the whole board, if one is published.
    pub fn snapshot(&self) -> Result<Option<Board>> {
        Ok(self.read()?.clone())
    }

    /// (categories, clues per category) of the published board.
    pub fn shape(&self) -> Result<Option<(usize, usize)>> {
        Ok(self.read()?.as_ref().map(Board::shape))
    }

    /// Generation of the published board.
    pub fn generation(&self) -> Result<Option<u64>> {
        Ok(self.read()?.as_ref().map(|b| b.generation))
    }
}
