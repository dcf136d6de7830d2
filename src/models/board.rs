//! Board, category and clue types.
//!
//! K_i: A board is a fixed K×N grid for the lifetime of one round.
//! K_i: Clue visibility is a closed three-state enum with a single transition.

use crate::models::{CategoryDetail, QuizError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a category in the question bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a clue currently shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealState {
    /// Nothing shown yet
    #[default]
    Hidden,
    /// Question text shown
    Question,
    /// Answer text shown (terminal)
    Answer,
}

impl RevealState {
    /// Next state when the clue is addressed, or `None` once terminal.
    pub fn advance(self) -> Option<RevealState> {
        match self {
            Self::Hidden => Some(Self::Question),
            Self::Question => Some(Self::Answer),
            Self::Answer => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.advance().is_none()
    }
}

/// Result of addressing a clue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reveal {
    /// Clue moved to `Question`; carries the question text
    Question(String),
    /// Clue moved to `Answer`; carries the answer text
    Answer(String),
    /// Clue was already showing its answer; nothing to redraw
    Unchanged,
}

impl Reveal {
    /// Text to draw in the cell, if the cell changed.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Question(text) | Self::Answer(text) => Some(text),
            Self::Unchanged => None,
        }
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// One question/answer pair plus its reveal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub state: RevealState,
}

impl Clue {
    /// Create a hidden clue.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            state: RevealState::Hidden,
        }
    }

    /// Advance the reveal state by one step.
    pub fn reveal(&mut self) -> Reveal {
        let Some(next) = self.state.advance() else {
            return Reveal::Unchanged;
        };
        self.state = next;
        match next {
            RevealState::Question => Reveal::Question(self.question.clone()),
            RevealState::Answer => Reveal::Answer(self.answer.clone()),
            RevealState::Hidden => unreachable!("advance never returns Hidden"),
        }
    }

    /// Text a renderer should show for the current state.
    pub fn display_text<'a>(&'a self, placeholder: &'a str) -> &'a str {
        match self.state {
            RevealState::Hidden => placeholder,
            RevealState::Question => &self.question,
            RevealState::Answer => &self.answer,
        }
    }
}

/// A titled column of clues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    pub clues: Vec<Clue>,
}

impl Category {
    /// Build a category from fetched detail, keeping the first `clues_per_category`
    /// usable clues in bank order.
    ///
    /// Clues with a blank question or answer are skipped. Fewer than
    /// `clues_per_category` usable clues is malformed data.
    pub fn from_detail(detail: CategoryDetail, clues_per_category: usize) -> Result<Self> {
        let title = detail.title.trim();
        if title.is_empty() {
            return Err(QuizError::malformed(detail.id, "empty title"));
        }

        let clues: Vec<Clue> = detail
            .clues
            .into_iter()
            .filter_map(|c| {
                let question = c.question.trim();
                let answer = c.answer.trim();
                (!question.is_empty() && !answer.is_empty()).then(|| Clue::new(question, answer))
            })
            .take(clues_per_category)
            .collect();

        if clues.len() < clues_per_category {
            return Err(QuizError::malformed(
                detail.id,
                format!(
                    "only {} of {} clues usable",
                    clues.len(),
                    clues_per_category
                ),
            ));
        }

        Ok(Self {
            id: detail.id,
            title: title.to_string(),
            clues,
        })
    }
}

/// Size of a round: K categories × N clues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundParams {
    pub categories: usize,
    pub clues_per_category: usize,
}

impl Default for RoundParams {
    fn default() -> Self {
        Self {
            categories: 6,
            clues_per_category: 5,
        }
    }
}

/// The full grid for one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Round tag; newer rounds carry larger values
    pub generation: u64,
    /// When the board was assembled
    pub dealt_at: DateTime<Utc>,
    /// Columns, left to right
    pub categories: Vec<Category>,
}

impl Board {
    /// Assemble a board, checking it has exactly the requested shape.
    pub fn assemble(generation: u64, categories: Vec<Category>, params: RoundParams) -> Result<Self> {
        if categories.len() != params.categories {
            return Err(QuizError::Internal(format!(
                "board assembled with {} categories, expected {}",
                categories.len(),
                params.categories
            )));
        }
        if let Some(bad) = categories
            .iter()
            .find(|c| c.clues.len() != params.clues_per_category)
        {
            return Err(QuizError::Internal(format!(
                "category {} has {} clues, expected {}",
                bad.id,
                bad.clues.len(),
                params.clues_per_category
            )));
        }

        Ok(Self {
            generation,
            dealt_at: Utc::now(),
            categories,
        })
    }

    /// (categories, clues per category)
    pub fn shape(&self) -> (usize, usize) {
        let rows = self.categories.first().map_or(0, |c| c.clues.len());
        (self.categories.len(), rows)
    }

    pub fn title(&self, category: usize) -> Result<&str> {
        self.categories
            .get(category)
            .map(|c| c.title.as_str())
            .ok_or(QuizError::IndexOutOfRange { category, clue: 0 })
    }

    pub fn clue(&self, category: usize, clue: usize) -> Result<&Clue> {
        self.categories
            .get(category)
            .and_then(|c| c.clues.get(clue))
            .ok_or(QuizError::IndexOutOfRange { category, clue })
    }

    pub fn clue_mut(&mut self, category: usize, clue: usize) -> Result<&mut Clue> {
        self.categories
            .get_mut(category)
            .and_then(|c| c.clues.get_mut(clue))
            .ok_or(QuizError::IndexOutOfRange { category, clue })
    }

    /// Whether every clue is showing its answer.
    pub fn is_cleared(&self) -> bool {
        self.categories
            .iter()
            .flat_map(|c| &c.clues)
            .all(|clue| clue.state.is_terminal())
    }
}
