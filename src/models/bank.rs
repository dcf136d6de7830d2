//! Question bank records exchanged with a category source.
//!
//! K_i: These are the shapes a source hands back; boards are built from them.

use crate::models::CategoryId;
use serde::{Deserialize, Serialize};

/// Summary row from a category listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: CategoryId,

    #[serde(default)]
    pub title: String,

    /// Number of clues the bank advertises, when it says
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clues_count: Option<usize>,
}

/// Full detail for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDetail {
    pub id: CategoryId,
    pub title: String,
    #[serde(default)]
    pub clues: Vec<ClueDetail>,
}

impl CategoryDetail {
    pub fn summary(&self) -> CategorySummary {
        CategorySummary {
            id: self.id,
            title: self.title.clone(),
            clues_count: Some(self.clues.len()),
        }
    }
}

/// A raw question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueDetail {
    pub question: String,
    pub answer: String,
}
