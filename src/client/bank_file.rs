//! Offline question bank read from a JSON-lines file.
//!
//! One `CategoryDetail` per line:
//! `{"id": 1, "title": "Math", "clues": [{"question": "2+2", "answer": "4"}]}`

use crate::client::CategorySource;
use crate::models::{CategoryDetail, CategoryId, CategorySummary, QuizError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

/// Categories held in memory, in file order.
#[derive(Debug, Clone, Default)]
pub struct BankFile {
    categories: Vec<CategoryDetail>,
    index: HashMap<CategoryId, usize>,
}

impl BankFile {
    /// Load a bank from a JSON-lines file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| QuizError::io("opening question bank", e))?;
        let reader = BufReader::new(file);
        let mut categories = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| QuizError::io("reading question bank", e))?;
            if line.trim().is_empty() {
                continue;
            }
            let category: CategoryDetail = serde_json::from_str(&line)
                .map_err(|e| QuizError::ParseError(format!("Line {}: {}", line_num + 1, e)))?;
            categories.push(category);
        }

        let bank = Self::from_categories(categories);
        info!(count = bank.len(), path = %path.display(), "Loaded question bank");
        Ok(bank)
    }

    /// Build a bank from categories already in memory.
    ///
    /// A repeated id keeps its first occurrence.
    pub fn from_categories(categories: Vec<CategoryDetail>) -> Self {
        let mut bank = Self::default();
        for category in categories {
            if bank.index.contains_key(&category.id) {
                continue;
            }
            bank.index.insert(category.id, bank.categories.len());
            bank.categories.push(category);
        }
        bank
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[async_trait]
impl CategorySource for BankFile {
    async fn list_candidate_categories(&self, count: usize) -> Result<Vec<CategorySummary>> {
        Ok(self
            .categories
            .iter()
            .take(count)
            .map(CategoryDetail::summary)
            .collect())
    }

    async fn fetch_category_detail(&self, id: CategoryId) -> Result<CategoryDetail> {
        self.index
            .get(&id)
            .map(|&i| self.categories[i].clone())
            .ok_or(QuizError::CategoryNotFound(id))
    }
}
