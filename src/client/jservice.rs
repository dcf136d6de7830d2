//! jService trivia API client.
//!
//! Epistemic foundation:
//! - K_i: jService serves `/categories?count=&offset=` and `/category?id=`
//! - B_i: API will respond within timeout (might fail)
//! - B_i: Response will be valid JSON (might fail)
//! - B_i: Clue text is clean (it often is not: HTML tags, escapes)

use crate::client::CategorySource;
use crate::models::{
    CategoryDetail, CategoryId, CategorySummary, ClueDetail, QuizError, Result, SourceConfig,
};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::LazyLock;
use std::time::{Duration, Instant};
use tracing::debug;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("static regex is valid"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex is valid"));

/// Category as jService returns it from either endpoint.
#[derive(Debug, Deserialize)]
struct WireCategory {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    clues_count: Option<usize>,
    #[serde(default)]
    clues: Vec<WireClue>,
}

#[derive(Debug, Deserialize)]
struct WireClue {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    answer: Option<String>,
}

impl WireCategory {
    fn into_summary(self) -> CategorySummary {
        CategorySummary {
            id: CategoryId(self.id),
            title: clean_text(self.title.as_deref().unwrap_or_default()),
            clues_count: self.clues_count,
        }
    }

    fn into_detail(self) -> CategoryDetail {
        CategoryDetail {
            id: CategoryId(self.id),
            title: clean_text(self.title.as_deref().unwrap_or_default()),
            clues: self
                .clues
                .into_iter()
                .map(|c| ClueDetail {
                    question: clean_text(c.question.as_deref().unwrap_or_default()),
                    answer: clean_text(c.answer.as_deref().unwrap_or_default()),
                })
                .collect(),
        }
    }
}

/// Strip markup and escape debris from bank text.
pub fn clean_text(raw: &str) -> String {
    let without_tags = HTML_TAG.replace_all(raw, "");
    let without_escapes = without_tags.replace('\\', "");
    WHITESPACE
        .replace_all(without_escapes.trim(), " ")
        .into_owned()
}

/// HTTP client for a jService-compatible question bank.
pub struct JServiceClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    /// Offset into the category listing for candidate requests
    candidate_offset: usize,
}

impl JServiceClient {
    /// Create a new client.
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let timeout = Duration::from_secs(timeout_secs);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(QuizError::Network)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            candidate_offset: 0,
        })
    }

    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        Ok(Self::new(config.base_url.clone(), config.timeout_secs)?
            .with_candidate_offset(config.candidate_offset))
    }

    pub fn with_candidate_offset(mut self, offset: usize) -> Self {
        self.candidate_offset = offset;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn categories_query(&self, count: usize) -> [(&'static str, String); 2] {
        [
            ("count", count.to_string()),
            ("offset", self.candidate_offset.to_string()),
        ]
    }

    /// GET `{base_url}/{path}` and decode the JSON body.
    ///
    /// Returns `Ok(None)` on 404 so callers can name what was missing.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>> {
        let url = format!("{}/{}", self.base_url, path);
        let start = Instant::now();

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    QuizError::Timeout(self.timeout)
                } else {
                    QuizError::Network(e)
                }
            })?;

        let status = response.status();
        debug!(
            url = %url,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Question bank responded"
        );

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(QuizError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .json::<T>()
            .await
            .map_err(|e| QuizError::ParseError(format!("Failed to parse {path} response: {e}")))?;

        Ok(Some(body))
    }
}

#[async_trait]
impl CategorySource for JServiceClient {
    async fn list_candidate_categories(&self, count: usize) -> Result<Vec<CategorySummary>> {
        let categories: Vec<WireCategory> = self
            .get_json("categories", &self.categories_query(count))
            .await?
            .ok_or_else(|| QuizError::Api {
                status: 404,
                message: format!("{}/categories not found", self.base_url),
            })?;

        Ok(categories
            .into_iter()
            .map(WireCategory::into_summary)
            .collect())
    }

    async fn fetch_category_detail(&self, id: CategoryId) -> Result<CategoryDetail> {
        let category: WireCategory = self
            .get_json("category", &[("id", id.to_string())])
            .await?
            .ok_or(QuizError::CategoryNotFound(id))?;

        Ok(category.into_detail())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("<i>Hamlet</i>"), "Hamlet");
        assert_eq!(clean_text("  the \\\"Bell Jar\\\"  "), "the \"Bell Jar\"");
        assert_eq!(clean_text("two\n  lines"), "two lines");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn test_detail_from_wire() {
        let body = r#"{
            "id": 11531,
            "title": "mixed bag",
            "clues_count": 2,
            "clues": [
                {"id": 1, "answer": "<i>Shakespeare</i>", "question": "Wrote Hamlet", "value": 200},
                {"id": 2, "answer": "Plath", "question": null, "value": 400}
            ]
        }"#;
        let wire: WireCategory = serde_json::from_str(body).unwrap();
        let detail = wire.into_detail();

        assert_eq!(detail.id, CategoryId(11531));
        assert_eq!(detail.title, "mixed bag");
        assert_eq!(detail.clues.len(), 2);
        assert_eq!(detail.clues[0].answer, "Shakespeare");
        assert_eq!(detail.clues[1].question, "");
    }

    #[test]
    fn test_summary_from_wire() {
        let body = r#"[{"id": 5, "title": "potpourriiii", "clues_count": 10}, {"id": 6}]"#;
        let wire: Vec<WireCategory> = serde_json::from_str(body).unwrap();
        let summaries: Vec<_> = wire.into_iter().map(WireCategory::into_summary).collect();

        assert_eq!(summaries[0].id, CategoryId(5));
        assert_eq!(summaries[0].clues_count, Some(10));
        assert_eq!(summaries[1].title, "");
        assert_eq!(summaries[1].clues_count, None);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = JServiceClient::new("http://localhost:9/api/", 5).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9/api");
    }

    #[test]
    fn test_candidate_query_carries_offset() {
        let config = SourceConfig {
            candidate_offset: 300,
            ..SourceConfig::default()
        };
        let client = JServiceClient::from_config(&config).unwrap();
        assert_eq!(
            client.categories_query(100),
            [
                ("count", "100".to_string()),
                ("offset", "300".to_string())
            ]
        );
    }
}
