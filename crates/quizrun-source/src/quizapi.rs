//! QuizAPI question source.

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use quizrun_core::model::Question;
use quizrun_core::traits::{QuestionQuery, QuestionSource};

use crate::error::SourceError;

pub const DEFAULT_BASE_URL: &str = "https://quizapi.io/api/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const API_KEY_HEADER: &str = "X-Api-Key";

/// Client for the QuizAPI `/questions` endpoint.
pub struct QuizApiClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl QuizApiClient {
    pub fn new(api_key: &str, base_url: Option<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            client,
        })
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Decode a response body into questions.
///
/// A question array is tried first; only when that fails is the body read as
/// an `{"error": ...}` object. An empty array is [`SourceError::NoQuestions`].
pub fn decode_questions(body: &[u8]) -> Result<Vec<Question>, SourceError> {
    match serde_json::from_slice::<Vec<Question>>(body) {
        Ok(questions) if questions.is_empty() => Err(SourceError::NoQuestions),
        Ok(questions) => Ok(questions),
        Err(list_err) => match serde_json::from_slice::<ErrorResponse>(body) {
            Ok(response) => Err(SourceError::Rejected(response.error)),
            Err(_) => Err(SourceError::Decode(list_err.to_string())),
        },
    }
}

#[async_trait]
impl QuestionSource for QuizApiClient {
    fn name(&self) -> &str {
        "quizapi"
    }

    #[instrument(skip(self, query), fields(limit = query.limit))]
    async fn fetch(&self, query: &QuestionQuery) -> anyhow::Result<Vec<Question>> {
        let mut params: Vec<(&str, String)> = vec![("limit", query.limit.to_string())];
        if let Some(category) = &query.category {
            params.push(("category", category.clone()));
        }
        if let Some(difficulty) = &query.difficulty {
            params.push(("difficulty", difficulty.clone()));
        }

        let endpoint = format!("{}/questions", self.base_url);
        let url = reqwest::Url::parse_with_params(&endpoint, &params)
            .with_context(|| format!("invalid base URL: {}", self.base_url))?;
        debug!(%url, "requesting questions");

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SourceError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else {
                    SourceError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| SourceError::NetworkError(format!("failed to read body: {e}")))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorResponse>(&body)
                .map(|r| r.error)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
            return Err(SourceError::ApiError {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let questions = decode_questions(&body)?;
        debug!(count = questions.len(), "questions received");
        Ok(questions)
    }
}
