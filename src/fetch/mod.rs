//! Question fetcher
//!
//! Issues the single outbound request to the trivia provider and maps its
//! `{ response_code, results }` envelope onto `Vec<Question>`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::AppConfig;
use crate::models::{Question, QuizSettings};
use crate::{Result, TriviumError};

/// Provider success sentinel for `response_code`
pub const RESPONSE_CODE_SUCCESS: i64 = 0;

/// Errors that can occur while fetching questions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The provider could not satisfy the requested combination of settings.
    #[error("no questions available (response code {code})")]
    NoQuestionsAvailable { code: i64 },

    /// Network failure, bad HTTP status or an unparseable body.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Anything that can produce a question set for a given settings value
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn fetch_questions(
        &self,
        settings: &QuizSettings,
    ) -> std::result::Result<Vec<Question>, FetchError>;
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    response_code: i64,
    #[serde(default)]
    results: Vec<Question>,
}

/// HTTP client for an Open Trivia DB compatible endpoint
#[derive(Debug, Clone)]
pub struct TriviaClient {
    endpoint: String,
    client: reqwest::Client,
}

impl TriviaClient {
    /// Build a client for `endpoint`. Without a timeout the transport default
    /// applies.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TriviumError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.endpoint.clone(),
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Full request URL for the given settings
    pub fn request_url(&self, settings: &QuizSettings) -> std::result::Result<Url, FetchError> {
        Url::parse_with_params(&self.endpoint, settings.query_pairs())
            .map_err(|e| FetchError::Transport(format!("invalid endpoint {}: {}", self.endpoint, e)))
    }
}

#[async_trait]
impl QuestionSource for TriviaClient {
    #[instrument(skip(self, settings), fields(amount = settings.amount, category = %settings.category))]
    async fn fetch_questions(
        &self,
        settings: &QuizSettings,
    ) -> std::result::Result<Vec<Question>, FetchError> {
        let url = self.request_url(settings)?;
        debug!(%url, "requesting questions");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!(error = %e, "question request failed");
                FetchError::Transport(e.to_string())
            })?;

        let body: ApiResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "could not decode provider response");
            FetchError::Transport(format!("failed to parse response: {}", e))
        })?;

        into_questions(body)
    }
}

fn into_questions(body: ApiResponse) -> std::result::Result<Vec<Question>, FetchError> {
    if body.response_code != RESPONSE_CODE_SUCCESS {
        warn!(code = body.response_code, "provider rejected request");
        return Err(FetchError::NoQuestionsAvailable {
            code: body.response_code,
        });
    }
    // A session needs at least one question.
    if body.results.is_empty() {
        warn!("provider returned success with no results");
        return Err(FetchError::NoQuestionsAvailable {
            code: body.response_code,
        });
    }
    debug!(count = body.results.len(), "questions received");
    Ok(body.results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, QuestionType};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings() -> QuizSettings {
        QuizSettings {
            amount: 2,
            category: "17".into(),
            difficulty: Difficulty::Hard,
            question_type: QuestionType::Boolean,
        }
    }

    fn question_json(text: &str) -> serde_json::Value {
        serde_json::json!({
            "type": "boolean",
            "difficulty": "hard",
            "category": "Science &amp; Nature",
            "question": text,
            "correct_answer": "True",
            "incorrect_answers": ["False"]
        })
    }

    #[test]
    fn test_request_url_carries_settings() {
        let client = TriviaClient::new("https://opentdb.com/api.php", None).unwrap();
        let url = client.request_url(&settings()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://opentdb.com/api.php?amount=2&category=17&difficulty=hard&type=boolean"
        );
    }

    #[test]
    fn test_invalid_endpoint_is_transport_error() {
        let client = TriviaClient::new("not a url", None).unwrap();
        assert!(matches!(
            client.request_url(&settings()),
            Err(FetchError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn successful_fetch() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "response_code": 0,
            "results": [question_json("Water boils at 100C at sea level."), question_json("Pluto is a planet.")]
        });

        Mock::given(method("GET"))
            .and(path("/api.php"))
            .and(query_param("amount", "2"))
            .and(query_param("category", "17"))
            .and(query_param("difficulty", "hard"))
            .and(query_param("type", "boolean"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let client = TriviaClient::new(format!("{}/api.php", server.uri()), None).unwrap();
        let questions = client.fetch_questions(&settings()).await.unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].question, "Pluto is a planet.");
        assert_eq!(questions[0].incorrect_answers, vec!["False"]);
    }

    #[tokio::test]
    async fn non_zero_response_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"response_code": 1, "results": []})),
            )
            .mount(&server)
            .await;

        let client = TriviaClient::new(format!("{}/api.php", server.uri()), None).unwrap();
        let err = client.fetch_questions(&settings()).await.unwrap_err();
        assert_eq!(err, FetchError::NoQuestionsAvailable { code: 1 });
    }

    #[tokio::test]
    async fn empty_success_is_no_questions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"response_code": 0, "results": []})),
            )
            .mount(&server)
            .await;

        let client = TriviaClient::new(format!("{}/api.php", server.uri()), None).unwrap();
        let err = client.fetch_questions(&settings()).await.unwrap_err();
        assert_eq!(err, FetchError::NoQuestionsAvailable { code: 0 });
    }

    #[tokio::test]
    async fn http_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&server)
            .await;

        let client = TriviaClient::new(format!("{}/api.php", server.uri()), None).unwrap();
        let err = client.fetch_questions(&settings()).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(msg) if msg.contains("500")));
    }

    #[tokio::test]
    async fn malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let client = TriviaClient::new(format!("{}/api.php", server.uri()), None).unwrap();
        let err = client.fetch_questions(&settings()).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[tokio::test]
    async fn unreachable_host() {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let client = TriviaClient::new("http://127.0.0.1:9/api.php", None).unwrap();
        let err = client.fetch_questions(&settings()).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
