//! Retrying web-search client.
//!
//! Issues a single search request against a Tavily-style HTTP backend with
//! bounded retries and linear backoff. The transport is behind the
//! [`SearchBackend`] trait so the retry policy can be exercised against
//! mocks.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::config::AgentConfig;
use crate::error::AgentError;

/// A single validated search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Query text (non-empty).
    pub text: String,
    /// Number of results to request (at least 1).
    pub result_count: u32,
}

/// One web document returned by the search backend.
///
/// Results arrive ordered by backend relevance rank and are never reordered
/// downstream — the citation index in the rendered answer depends on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document title.
    pub title: String,
    /// Source URL.
    pub url: String,
    /// Extracted page content.
    pub content: String,
}

/// Transport for one search attempt.
///
/// Implementations perform exactly one request; retry policy lives in
/// [`SearchClient`].
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Performs a single search attempt.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::SearchRequest`] on transport failure or a
    /// non-2xx response.
    async fn fetch(&self, query: &str, k: u32) -> Result<Vec<Document>, AgentError>;
}

/// Request body for the search backend.
#[derive(Debug, Serialize)]
struct SearchPayload<'a> {
    api_key: &'a str,
    query: &'a str,
    num_results: u32,
}

/// Response body from the search backend. A missing `results` field is an
/// empty result set, not an error.
#[derive(Debug, Deserialize)]
struct SearchResponseBody {
    #[serde(default)]
    results: Vec<Document>,
}

/// HTTP transport against a Tavily-compatible search API.
pub struct HttpSearchBackend {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpSearchBackend {
    /// Creates the HTTP backend from configuration.
    ///
    /// The per-request timeout applies to each individual attempt,
    /// independent of the retry/backoff schedule.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::SearchRequest`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: &AgentConfig) -> Result<Self, AgentError> {
        let client = reqwest::Client::builder()
            .timeout(config.search_timeout)
            .build()
            .map_err(|e| AgentError::SearchRequest {
                message: format!("failed to build HTTP client: {e}"),
                status: None,
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}/search", config.search_base_url.trim_end_matches('/')),
            api_key: config.tavily_api_key.clone(),
        })
    }
}

impl std::fmt::Debug for HttpSearchBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSearchBackend")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn fetch(&self, query: &str, k: u32) -> Result<Vec<Document>, AgentError> {
        let payload = SearchPayload {
            api_key: &self.api_key,
            query,
            num_results: k,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AgentError::SearchRequest {
                message: e.to_string(),
                status: None,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::SearchRequest {
                message: format!("HTTP {status}: {body}"),
                status: Some(status.as_u16()),
            });
        }

        let body: SearchResponseBody =
            response
                .json()
                .await
                .map_err(|e| AgentError::SearchRequest {
                    message: format!("failed to parse search response: {e}"),
                    status: Some(status.as_u16()),
                })?;

        Ok(body.results)
    }
}

/// Search client with bounded retries and linear backoff.
///
/// Attempts the backend call up to `retries` times. After failed attempt
/// `i < retries` it sleeps `backoff * i` (so waits scale linearly), then
/// retries; a failure on the last attempt becomes
/// [`AgentError::RetriesExhausted`].
pub struct SearchClient {
    backend: Box<dyn SearchBackend>,
    retries: u32,
    backoff: Duration,
}

impl SearchClient {
    /// Creates a client with the HTTP backend from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::SearchRequest`] if the HTTP client cannot be
    /// constructed. A missing credential is rejected earlier, when the
    /// configuration is built.
    pub fn new(config: &AgentConfig) -> Result<Self, AgentError> {
        Ok(Self {
            backend: Box::new(HttpSearchBackend::new(config)?),
            retries: config.search_retries,
            backoff: config.search_backoff,
        })
    }

    /// Creates a client over an arbitrary backend, mainly for tests.
    #[must_use]
    pub fn with_backend(backend: Box<dyn SearchBackend>, retries: u32, backoff: Duration) -> Self {
        Self {
            backend,
            retries: retries.max(1),
            backoff,
        }
    }

    /// Executes one search with the retry policy.
    ///
    /// On success returns the backend's documents in relevance order; an
    /// empty result set is a valid success.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::RetriesExhausted`] once every allowed attempt
    /// has failed, wrapping the last underlying cause.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Document>, AgentError> {
        for attempt in 1..=self.retries {
            match self.backend.fetch(&query.text, query.result_count).await {
                Ok(docs) => {
                    debug!(
                        query = %query.text,
                        k = query.result_count,
                        results = docs.len(),
                        attempt,
                        "search succeeded"
                    );
                    return Ok(docs);
                }
                Err(err) => {
                    if attempt == self.retries {
                        return Err(AgentError::RetriesExhausted {
                            attempts: self.retries,
                            last_error: err.to_string(),
                        });
                    }
                    let delay = self.backoff * attempt;
                    warn!(
                        query = %query.text,
                        attempt,
                        retries = self.retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "search attempt failed, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }

        // retries >= 1, so the loop always returns
        Err(AgentError::RetriesExhausted {
            attempts: self.retries,
            last_error: "no attempts were made".to_string(),
        })
    }
}

impl std::fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchClient")
            .field("retries", &self.retries)
            .field("backoff", &self.backoff)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
pub(crate) mod tests {
    use super::*;

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use test_case::test_case;

    /// Mock backend that fails the first `failures` attempts, then succeeds
    /// with a fixed document set. Counts every attempt.
    pub(crate) struct FlakyBackend {
        pub(crate) attempts: Arc<AtomicUsize>,
        failures: usize,
        docs: Vec<Document>,
    }

    impl FlakyBackend {
        pub(crate) fn new(failures: usize, docs: Vec<Document>) -> Self {
            Self {
                attempts: Arc::new(AtomicUsize::new(0)),
                failures,
                docs,
            }
        }

        pub(crate) fn attempt_counter(&self) -> Arc<AtomicUsize> {
            Arc::clone(&self.attempts)
        }
    }

    #[async_trait]
    impl SearchBackend for FlakyBackend {
        async fn fetch(&self, _query: &str, _k: u32) -> Result<Vec<Document>, AgentError> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            if attempt <= self.failures {
                Err(AgentError::SearchRequest {
                    message: format!("simulated failure on attempt {attempt}"),
                    status: Some(503),
                })
            } else {
                Ok(self.docs.clone())
            }
        }
    }

    pub(crate) fn doc(title: &str) -> Document {
        Document {
            title: title.to_string(),
            url: format!("https://example.com/{title}"),
            content: format!("content of {title}"),
        }
    }

    fn query(text: &str) -> SearchQuery {
        SearchQuery {
            text: text.to_string(),
            result_count: 5,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_first_attempt_no_sleep() {
        let backend = FlakyBackend::new(0, vec![doc("a"), doc("b")]);
        let attempts = backend.attempt_counter();
        let client =
            SearchClient::with_backend(Box::new(backend), 3, Duration::from_millis(1500));

        let start = tokio::time::Instant::now();
        let docs = client
            .search(&query("x"))
            .await
            .unwrap_or_else(|e| panic!("search failed: {e}"));

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].title, "a");
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_on_third_attempt() {
        // Fails attempts 1 and 2, succeeds on 3: sleeps 1.5s then 3.0s.
        let backend = FlakyBackend::new(2, vec![doc("hit")]);
        let attempts = backend.attempt_counter();
        let client =
            SearchClient::with_backend(Box::new(backend), 3, Duration::from_millis(1500));

        let start = tokio::time::Instant::now();
        let docs = client
            .search(&query("x"))
            .await
            .unwrap_or_else(|e| panic!("search failed: {e}"));

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title, "hit");
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        assert_eq!(start.elapsed(), Duration::from_millis(1500 + 3000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_attempts_fail() {
        let backend = FlakyBackend::new(usize::MAX, Vec::new());
        let attempts = backend.attempt_counter();
        let client =
            SearchClient::with_backend(Box::new(backend), 3, Duration::from_millis(1500));

        let start = tokio::time::Instant::now();
        let err = match client.search(&query("x")).await {
            Err(e) => e,
            Ok(_) => panic!("expected exhaustion"),
        };

        match err {
            AgentError::RetriesExhausted {
                attempts: reported,
                last_error,
            } => {
                assert_eq!(reported, 3);
                assert!(last_error.contains("attempt 3"));
            }
            other => panic!("expected RetriesExhausted, got: {other}"),
        }
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        // Two sleeps: backoff*1 + backoff*2, none after the final failure.
        assert_eq!(start.elapsed(), Duration::from_millis(1500 + 3000));
    }

    #[test_case(1 ; "single attempt")]
    #[test_case(2 ; "two attempts")]
    #[test_case(5 ; "five attempts")]
    #[tokio::test(start_paused = true)]
    async fn test_attempt_count_matches_retries(retries: u32) {
        let backend = FlakyBackend::new(usize::MAX, Vec::new());
        let attempts = backend.attempt_counter();
        let backoff = Duration::from_millis(10);
        let client = SearchClient::with_backend(Box::new(backend), retries, backoff);

        let start = tokio::time::Instant::now();
        let result = client.search(&query("x")).await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), retries as usize);
        // n attempts sleep n-1 times: backoff*1 + ... + backoff*(n-1).
        let expected = backoff * (retries * (retries - 1) / 2);
        assert_eq!(start.elapsed(), expected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_attempts_after_success() {
        let backend = FlakyBackend::new(1, vec![doc("late")]);
        let attempts = backend.attempt_counter();
        let client = SearchClient::with_backend(Box::new(backend), 5, Duration::from_millis(100));

        let docs = client
            .search(&query("x"))
            .await
            .unwrap_or_else(|e| panic!("search failed: {e}"));

        assert_eq!(docs.len(), 1);
        // Succeeded on attempt 2 of 5: exactly 2 attempts, none after.
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_results_is_success() {
        // A backend returning no documents is a valid empty result set.
        let client = SearchClient::with_backend(
            Box::new(FlakyBackend::new(0, Vec::new())),
            3,
            Duration::from_millis(10),
        );
        let docs = client
            .search(&query("obscure"))
            .await
            .unwrap_or_else(|e| panic!("search failed: {e}"));
        assert!(docs.is_empty());
    }

    #[test]
    fn test_response_body_defaults_results() {
        let body: SearchResponseBody =
            serde_json::from_str("{}").unwrap_or_else(|e| panic!("parse: {e}"));
        assert!(body.results.is_empty());
    }
}
