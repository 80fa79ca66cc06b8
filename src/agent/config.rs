//! Agent configuration with builder pattern and environment variable support.
//!
//! Configuration is resolved in order: explicit values → environment
//! variables → defaults. Required credentials are checked once, at build
//! time; a missing key is a configuration error, never a runtime one.

use std::time::Duration;

use crate::error::AgentError;

/// Default model identifier.
const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default sampling temperature.
const DEFAULT_TEMPERATURE: f32 = 0.3;
/// Default search backend base URL.
const DEFAULT_SEARCH_BASE_URL: &str = "https://api.tavily.com";
/// Default search attempts per query.
const DEFAULT_SEARCH_RETRIES: u32 = 3;
/// Default backoff unit between search attempts.
const DEFAULT_SEARCH_BACKOFF: Duration = Duration::from_millis(1500);
/// Default per-request search timeout.
const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(10);
/// Default number of search results per query.
const DEFAULT_RESULT_COUNT: u32 = 5;
/// Default maximum model↔tool round trips.
const DEFAULT_MAX_TOOL_ITERATIONS: usize = 10;

/// Configuration for the agent system.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// LLM provider name (e.g., "openai").
    pub provider: String,
    /// API key for the model provider.
    pub openai_api_key: String,
    /// API key for the search backend.
    pub tavily_api_key: String,
    /// Optional base URL override for the model API (proxies, compatible APIs).
    pub base_url: Option<String>,
    /// Base URL of the search backend.
    pub search_base_url: String,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Search attempts per query (at least 1).
    pub search_retries: u32,
    /// Backoff unit: the wait before attempt `i+1` is `backoff * i`.
    pub search_backoff: Duration,
    /// Per-request search timeout, independent of the retry schedule.
    pub search_timeout: Duration,
    /// Default `k` when the model omits it from a tool call.
    pub default_result_count: u32,
    /// Maximum model↔tool round trips before aborting.
    pub max_tool_iterations: usize,
}

impl AgentConfig {
    /// Creates a new builder for `AgentConfig`.
    #[must_use]
    pub fn builder() -> AgentConfigBuilder {
        AgentConfigBuilder::default()
    }

    /// Creates configuration from environment variables with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ApiKeyMissing`] if a required key is not found.
    pub fn from_env() -> Result<Self, AgentError> {
        Self::builder().from_env().build()
    }
}

/// Builder for [`AgentConfig`].
#[derive(Debug, Clone, Default)]
pub struct AgentConfigBuilder {
    provider: Option<String>,
    openai_api_key: Option<String>,
    tavily_api_key: Option<String>,
    base_url: Option<String>,
    search_base_url: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    search_retries: Option<u32>,
    search_backoff: Option<Duration>,
    search_timeout: Option<Duration>,
    default_result_count: Option<u32>,
    max_tool_iterations: Option<usize>,
}

impl AgentConfigBuilder {
    /// Populates unset fields from environment variables.
    #[must_use]
    pub fn from_env(mut self) -> Self {
        if self.provider.is_none() {
            self.provider = std::env::var("WEBBRIEF_PROVIDER").ok();
        }
        if self.openai_api_key.is_none() {
            self.openai_api_key = std::env::var("OPENAI_API_KEY").ok();
        }
        if self.tavily_api_key.is_none() {
            self.tavily_api_key = std::env::var("TAVILY_API_KEY").ok();
        }
        if self.base_url.is_none() {
            self.base_url = std::env::var("OPENAI_BASE_URL").ok();
        }
        if self.search_base_url.is_none() {
            self.search_base_url = std::env::var("TAVILY_BASE_URL").ok();
        }
        if self.model.is_none() {
            self.model = std::env::var("OPENAI_MODEL").ok();
        }
        self
    }

    /// Sets the LLM provider name.
    #[must_use]
    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Sets the model provider API key.
    #[must_use]
    pub fn openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    /// Sets the search backend API key.
    #[must_use]
    pub fn tavily_api_key(mut self, key: impl Into<String>) -> Self {
        self.tavily_api_key = Some(key.into());
        self
    }

    /// Sets the model API base URL override.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the search backend base URL.
    #[must_use]
    pub fn search_base_url(mut self, url: impl Into<String>) -> Self {
        self.search_base_url = Some(url.into());
        self
    }

    /// Sets the model identifier.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub const fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the search attempts per query.
    #[must_use]
    pub const fn search_retries(mut self, n: u32) -> Self {
        self.search_retries = Some(n);
        self
    }

    /// Sets the backoff unit between search attempts.
    #[must_use]
    pub const fn search_backoff(mut self, backoff: Duration) -> Self {
        self.search_backoff = Some(backoff);
        self
    }

    /// Sets the per-request search timeout.
    #[must_use]
    pub const fn search_timeout(mut self, timeout: Duration) -> Self {
        self.search_timeout = Some(timeout);
        self
    }

    /// Sets the default number of search results per query.
    #[must_use]
    pub const fn default_result_count(mut self, k: u32) -> Self {
        self.default_result_count = Some(k);
        self
    }

    /// Sets the maximum tool-calling loop iterations.
    #[must_use]
    pub const fn max_tool_iterations(mut self, n: usize) -> Self {
        self.max_tool_iterations = Some(n);
        self
    }

    /// Builds the [`AgentConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ApiKeyMissing`] if either required key was not
    /// set.
    pub fn build(self) -> Result<AgentConfig, AgentError> {
        let openai_api_key = self.openai_api_key.ok_or(AgentError::ApiKeyMissing {
            var: "OPENAI_API_KEY",
        })?;
        let tavily_api_key = self.tavily_api_key.ok_or(AgentError::ApiKeyMissing {
            var: "TAVILY_API_KEY",
        })?;

        Ok(AgentConfig {
            provider: self.provider.unwrap_or_else(|| "openai".to_string()),
            openai_api_key,
            tavily_api_key,
            base_url: self.base_url,
            search_base_url: self
                .search_base_url
                .unwrap_or_else(|| DEFAULT_SEARCH_BASE_URL.to_string()),
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            search_retries: self.search_retries.unwrap_or(DEFAULT_SEARCH_RETRIES).max(1),
            search_backoff: self.search_backoff.unwrap_or(DEFAULT_SEARCH_BACKOFF),
            search_timeout: self.search_timeout.unwrap_or(DEFAULT_SEARCH_TIMEOUT),
            default_result_count: self
                .default_result_count
                .unwrap_or(DEFAULT_RESULT_COUNT)
                .max(1),
            max_tool_iterations: self
                .max_tool_iterations
                .unwrap_or(DEFAULT_MAX_TOOL_ITERATIONS),
        })
    }
}
