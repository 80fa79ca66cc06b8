//! Summarization orchestrator.
//!
//! Wires the provider, the retrying search client, and the prompt
//! composition into one `summarize` operation: ask the model, let it call
//! `search_web` as needed, and return the cited answer together with the
//! log of executed queries.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use super::agentic_loop::agentic_loop;
use super::config::AgentConfig;
use super::executor::ToolExecutor;
use super::message::{ChatRequest, TokenUsage, system_message, user_message};
use super::prompt::{SUMMARY_SYSTEM_PROMPT, compose_document_prompt, compose_query_report};
use super::provider::LlmProvider;
use super::search::{Document, SearchClient};
use super::tool::search_tool;
use crate::error::AgentError;

/// Result of one summarization: the answer, the queries that produced it,
/// and cumulative token usage.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Final answer text, trimmed of surrounding whitespace.
    pub answer: String,
    /// Query texts in dispatch order, one per executed search.
    pub queries: Vec<String>,
    /// Token usage accumulated across every model round.
    pub usage: TokenUsage,
}

impl std::fmt::Display for Summary {
    /// Renders the query report followed by the answer.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n\n{}", compose_query_report(&self.queries), self.answer)
    }
}

/// Drives the model ↔ search loop for a single question.
///
/// All state is scoped to one `summarize` call; the agent itself holds
/// only the provider, the search client, and configuration, so it can be
/// reused across invocations without carrying conversation state over.
pub struct SummaryAgent {
    provider: Arc<dyn LlmProvider>,
    search: SearchClient,
    config: AgentConfig,
}

impl SummaryAgent {
    /// Creates a new agent over the given provider and search client.
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, search: SearchClient, config: AgentConfig) -> Self {
        Self {
            provider,
            search,
            config,
        }
    }

    /// Answers a question, consulting the web-search tool as the model
    /// requires.
    ///
    /// `k` is the default number of results per search; the model may
    /// override it per call via the tool's `k` argument.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ToolArguments`] on malformed tool arguments,
    /// [`AgentError::RetriesExhausted`] when a search runs out of attempts,
    /// [`AgentError::ToolLoopExceeded`] when the round-trip cap is hit, and
    /// [`AgentError::ApiRequest`] on provider failures.
    pub async fn summarize(&self, question: &str, k: u32) -> Result<Summary, AgentError> {
        let start = Instant::now();
        let mut queries = Vec::new();

        let mut request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                system_message(SUMMARY_SYSTEM_PROMPT),
                user_message(question),
            ],
            temperature: Some(self.config.temperature),
            tools: vec![search_tool(k)],
        };

        let executor = ToolExecutor::new(&self.search, k);
        let response = agentic_loop(
            self.provider.as_ref(),
            &mut request,
            &executor,
            &mut queries,
            self.config.max_tool_iterations,
        )
        .await?;

        info!(
            searches = queries.len(),
            total_tokens = response.usage.total_tokens,
            elapsed = ?start.elapsed(),
            "summarization complete"
        );

        Ok(Summary {
            answer: response.content.trim().to_string(),
            queries,
            usage: response.usage,
        })
    }

    /// Answers a question from a fixed document set, without tools.
    ///
    /// The documents are rendered with the same citation numbering the
    /// search path uses, in input order.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ApiRequest`] on provider failures.
    pub async fn summarize_documents(
        &self,
        question: &str,
        docs: &[Document],
    ) -> Result<Summary, AgentError> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: compose_document_prompt(question, docs),
            temperature: Some(self.config.temperature),
            tools: Vec::new(),
        };

        let response = self.provider.chat(&request).await?;

        Ok(Summary {
            answer: response.content.trim().to_string(),
            queries: Vec::new(),
            usage: response.usage,
        })
    }
}

impl std::fmt::Debug for SummaryAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryAgent")
            .field("provider", &self.provider.name())
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}
