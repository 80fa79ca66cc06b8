//! Tool executor that dispatches model tool calls to the search client.
//!
//! One call in, one result out: every dispatched [`ToolCall`] produces
//! exactly one [`ToolResult`] (unknown tools get an error result), so the
//! conversation never carries a dangling unanswered call. Argument
//! validation failures and search exhaustion are fatal and propagate
//! instead of becoming results.

use tracing::debug;

use super::search::SearchClient;
use super::tool::{SEARCH_TOOL_NAME, ToolCall, ToolResult, parse_search_args};
use crate::error::AgentError;

/// Outcome of dispatching one tool call.
#[derive(Debug, Clone)]
pub struct ExecutedCall {
    /// The result to append to the conversation.
    pub result: ToolResult,
    /// Query text to append to the query log, when a search was executed.
    pub query: Option<String>,
}

/// Executes tool calls against the retrying search client.
///
/// Borrows the client so a fresh executor (with its per-invocation default
/// `k`) can be built for each summarization over the same client.
pub struct ToolExecutor<'a> {
    search: &'a SearchClient,
    default_k: u32,
}

impl<'a> ToolExecutor<'a> {
    /// Creates a new executor over the given search client.
    ///
    /// `default_k` fills in the result count when the model omits `k`.
    #[must_use]
    pub const fn new(search: &'a SearchClient, default_k: u32) -> Self {
        Self { search, default_k }
    }

    /// Dispatches a single tool call.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ToolArguments`] when the model's arguments
    /// fail to parse or validate (no search is attempted), and propagates
    /// [`AgentError::RetriesExhausted`] from the search client.
    pub async fn execute(&self, call: &ToolCall) -> Result<ExecutedCall, AgentError> {
        if call.name != SEARCH_TOOL_NAME {
            debug!(tool = %call.name, call_id = %call.id, "unknown tool requested");
            return Ok(ExecutedCall {
                result: ToolResult {
                    tool_call_id: call.id.clone(),
                    content: format!("unknown tool: {}", call.name),
                    is_error: true,
                },
                query: None,
            });
        }

        let query = parse_search_args(&call.arguments, self.default_k)?;
        let docs = self.search.search(&query).await?;

        let content = serde_json::to_string(&docs).map_err(|e| AgentError::ToolArguments {
            name: SEARCH_TOOL_NAME.to_string(),
            message: format!("failed to serialize results: {e}"),
        })?;

        debug!(
            call_id = %call.id,
            query = %query.text,
            results = docs.len(),
            "tool execution complete"
        );

        Ok(ExecutedCall {
            result: ToolResult {
                tool_call_id: call.id.clone(),
                content,
                is_error: false,
            },
            query: Some(query.text),
        })
    }
}

impl std::fmt::Debug for ToolExecutor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolExecutor")
            .field("default_k", &self.default_k)
            .finish_non_exhaustive()
    }
}
