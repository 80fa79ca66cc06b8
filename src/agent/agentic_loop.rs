//! Agentic tool-calling loop.
//!
//! Drives the model ↔ tool round-trip: sends a request to the model,
//! executes any tool calls in the response, appends results, and repeats
//! until the model produces a final text response or the iteration limit
//! is reached.

use tracing::debug;

use super::executor::ToolExecutor;
use super::message::{ChatRequest, ChatResponse, assistant_tool_calls_message, tool_message};
use super::provider::LlmProvider;
use crate::error::AgentError;

/// Runs an agentic loop: model → tool calls → tool results → model → …
///
/// Continues until the model responds without tool calls (i.e., it produces
/// a final text answer) or `max_iterations` is reached. Tool calls within a
/// turn are dispatched strictly sequentially, in the order the model
/// emitted them; each executed search's query text is appended to
/// `query_log` in dispatch order. Every tool call is answered by exactly
/// one tool message before the model is invoked again.
///
/// # Arguments
///
/// * `provider` - LLM provider to call.
/// * `request` - Initial chat request (mutated in-place with tool messages).
/// * `executor` - Dispatches tool calls to the search client.
/// * `query_log` - Receives one entry per executed search.
/// * `max_iterations` - Safety limit on round-trips.
///
/// # Returns
///
/// The final [`ChatResponse`], with its usage field replaced by the
/// cumulative usage across every round of the loop.
///
/// # Errors
///
/// Returns [`AgentError::ToolLoopExceeded`] if the model keeps requesting
/// tools beyond `max_iterations`. Propagates provider errors, argument
/// validation failures, and search retry exhaustion.
pub async fn agentic_loop(
    provider: &dyn LlmProvider,
    request: &mut ChatRequest,
    executor: &ToolExecutor<'_>,
    query_log: &mut Vec<String>,
    max_iterations: usize,
) -> Result<ChatResponse, AgentError> {
    let mut total_usage = super::message::TokenUsage::default();

    for iteration in 0..max_iterations {
        let mut response = provider.chat(request).await?;
        total_usage.accumulate(response.usage);

        // No tool calls means the content is the final answer.
        if response.tool_calls.is_empty() {
            debug!(iteration, "agentic loop completed with final text response");
            response.usage = total_usage;
            return Ok(response);
        }

        debug!(
            iteration,
            tool_count = response.tool_calls.len(),
            "executing tool calls"
        );

        // Append the assistant message with tool calls
        request
            .messages
            .push(assistant_tool_calls_message(response.tool_calls.clone()));

        // Execute each tool call sequentially and append results
        for call in &response.tool_calls {
            let executed = executor.execute(call).await?;
            if let Some(query) = executed.query {
                query_log.push(query);
            }
            request
                .messages
                .push(tool_message(&executed.result.tool_call_id, &executed.result.content));
        }
    }

    Err(AgentError::ToolLoopExceeded { max_iterations })
}
