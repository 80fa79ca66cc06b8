//! Tool type definitions for model function-calling.
//!
//! Provider-agnostic types for tool definitions, calls, and results, plus
//! the `search_web` schema and its typed argument parser. Arguments from
//! the model are validated here, at the boundary, before any dispatch.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::search::SearchQuery;
use crate::error::AgentError;

/// Name of the web-search tool exposed to the model.
pub const SEARCH_TOOL_NAME: &str = "search_web";

/// A tool definition that can be sent to an LLM for function-calling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (must match the dispatch table in the executor).
    pub name: String,
    /// Human-readable description of what the tool does.
    pub description: String,
    /// JSON Schema object describing the tool's parameters.
    pub parameters: serde_json::Value,
}

/// A tool call requested by the LLM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this call (assigned by the provider).
    pub id: String,
    /// Name of the tool to invoke.
    pub name: String,
    /// JSON-encoded arguments for the tool.
    pub arguments: String,
}

/// The result of executing a tool call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// ID of the tool call this result corresponds to.
    pub tool_call_id: String,
    /// Result content (JSON string on success, error message on failure).
    pub content: String,
    /// Whether this result represents an error.
    pub is_error: bool,
}

/// Defines the `search_web` tool.
///
/// The schema is static except for `default_k`, which is surfaced as the
/// default of the optional `k` parameter.
#[must_use]
pub fn search_tool(default_k: u32) -> ToolDefinition {
    ToolDefinition {
        name: SEARCH_TOOL_NAME.to_string(),
        description: "Perform a web search and return documents.".to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query"
                },
                "k": {
                    "type": "integer",
                    "description": "Number of search results",
                    "default": default_k
                }
            },
            "required": ["query"]
        }),
    }
}

/// Parses and validates `search_web` arguments into a [`SearchQuery`].
///
/// `default_k` fills in the result count when the model omits `k`.
///
/// # Errors
///
/// Returns [`AgentError::ToolArguments`] on malformed JSON, a missing or
/// empty `query`, or `k = 0`.
pub fn parse_search_args(arguments: &str, default_k: u32) -> Result<SearchQuery, AgentError> {
    #[derive(Deserialize)]
    struct Args {
        query: String,
        k: Option<u32>,
    }

    let args: Args = serde_json::from_str(arguments).map_err(|e| AgentError::ToolArguments {
        name: SEARCH_TOOL_NAME.to_string(),
        message: format!("invalid arguments: {e}"),
    })?;

    if args.query.trim().is_empty() {
        return Err(AgentError::ToolArguments {
            name: SEARCH_TOOL_NAME.to_string(),
            message: "query must not be empty".to_string(),
        });
    }

    let result_count = args.k.unwrap_or(default_k);
    if result_count == 0 {
        return Err(AgentError::ToolArguments {
            name: SEARCH_TOOL_NAME.to_string(),
            message: "k must be at least 1".to_string(),
        });
    }

    Ok(SearchQuery {
        text: args.query,
        result_count,
    })
}
