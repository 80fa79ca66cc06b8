//! Search-augmented summarization agent.
//!
//! Drives an LLM tool-calling loop over a retrying web-search client and
//! produces a cited answer plus a log of the queries issued.
//!
//! # Architecture
//!
//! ```text
//! Question → SummaryAgent::summarize
//!   ├── agentic_loop: model → tool calls → tool results → model → …
//!   │     └── ToolExecutor → SearchClient (bounded retries + backoff)
//!   └── Summary: cited answer + ordered query log + token usage
//! ```
//!
//! Execution is strictly sequential: one model call or one search in
//! flight at a time, so the query log order always matches dispatch order.

pub mod agentic_loop;
pub mod client;
pub mod config;
pub mod executor;
pub mod message;
pub mod orchestrator;
pub mod prompt;
pub mod provider;
pub mod providers;
pub mod search;
pub mod tool;

// Re-export key types
pub use client::create_provider;
pub use config::AgentConfig;
pub use executor::{ExecutedCall, ToolExecutor};
pub use message::{ChatMessage, ChatRequest, ChatResponse, FinishReason, Role, TokenUsage};
pub use orchestrator::{Summary, SummaryAgent};
pub use provider::LlmProvider;
pub use search::{Document, SearchClient, SearchQuery};
pub use tool::{ToolCall, ToolDefinition, ToolResult};
