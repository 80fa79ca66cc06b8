//! webbrief — search-augmented question answering.
//!
//! Answers a natural-language question by letting a language model call a
//! web-search tool, then returns a markdown answer with `[n]` citations
//! and a report of the search queries that were issued.
//!
//! The crate is organised around three pieces:
//!
//! - [`agent::search`] — a retrying search client with bounded attempts
//!   and linear backoff over a Tavily-style HTTP backend.
//! - [`agent::agentic_loop`] — the model ↔ tool round-trip state machine
//!   with a hard iteration cap.
//! - [`agent::orchestrator`] — the `summarize` entry point tying both to
//!   an [`agent::LlmProvider`].

pub mod agent;
pub mod cli;
pub mod error;

pub use agent::{AgentConfig, Summary, SummaryAgent};
pub use error::AgentError;
