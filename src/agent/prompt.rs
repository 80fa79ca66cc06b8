//! System prompts and message composition.
//!
//! Pure formatting helpers: the document section establishes the citation
//! contract (the 1-based index the model reuses as `[1]`, `[2]`, … in its
//! answer), and the query report summarises which searches were run.

use std::fmt::Write;

use super::message::{ChatMessage, system_message, user_message};
use super::search::Document;

/// System prompt for the summarizer.
///
/// Instructs the model to answer directly when possible and to call the
/// `search_web` tool only when additional information is required.
pub const SUMMARY_SYSTEM_PROMPT: &str = "You are a research assistant. \
    If you can answer the question from your general knowledge, do so directly **without** using any tool. \
    Only when additional information is required, call the search_web tool to gather web documents. \
    Cite sources like [1] in markdown when you reference searched documents.";

/// System prompt for answering from an explicit document set.
pub const DOCUMENT_SYSTEM_PROMPT: &str = "You are a research assistant. \
    Using ONLY the provided web documents, answer the user's question. \
    Insert markdown citations like [1] next to each fact.";

/// Renders documents as a citation-numbered section.
///
/// Each document becomes `[i+1] title (url):\ncontent`, joined by blank
/// lines, in input order. The index always equals the document's 1-based
/// position; an empty input yields an empty string.
#[must_use]
pub fn compose_document_section(docs: &[Document]) -> String {
    let mut out = String::new();
    for (idx, doc) in docs.iter().enumerate() {
        if idx > 0 {
            out.push_str("\n\n");
        }
        let _ = write!(out, "[{}] {} ({}):\n{}", idx + 1, doc.title, doc.url, doc.content);
    }
    out
}

/// Builds the system/user message pair for answering from a fixed set of
/// documents, with the document section numbered per the citation contract.
#[must_use]
pub fn compose_document_prompt(question: &str, docs: &[Document]) -> Vec<ChatMessage> {
    let user = format!(
        "### Question\n{question}\n\n### Documents\n{}\n\n### Answer",
        compose_document_section(docs)
    );
    vec![system_message(DOCUMENT_SYSTEM_PROMPT), user_message(&user)]
}

/// Renders the report of executed search queries.
///
/// Produces `### Search queries used (N)` followed by a 1-indexed list in
/// dispatch order; with zero queries the header reports `(0)` and no list
/// follows.
#[must_use]
pub fn compose_query_report(queries: &[String]) -> String {
    let mut out = format!("### Search queries used ({})", queries.len());
    for (idx, query) in queries.iter().enumerate() {
        let _ = write!(out, "\n{}. {}", idx + 1, query);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::search::tests::doc;

    #[test]
    fn test_document_section_empty() {
        assert_eq!(compose_document_section(&[]), "");
    }

    #[test]
    fn test_document_section_single() {
        let docs = vec![doc("a")];
        let section = compose_document_section(&docs);
        assert_eq!(section, "[1] a (https://example.com/a):\ncontent of a");
    }

    #[test]
    fn test_document_section_index_matches_position() {
        let docs = vec![doc("a"), doc("b"), doc("c")];
        let section = compose_document_section(&docs);
        for (pos, d) in docs.iter().enumerate() {
            assert!(section.contains(&format!("[{}] {}", pos + 1, d.title)));
        }
        // Blank line between entries, none trailing.
        assert_eq!(section.matches("\n\n[").count(), 2);
        assert!(!section.ends_with('\n'));
    }

    #[test]
    fn test_document_prompt_shape() {
        let msgs = compose_document_prompt("What is a?", &[doc("a")]);
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].content, DOCUMENT_SYSTEM_PROMPT);
        assert!(msgs[1].content.contains("### Question\nWhat is a?"));
        assert!(msgs[1].content.contains("[1] a (https://example.com/a)"));
        assert!(msgs[1].content.ends_with("### Answer"));
    }

    #[test]
    fn test_query_report_empty() {
        let report = compose_query_report(&[]);
        assert_eq!(report, "### Search queries used (0)");
    }

    #[test]
    fn test_query_report_ordering() {
        let queries = vec!["first".to_string(), "second".to_string()];
        let report = compose_query_report(&queries);
        assert_eq!(
            report,
            "### Search queries used (2)\n1. first\n2. second"
        );
    }
}
