//! Command-line argument definitions.

use clap::Parser;

/// Search-augmented question answering with cited summaries.
#[derive(Debug, Parser)]
#[command(name = "webbrief", version, about)]
pub struct Args {
    /// The question to research and answer.
    pub question: String,

    /// Number of search results per query.
    #[arg(short = 'k', long = "topk", default_value_t = 5)]
    pub topk: u32,

    /// Model identifier override (also: OPENAI_MODEL).
    #[arg(long)]
    pub model: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["webbrief", "what is rust?"]);
        assert_eq!(args.question, "what is rust?");
        assert_eq!(args.topk, 5);
        assert!(args.model.is_none());
    }

    #[test]
    fn test_topk_flag() {
        let args = Args::parse_from(["webbrief", "-k", "10", "question"]);
        assert_eq!(args.topk, 10);
    }

    #[test]
    fn test_model_override() {
        let args = Args::parse_from(["webbrief", "--model", "gpt-4o", "question"]);
        assert_eq!(args.model.as_deref(), Some("gpt-4o"));
    }
}
