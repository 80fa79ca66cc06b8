//! CLI entry point: resolve configuration, run one summarization, print
//! the report and answer.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use webbrief::agent::{AgentConfig, SummaryAgent, create_provider};
use webbrief::agent::search::SearchClient;
use webbrief::cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut builder = AgentConfig::builder().from_env();
    if let Some(model) = args.model {
        builder = builder.model(model);
    }
    let config = builder.build()?;

    let provider: Arc<dyn webbrief::agent::LlmProvider> =
        Arc::from(create_provider(&config)?);
    let search = SearchClient::new(&config)?;
    let agent = SummaryAgent::new(provider, search, config);

    let summary = agent.summarize(&args.question, args.topk.max(1)).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{summary}");
    }

    Ok(())
}
