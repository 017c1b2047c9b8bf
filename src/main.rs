//! valyu-tools - command line entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use valyu_tools::cli::{Cli, Command, run_search_command, run_tools_command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Search {
            query,
            domain,
            max_results,
            max_price,
            json,
        } => run_search_command(query, domain, max_results, max_price, json).await,
        Command::Tools { category } => run_tools_command(category).await,
    }
}
