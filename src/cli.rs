//! CLI command handling.
//!
//! Provides subcommands for:
//! - Running a search against one domain (`search`)
//! - Listing the available tools (`tools`)

use std::sync::Arc;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use crate::client::ValyuClient;
use crate::config::ValyuConfig;
use crate::search::SearchDomain;
use crate::tools::builtin::{
    BioSearchConfig, BioSearchTool, EconomicsSearchConfig, EconomicsSearchTool,
    FinanceSearchConfig, FinanceSearchTool, PaperSearchConfig, PaperSearchTool,
    PatentSearchConfig, PatentSearchTool, SecSearchConfig, SecSearchTool, WebSearchConfig,
    WebSearchTool,
};
use crate::tools::{Tool, ToolCategory, ToolRegistry};

#[derive(Parser, Debug)]
#[command(name = "valyu-tools")]
#[command(about = "Search the Valyu DeepSearch API from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one search and print the results
    Search {
        /// Natural language query
        query: String,

        /// Query domain: web, finance, sec, paper, patent, bio, economics
        #[arg(short, long, default_value = "web", value_parser = parse_domain)]
        domain: SearchDomain,

        /// Maximum number of results
        #[arg(short = 'n', long)]
        max_results: Option<u32>,

        /// Maximum cost per query in USD CPM
        #[arg(long, value_parser = parse_decimal)]
        max_price: Option<Decimal>,

        /// Print raw JSON instead of formatted results
        #[arg(long)]
        json: bool,
    },

    /// List the available tools
    Tools {
        /// Only show tools in this category: search, financial, research
        #[arg(short, long, value_parser = parse_category)]
        category: Option<ToolCategory>,
    },
}

fn parse_domain(s: &str) -> Result<SearchDomain, String> {
    s.parse()
}

fn parse_decimal(s: &str) -> Result<Decimal, String> {
    s.parse::<Decimal>()
        .map_err(|e| format!("invalid decimal '{s}': {e}"))
}

fn parse_category(s: &str) -> Result<ToolCategory, String> {
    match s.to_ascii_lowercase().as_str() {
        "search" => Ok(ToolCategory::Search),
        "financial" => Ok(ToolCategory::Financial),
        "research" => Ok(ToolCategory::Research),
        other => Err(format!(
            "unknown category '{other}' (expected one of: search, financial, research)"
        )),
    }
}

/// Build the tool for one domain with CLI overrides applied.
fn build_tool(
    client: Arc<ValyuClient>,
    domain: SearchDomain,
    max_results: Option<u32>,
    max_price: Option<Decimal>,
) -> Arc<dyn Tool> {
    macro_rules! tool_with {
        ($config:ident, $tool:ident) => {{
            let mut config = $config::default();
            if let Some(n) = max_results {
                config.max_num_results = n;
            }
            config.max_price = max_price;
            Arc::new($tool::with_config(client, config))
        }};
    }

    match domain {
        SearchDomain::Web => tool_with!(WebSearchConfig, WebSearchTool),
        SearchDomain::Finance => tool_with!(FinanceSearchConfig, FinanceSearchTool),
        SearchDomain::Sec => tool_with!(SecSearchConfig, SecSearchTool),
        SearchDomain::Paper => tool_with!(PaperSearchConfig, PaperSearchTool),
        SearchDomain::Patent => tool_with!(PatentSearchConfig, PatentSearchTool),
        SearchDomain::Bio => tool_with!(BioSearchConfig, BioSearchTool),
        SearchDomain::Economics => tool_with!(EconomicsSearchConfig, EconomicsSearchTool),
    }
}

/// Run the `search` subcommand.
pub async fn run_search_command(
    query: String,
    domain: SearchDomain,
    max_results: Option<u32>,
    max_price: Option<Decimal>,
    json: bool,
) -> anyhow::Result<()> {
    let config = ValyuConfig::from_env()?;
    let client = Arc::new(ValyuClient::new(&config)?);
    let tool = build_tool(client, domain, max_results, max_price);

    let output = tool
        .execute(serde_json::json!({ "query": query }))
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if output.results.is_empty() {
        println!("No results.");
    }
    for (idx, result) in output.results.iter().enumerate() {
        println!("{}. {}", idx + 1, result.title);
        println!("   {}", result.url);
        if let Some(score) = result.relevance_score {
            println!("   relevance: {score:.2}");
        }
        println!("   {}", truncate(&result.content, 300));
        println!();
    }

    let cost = output
        .cost
        .map(|c| format!(", cost ${c}"))
        .unwrap_or_default();
    println!(
        "{} result(s) in {:.1?}{}",
        output.results.len(),
        output.duration,
        cost
    );
    Ok(())
}

/// Run the `tools` subcommand.
pub async fn run_tools_command(category: Option<ToolCategory>) -> anyhow::Result<()> {
    // Listing never touches the network, so a missing API key shouldn't
    // stop it.
    let config = ValyuConfig::from_env().unwrap_or_else(|_| ValyuConfig::new("unset"));
    let client = Arc::new(ValyuClient::new(&config)?);

    let registry = ToolRegistry::new();
    registry.register_search_tools(client).await?;

    let tools = match category {
        Some(category) => registry.group(category).await,
        None => registry.all().await,
    };

    if tools.is_empty() {
        println!("No tools in that category.");
        return Ok(());
    }
    for tool in tools {
        println!("{:<18} {:<10} {}", tool.name(), tool.category(), tool.description());
    }
    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    let flattened = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match flattened.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &flattened[..idx]),
        None => flattened,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_search_with_overrides() {
        let cli = Cli::try_parse_from([
            "valyu-tools",
            "search",
            "Tesla 10-K risk factors",
            "--domain",
            "sec",
            "-n",
            "10",
            "--max-price",
            "25.5",
        ])
        .unwrap();

        match cli.command {
            Command::Search {
                query,
                domain,
                max_results,
                max_price,
                json,
            } => {
                assert_eq!(query, "Tesla 10-K risk factors");
                assert_eq!(domain, SearchDomain::Sec);
                assert_eq!(max_results, Some(10));
                assert_eq!(max_price, Some("25.5".parse::<Decimal>().unwrap()));
                assert!(!json);
            }
            other => panic!("expected Search, got {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_unknown_domain() {
        assert!(Cli::try_parse_from(["valyu-tools", "search", "q", "--domain", "weather"]).is_err());
    }

    #[test]
    fn cli_parses_tools_category_filter() {
        let cli = Cli::try_parse_from(["valyu-tools", "tools", "--category", "research"]).unwrap();
        match cli.command {
            Command::Tools { category } => assert_eq!(category, Some(ToolCategory::Research)),
            other => panic!("expected Tools, got {other:?}"),
        }
    }

    #[test]
    fn truncate_collapses_whitespace_and_caps_length() {
        assert_eq!(truncate("a  b\n\nc", 100), "a b c");
        let long = "word ".repeat(200);
        assert!(truncate(&long, 50).ends_with("..."));
    }
}
