//! Valyu DeepSearch tools for LLM agents.
//!
//! Exposes the Valyu search API as typed, independently registerable
//! tools, one per query domain:
//!
//! - `web_search`: current information, news, and articles
//! - `finance_search`: stock prices, fundamentals, filings, crypto, forex
//! - `paper_search`: academic papers (arXiv, PubMed, bioRxiv, medRxiv)
//! - `bio_search`: biomedical literature, clinical trials, drug labels
//! - `patent_search`: patents and intellectual property
//! - `sec_search`: SEC filings (10-K, 10-Q, 8-K, proxy statements)
//! - `economics_search`: BLS, FRED, World Bank economic data
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use valyu_tools::{ToolRegistry, ValyuClient, ValyuConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ValyuConfig::from_env()?;
//! let client = Arc::new(ValyuClient::new(&config)?);
//!
//! let registry = ToolRegistry::new();
//! registry.register_search_tools(client).await?;
//!
//! let tool = registry.get("web_search").await.unwrap();
//! let output = tool
//!     .execute(serde_json::json!({ "query": "latest AI developments" }))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod search;
pub mod tools;

pub use client::ValyuClient;
pub use config::ValyuConfig;
pub use error::{ConfigError, RegistryError, SearchError};
pub use search::{SearchDomain, SearchRequest, SearchResponse, SearchResult, SearchType};
pub use tools::{Tool, ToolCategory, ToolOutput, ToolRegistry, ToolSchema};
