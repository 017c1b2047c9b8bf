//! Academic paper search tool.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::client::ValyuClient;
use crate::error::SearchError;
use crate::search::{SearchDomain, SearchRequest, SearchType};
use crate::tools::tool::{Tool, ToolCategory, ToolOutput, require_str};

/// Preprint servers and indexes searched by default.
pub const DEFAULT_SOURCES: &[&str] = &[
    "valyu/valyu-arxiv",
    "valyu/valyu-biorxiv",
    "valyu/valyu-medrxiv",
    "valyu/valyu-pubmed",
];

/// Configuration for the academic paper search tool.
#[derive(Debug, Clone)]
pub struct PaperSearchConfig {
    /// Search scope (default: proprietary).
    pub search_type: SearchType,
    /// Maximum results per query (default: 5).
    pub max_num_results: u32,
    /// Maximum cost per query in USD CPM.
    pub max_price: Option<Decimal>,
    /// Filter results below this quality score, in [0, 1].
    pub relevance_threshold: Option<f64>,
    /// Category to focus on (e.g., "computer-science", "physics").
    pub category: Option<String>,
    /// Override the default academic sources.
    pub included_sources: Option<Vec<String>>,
}

impl Default for PaperSearchConfig {
    fn default() -> Self {
        Self {
            search_type: SearchDomain::Paper.default_search_type(),
            max_num_results: SearchDomain::Paper.default_num_results(),
            max_price: None,
            relevance_threshold: None,
            category: None,
            included_sources: None,
        }
    }
}

/// Search academic research papers and scholarly articles.
pub struct PaperSearchTool {
    client: Arc<ValyuClient>,
    config: PaperSearchConfig,
}

impl PaperSearchTool {
    pub fn new(client: Arc<ValyuClient>) -> Self {
        Self::with_config(client, PaperSearchConfig::default())
    }

    pub fn with_config(client: Arc<ValyuClient>, config: PaperSearchConfig) -> Self {
        Self { client, config }
    }

    fn request(&self, query: &str) -> SearchRequest {
        let sources = self
            .config
            .included_sources
            .clone()
            .unwrap_or_else(|| DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect());

        let mut request = SearchRequest::new(SearchDomain::Paper, query)
            .with_search_type(self.config.search_type)
            .with_max_num_results(self.config.max_num_results)
            .with_included_sources(sources);
        if let Some(price) = self.config.max_price {
            request = request.with_max_price(price);
        }
        if let Some(threshold) = self.config.relevance_threshold {
            request = request.with_relevance_threshold(threshold);
        }
        if let Some(category) = &self.config.category {
            request = request.with_category(category.clone());
        }
        request
    }
}

#[async_trait]
impl Tool for PaperSearchTool {
    fn name(&self) -> &str {
        "paper_search"
    }

    fn description(&self) -> &str {
        "Search academic papers from arXiv, PubMed, bioRxiv, and medRxiv. The API handles \
         semantic search - use simple natural language, not keyword stuffing."
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Research
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Natural language query (e.g., 'psilocybin effects on lifespan in mice', 'CRISPR cancer therapy trials')"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolOutput, SearchError> {
        let start = Instant::now();
        let query = require_str(&params, "query")?;
        let response = self.client.search(&self.request(query)).await?;
        Ok(ToolOutput::from_response(response, start.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValyuConfig;

    fn client() -> Arc<ValyuClient> {
        Arc::new(ValyuClient::new(&ValyuConfig::new("test-key")).unwrap())
    }

    #[test]
    fn defaults_cover_the_preprint_servers() {
        let tool = PaperSearchTool::new(client());
        let call = tool.request("attention mechanisms").build().unwrap();
        assert_eq!(
            call.body["included_sources"],
            serde_json::json!(DEFAULT_SOURCES)
        );
        assert_eq!(call.body["search_type"], "proprietary");
    }

    #[test]
    fn schema_is_structurally_valid() {
        let tool = PaperSearchTool::new(client());
        let errors = crate::tools::validate_tool_schema(&tool.parameters_schema(), tool.name());
        assert!(errors.is_empty(), "schema errors: {errors:?}");
    }
}
