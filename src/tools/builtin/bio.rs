//! Biomedical search tool.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::client::ValyuClient;
use crate::error::SearchError;
use crate::search::{SearchDomain, SearchRequest, SearchType};
use crate::tools::tool::{Tool, ToolCategory, ToolOutput, require_str};

/// Biomedical literature and clinical data searched by default.
pub const DEFAULT_SOURCES: &[&str] = &[
    "valyu/valyu-pubmed",
    "valyu/valyu-biorxiv",
    "valyu/valyu-medrxiv",
    "valyu/valyu-clinical-trials",
    "valyu/valyu-drug-labels",
];

/// Configuration for the biomedical search tool.
#[derive(Debug, Clone)]
pub struct BioSearchConfig {
    /// Search scope (default: proprietary).
    pub search_type: SearchType,
    /// Maximum results per query (default: 5).
    pub max_num_results: u32,
    /// Maximum cost per query in USD CPM.
    pub max_price: Option<Decimal>,
    /// Filter results below this quality score, in [0, 1].
    pub relevance_threshold: Option<f64>,
    /// Category to focus on (e.g., "clinical-trials", "drug-labels").
    pub category: Option<String>,
    /// Override the default biomedical sources.
    pub included_sources: Option<Vec<String>>,
}

impl Default for BioSearchConfig {
    fn default() -> Self {
        Self {
            search_type: SearchDomain::Bio.default_search_type(),
            max_num_results: SearchDomain::Bio.default_num_results(),
            max_price: None,
            relevance_threshold: None,
            category: None,
            included_sources: None,
        }
    }
}

/// Search biomedical literature and clinical data.
pub struct BioSearchTool {
    client: Arc<ValyuClient>,
    config: BioSearchConfig,
}

impl BioSearchTool {
    pub fn new(client: Arc<ValyuClient>) -> Self {
        Self::with_config(client, BioSearchConfig::default())
    }

    pub fn with_config(client: Arc<ValyuClient>, config: BioSearchConfig) -> Self {
        Self { client, config }
    }

    fn request(&self, query: &str) -> SearchRequest {
        let sources = self
            .config
            .included_sources
            .clone()
            .unwrap_or_else(|| DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect());

        let mut request = SearchRequest::new(SearchDomain::Bio, query)
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
impl Tool for BioSearchTool {
    fn name(&self) -> &str {
        "bio_search"
    }

    fn description(&self) -> &str {
        "Search biomedical literature from PubMed, clinical trials, and FDA drug labels. \
         The API handles natural language - use simple queries."
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
                    "description": "Natural language query (e.g., 'GLP-1 agonists for weight loss', 'Phase 3 melanoma immunotherapy trials')"
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
