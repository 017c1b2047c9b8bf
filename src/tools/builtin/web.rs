//! Web search tool.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::client::ValyuClient;
use crate::error::SearchError;
use crate::search::{SearchDomain, SearchRequest, SearchType};
use crate::tools::tool::{Tool, ToolCategory, ToolOutput, optional_str_array, require_str};

/// Configuration for the web search tool.
///
/// The web variant searches the open web rather than a proprietary
/// dataset, so it carries no default source list; both include and
/// exclude filters are available, and the agent may override either
/// per call.
#[derive(Debug, Clone)]
pub struct WebSearchConfig {
    /// Search scope (default: all).
    pub search_type: SearchType,
    /// Maximum results per query (default: 5).
    pub max_num_results: u32,
    /// Maximum cost per query in USD CPM.
    pub max_price: Option<Decimal>,
    /// Filter results below this quality score, in [0, 1].
    pub relevance_threshold: Option<f64>,
    /// Natural-language category to guide search context.
    pub category: Option<String>,
    /// Restrict search to these domains/sources.
    pub included_sources: Vec<String>,
    /// Exclude these domains/sources from results.
    pub excluded_sources: Vec<String>,
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            search_type: SearchDomain::Web.default_search_type(),
            max_num_results: SearchDomain::Web.default_num_results(),
            max_price: None,
            relevance_threshold: None,
            category: None,
            included_sources: Vec::new(),
            excluded_sources: Vec::new(),
        }
    }
}

/// Search the web for current information, news, and articles.
pub struct WebSearchTool {
    client: Arc<ValyuClient>,
    config: WebSearchConfig,
}

impl WebSearchTool {
    pub fn new(client: Arc<ValyuClient>) -> Self {
        Self::with_config(client, WebSearchConfig::default())
    }

    pub fn with_config(client: Arc<ValyuClient>, config: WebSearchConfig) -> Self {
        Self { client, config }
    }

    /// Merge bound defaults with the caller's query and per-call source
    /// overrides. Call-site filters take priority over the config.
    fn request(
        &self,
        query: &str,
        included_sources: Option<Vec<String>>,
        excluded_sources: Option<Vec<String>>,
    ) -> SearchRequest {
        let mut request = SearchRequest::new(SearchDomain::Web, query)
            .with_search_type(self.config.search_type)
            .with_max_num_results(self.config.max_num_results)
            .with_included_sources(
                included_sources.unwrap_or_else(|| self.config.included_sources.clone()),
            )
            .with_excluded_sources(
                excluded_sources.unwrap_or_else(|| self.config.excluded_sources.clone()),
            );
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
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web for current information, news, and articles. \
         The API handles natural language - use simple, clear queries."
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Search
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Natural language query (e.g., 'latest AI developments', 'Tesla Q4 2024 earnings')"
                },
                "included_sources": {
                    "type": "array",
                    "description": "Restrict search to specific domains (e.g., ['nature.com', 'arxiv.org'])",
                    "items": { "type": "string" }
                },
                "excluded_sources": {
                    "type": "array",
                    "description": "Exclude specific domains from results (e.g., ['reddit.com', 'quora.com'])",
                    "items": { "type": "string" }
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolOutput, SearchError> {
        let start = Instant::now();
        let query = require_str(&params, "query")?;
        let included = optional_str_array(&params, "included_sources")?;
        let excluded = optional_str_array(&params, "excluded_sources")?;

        let response = self
            .client
            .search(&self.request(query, included, excluded))
            .await?;
        Ok(ToolOutput::from_response(response, start.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValyuConfig;

    fn tool() -> WebSearchTool {
        let client = Arc::new(ValyuClient::new(&ValyuConfig::new("test-key")).unwrap());
        WebSearchTool::new(client)
    }

    #[test]
    fn defaults_search_everything_with_no_source_filters() {
        let call = tool().request("rust 2024 edition", None, None).build().unwrap();
        assert_eq!(call.body["search_type"], "all");
        assert_eq!(call.body["max_num_results"], 5);
        assert!(call.body.get("included_sources").is_none());
        assert!(call.body.get("excluded_sources").is_none());
    }

    #[test]
    fn per_call_sources_override_config() {
        let client = Arc::new(ValyuClient::new(&ValyuConfig::new("test-key")).unwrap());
        let tool = WebSearchTool::with_config(
            client,
            WebSearchConfig {
                included_sources: vec!["config.example".to_string()],
                ..WebSearchConfig::default()
            },
        );

        // No per-call value: the config filter applies.
        let call = tool.request("q", None, None).build().unwrap();
        assert_eq!(
            call.body["included_sources"],
            serde_json::json!(["config.example"])
        );

        // Per-call value wins.
        let call = tool
            .request("q", Some(vec!["call.example".to_string()]), None)
            .build()
            .unwrap();
        assert_eq!(
            call.body["included_sources"],
            serde_json::json!(["call.example"])
        );
    }

    #[test]
    fn schema_is_structurally_valid() {
        let tool = tool();
        let errors = crate::tools::validate_tool_schema(&tool.parameters_schema(), tool.name());
        assert!(errors.is_empty(), "schema errors: {errors:?}");
    }

    #[tokio::test]
    async fn execute_without_query_is_validation_error() {
        let err = tool().execute(serde_json::json!({})).await.unwrap_err();
        assert!(matches!(err, SearchError::Validation(_)));
    }
}
