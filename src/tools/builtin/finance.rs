//! Finance search tool.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::client::ValyuClient;
use crate::error::SearchError;
use crate::search::{SearchDomain, SearchRequest, SearchType};
use crate::tools::tool::{Tool, ToolCategory, ToolOutput, require_str};

/// Financial datasets searched by default: market data, fundamentals,
/// filings, crypto/forex, and the macro series feeding into them.
pub const DEFAULT_SOURCES: &[&str] = &[
    "valyu/valyu-stocks",
    "valyu/valyu-sec-filings",
    "valyu/valyu-earnings-US",
    "valyu/valyu-balance-sheet-US",
    "valyu/valyu-income-statement-US",
    "valyu/valyu-cash-flow-US",
    "valyu/valyu-dividends-US",
    "valyu/valyu-insider-transactions-US",
    "valyu/valyu-market-movers-US",
    "valyu/valyu-crypto",
    "valyu/valyu-forex",
    "valyu/valyu-bls",
    "valyu/valyu-fred",
    "valyu/valyu-world-bank",
];

/// Configuration for the finance search tool.
#[derive(Debug, Clone)]
pub struct FinanceSearchConfig {
    /// Search scope (default: proprietary).
    pub search_type: SearchType,
    /// Maximum results per query (default: 5).
    pub max_num_results: u32,
    /// Maximum cost per query in USD CPM.
    pub max_price: Option<Decimal>,
    /// Filter results below this quality score, in [0, 1].
    pub relevance_threshold: Option<f64>,
    /// Category to focus on (e.g., "stocks", "earnings").
    pub category: Option<String>,
    /// Override the default financial sources.
    pub included_sources: Option<Vec<String>>,
}

impl Default for FinanceSearchConfig {
    fn default() -> Self {
        Self {
            search_type: SearchDomain::Finance.default_search_type(),
            max_num_results: SearchDomain::Finance.default_num_results(),
            max_price: None,
            relevance_threshold: None,
            category: None,
            included_sources: None,
        }
    }
}

/// Search financial data and market information.
pub struct FinanceSearchTool {
    client: Arc<ValyuClient>,
    config: FinanceSearchConfig,
}

impl FinanceSearchTool {
    pub fn new(client: Arc<ValyuClient>) -> Self {
        Self::with_config(client, FinanceSearchConfig::default())
    }

    pub fn with_config(client: Arc<ValyuClient>, config: FinanceSearchConfig) -> Self {
        Self { client, config }
    }

    fn request(&self, query: &str) -> SearchRequest {
        let sources = self
            .config
            .included_sources
            .clone()
            .unwrap_or_else(|| DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect());

        let mut request = SearchRequest::new(SearchDomain::Finance, query)
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
impl Tool for FinanceSearchTool {
    fn name(&self) -> &str {
        "finance_search"
    }

    fn description(&self) -> &str {
        "Search financial data: stock prices, earnings, balance sheets, income statements, \
         cash flows, SEC filings, dividends, insider transactions, crypto, forex, and \
         economic indicators. The API handles natural language - ask your full question \
         in one query per topic."
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Financial
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Natural language query (e.g., 'Apple stock price Q1-Q3 2020', 'Tesla revenue last 4 quarters')"
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
    fn defaults_cover_the_financial_datasets() {
        let tool = FinanceSearchTool::new(client());
        let call = tool.request("Apple Q4 earnings").build().unwrap();

        assert_eq!(call.body["search_type"], "proprietary");
        assert_eq!(call.body["max_num_results"], 5);
        let sources = call.body["included_sources"].as_array().unwrap();
        assert_eq!(sources.len(), DEFAULT_SOURCES.len());
        assert!(sources.contains(&serde_json::json!("valyu/valyu-stocks")));
    }

    #[test]
    fn configured_sources_replace_defaults() {
        let tool = FinanceSearchTool::with_config(
            client(),
            FinanceSearchConfig {
                included_sources: Some(vec!["valyu/valyu-crypto".to_string()]),
                ..FinanceSearchConfig::default()
            },
        );
        let call = tool.request("BTC price").build().unwrap();
        assert_eq!(
            call.body["included_sources"],
            serde_json::json!(["valyu/valyu-crypto"])
        );
    }

    #[test]
    fn optional_filters_flow_into_the_payload() {
        use rust_decimal_macros::dec;

        let tool = FinanceSearchTool::with_config(
            client(),
            FinanceSearchConfig {
                max_price: Some(dec!(50)),
                relevance_threshold: Some(0.6),
                category: Some("earnings".to_string()),
                ..FinanceSearchConfig::default()
            },
        );
        let call = tool.request("Tesla revenue").build().unwrap();
        assert_eq!(call.body["max_price"], 50.0);
        assert_eq!(call.body["relevance_threshold"], 0.6);
        assert_eq!(call.body["category"], "earnings");
    }

    #[test]
    fn schema_is_structurally_valid() {
        let tool = FinanceSearchTool::new(client());
        let errors = crate::tools::validate_tool_schema(&tool.parameters_schema(), tool.name());
        assert!(errors.is_empty(), "schema errors: {errors:?}");
    }
}
