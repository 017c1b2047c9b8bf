//! Tool trait and types.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::search::{SearchResponse, SearchResult};

/// Grouping of tools for bulk registration with an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolCategory {
    /// General-purpose search (web).
    Search,
    /// Market and regulatory data (finance, SEC filings, economics).
    Financial,
    /// Academic and IP research (papers, biomedical, patents).
    Research,
}

impl ToolCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolCategory::Search => "search",
            ToolCategory::Financial => "financial",
            ToolCategory::Research => "research",
        }
    }
}

impl fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output from a tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Results in provider order.
    pub results: Vec<SearchResult>,
    /// Provider transaction id, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<String>,
    /// Cost charged for the query, in USD.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<Decimal>,
    /// Time taken, including the network round trip.
    pub duration: Duration,
}

impl ToolOutput {
    /// Wrap a parsed provider response.
    pub fn from_response(response: SearchResponse, duration: Duration) -> Self {
        Self {
            results: response.results,
            tx_id: response.tx_id,
            cost: response.total_deduction_dollars,
            duration,
        }
    }

    /// Set the cost.
    pub fn with_cost(mut self, cost: Decimal) -> Self {
        self.cost = Some(cost);
        self
    }
}

/// A tool's identity and parameter contract, as handed to an agent
/// framework for function calling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub category: ToolCategory,
    pub parameters: serde_json::Value,
}

/// Trait for search tools exposed to an agent.
///
/// Implementations hold their bound defaults (sources, result limits,
/// budget) immutably; each invocation merges those defaults with the
/// caller-supplied query.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name, unique within a registry.
    fn name(&self) -> &str;

    /// What the tool does, phrased for an LLM choosing among tools.
    fn description(&self) -> &str;

    /// Which group this tool belongs to.
    fn category(&self) -> ToolCategory;

    /// JSON Schema for the tool's parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with the given parameters.
    async fn execute(&self, params: serde_json::Value) -> Result<ToolOutput, SearchError>;

    /// The schema handed to the agent framework.
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            category: self.category(),
            parameters: self.parameters_schema(),
        }
    }
}

/// Extract a required string parameter from a JSON object.
pub fn require_str<'a>(params: &'a serde_json::Value, name: &str) -> Result<&'a str, SearchError> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| SearchError::Validation(format!("missing '{}' parameter", name)))
}

/// Extract an optional string-array parameter from a JSON object.
///
/// Absent or `null` is `None`; any other non-array shape is an error.
pub fn optional_str_array(
    params: &serde_json::Value,
    name: &str,
) -> Result<Option<Vec<String>>, SearchError> {
    match params.get(name) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Array(items)) => {
            let mut out = Vec::with_capacity(items.len());
            for (idx, item) in items.iter().enumerate() {
                let s = item.as_str().ok_or_else(|| {
                    SearchError::Validation(format!("'{name}[{idx}]' must be a string"))
                })?;
                out.push(s.to_string());
            }
            Ok(Some(out))
        }
        Some(_) => Err(SearchError::Validation(format!(
            "'{name}' must be an array of strings"
        ))),
    }
}
