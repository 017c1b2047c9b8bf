//! Provider response envelope and result normalization.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SearchError;

/// One search result, normalized from the provider's response array.
///
/// Scores are produced only by the provider; this layer never constructs
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub content: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
}

/// Parsed provider envelope for a successful call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
    /// Provider transaction id, when reported.
    pub tx_id: Option<String>,
    /// Results in the provider's order. Empty is a valid outcome, not an
    /// error.
    pub results: Vec<SearchResult>,
    /// Total cost charged for the query, in USD.
    pub total_deduction_dollars: Option<Decimal>,
}

/// Raw wire shape. Structured datasets return `content` as a JSON object
/// rather than a string, so it is captured as a `Value` and stringified
/// during normalization.
#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    tx_id: Option<String>,
    results: Option<Vec<RawResult>>,
    #[serde(default)]
    total_deduction_dollars: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    title: String,
    url: String,
    content: Value,
    source: String,
    #[serde(default)]
    relevance_score: Option<f64>,
}

impl RawResult {
    fn normalize(self) -> SearchResult {
        let content = match self.content {
            Value::String(s) => s,
            other => other.to_string(),
        };
        SearchResult {
            title: self.title,
            url: self.url,
            content,
            source: self.source,
            relevance_score: self.relevance_score,
        }
    }
}

impl SearchResponse {
    /// Parse a 2xx response body.
    ///
    /// Policy, applied uniformly across all domains:
    /// - body that doesn't parse, or parses without a `results` array,
    ///   is `ResponseFormat` — never silently partial;
    /// - a parseable body reporting `success: false` is `Provider`;
    /// - a parseable, successful body with zero results is `Ok`.
    pub fn parse(status: u16, body: &[u8]) -> Result<Self, SearchError> {
        let raw: RawResponse = serde_json::from_slice(body)
            .map_err(|e| SearchError::ResponseFormat(e.to_string()))?;

        if raw.success == Some(false) {
            return Err(SearchError::Provider {
                status,
                message: raw
                    .error
                    .unwrap_or_else(|| "provider reported failure without detail".to_string()),
            });
        }

        let results = raw
            .results
            .ok_or_else(|| SearchError::ResponseFormat("missing 'results' field".to_string()))?;

        Ok(Self {
            tx_id: raw.tx_id,
            results: results.into_iter().map(RawResult::normalize).collect(),
            total_deduction_dollars: raw.total_deduction_dollars,
        })
    }
}
