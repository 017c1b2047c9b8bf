//! Typed search requests and outbound payload construction.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Value};

use crate::error::SearchError;

/// Provider cap on results per query. Requests above this are clamped,
/// never forwarded unclamped.
pub const MAX_NUM_RESULTS: u32 = 20;

/// Default results per query.
pub const DEFAULT_NUM_RESULTS: u32 = 5;

/// All search traffic goes to this endpoint; domains differ only in
/// their payload defaults.
const DEEPSEARCH_PATH: &str = "deepsearch";

/// The seven query domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchDomain {
    Web,
    Finance,
    Sec,
    Paper,
    Patent,
    Bio,
    Economics,
}

impl SearchDomain {
    pub const ALL: [SearchDomain; 7] = [
        SearchDomain::Web,
        SearchDomain::Finance,
        SearchDomain::Sec,
        SearchDomain::Paper,
        SearchDomain::Patent,
        SearchDomain::Bio,
        SearchDomain::Economics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchDomain::Web => "web",
            SearchDomain::Finance => "finance",
            SearchDomain::Sec => "sec",
            SearchDomain::Paper => "paper",
            SearchDomain::Patent => "patent",
            SearchDomain::Bio => "bio",
            SearchDomain::Economics => "economics",
        }
    }

    /// Search type the provider expects for this domain when the caller
    /// doesn't say otherwise. Web queries span everything; the rest hit
    /// proprietary datasets.
    pub fn default_search_type(&self) -> SearchType {
        match self {
            SearchDomain::Web => SearchType::All,
            _ => SearchType::Proprietary,
        }
    }

    /// Default result count. Economics datasets return dense tabular
    /// rows, so the default is smaller there.
    pub fn default_num_results(&self) -> u32 {
        match self {
            SearchDomain::Economics => 3,
            _ => DEFAULT_NUM_RESULTS,
        }
    }
}

impl fmt::Display for SearchDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchDomain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "web" => Ok(SearchDomain::Web),
            "finance" => Ok(SearchDomain::Finance),
            "sec" => Ok(SearchDomain::Sec),
            "paper" => Ok(SearchDomain::Paper),
            "patent" => Ok(SearchDomain::Patent),
            "bio" => Ok(SearchDomain::Bio),
            "economics" => Ok(SearchDomain::Economics),
            other => Err(format!(
                "unknown domain '{other}' (expected one of: web, finance, sec, paper, patent, bio, economics)"
            )),
        }
    }
}

/// Provider-side search scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    All,
    Web,
    Proprietary,
    News,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::All => "all",
            SearchType::Web => "web",
            SearchType::Proprietary => "proprietary",
            SearchType::News => "news",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated, ready-to-send search call: endpoint path plus JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundCall {
    pub path: &'static str,
    pub body: Value,
}

/// A typed search query with optional filters.
///
/// Optional filters that are unset never appear in the outbound payload,
/// so provider defaults apply.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub domain: SearchDomain,
    pub query: String,
    pub search_type: SearchType,
    pub max_num_results: u32,
    /// Maximum cost per query in USD CPM.
    pub max_price: Option<Decimal>,
    /// Filter results below this quality score, in [0, 1].
    pub relevance_threshold: Option<f64>,
    /// Natural-language category to guide search context.
    pub category: Option<String>,
    pub included_sources: Vec<String>,
    pub excluded_sources: Vec<String>,
}

impl SearchRequest {
    /// Create a request with the domain's defaults.
    pub fn new(domain: SearchDomain, query: impl Into<String>) -> Self {
        Self {
            domain,
            query: query.into(),
            search_type: domain.default_search_type(),
            max_num_results: domain.default_num_results(),
            max_price: None,
            relevance_threshold: None,
            category: None,
            included_sources: Vec::new(),
            excluded_sources: Vec::new(),
        }
    }

    pub fn with_search_type(mut self, search_type: SearchType) -> Self {
        self.search_type = search_type;
        self
    }

    pub fn with_max_num_results(mut self, max_num_results: u32) -> Self {
        self.max_num_results = max_num_results;
        self
    }

    pub fn with_max_price(mut self, max_price: Decimal) -> Self {
        self.max_price = Some(max_price);
        self
    }

    pub fn with_relevance_threshold(mut self, threshold: f64) -> Self {
        self.relevance_threshold = Some(threshold);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_included_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.included_sources = sources.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_excluded_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_sources = sources.into_iter().map(Into::into).collect();
        self
    }

    /// Validate the request and build the outbound call. Pure transform;
    /// no network.
    pub fn build(&self) -> Result<OutboundCall, SearchError> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err(SearchError::Validation(
                "query must not be empty".to_string(),
            ));
        }

        if self.max_num_results == 0 {
            return Err(SearchError::Validation(
                "max_num_results must be greater than zero".to_string(),
            ));
        }

        if let Some(price) = self.max_price
            && price <= Decimal::ZERO
        {
            return Err(SearchError::Validation(format!(
                "max_price must be positive, got {price}"
            )));
        }

        if let Some(threshold) = self.relevance_threshold
            && !(0.0..=1.0).contains(&threshold)
        {
            return Err(SearchError::Validation(format!(
                "relevance_threshold must be within [0, 1], got {threshold}"
            )));
        }

        if let Some(overlap) = self
            .included_sources
            .iter()
            .find(|s| self.excluded_sources.contains(s))
        {
            return Err(SearchError::Validation(format!(
                "source '{overlap}' is both included and excluded"
            )));
        }

        let mut body = Map::new();
        body.insert("query".to_string(), Value::String(query.to_string()));
        body.insert(
            "search_type".to_string(),
            Value::String(self.search_type.as_str().to_string()),
        );
        body.insert(
            "max_num_results".to_string(),
            Value::from(self.max_num_results.min(MAX_NUM_RESULTS)),
        );

        if let Some(price) = self.max_price {
            // Validation above guarantees a positive finite value.
            let price = price.to_f64().ok_or_else(|| {
                SearchError::Validation(format!("max_price {price} is not representable"))
            })?;
            body.insert("max_price".to_string(), Value::from(price));
        }
        if let Some(threshold) = self.relevance_threshold {
            body.insert("relevance_threshold".to_string(), Value::from(threshold));
        }
        if let Some(category) = &self.category {
            body.insert("category".to_string(), Value::String(category.clone()));
        }
        if !self.included_sources.is_empty() {
            body.insert(
                "included_sources".to_string(),
                Value::from(self.included_sources.clone()),
            );
        }
        if !self.excluded_sources.is_empty() {
            body.insert(
                "excluded_sources".to_string(),
                Value::from(self.excluded_sources.clone()),
            );
        }

        Ok(OutboundCall {
            path: DEEPSEARCH_PATH,
            body: Value::Object(body),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn omitted_filters_are_absent_from_payload() {
        let call = SearchRequest::new(SearchDomain::Web, "rust async runtimes")
            .build()
            .unwrap();

        let body = call.body.as_object().unwrap();
        assert_eq!(
            body.keys().collect::<Vec<_>>(),
            vec!["max_num_results", "query", "search_type"]
        );
    }

    #[test]
    fn present_filters_appear_in_payload() {
        let call = SearchRequest::new(SearchDomain::Finance, "AAPL earnings")
            .with_max_price(dec!(30))
            .with_relevance_threshold(0.5)
            .with_category("earnings")
            .with_included_sources(["valyu/valyu-stocks"])
            .build()
            .unwrap();

        assert_eq!(call.path, "deepsearch");
        assert_eq!(call.body["query"], "AAPL earnings");
        assert_eq!(call.body["search_type"], "proprietary");
        assert_eq!(call.body["max_price"], 30.0);
        assert_eq!(call.body["relevance_threshold"], 0.5);
        assert_eq!(call.body["category"], "earnings");
        assert_eq!(
            call.body["included_sources"],
            serde_json::json!(["valyu/valyu-stocks"])
        );
        assert!(call.body.get("excluded_sources").is_none());
    }

    #[test]
    fn empty_query_rejected_for_every_domain() {
        for domain in SearchDomain::ALL {
            for query in ["", "   ", "\t\n"] {
                let err = SearchRequest::new(domain, query).build().unwrap_err();
                assert!(
                    matches!(err, SearchError::Validation(_)),
                    "domain {domain}: expected Validation, got {err:?}"
                );
            }
        }
    }

    #[test]
    fn max_num_results_clamped_to_provider_cap() {
        let call = SearchRequest::new(SearchDomain::Paper, "transformers")
            .with_max_num_results(500)
            .build()
            .unwrap();
        assert_eq!(call.body["max_num_results"], MAX_NUM_RESULTS);
    }

    #[test]
    fn zero_max_num_results_rejected() {
        let err = SearchRequest::new(SearchDomain::Web, "q")
            .with_max_num_results(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, SearchError::Validation(_)));
    }

    #[test]
    fn non_positive_max_price_rejected() {
        for price in [dec!(0), dec!(-1.5)] {
            let err = SearchRequest::new(SearchDomain::Web, "q")
                .with_max_price(price)
                .build()
                .unwrap_err();
            assert!(matches!(err, SearchError::Validation(_)));
        }
    }

    #[test]
    fn out_of_range_relevance_threshold_rejected() {
        for threshold in [-0.1, 1.1, f64::NAN] {
            let err = SearchRequest::new(SearchDomain::Web, "q")
                .with_relevance_threshold(threshold)
                .build()
                .unwrap_err();
            assert!(matches!(err, SearchError::Validation(_)));
        }
    }

    #[test]
    fn overlapping_source_filters_rejected() {
        let err = SearchRequest::new(SearchDomain::Web, "q")
            .with_included_sources(["nature.com", "arxiv.org"])
            .with_excluded_sources(["arxiv.org"])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("arxiv.org"));
    }

    #[test]
    fn query_is_trimmed_in_payload() {
        let call = SearchRequest::new(SearchDomain::Web, "  spaced out  ")
            .build()
            .unwrap();
        assert_eq!(call.body["query"], "spaced out");
    }

    #[test]
    fn domain_defaults() {
        assert_eq!(SearchDomain::Web.default_search_type(), SearchType::All);
        assert_eq!(
            SearchDomain::Finance.default_search_type(),
            SearchType::Proprietary
        );
        assert_eq!(SearchDomain::Economics.default_num_results(), 3);
        assert_eq!(SearchDomain::Paper.default_num_results(), 5);
    }

    #[test]
    fn domain_round_trips_through_from_str() {
        for domain in SearchDomain::ALL {
            assert_eq!(domain.as_str().parse::<SearchDomain>().unwrap(), domain);
        }
        assert!("weather".parse::<SearchDomain>().is_err());
    }
}
