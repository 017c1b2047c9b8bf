//! Error types.

use std::time::Duration;

use thiserror::Error;

/// Error type for building and executing search requests.
///
/// Every failure path is distinguishable: callers can tell "no results"
/// (an `Ok` with an empty vector) apart from any of these.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The request was malformed before any network call. Recoverable by
    /// fixing the request.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The provider rejected the API key (HTTP 401/403).
    #[error("authentication rejected (HTTP {status}); check the API key")]
    Auth { status: u16 },

    /// The provider throttled the request (HTTP 429).
    #[error("rate limited{}", retry_after_suffix(.retry_after))]
    RateLimited { retry_after: Option<Duration> },

    /// Any other non-2xx response, or a 2xx whose body reports failure.
    #[error("provider error (HTTP {status}): {message}")]
    Provider { status: u16, message: String },

    /// Connection failure or timeout before a response arrived.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The response body could not be parsed into the expected shape.
    #[error("malformed provider response: {0}")]
    ResponseFormat(String),
}

fn retry_after_suffix(retry_after: &Option<Duration>) -> String {
    match retry_after {
        Some(d) => format!(", retry after {:?}", d),
        None => String::new(),
    }
}

/// Error type for tool registration.
///
/// A duplicate name is a configuration bug; treat it as fatal at startup.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("tool '{0}' is already registered")]
    DuplicateName(String),
}

/// Error type for configuration resolution.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration: {key}")]
    MissingKey { key: String },

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_display_includes_retry_hint() {
        let err = SearchError::RateLimited {
            retry_after: Some(Duration::from_secs(30)),
        };
        assert!(err.to_string().contains("retry after"));

        let err = SearchError::RateLimited { retry_after: None };
        assert_eq!(err.to_string(), "rate limited");
    }

    #[test]
    fn duplicate_name_names_the_tool() {
        let err = RegistryError::DuplicateName("web_search".to_string());
        assert!(err.to_string().contains("web_search"));
    }
}
