//! HTTP client for the Valyu DeepSearch API.

use std::time::Duration;

use futures::StreamExt;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use secrecy::ExposeSecret;

use crate::config::ValyuConfig;
use crate::error::{ConfigError, SearchError};
use crate::search::{OutboundCall, SearchRequest, SearchResponse};

/// Maximum response body size (5 MB).
///
/// Large enough for a full page of max-length results, small enough to
/// prevent OOM from a runaway server.
const MAX_RESPONSE_SIZE: usize = 5 * 1024 * 1024;

/// How much of an error body to carry into the error message.
const ERROR_SNIPPET_LEN: usize = 512;

/// Client for the provider's search endpoint.
///
/// Holds the API key in its default headers; cheap to clone the inner
/// `reqwest::Client`, so share one instance across tools.
pub struct ValyuClient {
    http: Client,
    base_url: Url,
}

impl ValyuClient {
    /// Create a client from the given configuration.
    pub fn new(config: &ValyuConfig) -> Result<Self, ConfigError> {
        // Url::join treats a base without a trailing slash as a file and
        // would drop the last path segment.
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| ConfigError::InvalidValue {
            key: "VALYU_BASE_URL".to_string(),
            message: e.to_string(),
        })?;

        let mut headers = HeaderMap::new();
        let mut api_key = HeaderValue::from_str(config.api_key.expose_secret()).map_err(|_| {
            ConfigError::InvalidValue {
                key: "VALYU_API_KEY".to_string(),
                message: "contains characters not valid in an HTTP header".to_string(),
            }
        })?;
        api_key.set_sensitive(true);
        headers.insert("x-api-key", api_key);

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self { http, base_url })
    }

    /// Build and execute a search in one step.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let call = request.build()?;
        self.execute(&call).await
    }

    /// Execute a prepared call against the provider.
    ///
    /// One request, no retries; callers wrap their own retry policy if
    /// they want one.
    pub async fn execute(&self, call: &OutboundCall) -> Result<SearchResponse, SearchError> {
        let url = self
            .base_url
            .join(call.path)
            .map_err(|e| SearchError::Validation(format!("invalid endpoint path: {e}")))?;

        tracing::debug!(endpoint = %url, "executing search call");

        let response = self
            .http
            .post(url.clone())
            .json(&call.body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Transport("request timed out".to_string())
                } else {
                    SearchError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let retry_after = parse_retry_after(response.headers());
        let body = read_capped_body(response).await?;

        if !status.is_success() {
            let snippet = snippet(&String::from_utf8_lossy(&body));
            tracing::warn!(endpoint = %url, status = status.as_u16(), "search call failed");
            return Err(map_error_status(status, retry_after, &snippet));
        }

        SearchResponse::parse(status.as_u16(), &body)
    }
}

/// Map a non-2xx status to the error taxonomy.
fn map_error_status(status: StatusCode, retry_after: Option<Duration>, body: &str) -> SearchError {
    match status.as_u16() {
        401 | 403 => SearchError::Auth {
            status: status.as_u16(),
        },
        429 => SearchError::RateLimited { retry_after },
        _ => SearchError::Provider {
            status: status.as_u16(),
            message: if body.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            } else {
                body.to_string()
            },
        },
    }
}

/// Parse a plain-seconds `Retry-After` header. Date-form values are
/// ignored rather than guessed at.
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(ERROR_SNIPPET_LEN) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

/// Read a response body with a hard size cap.
///
/// Content-Length is checked first to reject oversized responses before
/// downloading anything; the stream is still capped in case the header
/// was absent or wrong.
async fn read_capped_body(response: reqwest::Response) -> Result<Vec<u8>, SearchError> {
    if let Some(content_length) = response.headers().get(header::CONTENT_LENGTH)
        && let Ok(s) = content_length.to_str()
        && let Ok(len) = s.parse::<usize>()
        && len > MAX_RESPONSE_SIZE
    {
        tracing::warn!(
            content_length = len,
            max = MAX_RESPONSE_SIZE,
            "rejected response: Content-Length exceeds limit"
        );
        return Err(SearchError::ResponseFormat(format!(
            "response Content-Length ({len} bytes) exceeds maximum allowed size ({MAX_RESPONSE_SIZE} bytes)"
        )));
    }

    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = StreamExt::next(&mut stream).await {
        let chunk = chunk
            .map_err(|e| SearchError::Transport(format!("failed to read response body: {e}")))?;
        if body.len() + chunk.len() > MAX_RESPONSE_SIZE {
            return Err(SearchError::ResponseFormat(format!(
                "response body exceeds maximum allowed size ({MAX_RESPONSE_SIZE} bytes)"
            )));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
