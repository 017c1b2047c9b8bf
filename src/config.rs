//! Configuration resolved from explicit values or environment variables.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default provider endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.valyu.ai/v1";

/// Default request timeout. DeepSearch queries over large proprietary
/// corpora can take tens of seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "VALYU_API_KEY";

/// Client configuration.
///
/// The API key is read once at construction time and is read-only for
/// the life of the process.
#[derive(Clone)]
pub struct ValyuConfig {
    pub api_key: SecretString,
    pub base_url: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for ValyuConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValyuConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ValyuConfig {
    /// Build a config from an explicit API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Resolve the config from the environment.
    ///
    /// `VALYU_API_KEY` is required; `VALYU_BASE_URL` and
    /// `VALYU_TIMEOUT_SECS` override the defaults when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = optional_env(API_KEY_ENV)?.ok_or_else(|| ConfigError::MissingKey {
            key: API_KEY_ENV.to_string(),
        })?;
        if api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: API_KEY_ENV.to_string(),
                message: "must not be empty".to_string(),
            });
        }

        let base_url =
            optional_env("VALYU_BASE_URL")?.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match optional_env("VALYU_TIMEOUT_SECS")? {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "VALYU_TIMEOUT_SECS".to_string(),
                    message: format!("expected an integer number of seconds, got '{raw}'"),
                })?;
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            api_key: SecretString::from(api_key),
            base_url,
            timeout,
        })
    }

    /// Override the provider base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Read an environment variable, treating "unset" as `None`.
///
/// Non-unicode values are an error rather than being silently dropped.
pub(crate) fn optional_env(key: &str) -> Result<Option<String>, ConfigError> {
    match std::env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "not valid unicode".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_api_key() {
        let config = ValyuConfig::new("val_secret_key");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("val_secret_key"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn builders_override_defaults() {
        let config = ValyuConfig::new("k")
            .with_base_url("https://staging.valyu.ai/v1")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url, "https://staging.valyu.ai/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn defaults_match_provider() {
        let config = ValyuConfig::new("k");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }
}
