//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for layered configuration merging.
//! - Derive the Activity Tracker endpoint from the region when no explicit endpoint is set.
//! - Build and validate the final `Config`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - Builder methods called after `from_env()` take precedence over environment variables.
//! - An explicit endpoint wins over the region-derived one.
//! - A bearer token wins over an API key when both come from the environment.
//! - `with_api_key` and `with_iam_token` replace whichever credential was set before.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use secrecy::SecretString;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{
    DEFAULT_IAM_URL, DEFAULT_MAX_RETRIES, DEFAULT_REGION, DEFAULT_TIMEOUT_SECS,
    DEFAULT_TOKEN_EXPIRY_BUFFER_SECS, MAX_MAX_RETRIES, MAX_TIMEOUT_SECS,
    atracker_endpoint_for_region,
};
use crate::types::{AuthConfig, AuthStrategy, Config, ConnectionConfig};

/// Configuration loader that builds config from environment variables and builder calls.
#[derive(Default)]
pub struct ConfigLoader {
    region: Option<String>,
    base_url: Option<String>,
    iam_url: Option<String>,
    api_key: Option<SecretString>,
    iam_token: Option<SecretString>,
    skip_verify: Option<bool>,
    timeout: Option<Duration>,
    max_retries: Option<usize>,
    token_expiry_buffer_seconds: Option<u64>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the `.env` file exists but has invalid syntax
    /// (`ConfigError::DotenvParse`) or cannot be read (`ConfigError::DotenvIo`).
    /// Missing `.env` files are silently ignored.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the region used to derive the Activity Tracker endpoint.
    pub fn with_region(mut self, region: String) -> Self {
        self.region = Some(region);
        self
    }

    /// Set an explicit Activity Tracker endpoint, overriding the region-derived one.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the IAM endpoint used for API key exchange.
    pub fn with_iam_url(mut self, url: String) -> Self {
        self.iam_url = Some(url);
        self
    }

    /// Set the IAM API key, replacing any bearer token set earlier.
    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(SecretString::new(api_key.into()));
        self.iam_token = None;
        self
    }

    /// Set a pre-issued IAM bearer token, replacing any API key set earlier.
    pub fn with_iam_token(mut self, token: String) -> Self {
        self.iam_token = Some(SecretString::new(token.into()));
        self.api_key = None;
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of retries for rate-limited requests.
    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Set how long before expiry an IAM token is refreshed.
    pub fn with_token_expiry_buffer_seconds(mut self, seconds: u64) -> Self {
        self.token_expiry_buffer_seconds = Some(seconds);
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let region = match self.region {
            Some(region) => validate_region(&region)?,
            None => DEFAULT_REGION.to_string(),
        };

        let base_url = match self.base_url.as_deref() {
            Some(raw) => validate_and_normalize_url("base_url", raw)?,
            None => atracker_endpoint_for_region(&region),
        };
        tracing::debug!(region = %region, base_url = %base_url, "Resolved Activity Tracker endpoint");
        let iam_url = match self.iam_url.as_deref() {
            Some(raw) => validate_and_normalize_url("iam_url", raw)?,
            None => DEFAULT_IAM_URL.to_string(),
        };

        let strategy = if let Some(token) = self.iam_token {
            AuthStrategy::BearerToken { token }
        } else if let Some(api_key) = self.api_key {
            AuthStrategy::IamApiKey { api_key }
        } else {
            return Err(ConfigError::MissingAuth);
        };

        let connection = ConnectionConfig {
            region,
            base_url,
            iam_url,
            skip_verify: self.skip_verify.unwrap_or(false),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            token_expiry_buffer_seconds: self
                .token_expiry_buffer_seconds
                .unwrap_or(DEFAULT_TOKEN_EXPIRY_BUFFER_SECS),
        };

        Self::validate_connection(&connection)?;

        Ok(Config {
            connection,
            auth: AuthConfig { strategy },
        })
    }

    /// Validates timeout and retry bounds.
    fn validate_connection(connection: &ConnectionConfig) -> Result<(), ConfigError> {
        let timeout_secs = connection.timeout.as_secs();

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }

        if timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_TIMEOUT_SECS
                ),
            });
        }

        if connection.max_retries > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!(
                    "must be between 0 and {} (got {})",
                    MAX_MAX_RETRIES, connection.max_retries
                ),
            });
        }

        Ok(())
    }

    // Internal setters for use by env.rs

    pub(crate) fn set_region(&mut self, region: Option<String>) {
        self.region = region;
    }

    pub(crate) fn set_base_url(&mut self, url: Option<String>) {
        self.base_url = url;
    }

    pub(crate) fn set_iam_url(&mut self, url: Option<String>) {
        self.iam_url = url;
    }

    pub(crate) fn set_api_key(&mut self, api_key: Option<SecretString>) {
        self.api_key = api_key;
    }

    pub(crate) fn set_iam_token(&mut self, token: Option<SecretString>) {
        self.iam_token = token;
    }

    pub(crate) fn set_skip_verify(&mut self, skip: Option<bool>) {
        self.skip_verify = skip;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_max_retries(&mut self, retries: Option<usize>) {
        self.max_retries = retries;
    }
}

/// Region names are lowercase ASCII letters, digits and dashes (e.g. `us-south`).
fn validate_region(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::MissingRegion);
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ConfigError::InvalidValue {
            var: "region".into(),
            message: format!("must contain only lowercase letters, digits and '-', got: {trimmed}"),
        });
    }
    Ok(trimmed.to_string())
}

/// Validate an absolute http(s) URL with a host and strip trailing slashes.
fn validate_and_normalize_url(var: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(if var == "base_url" {
            ConfigError::MissingBaseUrl
        } else {
            ConfigError::InvalidValue {
                var: var.into(),
                message: "must not be empty".into(),
            }
        });
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        var: var.into(),
        message: format!(
            "must be an absolute http(s) URL with a host (e.g. https://us-south.atracker.cloud.ibm.com): {e}"
        ),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: var.into(),
            message: format!("scheme must be http or https, got: {scheme}"),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: var.into(),
            message: "host is required".into(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
