//! Client builder for constructing [`AtrackerClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating required configuration (base_url, auth_strategy)
//! - Normalizing the base and IAM URLs (removing trailing slashes)
//! - Configuring the underlying HTTP client (timeouts, TLS verification)
//!
//! # What this module does NOT handle:
//! - Actual API calls (handled by [`AtrackerClient`] methods)
//! - Token management (handled by [`TokenManager`] in `auth.rs`)
//!
//! # Invariants
//! - `base_url` and `auth_strategy` are required fields and must be provided before calling `build()`
//! - URLs are always normalized to have no trailing slashes
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning

use std::time::Duration;

use crate::auth::{AuthStrategy, TokenManager};
use crate::client::AtrackerClient;
use crate::error::{ClientError, Result};
use atracker_config::{
    AuthStrategy as ConfigAuthStrategy, Config,
    constants::{
        DEFAULT_IAM_URL, DEFAULT_MAX_REDIRECTS, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS,
        DEFAULT_TOKEN_EXPIRY_BUFFER_SECS,
    },
};

/// Builder for creating a new [`AtrackerClient`].
///
/// All configuration options have defaults except for `base_url` and
/// `auth_strategy`, which are required.
pub struct AtrackerClientBuilder {
    base_url: Option<String>,
    iam_url: String,
    auth_strategy: Option<AuthStrategy>,
    skip_verify: bool,
    timeout: Duration,
    max_retries: usize,
    token_expiry_buffer_seconds: u64,
}

impl Default for AtrackerClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            iam_url: DEFAULT_IAM_URL.to_string(),
            auth_strategy: None,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            token_expiry_buffer_seconds: DEFAULT_TOKEN_EXPIRY_BUFFER_SECS,
        }
    }
}

impl AtrackerClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Activity Tracker endpoint, e.g. `https://us-south.atracker.cloud.ibm.com`.
    ///
    /// Trailing slashes will be automatically removed.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the IAM endpoint used for API key exchange.
    ///
    /// Defaults to `https://iam.cloud.ibm.com`.
    pub fn iam_url(mut self, url: String) -> Self {
        self.iam_url = url;
        self
    }

    /// Set the authentication strategy.
    pub fn auth_strategy(mut self, strategy: AuthStrategy) -> Self {
        self.auth_strategy = Some(strategy);
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this in development or testing environments.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retries for rate-limited requests.
    ///
    /// Default is 0: every request is attempted once.
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set how long before expiry a cached IAM token is refreshed.
    pub fn token_expiry_buffer_seconds(mut self, buffer: u64) -> Self {
        self.token_expiry_buffer_seconds = buffer;
        self
    }

    /// Create a client builder from configuration.
    pub fn from_config(mut self, config: &Config) -> Self {
        let auth_strategy = match &config.auth.strategy {
            ConfigAuthStrategy::IamApiKey { api_key } => AuthStrategy::IamApiKey {
                api_key: api_key.clone(),
            },
            ConfigAuthStrategy::BearerToken { token } => AuthStrategy::BearerToken {
                token: token.clone(),
            },
        };

        self.base_url = Some(config.connection.base_url.clone());
        self.iam_url = config.connection.iam_url.clone();
        self.auth_strategy = Some(auth_strategy);
        self.skip_verify = config.connection.skip_verify;
        self.timeout = config.connection.timeout;
        self.max_retries = config.connection.max_retries;
        self.token_expiry_buffer_seconds = config.connection.token_expiry_buffer_seconds;
        self
    }

    /// Normalize a URL by removing trailing slashes.
    ///
    /// - `"https://us-south.atracker.cloud.ibm.com/"` -> `"https://us-south.atracker.cloud.ibm.com"`
    fn normalize_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the [`AtrackerClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` was not provided or is empty.
    /// Returns [`ClientError::AuthFailed`] if `auth_strategy` was not provided.
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<AtrackerClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_url(base_url);
        if base_url.is_empty() {
            return Err(ClientError::InvalidUrl("base_url is empty".to_string()));
        }
        let iam_url = Self::normalize_url(self.iam_url);

        let auth_strategy = self
            .auth_strategy
            .ok_or_else(|| ClientError::AuthFailed("auth_strategy is required".to_string()))?;

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if self.skip_verify {
            if base_url.starts_with("https://") {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        let http = http_builder.build()?;

        Ok(AtrackerClient {
            http,
            base_url,
            iam_url,
            token_manager: tokio::sync::Mutex::new(TokenManager::new(
                auth_strategy,
                self.token_expiry_buffer_seconds,
            )),
            max_retries: self.max_retries,
            timeout: self.timeout,
        })
    }
}
