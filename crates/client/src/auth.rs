//! Authentication strategies and IAM access token management.

use secrecy::{ExposeSecret, SecretString};
use std::time::{Duration, Instant};

/// Strategy for authenticating with the Activity Tracker service.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// IBM Cloud API key.
    /// The client exchanges it at IAM and refreshes the access token as needed.
    IamApiKey { api_key: SecretString },
    /// Pre-issued IAM access token, sent as-is.
    BearerToken { token: SecretString },
}

/// Holds the auth strategy and the cached IAM access token.
#[derive(Debug)]
pub struct TokenManager {
    auth_strategy: AuthStrategy,
    access_token: Option<AccessToken>,
    expiry_buffer_seconds: u64,
}

/// Access token with expiry information.
#[derive(Debug, Clone)]
struct AccessToken {
    value: SecretString,
    expires_at: Option<Instant>,
}

impl AccessToken {
    fn new(value: SecretString, ttl_seconds: Option<u64>) -> Self {
        let expires_at = ttl_seconds.map(|ttl| Instant::now() + Duration::from_secs(ttl));
        Self { value, expires_at }
    }

    /// Check if the token expires within `buffer`.
    fn will_expire_within(&self, buffer: Duration) -> bool {
        self.expires_at
            .map(|exp| exp.saturating_duration_since(Instant::now()) <= buffer)
            .unwrap_or(false)
    }
}

impl TokenManager {
    /// Create a new token manager with the given auth strategy.
    pub fn new(strategy: AuthStrategy, expiry_buffer_seconds: u64) -> Self {
        Self {
            auth_strategy: strategy,
            access_token: None,
            expiry_buffer_seconds,
        }
    }

    /// Get the current auth strategy.
    pub fn strategy(&self) -> &AuthStrategy {
        &self.auth_strategy
    }

    /// Check if we're using a static bearer token (no exchange needed).
    pub fn is_bearer_token(&self) -> bool {
        matches!(self.auth_strategy, AuthStrategy::BearerToken { .. })
    }

    /// Get the bearer token for API requests.
    /// For static tokens, returns the token directly.
    /// For API key auth, returns the cached access token if one was obtained.
    pub fn get_bearer_token(&self) -> Option<&str> {
        match &self.auth_strategy {
            AuthStrategy::BearerToken { token } => Some(token.expose_secret()),
            AuthStrategy::IamApiKey { .. } => {
                self.access_token.as_ref().map(|t| t.value.expose_secret())
            }
        }
    }

    /// Store an access token received from IAM.
    ///
    /// `ttl_seconds` of `None` means the token never expires locally.
    pub fn set_access_token(&mut self, token: SecretString, ttl_seconds: Option<u64>) {
        self.access_token = Some(AccessToken::new(token, ttl_seconds));
    }

    /// Check whether an IAM exchange is needed before the next request.
    ///
    /// Always false for static bearer tokens.
    pub fn needs_refresh(&self) -> bool {
        if self.is_bearer_token() {
            return false;
        }
        let buffer = Duration::from_secs(self.expiry_buffer_seconds);
        self.access_token
            .as_ref()
            .map(|t| t.will_expire_within(buffer))
            .unwrap_or(true)
    }

    /// Drop the cached access token (forces a new exchange).
    pub fn clear_token(&mut self) {
        self.access_token = None;
    }
}
