//! Client-level IAM token helpers.
//!
//! This module contains methods on [`AtrackerClient`] that interact with the
//! [`TokenManager`] to obtain a bearer token for each request.
//!
//! # What this module does NOT handle:
//! - Token storage and expiry tracking (handled by [`TokenManager`] in `auth.rs`)
//! - The IAM HTTP call itself (handled by `endpoints::exchange_api_key`)
//!
//! # Invariants
//! - Static bearer tokens never trigger an exchange
//! - API key auth exchanges proactively when the cached token is within the expiry buffer
//!
//! [`TokenManager`]: crate::auth::TokenManager

use secrecy::ExposeSecret;

use crate::auth::AuthStrategy;
use crate::client::AtrackerClient;
use crate::endpoints;
use crate::error::{ClientError, Result};

impl AtrackerClient {
    /// Get the current bearer token, exchanging the API key at IAM if necessary.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Unauthorized`] if IAM rejects the API key.
    /// Returns [`ClientError::AuthFailed`] if IAM returns no usable token.
    pub(crate) async fn get_auth_token(&self) -> Result<String> {
        let mut manager = self.token_manager.lock().await;

        if manager.needs_refresh()
            && let AuthStrategy::IamApiKey { api_key } = manager.strategy()
        {
            let token = endpoints::exchange_api_key(
                &self.http,
                &self.iam_url,
                api_key.expose_secret(),
                self.max_retries,
                self.timeout,
            )
            .await?;
            manager.set_access_token(token.access_token, token.expires_in);
        }

        manager
            .get_bearer_token()
            .map(|s| s.to_string())
            .ok_or_else(|| ClientError::AuthFailed("no IAM access token available".to_string()))
    }

    /// Check if the client is using a static bearer token.
    pub async fn is_bearer_token_auth(&self) -> bool {
        self.token_manager.lock().await.is_bearer_token()
    }

    /// Exchange the API key now and cache the resulting token.
    ///
    /// A no-op for static bearer tokens.
    pub async fn authenticate(&self) -> Result<()> {
        self.token_manager.lock().await.clear_token();
        self.get_auth_token().await.map(|_| ())
    }
}
