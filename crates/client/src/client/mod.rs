//! Main Activity Tracker REST API client.
//!
//! This module provides the primary [`AtrackerClient`] for interacting with the
//! IBM Cloud Activity Tracker v2 API. It handles IAM token exchange and caching.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `session`: IAM access token helpers (private module)
//! - `targets`: Target methods
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Token expiry bookkeeping (delegated to [`crate::auth::TokenManager`])
//!
//! # Invariants
//! - All methods take `&self`; the token cache sits behind a `tokio::sync::Mutex`
//!   so one client can be shared by concurrent callers.
//! - At most one IAM exchange runs at a time per client.

pub mod builder;
mod session;
mod targets;

use std::time::Duration;

use crate::auth::TokenManager;

/// Activity Tracker REST API client.
///
/// # Creating a Client
///
/// Use [`AtrackerClient::builder()`] to create a new client:
///
/// ```rust,ignore
/// use atracker_client::{AtrackerClient, AuthStrategy};
/// use secrecy::SecretString;
///
/// let client = AtrackerClient::builder()
///     .base_url("https://us-south.atracker.cloud.ibm.com".to_string())
///     .auth_strategy(AuthStrategy::IamApiKey {
///         api_key: SecretString::new("my-api-key".to_string().into()),
///     })
///     .build()?;
/// let targets = client.list_targets().await?;
/// ```
#[derive(Debug)]
pub struct AtrackerClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) iam_url: String,
    pub(crate) token_manager: tokio::sync::Mutex<TokenManager>,
    pub(crate) max_retries: usize,
    pub(crate) timeout: Duration,
}

impl AtrackerClient {
    /// Create a new client builder.
    pub fn builder() -> builder::AtrackerClientBuilder {
        builder::AtrackerClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the IAM URL.
    pub fn iam_url(&self) -> &str {
        &self.iam_url
    }
}
