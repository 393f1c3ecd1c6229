//! Common test utilities for integration tests.
//!
//! This module provides shared helper functions and re-exports commonly used
//! types for testing the Activity Tracker client.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - All fixture files must be valid JSON
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

use secrecy::SecretString;

#[allow(unused_imports)]
pub use atracker_client::testing::load_fixture;

// Re-export commonly used types for test convenience
#[allow(unused_imports)]
pub use atracker_client::{AtrackerClient, AuthStrategy, endpoints};
#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use std::time::Duration;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Timeout passed to endpoint functions in tests.
#[allow(dead_code)]
pub const TEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client that sends a static bearer token to `base_url`.
#[allow(dead_code)]
pub fn bearer_client(base_url: &str, token: &str) -> AtrackerClient {
    AtrackerClient::builder()
        .base_url(base_url.to_string())
        .auth_strategy(AuthStrategy::BearerToken {
            token: SecretString::new(token.to_string().into()),
        })
        .build()
        .expect("build bearer client")
}

/// Client that exchanges `api_key` at `iam_url` before calling `base_url`.
#[allow(dead_code)]
pub fn api_key_client(base_url: &str, iam_url: &str, api_key: &str) -> AtrackerClient {
    AtrackerClient::builder()
        .base_url(base_url.to_string())
        .iam_url(iam_url.to_string())
        .auth_strategy(AuthStrategy::IamApiKey {
            api_key: SecretString::new(api_key.to_string().into()),
        })
        .build()
        .expect("build api key client")
}
