//! Connection configuration types.
//!
//! Responsibilities:
//! - Define connection settings (endpoints, TLS verification, timeouts, retries).
//! - Define the main `Config` structure combining connection and auth.
//! - Provide convenience constructors for common config patterns.
//!
//! Does NOT handle:
//! - Configuration loading from env (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - All duration fields are serialized as seconds (integers).
//! - `base_url` never carries a trailing slash.

use crate::constants::{
    DEFAULT_IAM_URL, DEFAULT_MAX_RETRIES, DEFAULT_REGION, DEFAULT_TIMEOUT_SECS,
    DEFAULT_TOKEN_EXPIRY_BUFFER_SECS, atracker_endpoint_for_region,
};
use crate::types::auth::{AuthConfig, AuthStrategy};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Connection configuration for the Activity Tracker service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Region the endpoint was derived from (e.g. us-south)
    pub region: String,
    /// Base URL of the Activity Tracker API (e.g. https://us-south.atracker.cloud.ibm.com)
    pub base_url: String,
    /// Base URL of the IAM token service
    pub iam_url: String,
    /// Whether to skip TLS verification
    pub skip_verify: bool,
    /// Request timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
    /// Maximum number of retries for rate-limited requests
    pub max_retries: usize,
    /// Refresh IAM tokens this many seconds before they expire
    #[serde(default = "default_token_expiry_buffer")]
    pub token_expiry_buffer_seconds: u64,
}

pub(crate) fn default_token_expiry_buffer() -> u64 {
    DEFAULT_TOKEN_EXPIRY_BUFFER_SECS
}

impl ConnectionConfig {
    /// Connection settings for the public endpoint of `region`.
    pub fn for_region(region: &str) -> Self {
        Self {
            region: region.to_string(),
            base_url: atracker_endpoint_for_region(region),
            iam_url: DEFAULT_IAM_URL.to_string(),
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            token_expiry_buffer_seconds: default_token_expiry_buffer(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Connection settings
    pub connection: ConnectionConfig,
    /// Authentication settings
    pub auth: AuthConfig,
}

impl Config {
    /// Create a config for the default region authenticating with an IAM API key.
    pub fn with_api_key(api_key: SecretString) -> Self {
        Self {
            connection: ConnectionConfig::for_region(DEFAULT_REGION),
            auth: AuthConfig {
                strategy: AuthStrategy::IamApiKey { api_key },
            },
        }
    }

    /// Create a config for an explicit endpoint with a pre-issued bearer token.
    pub fn with_bearer_token(base_url: String, token: SecretString) -> Self {
        let mut connection = ConnectionConfig::for_region(DEFAULT_REGION);
        connection.base_url = base_url;
        Self {
            connection,
            auth: AuthConfig {
                strategy: AuthStrategy::BearerToken { token },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_region_derives_endpoint() {
        let connection = ConnectionConfig::for_region("eu-de");
        assert_eq!(connection.base_url, "https://eu-de.atracker.cloud.ibm.com");
        assert_eq!(connection.iam_url, "https://iam.cloud.ibm.com");
        assert_eq!(connection.max_retries, 0);
    }

    #[test]
    fn test_config_with_api_key() {
        let key = SecretString::new("test-key".to_string().into());
        let config = Config::with_api_key(key);
        assert_eq!(config.connection.region, "us-south");
        assert!(matches!(
            config.auth.strategy,
            AuthStrategy::IamApiKey { .. }
        ));
    }

    #[test]
    fn test_config_with_bearer_token() {
        let token = SecretString::new("test-token".to_string().into());
        let config = Config::with_bearer_token("http://127.0.0.1:9000".to_string(), token);
        assert_eq!(config.connection.base_url, "http://127.0.0.1:9000");
        assert!(matches!(
            config.auth.strategy,
            AuthStrategy::BearerToken { .. }
        ));
    }

    #[test]
    fn test_connection_config_serde_seconds() {
        let connection = ConnectionConfig::for_region("us-east");
        let json = serde_json::to_string(&connection).unwrap();
        assert!(json.contains("\"timeout\":60"));

        let parsed: ConnectionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.timeout, Duration::from_secs(60));
    }
}
