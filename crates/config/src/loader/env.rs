//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse the `IBMCLOUD_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - The `IBMCLOUD_*` name wins over its legacy `IC_*` alias.
//! - Invalid numeric values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::MAX_MAX_RETRIES;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// First non-empty value among `keys`, in order.
fn first_env_var(keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| env_var_or_none(key))
}

/// Apply environment variable configuration to the loader.
///
/// Builder methods called after this take precedence over the values set here.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(region) = first_env_var(&["IBMCLOUD_REGION", "IC_REGION"]) {
        loader.set_region(Some(region));
    }
    if let Some(url) = env_var_or_none("IBMCLOUD_ATRACKER_API_ENDPOINT") {
        loader.set_base_url(Some(url));
    }
    if let Some(url) = env_var_or_none("IBMCLOUD_IAM_API_ENDPOINT") {
        loader.set_iam_url(Some(url));
    }
    if let Some(key) = first_env_var(&["IBMCLOUD_API_KEY", "IC_API_KEY"]) {
        loader.set_api_key(Some(SecretString::new(key.into())));
    }
    if let Some(token) = env_var_or_none("IBMCLOUD_IAM_TOKEN") {
        loader.set_iam_token(Some(SecretString::new(token.into())));
    }
    if let Some(skip) = env_var_or_none("IBMCLOUD_SKIP_VERIFY") {
        loader.set_skip_verify(Some(skip.parse().map_err(|_| {
            ConfigError::InvalidValue {
                var: "IBMCLOUD_SKIP_VERIFY".to_string(),
                message: "must be true or false".to_string(),
            }
        })?));
    }
    if let Some(timeout) = env_var_or_none("IBMCLOUD_TIMEOUT") {
        let secs: u64 = timeout.parse().map_err(|_| ConfigError::InvalidValue {
            var: "IBMCLOUD_TIMEOUT".to_string(),
            message: "must be a number".to_string(),
        })?;
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(retries) = env_var_or_none("IBMCLOUD_MAX_RETRIES") {
        let value: usize = retries.parse().map_err(|_| ConfigError::InvalidValue {
            var: "IBMCLOUD_MAX_RETRIES".to_string(),
            message: "must be a non-negative integer".to_string(),
        })?;
        if value > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!("must be between 0 and {} (got {})", MAX_MAX_RETRIES, value),
            });
        }
        loader.set_max_retries(Some(value));
    }

    Ok(())
}
