//! Configuration management for the Activity Tracker provider.
//!
//! This crate provides types and loaders for the connection and credential
//! settings the targets data source needs: the Activity Tracker endpoint
//! (derived from a region or set explicitly), the IAM endpoint, and either an
//! IAM API key or a pre-issued bearer token.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{AuthConfig, AuthStrategy, Config, ConnectionConfig};

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::{Mutex, OnceLock};

    pub fn global_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }
}
