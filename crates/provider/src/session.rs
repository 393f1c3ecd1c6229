//! Client session seams between data sources and remote APIs.
//!
//! Responsibilities:
//! - [`TargetsApi`]: the outbound "list targets" operation a read depends on.
//! - [`ClientSession`]: opaque provider of API clients handed to every read.
//! - [`ProviderSession`]: production session built from `atracker_config::Config`.
//!
//! Does NOT handle:
//! - Filtering or projection of results (see [`crate::data_sources`]).
//!
//! Invariants:
//! - `ProviderSession` builds its client at most once, on first use.

use std::future::Future;

use atracker_client::{AtrackerClient, ClientError, TargetList};
use atracker_config::Config;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::{ProviderError, Result};

/// Remote "list targets" operation.
pub trait TargetsApi: Send + Sync {
    /// Return every target visible to the caller, in service order.
    fn list_targets(
        &self,
    ) -> impl Future<Output = std::result::Result<TargetList, ClientError>> + Send;
}

impl TargetsApi for AtrackerClient {
    fn list_targets(
        &self,
    ) -> impl Future<Output = std::result::Result<TargetList, ClientError>> + Send {
        AtrackerClient::list_targets(self)
    }
}

/// Provider of API clients for data source reads.
pub trait ClientSession: Send + Sync {
    type Targets: TargetsApi;

    /// The Activity Tracker v2 client.
    fn atracker_v2(&self) -> impl Future<Output = Result<&Self::Targets>> + Send;
}

/// Client session backed by a loaded [`Config`].
#[derive(Debug)]
pub struct ProviderSession {
    config: Config,
    atracker: OnceCell<AtrackerClient>,
}

impl ProviderSession {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            atracker: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl ClientSession for ProviderSession {
    type Targets = AtrackerClient;

    async fn atracker_v2(&self) -> Result<&AtrackerClient> {
        self.atracker
            .get_or_try_init(|| async {
                debug!(
                    base_url = %self.config.connection.base_url,
                    region = %self.config.connection.region,
                    "Building Activity Tracker client"
                );
                AtrackerClient::builder().from_config(&self.config).build()
            })
            .await
            .map_err(|e| ProviderError::Session(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[tokio::test]
    async fn test_client_is_built_once() {
        let session = ProviderSession::new(Config::with_bearer_token(
            "https://us-south.atracker.cloud.ibm.com/".to_string(),
            SecretString::new("token".to_string().into()),
        ));

        let first = session.atracker_v2().await.unwrap() as *const AtrackerClient;
        let second = session.atracker_v2().await.unwrap() as *const AtrackerClient;
        assert_eq!(first, second);
        assert_eq!(
            session.atracker_v2().await.unwrap().base_url(),
            "https://us-south.atracker.cloud.ibm.com"
        );
    }

    #[tokio::test]
    async fn test_invalid_config_is_session_error() {
        let session = ProviderSession::new(Config::with_bearer_token(
            "/".to_string(),
            SecretString::new("token".to_string().into()),
        ));

        let err = session.atracker_v2().await.unwrap_err();
        assert!(matches!(err, ProviderError::Session(_)));
    }
}
