//! Error types for the provider data sources.

use atracker_client::ClientError;
use thiserror::Error;

/// Result type alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Errors that can abort a data source read.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The client session could not produce an API client.
    #[error("client session error: {0}")]
    Session(String),

    /// The remote "list targets" call failed.
    #[error("list targets failed: {0}")]
    ListTargets(#[source] ClientError),

    /// A name filter matched no target.
    #[error("no Targets found with name {name}")]
    TargetsNotFound { name: String },

    /// A value did not fit the declared schema.
    #[error("error setting {key}: {message}")]
    SetAttribute { key: String, message: String },

    /// A schema declaration is malformed.
    #[error("invalid schema for {key}: {message}")]
    InvalidSchema { key: String, message: String },

    /// The calling context was cancelled before the read finished.
    #[error("read cancelled")]
    Cancelled,
}

impl ProviderError {
    /// The underlying client error for remote failures.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::ListTargets(e) => Some(e),
            _ => None,
        }
    }
}
