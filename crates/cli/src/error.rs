//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `ProviderError` and `ClientError` variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Signal handling (see cancellation.rs for SIGINT handling).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use atracker_client::ClientError;
use atracker_provider::ProviderError;

use crate::cancellation::SIGINT_EXIT_CODE;

/// Structured exit codes for atracker-cli.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure, including bad configuration.
    GeneralError = 1,

    /// Authentication failure - rejected API key or token.
    ///
    /// Scripts should refresh credentials.
    AuthenticationFailed = 2,

    /// Connection error - network, timeout, or DNS failure.
    ///
    /// Scripts may retry with exponential backoff.
    ConnectionError = 3,

    /// No target matched the requested name.
    NotFound = 4,

    /// Validation error - malformed response or a value that does not fit the schema.
    ValidationError = 5,

    /// Permission denied - the token lacks access to targets.
    PermissionDenied = 6,

    /// Rate limited - HTTP 429 Too Many Requests.
    RateLimited = 7,

    /// Service unavailable - HTTP 502/503/504.
    ServiceUnavailable = 8,

    /// Interrupted - SIGINT/Ctrl+C.
    Interrupted = SIGINT_EXIT_CODE,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::AuthFailed(_) | ClientError::Unauthorized(_) => {
                ExitCode::AuthenticationFailed
            }

            ClientError::Timeout(_) | ClientError::InvalidUrl(_) => ExitCode::ConnectionError,
            ClientError::HttpError(e) if e.is_connect() || e.is_timeout() => {
                ExitCode::ConnectionError
            }
            ClientError::HttpError(_) => ExitCode::GeneralError,

            ClientError::InvalidResponse(_) => ExitCode::ValidationError,

            // Only 429 responses are retried, so exhaustion means rate limiting
            ClientError::MaxRetriesExceeded(_) => ExitCode::RateLimited,

            ClientError::ApiError { status, .. } => match status {
                400 => ExitCode::ValidationError,
                401 => ExitCode::AuthenticationFailed,
                403 => ExitCode::PermissionDenied,
                404 => ExitCode::NotFound,
                429 => ExitCode::RateLimited,
                502..=504 => ExitCode::ServiceUnavailable,
                _ => ExitCode::GeneralError,
            },
        }
    }
}

impl From<&ProviderError> for ExitCode {
    fn from(err: &ProviderError) -> Self {
        match err {
            ProviderError::ListTargets(inner) => Self::from(inner),
            ProviderError::TargetsNotFound { .. } => ExitCode::NotFound,
            ProviderError::SetAttribute { .. } | ProviderError::InvalidSchema { .. } => {
                ExitCode::ValidationError
            }
            ProviderError::Cancelled => ExitCode::Interrupted,
            ProviderError::Session(_) => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no typed error is found in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(provider_err) = cause.downcast_ref::<ProviderError>() {
                return ExitCode::from(provider_err);
            }
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
        }
        ExitCode::GeneralError
    }
}
