//! Centralized constants for the Activity Tracker provider workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication.

// =============================================================================
// Endpoint Defaults
// =============================================================================

/// Region used when neither a region nor an explicit endpoint is configured.
pub const DEFAULT_REGION: &str = "us-south";

/// Public IAM endpoint used for API key exchange.
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";

/// Activity Tracker public endpoint for a region.
pub fn atracker_endpoint_for_region(region: &str) -> String {
    format!("https://{}.atracker.cloud.ibm.com", region)
}

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Maximum allowed connection timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default maximum number of retries for rate-limited requests.
///
/// Zero means a single attempt; retries are opt-in.
pub const DEFAULT_MAX_RETRIES: usize = 0;

/// Maximum allowed value for max_retries.
pub const MAX_MAX_RETRIES: usize = 10;

/// Default buffer before IAM token expiry that triggers a refresh.
pub const DEFAULT_TOKEN_EXPIRY_BUFFER_SECS: u64 = 60;
