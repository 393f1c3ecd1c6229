//! IAM token exchange models.

use secrecy::SecretString;
use serde::Deserialize;

/// Grant type for exchanging an IBM Cloud API key for an access token.
pub const IAM_API_KEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Response of `POST /identity/token`.
#[derive(Debug, Deserialize, Clone)]
pub struct IamTokenResponse {
    #[serde(deserialize_with = "crate::serde_helpers::secret_string")]
    pub access_token: SecretString,
    /// Lifetime of the token in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Absolute expiry as a unix timestamp.
    #[serde(default)]
    pub expiration: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
}
