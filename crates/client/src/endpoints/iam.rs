//! IAM token exchange endpoint.

use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::endpoints::send_request_with_retry;
use crate::error::{ClientError, Result};
use crate::models::{IAM_API_KEY_GRANT_TYPE, IamTokenResponse};

/// Exchange an IBM Cloud API key for an IAM access token.
///
/// A 400 or 401 from IAM means the key was rejected and is reported as
/// `ClientError::Unauthorized`; the key itself never appears in the error.
pub async fn exchange_api_key(
    client: &Client,
    iam_url: &str,
    api_key: &str,
    max_retries: usize,
    timeout: Duration,
) -> Result<IamTokenResponse> {
    debug!("Exchanging API key for IAM access token");

    let url = format!("{}/identity/token", iam_url);
    let builder = client
        .post(&url)
        .header("Accept", "application/json")
        .form(&[("grant_type", IAM_API_KEY_GRANT_TYPE), ("apikey", api_key)]);

    let response = send_request_with_retry(builder, max_retries, timeout)
        .await
        .map_err(|e| match e {
            ClientError::ApiError {
                status: 400 | 401,
                message,
                ..
            } => ClientError::Unauthorized(message),
            other => other,
        })?;

    let body = response.text().await?;
    serde_json::from_str::<IamTokenResponse>(&body).map_err(|_| {
        ClientError::AuthFailed("IAM token response did not contain an access token".to_string())
    })
}
