//! Target endpoints.

use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::endpoints::send_request_with_retry;
use crate::error::{ClientError, Result};
use crate::models::TargetList;

/// List all targets in the region of `base_url`.
///
/// The service returns every target in one response; there is no pagination.
pub async fn list_targets(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    max_retries: usize,
    timeout: Duration,
) -> Result<TargetList> {
    let url = format!("{}/api/v2/targets", base_url);

    let builder = client
        .get(&url)
        .header("Authorization", format!("Bearer {}", auth_token))
        .header("Accept", "application/json");
    let response = send_request_with_retry(builder, max_retries, timeout).await?;

    let body = response.text().await?;
    let list: TargetList = serde_json::from_str(&body)
        .map_err(|e| ClientError::InvalidResponse(format!("targets list: {e}")))?;

    debug!(count = list.targets.len(), "Listed targets");
    Ok(list)
}
