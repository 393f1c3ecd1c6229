//! Request sending with optional retry for HTTP 429 responses.
//!
//! This module sends a prepared `reqwest::RequestBuilder`, retries rate-limited
//! responses with exponential backoff when the caller allows retries, and turns
//! every non-success response into a [`ClientError::ApiError`] carrying the
//! status, URL, service message and request id.

use reqwest::{RequestBuilder, Response};
use std::time::Duration;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::models::{ApiErrorResponse, IamErrorResponse};

/// Headers that carry the service-assigned request id, in lookup order.
const REQUEST_ID_HEADERS: [&str; 2] = ["X-Request-Id", "X-Correlation-Id"];

/// Sends an HTTP request, retrying HTTP 429 responses up to `max_retries` times.
///
/// - `max_retries == 0` means a single attempt; a 429 is then reported as an
///   ordinary `ApiError`.
/// - Backoff is `2^attempt` seconds (1s, 2s, 4s, ...).
/// - Transport timeouts are reported as `ClientError::Timeout(timeout)`.
///
/// # Errors
///
/// Returns `ClientError::MaxRetriesExceeded` when every allowed attempt was
/// rate limited, `ClientError::ApiError` for any other non-success status, and
/// `ClientError::HttpError` for transport failures.
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
    timeout: Duration,
) -> Result<Response> {
    for attempt in 0..=max_retries {
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None => {
                if attempt == 0 {
                    debug!("Request builder cannot be cloned, single attempt only");
                    let response = builder
                        .send()
                        .await
                        .map_err(|e| transport_error(e, timeout))?;
                    return check_status(response).await;
                }
                debug!("Cannot clone request builder for retry");
                return Err(ClientError::MaxRetriesExceeded(attempt));
            }
        };

        let response = attempt_builder
            .send()
            .await
            .map_err(|e| transport_error(e, timeout))?;

        if response.status().as_u16() == 429 && max_retries > 0 {
            if attempt < max_retries {
                let backoff_secs = 2u64.pow(attempt as u32);
                debug!(
                    attempt = attempt + 1,
                    max_retries = max_retries + 1,
                    backoff_secs = backoff_secs,
                    "Rate limited (HTTP 429), retrying with exponential backoff"
                );
                tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
                continue;
            }
            debug!(
                attempts = attempt + 1,
                "Max retries exhausted for rate-limited request"
            );
            return Err(ClientError::MaxRetriesExceeded(max_retries + 1));
        }

        if attempt > 0 && response.status().is_success() {
            debug!(attempt = attempt + 1, "Request succeeded after retry");
        }
        return check_status(response).await;
    }

    Err(ClientError::MaxRetriesExceeded(max_retries + 1))
}

fn transport_error(err: reqwest::Error, timeout: Duration) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout(timeout)
    } else {
        ClientError::from(err)
    }
}

/// Pass successful responses through; convert everything else to `ApiError`.
async fn check_status(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let url = response.url().to_string();
    let header_request_id = REQUEST_ID_HEADERS.iter().find_map(|name| {
        response
            .headers()
            .get(*name)
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string())
    });
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    let (message, trace) = parse_error_body(&body);

    Err(ClientError::ApiError {
        status,
        url,
        message,
        request_id: header_request_id.or(trace),
    })
}

/// Build a display message from an error body, plus the body's trace id if any.
///
/// Falls back to the raw body when it matches neither the Activity Tracker
/// nor the IAM error shape.
pub(crate) fn parse_error_body(body: &str) -> (String, Option<String>) {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorResponse>(body) {
        return (parsed.summary(), parsed.trace);
    }
    if let Ok(parsed) = serde_json::from_str::<IamErrorResponse>(body) {
        return (parsed.summary(), None);
    }
    (body.to_string(), None)
}
