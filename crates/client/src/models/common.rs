//! Common types shared across Activity Tracker API models.
//!
//! This module contains the error body shapes returned by the Activity Tracker
//! service and by IAM. It does NOT contain resource-specific models.

use serde::Deserialize;

/// A single entry of an Activity Tracker error body.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub more_info: Option<String>,
}

/// Activity Tracker error body: `{"errors": [...], "trace": "...", "status_code": 400}`.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiErrorResponse {
    pub errors: Vec<ApiErrorDetail>,
    #[serde(default)]
    pub trace: Option<String>,
    #[serde(default)]
    pub status_code: Option<u16>,
}

impl ApiErrorResponse {
    /// Render the error entries as `code: message` pairs joined with `; `.
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| match (&e.code, &e.message) {
                (Some(code), Some(message)) => format!("{code}: {message}"),
                (None, Some(message)) => message.clone(),
                (Some(code), None) => code.clone(),
                (None, None) => "unknown error".to_string(),
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// IAM error body: `{"errorCode": "...", "errorMessage": "..."}`.
#[derive(Debug, Deserialize, Clone)]
pub struct IamErrorResponse {
    #[serde(rename = "errorCode")]
    pub error_code: String,
    #[serde(rename = "errorMessage", default)]
    pub error_message: Option<String>,
}

impl IamErrorResponse {
    pub fn summary(&self) -> String {
        match &self.error_message {
            Some(message) => format!("{}: {}", self.error_code, message),
            None => self.error_code.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_summary() {
        let json = r#"{
            "errors": [
                {"code": "not_found", "message": "Target not found", "more_info": "https://cloud.ibm.com/docs"},
                {"message": "second problem"}
            ],
            "trace": "1a2b3c",
            "status_code": 404
        }"#;
        let body: ApiErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.summary(), "not_found: Target not found; second problem");
        assert_eq!(body.trace.as_deref(), Some("1a2b3c"));
        assert_eq!(body.status_code, Some(404));
    }

    #[test]
    fn test_api_error_requires_errors_array() {
        assert!(serde_json::from_str::<ApiErrorResponse>(r#"{"message": "nope"}"#).is_err());
    }

    #[test]
    fn test_iam_error_summary() {
        let json = r#"{"errorCode": "BXNIM0415E", "errorMessage": "Provided API key could not be found."}"#;
        let body: IamErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            body.summary(),
            "BXNIM0415E: Provided API key could not be found."
        );
    }
}
