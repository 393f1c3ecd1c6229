//! Target models for the Activity Tracker targets API.
//!
//! A target is a delivery destination for audit events: a Cloud Object Storage
//! bucket or a LogDNA instance.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::Deserialize;

/// Response of `GET /api/v2/targets`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TargetList {
    /// Targets in service order. A missing key is an empty list.
    #[serde(default)]
    pub targets: Vec<Target>,
}

/// A configured Activity Tracker target.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Target {
    /// The uuid of the target.
    pub id: Option<String>,
    pub name: Option<String>,
    pub crn: Option<String>,
    /// `cloud_object_storage`, `logdna`, or a type this client does not know yet.
    pub target_type: Option<String>,
    pub region: Option<String>,
    /// Key used to encrypt events before they are buffered on storage.
    #[serde(default, deserialize_with = "crate::serde_helpers::opt_secret_string")]
    pub encryption_key: Option<SecretString>,
    pub cos_endpoint: Option<CosEndpoint>,
    pub logdna_endpoint: Option<LogdnaEndpoint>,
    pub write_status: Option<WriteStatus>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub api_version: Option<i64>,
}

/// Cloud Object Storage endpoint of a target.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CosEndpoint {
    pub endpoint: Option<String>,
    pub target_crn: Option<String>,
    pub bucket: Option<String>,
    /// Writer API key. Absent when service to service auth is enabled.
    #[serde(default, deserialize_with = "crate::serde_helpers::opt_secret_string")]
    pub api_key: Option<SecretString>,
    #[serde(default)]
    pub service_to_service_enabled: bool,
}

/// LogDNA endpoint of a target.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct LogdnaEndpoint {
    pub target_crn: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::opt_secret_string")]
    pub ingestion_key: Option<SecretString>,
}

/// Result of the last write attempt to a target.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct WriteStatus {
    /// `success` or `failed`.
    pub status: Option<String>,
    pub last_failure: Option<DateTime<Utc>>,
    pub reason_for_last_failure: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_deserialize_cos_target() {
        let json = r#"{
            "id": "f7dcfae6-e7c5-08ca-451b-fdfa696c9bb6",
            "name": "my-cos-target",
            "crn": "crn:v1:bluemix:public:atracker:us-south:a/11111111111111111111111111111111:b6eec08b-5201-08ca-451b-cd71523e3626::",
            "target_type": "cloud_object_storage",
            "region": "us-south",
            "encryption_key": "REDACTED",
            "cos_endpoint": {
                "endpoint": "s3.private.us-east.cloud-object-storage.appdomain.cloud",
                "target_crn": "crn:v1:bluemix:public:cloud-object-storage:global:a/11111111111111111111111111111111:22222222-2222-2222-2222-222222222222::",
                "bucket": "my-atracker-bucket",
                "api_key": "xxxxxxxxxxxxxx",
                "service_to_service_enabled": false
            },
            "write_status": {
                "status": "failed",
                "last_failure": "2021-05-18T20:15:12.353Z",
                "reason_for_last_failure": "Provided API key could not be found"
            },
            "created_at": "2021-05-18T20:15:12.353Z",
            "updated_at": "2021-05-18T20:15:12.353Z",
            "api_version": 2,
            "unknown_field": "ignored"
        }"#;

        let target: Target = serde_json::from_str(json).unwrap();
        assert_eq!(target.name.as_deref(), Some("my-cos-target"));
        assert_eq!(target.target_type.as_deref(), Some("cloud_object_storage"));
        assert_eq!(target.api_version, Some(2));
        assert_eq!(target.encryption_key.unwrap().expose_secret(), "REDACTED");

        let cos = target.cos_endpoint.unwrap();
        assert_eq!(cos.bucket.as_deref(), Some("my-atracker-bucket"));
        assert_eq!(cos.api_key.unwrap().expose_secret(), "xxxxxxxxxxxxxx");
        assert!(!cos.service_to_service_enabled);

        let status = target.write_status.unwrap();
        assert_eq!(status.status.as_deref(), Some("failed"));
        assert_eq!(
            status.last_failure.unwrap().timestamp_millis(),
            target.created_at.unwrap().timestamp_millis()
        );
        assert!(target.logdna_endpoint.is_none());
    }

    #[test]
    fn test_deserialize_minimal_target() {
        let target: Target = serde_json::from_str(r#"{"name": "bare"}"#).unwrap();
        assert_eq!(target.name.as_deref(), Some("bare"));
        assert!(target.id.is_none());
        assert!(target.cos_endpoint.is_none());
        assert!(target.created_at.is_none());
    }

    #[test]
    fn test_service_to_service_defaults_to_false() {
        let cos: CosEndpoint = serde_json::from_str(r#"{"bucket": "b"}"#).unwrap();
        assert!(!cos.service_to_service_enabled);
        assert!(cos.api_key.is_none());
    }

    #[test]
    fn test_target_list_missing_key_is_empty() {
        let list: TargetList = serde_json::from_str("{}").unwrap();
        assert!(list.targets.is_empty());
    }

    #[test]
    fn test_invalid_timestamp_is_rejected() {
        let result = serde_json::from_str::<Target>(r#"{"created_at": "yesterday"}"#);
        assert!(result.is_err());
    }
}
