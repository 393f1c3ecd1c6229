//! Target listing tests.
//!
//! This module tests `GET /api/v2/targets`:
//! - Request shape (path, bearer header, accept header)
//! - Parsing of COS and LogDNA targets, including credentials and timestamps
//! - Empty lists and a missing `targets` key
//!
//! # What this does NOT handle
//! - IAM exchange (see auth_tests.rs)
//! - Error statuses (see error_tests.rs)

mod common;

use common::*;
use secrecy::ExposeSecret;
use wiremock::matchers::{header, method, path};

#[tokio::test]
async fn test_list_targets_parses_fixture() {
    let mock_server = MockServer::start().await;
    let fixture = load_fixture("targets/list_targets.json");

    Mock::given(method("GET"))
        .and(path("/api/v2/targets"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&fixture))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let list = endpoints::list_targets(&client, &mock_server.uri(), "test-token", 0, TEST_TIMEOUT)
        .await
        .unwrap();

    assert_eq!(list.targets.len(), 2);

    let cos = &list.targets[0];
    assert_eq!(cos.name.as_deref(), Some("my-cos-target"));
    assert_eq!(cos.target_type.as_deref(), Some("cloud_object_storage"));
    assert_eq!(
        cos.encryption_key.as_ref().unwrap().expose_secret(),
        "cos-encryption-key-value"
    );
    let endpoint = cos.cos_endpoint.as_ref().unwrap();
    assert_eq!(endpoint.bucket.as_deref(), Some("my-atracker-bucket"));
    assert_eq!(
        endpoint.api_key.as_ref().unwrap().expose_secret(),
        "cos-writer-api-key-value"
    );
    assert!(!endpoint.service_to_service_enabled);
    assert!(cos.logdna_endpoint.is_none());
    assert_eq!(
        cos.write_status.as_ref().unwrap().status.as_deref(),
        Some("success")
    );
    assert!(cos.write_status.as_ref().unwrap().last_failure.is_none());

    let logdna = &list.targets[1];
    assert_eq!(logdna.name.as_deref(), Some("my-logdna-target"));
    assert!(logdna.cos_endpoint.is_none());
    assert_eq!(
        logdna
            .logdna_endpoint
            .as_ref()
            .unwrap()
            .ingestion_key
            .as_ref()
            .unwrap()
            .expose_secret(),
        "logdna-ingestion-key-value"
    );
    let status = logdna.write_status.as_ref().unwrap();
    assert_eq!(status.status.as_deref(), Some("failed"));
    assert_eq!(
        status.last_failure.unwrap().to_rfc3339(),
        "2021-06-01T08:30:00+00:00"
    );
}

#[tokio::test]
async fn test_list_targets_empty() {
    let mock_server = MockServer::start().await;
    let fixture = load_fixture("targets/list_targets_empty.json");

    Mock::given(method("GET"))
        .and(path("/api/v2/targets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&fixture))
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let list = endpoints::list_targets(&client, &mock_server.uri(), "test-token", 0, TEST_TIMEOUT)
        .await
        .unwrap();

    assert!(list.targets.is_empty());
}

#[tokio::test]
async fn test_list_targets_missing_key_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/targets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let list = endpoints::list_targets(&client, &mock_server.uri(), "test-token", 0, TEST_TIMEOUT)
        .await
        .unwrap();

    assert!(list.targets.is_empty());
}

#[tokio::test]
async fn test_client_list_targets_with_bearer_token() {
    let mock_server = MockServer::start().await;
    let fixture = load_fixture("targets/list_targets.json");

    Mock::given(method("GET"))
        .and(path("/api/v2/targets"))
        .and(header("Authorization", "Bearer static-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&fixture))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = bearer_client(&format!("{}/", mock_server.uri()), "static-token");
    let list = client.list_targets().await.unwrap();

    let names: Vec<_> = list
        .targets
        .iter()
        .map(|t| t.name.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(names, vec!["my-cos-target", "my-logdna-target"]);
}
