//! Shared test utilities for atracker-cli integration tests.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper are hermetic: no `.env` loading
//!   and no IBM Cloud variables inherited from the host.
//! - `IBMCLOUD_IAM_TOKEN` is set to "test-token" unless overridden.

#![allow(dead_code, unused_imports)]

use assert_cmd::Command;

pub use atracker_client::testing::load_fixture;
pub use wiremock::matchers::{header, method, path};
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Returns a hermetic `atracker-cli` command for integration testing.
pub fn atracker_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("atracker-cli");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    cmd.env("IBMCLOUD_IAM_TOKEN", "test-token");

    cmd.env_remove("IBMCLOUD_API_KEY")
        .env_remove("IC_API_KEY")
        .env_remove("IBMCLOUD_REGION")
        .env_remove("IC_REGION")
        .env_remove("IBMCLOUD_ATRACKER_API_ENDPOINT")
        .env_remove("IBMCLOUD_IAM_API_ENDPOINT")
        .env_remove("IBMCLOUD_TIMEOUT")
        .env_remove("IBMCLOUD_MAX_RETRIES")
        .env_remove("IBMCLOUD_SKIP_VERIFY")
        .env_remove("RUST_LOG");

    cmd
}

/// Hermetic command pointed at `base_url`.
pub fn atracker_cmd_with_base_url(base_url: &str) -> Command {
    let mut cmd = atracker_cmd();
    cmd.env("IBMCLOUD_ATRACKER_API_ENDPOINT", base_url);
    cmd
}

/// Mount the two-target listing on `server`, expecting the test token.
pub async fn mount_targets(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v2/targets"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("targets/list_targets.json")),
        )
        .mount(server)
        .await;
}
