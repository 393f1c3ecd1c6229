//! Target API methods for [`AtrackerClient`].
//!
//! # What this module does NOT handle:
//! - Low-level target endpoint HTTP calls (in [`crate::endpoints`])
//! - Filtering by name (callers filter the returned list)

use crate::client::AtrackerClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::TargetList;

impl AtrackerClient {
    /// List all targets, in the order the service returns them.
    pub async fn list_targets(&self) -> Result<TargetList> {
        let token = self.get_auth_token().await?;
        endpoints::list_targets(
            &self.http,
            &self.base_url,
            &token,
            self.max_retries,
            self.timeout,
        )
        .await
    }
}
