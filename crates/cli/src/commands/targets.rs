//! `targets` command: evaluate the targets data source once.

use anyhow::{Context, Result};
use atracker_config::Config;
use atracker_provider::{CancellationToken, ProviderSession, ResourceData, TargetsDataSource};
use serde_json::Value;
use tracing::info;

/// Read targets, optionally filtered by exact `name`, into a fresh state handle.
pub async fn run(
    config: Config,
    name: Option<String>,
    cancel: &CancellationToken,
) -> Result<ResourceData> {
    let data_source = TargetsDataSource::new().context("Failed to build targets schema")?;
    let mut d = data_source.resource_data();
    if let Some(name) = name {
        d = d
            .with_input("name", Value::String(name))
            .context("Invalid --name")?;
    }

    let session = ProviderSession::new(config);
    data_source
        .read(cancel, &mut d, &session)
        .await
        .context("Failed to read targets")?;

    info!(id = d.id().unwrap_or_default(), "Read targets");
    Ok(d)
}
