//! `atracker_targets` data source: list Activity Tracker targets.
//!
//! Responsibilities:
//! - Declare the data source schema (`name` input, `targets` output).
//! - Fetch targets through a [`ClientSession`], filter by exact name, and
//!   project each record into the generic attribute map.
//! - Assign the result-set identifier (the filter, or a clock-derived token).
//!
//! Does NOT handle:
//! - Retries or caching; every read fetches fresh data once.
//!
//! Invariants:
//! - An empty `name` is the same as no filter.
//! - Absent optional fields are omitted, never rendered as null or "".
//! - Endpoint and write-status records are single-element lists.
//! - Deprecated attributes carry the same values as their replacements.
//! - On any error the state handle's `targets` and id are left unset.

use std::sync::Arc;

use atracker_client::{CosEndpoint, LogdnaEndpoint, Target, WriteStatus};
use chrono::{DateTime, SecondsFormat, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::clock::{Clock, SystemClock, timestamp_id};
use crate::error::{ProviderError, Result};
use crate::resource_data::ResourceData;
use crate::schema::{Resource, Schema};
use crate::session::{ClientSession, TargetsApi};

/// Name of this data source in provider configuration.
pub const DATA_SOURCE_NAME: &str = "ibm_atracker_targets";

const NAME: &str = "name";
const TARGETS: &str = "targets";

const WRITE_STATUS_DESCRIPTION: &str =
    "The status of the write attempt to the target with the provided endpoint parameters.";

fn write_status_schema() -> Result<Resource> {
    Resource::new([
        (
            "status",
            Schema::string("The status such as failed or success.").computed(),
        ),
        (
            "last_failure",
            Schema::string("The timestamp of the failure.").computed(),
        ),
        (
            "reason_for_last_failure",
            Schema::string("Detailed description of the cause of the failure.").computed(),
        ),
    ])
}

/// Schema of the targets data source.
pub fn targets_schema() -> Result<Resource> {
    let cos_endpoint = Resource::new([
        (
            "endpoint",
            Schema::string("The host name of the Cloud Object Storage endpoint.").computed(),
        ),
        (
            "target_crn",
            Schema::string("The CRN of the Cloud Object Storage instance.").computed(),
        ),
        (
            "bucket",
            Schema::string("The bucket name under the Cloud Object Storage instance.").computed(),
        ),
        (
            "api_key",
            Schema::string(
                "The IAM API key that has writer access to the Cloud Object Storage instance. This credential is masked in the response. This is required if service_to_service is not enabled.",
            )
            .computed()
            .sensitive(),
        ),
        (
            "service_to_service_enabled",
            Schema::bool(
                "ATracker service is enabled to support service to service authentication. If service to service is enabled then set this flag is true and do not supply apikey.",
            )
            .computed(),
        ),
    ])?;

    let logdna_endpoint = Resource::new([
        (
            "target_crn",
            Schema::string("The CRN of the LogDNA instance.").computed(),
        ),
        (
            "ingestion_key",
            Schema::string(
                "The LogDNA ingestion key is used for routing logs to a specific LogDNA instance.",
            )
            .computed()
            .sensitive(),
        ),
    ])?;

    let target = Resource::new([
        (
            "id",
            Schema::string("The uuid of the target resource.").computed(),
        ),
        (
            "name",
            Schema::string("The name of the target resource.").computed(),
        ),
        (
            "crn",
            Schema::string("The crn of the target resource.").computed(),
        ),
        (
            "target_type",
            Schema::string("The type of the target.").computed(),
        ),
        (
            "region",
            Schema::string(
                "Included this optional field if you used it to create a target in a different region other than the one you are connected.",
            )
            .computed(),
        ),
        (
            "encryption_key",
            Schema::string(
                "The encryption key that is used to encrypt events before Activity Tracker services buffer them on storage. This credential is masked in the response.",
            )
            .computed()
            .sensitive(),
        ),
        (
            "cos_endpoint",
            Schema::list(
                "Property values for a Cloud Object Storage Endpoint.",
                cos_endpoint,
            )
            .computed(),
        ),
        (
            "logdna_endpoint",
            Schema::list("Property values for a LogDNA Endpoint.", logdna_endpoint).computed(),
        ),
        (
            "cos_write_status",
            Schema::list(
                "The status of the write attempt with the provided cos_endpoint parameters.",
                write_status_schema()?,
            )
            .computed()
            .deprecated("use write_status instead"),
        ),
        (
            "write_status",
            Schema::list(WRITE_STATUS_DESCRIPTION, write_status_schema()?).computed(),
        ),
        (
            "created",
            Schema::string("The timestamp of the target creation time.")
                .computed()
                .deprecated("use created_at instead"),
        ),
        (
            "updated",
            Schema::string("The timestamp of the target last updated time.")
                .computed()
                .deprecated("use updated_at instead"),
        ),
        (
            "created_at",
            Schema::string("The timestamp of the target creation time.").computed(),
        ),
        (
            "updated_at",
            Schema::string("The timestamp of the target last updated time.").computed(),
        ),
        (
            "api_version",
            Schema::int("The API version of the target.").computed(),
        ),
    ])?;

    Resource::new([
        (
            NAME,
            Schema::string("The name of the target resource.").optional(),
        ),
        (
            TARGETS,
            Schema::list("A list of target resources.", target).computed(),
        ),
    ])
}

/// Read handler for the targets data source.
#[derive(Debug, Clone)]
pub struct TargetsDataSource<C = SystemClock> {
    schema: Arc<Resource>,
    clock: C,
}

impl TargetsDataSource<SystemClock> {
    pub fn new() -> Result<Self> {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> TargetsDataSource<C> {
    /// Create the data source with an injected time source for unfiltered ids.
    pub fn with_clock(clock: C) -> Result<Self> {
        Ok(Self {
            schema: Arc::new(targets_schema()?),
            clock,
        })
    }

    pub fn schema(&self) -> Arc<Resource> {
        Arc::clone(&self.schema)
    }

    /// An empty state handle bound to this data source's schema.
    pub fn resource_data(&self) -> ResourceData {
        ResourceData::new(self.schema())
    }

    /// Evaluate the data source into `d`.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Cancelled`] if `ctx` is cancelled before the read completes.
    /// - [`ProviderError::Session`] if `meta` cannot produce a client.
    /// - [`ProviderError::ListTargets`] if the remote call fails.
    /// - [`ProviderError::TargetsNotFound`] if a name filter matches nothing.
    /// - [`ProviderError::SetAttribute`] if a projected record does not fit the schema.
    pub async fn read(
        &self,
        ctx: &CancellationToken,
        d: &mut ResourceData,
        meta: &impl ClientSession,
    ) -> Result<()> {
        if ctx.is_cancelled() {
            return Err(ProviderError::Cancelled);
        }

        let client = tokio::select! {
            biased;
            _ = ctx.cancelled() => return Err(ProviderError::Cancelled),
            client = meta.atracker_v2() => client?,
        };

        let list = tokio::select! {
            biased;
            _ = ctx.cancelled() => return Err(ProviderError::Cancelled),
            list = client.list_targets() => list.map_err(|e| {
                debug!(
                    status = ?e.status(),
                    url = e.url().unwrap_or_default(),
                    request_id = e.request_id().unwrap_or_default(),
                    error = %e,
                    "list targets failed"
                );
                ProviderError::ListTargets(e)
            })?,
        };

        let (targets, id) = match d.get_ok_str(NAME) {
            Some(name) => {
                let name = name.to_string();
                let matched = filter_by_name(list.targets, &name);
                debug!(name = %name, matched = matched.len(), "Filtered targets by name");
                if matched.is_empty() {
                    return Err(ProviderError::TargetsNotFound { name });
                }
                (matched, name)
            }
            None => (list.targets, timestamp_id(self.clock.now())),
        };

        let projected = targets
            .iter()
            .map(|t| Value::Object(TargetView::new(t).attributes()))
            .collect();
        d.set(TARGETS, Value::Array(projected))?;
        d.set_id(id);
        Ok(())
    }
}

/// Keep targets whose name equals `name` exactly, preserving order.
pub fn filter_by_name(targets: Vec<Target>, name: &str) -> Vec<Target> {
    targets
        .into_iter()
        .filter(|t| t.name.as_deref() == Some(name))
        .collect()
}

/// Boundary projection of a [`Target`] into data source attributes.
#[derive(Debug, Clone, Copy)]
pub struct TargetView<'a> {
    target: &'a Target,
}

impl<'a> TargetView<'a> {
    pub fn new(target: &'a Target) -> Self {
        Self { target }
    }

    /// The attribute map for one element of `targets`.
    pub fn attributes(&self) -> Map<String, Value> {
        let t = self.target;
        let mut out = Map::new();

        put_str(&mut out, "id", t.id.as_deref());
        put_str(&mut out, "name", t.name.as_deref());
        put_str(&mut out, "crn", t.crn.as_deref());
        put_str(&mut out, "target_type", t.target_type.as_deref());
        put_str(&mut out, "region", t.region.as_deref());
        put_secret(&mut out, "encryption_key", t.encryption_key.as_ref());

        if let Some(cos) = &t.cos_endpoint {
            out.insert("cos_endpoint".into(), single(cos_endpoint(cos)));
        }
        if let Some(logdna) = &t.logdna_endpoint {
            out.insert("logdna_endpoint".into(), single(logdna_endpoint(logdna)));
        }
        if let Some(status) = &t.write_status {
            let status = single(write_status(status));
            out.insert("cos_write_status".into(), status.clone());
            out.insert("write_status".into(), status);
        }

        let created = t.created_at.as_ref().map(format_timestamp);
        let updated = t.updated_at.as_ref().map(format_timestamp);
        put_str(&mut out, "created", created.as_deref());
        put_str(&mut out, "created_at", created.as_deref());
        put_str(&mut out, "updated", updated.as_deref());
        put_str(&mut out, "updated_at", updated.as_deref());

        if let Some(version) = t.api_version {
            out.insert("api_version".into(), Value::from(version));
        }

        out
    }
}

fn cos_endpoint(cos: &CosEndpoint) -> Map<String, Value> {
    let mut out = Map::new();
    put_str(&mut out, "endpoint", cos.endpoint.as_deref());
    put_str(&mut out, "target_crn", cos.target_crn.as_deref());
    put_str(&mut out, "bucket", cos.bucket.as_deref());
    put_secret(&mut out, "api_key", cos.api_key.as_ref());
    out.insert(
        "service_to_service_enabled".into(),
        Value::Bool(cos.service_to_service_enabled),
    );
    out
}

fn logdna_endpoint(logdna: &LogdnaEndpoint) -> Map<String, Value> {
    let mut out = Map::new();
    put_str(&mut out, "target_crn", logdna.target_crn.as_deref());
    put_secret(&mut out, "ingestion_key", logdna.ingestion_key.as_ref());
    out
}

fn write_status(status: &WriteStatus) -> Map<String, Value> {
    let mut out = Map::new();
    put_str(&mut out, "status", status.status.as_deref());
    let last_failure = status.last_failure.as_ref().map(format_timestamp);
    put_str(&mut out, "last_failure", last_failure.as_deref());
    put_str(
        &mut out,
        "reason_for_last_failure",
        status.reason_for_last_failure.as_deref(),
    );
    out
}

/// RFC 3339 with millisecond precision and a `Z` suffix.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn single(record: Map<String, Value>) -> Value {
    Value::Array(vec![Value::Object(record)])
}

fn put_str(out: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(v) = value {
        out.insert(key.to_string(), Value::String(v.to_string()));
    }
}

fn put_secret(out: &mut Map<String, Value>, key: &str, value: Option<&SecretString>) {
    put_str(out, key, value.map(|s| s.expose_secret()));
}
