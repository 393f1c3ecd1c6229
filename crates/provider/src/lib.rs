//! Activity Tracker provider data sources.
//!
//! This crate holds the host-framework surface a data source is written
//! against (schema declarations, the [`ResourceData`] state handle, client
//! sessions and clocks) and the `targets` data source itself.

pub mod clock;
pub mod data_sources;
pub mod error;
pub mod resource_data;
pub mod schema;
pub mod session;

pub use clock::{Clock, SystemClock};
pub use data_sources::{TargetView, TargetsDataSource};
pub use error::{ProviderError, Result};
pub use resource_data::{ResourceData, SENSITIVE_PLACEHOLDER};
pub use schema::{Resource, Schema, ValueType};
pub use session::{ClientSession, ProviderSession, TargetsApi};
pub use tokio_util::sync::CancellationToken;
