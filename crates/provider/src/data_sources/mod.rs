//! Data sources exposed by the provider.

pub mod targets;

pub use targets::{
    DATA_SOURCE_NAME, TargetView, TargetsDataSource, filter_by_name, format_timestamp,
    targets_schema,
};
