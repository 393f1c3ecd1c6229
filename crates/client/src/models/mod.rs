//! Data models for Activity Tracker and IAM responses.
//!
//! Types are organized by resource in submodules and re-exported here
//! for convenient access.

pub mod common;
pub mod iam;
pub mod targets;

pub use common::{ApiErrorDetail, ApiErrorResponse, IamErrorResponse};
pub use iam::{IAM_API_KEY_GRANT_TYPE, IamTokenResponse};
pub use targets::{CosEndpoint, LogdnaEndpoint, Target, TargetList, WriteStatus};
