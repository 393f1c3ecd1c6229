//! IBM Cloud Activity Tracker REST client.
//!
//! This crate provides a typed client for the Activity Tracker v2 targets API.
//! It authenticates either with a pre-issued IAM token or by exchanging an
//! IBM Cloud API key at IAM, caching and proactively refreshing the token.

mod auth;
pub mod client;
pub mod error;
pub mod models;
mod serde_helpers;

pub mod endpoints;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use auth::{AuthStrategy, TokenManager};
pub use client::AtrackerClient;
pub use client::builder::AtrackerClientBuilder;
pub use error::{ClientError, Result};
pub use models::{CosEndpoint, LogdnaEndpoint, Target, TargetList, WriteStatus};
