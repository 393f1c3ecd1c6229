//! Command implementations.

pub mod targets;
