//! REST API endpoint implementations.

mod iam;
mod request;
mod targets;

pub use iam::exchange_api_key;
pub use request::send_request_with_retry;
pub use targets::list_targets;
