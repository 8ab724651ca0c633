//! Custom middleware implementations for the API.
//!
//! Response headers, request IDs and request metrics.

pub mod metrics;
pub mod request_id;
pub mod security;

pub use metrics::*;
pub use request_id::*;
pub use security::*;
