//! HTTP request handlers for API endpoints.

pub mod health;
pub mod iss;
pub mod light_pollution;
pub mod metrics;
pub mod openapi;
pub mod stargazing;
pub mod timezone;
pub mod version;
pub mod weather;

pub use health::*;
pub use iss::*;
pub use light_pollution::*;
pub use metrics::*;
pub use openapi::*;
pub use stargazing::*;
pub use timezone::*;
pub use version::*;
pub use weather::*;
