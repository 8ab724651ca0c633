//! Data models and schemas for the Stargazer API.
//!
//! This module contains the request/response models served over HTTP and the
//! domain types passed between the estimator, evaluator and aggregator.

pub mod api;
pub mod stargazing;

pub use api::*;
pub use stargazing::*;
