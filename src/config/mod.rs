//! Configuration structures and loading utilities.
//!
//! This module contains all configuration structures used by the application,
//! including environment variable loading and default values.

pub mod app;
pub mod metrics;
pub mod resilient_client;
pub mod security;
pub mod server;

pub use app::*;
pub use metrics::*;
pub use security::*;
pub use server::*;

/// Serialises tests that modify environment variables
#[cfg(test)]
pub(crate) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
