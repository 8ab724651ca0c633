//! Business logic and service layer modules.
//!
//! Pure estimators and rules live next to the upstream clients that feed
//! them; the aggregator in [`stargazing`] ties them together.

pub mod conditions;
pub mod iss;
pub mod light_pollution;
pub mod metrics;
pub mod resilient_client;
pub mod stargazing;
pub mod timezone;
pub mod weather;

pub use iss::{IssError, IssService};
pub use metrics::*;
pub use resilient_client::{
    ResilientClient, ResilientClientConfig, ResilientClientError, ResilientClientMetrics,
};
pub use stargazing::StargazingService;
pub use timezone::{LocalTime, NightWindow, TimeSource};
pub use weather::{CurrentWeather, WeatherError, WeatherService};
