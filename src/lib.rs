//! Stargazer API - is tonight a good night to look at the stars?
//!
//! An Actix Web + Paperclip service that combines:
//! - current weather from OpenWeatherMap
//! - a light-pollution estimate from a hand-authored table of cities and regions
//! - the local time at the location, to decide whether it is night
//!
//! It also proxies the current ISS position and serves a simulated
//! conditions endpoint for demos.
//!
//! ## Architecture
//!
//! - `models/` - Domain types and request/response models
//! - `handlers/` - HTTP request handlers and the app factory
//! - `middleware/` - Response headers, request IDs and metrics
//! - `services/` - Estimators, condition rules, upstream clients and the aggregator
//! - `config/` - Configuration structures and environment loading
//! - `telemetry` - Tracing setup and log redaction
//!
//! ## Quick Start
//!
//! ```no_run
//! use actix_web::{HttpServer, web};
//! use stargazer_api::{AppMetrics, StargazerConfig, create_app};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = StargazerConfig::from_env();
//!     let metrics = web::Data::new(AppMetrics::new().expect("metrics registry"));
//!     HttpServer::new(move || create_app(config.clone(), metrics.clone()))
//!         .bind(("127.0.0.1", 5000))?
//!         .run()
//!         .await
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod utils;

pub use config::{MetricsConfig, SecurityHeadersConfig, ServerConfig, StargazerConfig};
pub use error::ApiError;
pub use handlers::{
    create_app, create_openapi_spec, get_metrics, health, iss, light_pollution, stargazing,
    stargazing_possibility, timezone, version, weather,
};
pub use middleware::{MetricsMiddleware, RequestIdMiddleware, SecurityHeaders};
pub use models::{
    Coordinate, CoordinateQuery, ErrorResponse, FactorLabel, FactorLabels, HealthResponse,
    IssPosition, LightPollutionEstimate, LightPollutionLevel, PossibilityResponse,
    StargazingReport, TimezoneResponse, VersionResponse, WeatherResponse, WeatherSnapshot,
};
pub use services::{
    AppMetrics, IssService, ResilientClient, ResilientClientConfig, ResilientClientError,
    ResilientClientMetrics, StargazingService, WeatherService,
};
pub use telemetry::{TelemetryConfig, init_tracing};
