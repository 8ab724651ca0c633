//! Resilient HTTP client for upstream providers.
//!
//! Wraps `reqwest` with:
//! - a request timeout and a connect timeout
//! - a per-destination circuit breaker
//! - optional exponential-backoff retries (disabled by default, so every
//!   upstream call is attempted once)
//! - structured logging and optional Prometheus metrics
//!
//! Clients are built per request, so breaker state never outlives the
//! request that created it.

use chrono::{DateTime, Utc};
use prometheus::{CounterVec, GaugeVec, HistogramVec, Opts, Registry};
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::collections::HashMap;
use std::time::Duration;
use tokio_retry::{Retry, strategy::ExponentialBackoff};
use tracing::{error, info, warn};

/// Configuration for resilient HTTP client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResilientClientConfig {
    /// Timeout for a whole request (in seconds)
    pub request_timeout_seconds: u64,

    /// Connection timeout (in seconds)
    pub connect_timeout_seconds: u64,

    /// Retry configuration
    pub retry: RetryConfig,

    /// Circuit breaker configuration
    pub circuit_breaker: CircuitBreakerConfig,

    /// Enable detailed logging
    pub enable_detailed_logging: bool,
}

/// Retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt; zero means a single attempt
    pub max_attempts: usize,

    /// Initial retry delay in milliseconds
    pub initial_delay_ms: u64,

    /// Maximum retry delay in milliseconds
    pub max_delay_ms: u64,

    /// Treat these HTTP status codes as failures
    pub retry_on_status: Vec<u16>,
}

/// Simple circuit breaker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitBreakerConfig {
    /// Failure threshold to open the circuit
    pub failure_threshold: usize,

    /// Success threshold to close the circuit
    pub success_threshold: usize,

    /// Timeout before attempting to close circuit (in seconds)
    pub timeout_seconds: u64,
}

/// Circuit breaker state
#[derive(Debug, Clone, PartialEq)]
pub enum CircuitBreakerState {
    Closed,
    Open,
    HalfOpen,
}

/// Simple circuit breaker implementation
#[derive(Debug)]
pub struct SimpleCircuitBreaker {
    state: CircuitBreakerState,
    failure_count: usize,
    success_count: usize,
    config: CircuitBreakerConfig,
    last_failure_time: Option<std::time::Instant>,
}

impl SimpleCircuitBreaker {
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            state: CircuitBreakerState::Closed,
            failure_count: 0,
            success_count: 0,
            config,
            last_failure_time: None,
        }
    }

    pub fn call_allowed(&mut self) -> bool {
        match self.state {
            CircuitBreakerState::Closed | CircuitBreakerState::HalfOpen => true,
            CircuitBreakerState::Open => match self.last_failure_time {
                Some(last_failure)
                    if last_failure.elapsed()
                        >= Duration::from_secs(self.config.timeout_seconds) =>
                {
                    self.state = CircuitBreakerState::HalfOpen;
                    self.success_count = 0;
                    true
                }
                _ => false,
            },
        }
    }

    pub fn on_success(&mut self) {
        self.failure_count = 0;

        if self.state == CircuitBreakerState::HalfOpen {
            self.success_count += 1;
            if self.success_count >= self.config.success_threshold {
                self.state = CircuitBreakerState::Closed;
            }
        }
    }

    pub fn on_failure(&mut self) {
        self.failure_count += 1;
        self.last_failure_time = Some(std::time::Instant::now());

        if self.failure_count >= self.config.failure_threshold {
            self.state = CircuitBreakerState::Open;
        }
    }

    pub fn state(&self) -> &CircuitBreakerState {
        &self.state
    }

    fn gauge_value(&self) -> f64 {
        match self.state {
            CircuitBreakerState::Closed => 0.0,
            CircuitBreakerState::Open => 1.0,
            CircuitBreakerState::HalfOpen => 2.0,
        }
    }
}

impl Default for ResilientClientConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: 5,
            connect_timeout_seconds: 3,
            retry: RetryConfig::default(),
            circuit_breaker: CircuitBreakerConfig::default(),
            enable_detailed_logging: true,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 0,
            initial_delay_ms: 100,
            max_delay_ms: 5000,
            retry_on_status: vec![408, 429, 500, 502, 503, 504],
        }
    }
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            success_threshold: 3,
            timeout_seconds: 60,
        }
    }
}

/// Metrics for resilient HTTP client operations
#[derive(Clone)]
pub struct ResilientClientMetrics {
    /// HTTP requests by destination and outcome
    pub http_requests_total: CounterVec,

    /// HTTP request duration by destination
    pub http_request_duration_seconds: HistogramVec,

    /// Circuit breaker state by destination
    pub circuit_breaker_state: GaugeVec,
}

impl ResilientClientMetrics {
    /// Create new metrics collector
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let http_requests_total = CounterVec::new(
            Opts::new(
                "upstream_http_requests_total",
                "Total upstream HTTP requests by destination and outcome",
            ),
            &["destination", "outcome"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "upstream_http_request_duration_seconds",
                "Duration of upstream HTTP requests",
            )
            .buckets(vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["destination"],
        )?;

        let circuit_breaker_state = GaugeVec::new(
            Opts::new(
                "upstream_circuit_breaker_state",
                "Circuit breaker state (0=closed, 1=open, 2=half-open)",
            ),
            &["destination"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(circuit_breaker_state.clone()))?;

        Ok(Self {
            http_requests_total,
            http_request_duration_seconds,
            circuit_breaker_state,
        })
    }
}

/// Request context for logging and metrics
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub destination: String,
    /// URL safe for logs (API keys redacted)
    pub display_url: String,
    pub start_time: DateTime<Utc>,
}

/// Resilient HTTP client with timeouts, optional retries and circuit breakers
pub struct ResilientClient {
    client: Client,
    config: ResilientClientConfig,
    metrics: Option<ResilientClientMetrics>,
    circuit_breakers: HashMap<String, SimpleCircuitBreaker>,
}

impl ResilientClient {
    /// Create a new resilient HTTP client
    pub fn new(
        config: ResilientClientConfig,
        metrics: Option<ResilientClientMetrics>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            config,
            metrics,
            circuit_breakers: HashMap::new(),
        })
    }

    /// GET a URL and decode a successful JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &mut self,
        url: &str,
    ) -> Result<T, ResilientClientError> {
        let response = self.get(url).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResilientClientError::UnexpectedStatus(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ResilientClientError::Decode(e.to_string()))
    }

    /// Execute an HTTP GET request with resilience patterns
    pub async fn get(&mut self, url: &str) -> Result<reqwest::Response, ResilientClientError> {
        let context = RequestContext {
            destination: extract_destination(url),
            display_url: crate::telemetry::redact_api_key(url),
            start_time: Utc::now(),
        };

        let destination = context.destination.clone();
        let breaker = self
            .circuit_breakers
            .entry(destination.clone())
            .or_insert_with(|| SimpleCircuitBreaker::new(self.config.circuit_breaker.clone()));

        let allowed = breaker.call_allowed();
        let state = breaker.gauge_value();
        self.record_circuit_breaker_state(&destination, state);

        if !allowed {
            warn!(
                destination = %destination,
                url = %context.display_url,
                "Circuit breaker is open, rejecting request"
            );
            return Err(ResilientClientError::CircuitBreakerOpen);
        }

        let retry_strategy = ExponentialBackoff::from_millis(self.config.retry.initial_delay_ms)
            .max_delay(Duration::from_millis(self.config.retry.max_delay_ms))
            .map(tokio_retry::strategy::jitter)
            .take(self.config.retry.max_attempts);

        let url = url.to_string();
        let client = self.client.clone();
        let config = self.config.clone();
        let attempt_context = context.clone();

        let result = Retry::spawn(retry_strategy, || {
            let client = client.clone();
            let url = url.clone();
            let context = attempt_context.clone();
            let config = config.clone();

            async move { send_once(&client, &url, &context, &config).await }
        })
        .await;

        let elapsed = (Utc::now() - context.start_time)
            .to_std()
            .unwrap_or_default();

        let outcome = match &result {
            Ok(_) => "success",
            Err(ResilientClientError::RetryableStatus(_)) => "failed_status",
            Err(ResilientClientError::NetworkError(_)) => "network_error",
            Err(ResilientClientError::Timeout) => "timeout",
            Err(_) => "error",
        };
        self.record_request_metrics(&destination, outcome, elapsed);

        if let Some(breaker) = self.circuit_breakers.get_mut(&destination) {
            if result.is_ok() {
                breaker.on_success();
            } else {
                breaker.on_failure();
            }
        }

        result
    }

    fn record_request_metrics(&self, destination: &str, outcome: &str, duration: Duration) {
        if let Some(metrics) = &self.metrics {
            metrics
                .http_requests_total
                .with_label_values(&[destination, outcome])
                .inc();
            metrics
                .http_request_duration_seconds
                .with_label_values(&[destination])
                .observe(duration.as_secs_f64());
        }
    }

    fn record_circuit_breaker_state(&self, destination: &str, state: f64) {
        if let Some(metrics) = &self.metrics {
            metrics
                .circuit_breaker_state
                .with_label_values(&[destination])
                .set(state);
        }
    }
}

/// One attempt, classified for the retry loop
async fn send_once(
    client: &Client,
    url: &str,
    context: &RequestContext,
    config: &ResilientClientConfig,
) -> Result<reqwest::Response, ResilientClientError> {
    let start = std::time::Instant::now();

    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            let duration_ms = start.elapsed().as_millis();

            if is_retry_status(status, &config.retry.retry_on_status) {
                if config.enable_detailed_logging {
                    warn!(
                        destination = %context.destination,
                        url = %context.display_url,
                        status,
                        duration_ms,
                        "Upstream request failed with retryable status"
                    );
                }
                Err(ResilientClientError::RetryableStatus(status))
            } else {
                if config.enable_detailed_logging {
                    info!(
                        destination = %context.destination,
                        url = %context.display_url,
                        status,
                        duration_ms,
                        "Upstream request completed"
                    );
                }
                Ok(response)
            }
        }
        Err(e) if e.is_timeout() => {
            if config.enable_detailed_logging {
                warn!(
                    destination = %context.destination,
                    url = %context.display_url,
                    timeout_seconds = config.request_timeout_seconds,
                    "Upstream request timed out"
                );
            }
            Err(ResilientClientError::Timeout)
        }
        Err(e) => {
            if config.enable_detailed_logging {
                error!(
                    destination = %context.destination,
                    url = %context.display_url,
                    error = %e,
                    duration_ms = start.elapsed().as_millis(),
                    "Upstream request failed with network error"
                );
            }
            Err(ResilientClientError::NetworkError(e))
        }
    }
}

/// Extract destination (host) from URL for metrics and circuit breaker grouping
fn extract_destination(url: &str) -> String {
    url::Url::parse(url)
        .map(|u| u.host_str().unwrap_or("unknown").to_string())
        .unwrap_or_else(|_| "invalid_url".to_string())
}

/// Check if status code counts as a failed attempt
fn is_retry_status(status: u16, retry_statuses: &[u16]) -> bool {
    retry_statuses.contains(&status)
}

/// Errors that can occur with the resilient client
#[derive(Debug, thiserror::Error)]
pub enum ResilientClientError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Circuit breaker is open")]
    CircuitBreakerOpen,

    #[error("Retryable status code: {0}")]
    RetryableStatus(u16),

    #[error("Unexpected status code: {0}")]
    UnexpectedStatus(u16),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}
