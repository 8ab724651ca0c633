//! Metrics collection and Prometheus integration service.

use crate::services::resilient_client::ResilientClientMetrics;
use prometheus::{
    Counter, CounterVec, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};
use std::time::{Duration, Instant};

/// Build metadata, present only when the build script found git
pub const GIT_SHA: &str = match option_env!("VERGEN_GIT_SHA") {
    Some(sha) => sha,
    None => "unknown",
};

pub const BUILD_TIMESTAMP: &str = match option_env!("VERGEN_BUILD_TIMESTAMP") {
    Some(ts) => ts,
    None => "unknown",
};

/// Application metrics collector for Prometheus integration
#[derive(Clone)]
pub struct AppMetrics {
    pub registry: Registry,
    pub http_requests_total: CounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub app_uptime_seconds: Gauge,
    pub app_info: CounterVec,
    pub upstream_failures_total: CounterVec,
    pub light_pollution_fallbacks_total: Counter,
    /// Handed to every upstream client so all series share one registry
    pub upstream: ResilientClientMetrics,
    pub start_time: Instant,
}

impl AppMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = CounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "status", "route"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![
                0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ]),
            &["method", "route"],
        )?;

        let app_uptime_seconds = Gauge::new("app_uptime_seconds", "Application uptime in seconds")?;

        let app_info = CounterVec::new(
            Opts::new("app_info", "Application information"),
            &["version", "commit", "build_time"],
        )?;

        let upstream_failures_total = CounterVec::new(
            Opts::new(
                "upstream_failures_total",
                "Upstream calls that failed and were degraded or surfaced as errors",
            ),
            &["dependency"],
        )?;

        let light_pollution_fallbacks_total = Counter::new(
            "light_pollution_fallbacks_total",
            "Light-pollution requests answered by the fallback estimator",
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(app_uptime_seconds.clone()))?;
        registry.register(Box::new(app_info.clone()))?;
        registry.register(Box::new(upstream_failures_total.clone()))?;
        registry.register(Box::new(light_pollution_fallbacks_total.clone()))?;

        let upstream = ResilientClientMetrics::new(&registry)?;

        app_info
            .with_label_values(&[env!("CARGO_PKG_VERSION"), GIT_SHA, BUILD_TIMESTAMP])
            .inc();

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            app_uptime_seconds,
            app_info,
            upstream_failures_total,
            light_pollution_fallbacks_total,
            upstream,
            start_time: Instant::now(),
        })
    }

    /// Record an HTTP request with method, route, status, and duration
    pub fn record_request(&self, method: &str, route: &str, status: u16, duration: Duration) {
        // Scrapes of the metrics endpoint are noise
        if route == "/api/metrics" {
            return;
        }

        let status = status.to_string();
        self.http_requests_total
            .with_label_values(&[method, status.as_str(), route])
            .inc();

        self.http_request_duration_seconds
            .with_label_values(&[method, route])
            .observe(duration.as_secs_f64());
    }

    pub fn record_upstream_failure(&self, dependency: &str) {
        self.upstream_failures_total
            .with_label_values(&[dependency])
            .inc();
    }

    pub fn record_light_pollution_fallback(&self) {
        self.light_pollution_fallbacks_total.inc();
    }

    pub fn update_uptime(&self) {
        self.app_uptime_seconds
            .set(self.start_time.elapsed().as_secs_f64());
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        encoder.encode_to_string(&self.registry.gather())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_endpoint_not_recorded() {
        let metrics = AppMetrics::new().unwrap();
        metrics.record_request("GET", "/api/metrics", 200, Duration::from_millis(3));
        metrics.record_request("GET", "/api/health", 200, Duration::from_millis(3));

        let output = metrics.render().unwrap();
        assert!(output.contains(r#"route="/api/health""#));
        assert!(!output.contains(r#"route="/api/metrics""#));
    }

    #[test]
    fn test_domain_counters_rendered() {
        let metrics = AppMetrics::new().unwrap();
        metrics.record_upstream_failure("openweather");
        metrics.record_upstream_failure("openweather");
        metrics.record_light_pollution_fallback();

        let output = metrics.render().unwrap();
        assert!(output.contains(r#"upstream_failures_total{dependency="openweather"} 2"#));
        assert!(output.contains("light_pollution_fallbacks_total 1"));
        assert!(output.contains("app_info"));
    }
}
