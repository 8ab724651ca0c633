//! Integration tests for the resilient HTTP client
//!
//! A local server counts hits so attempt counts, retries and the circuit
//! breaker can be observed from the outside.

use actix_web::{App, HttpResponse, HttpServer, web};
use prometheus::Registry;
use stargazer_api::services::resilient_client::{
    CircuitBreakerConfig, CircuitBreakerState, RetryConfig, SimpleCircuitBreaker,
};
use stargazer_api::{ResilientClient, ResilientClientConfig, ResilientClientError, ResilientClientMetrics};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

async fn flaky(hits: web::Data<AtomicUsize>) -> HttpResponse {
    hits.fetch_add(1, Ordering::SeqCst);
    HttpResponse::ServiceUnavailable().finish()
}

async fn ok(hits: web::Data<AtomicUsize>) -> HttpResponse {
    hits.fetch_add(1, Ordering::SeqCst);
    HttpResponse::Ok().json(serde_json::json!({"message": "success", "value": 42}))
}

/// Start a counting server and return its base URL with the hit counter
fn spawn_counting_server() -> (String, web::Data<AtomicUsize>) {
    let hits = web::Data::new(AtomicUsize::new(0));
    let app_hits = hits.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_hits.clone())
            .route("/flaky", web::get().to(flaky))
            .route("/ok", web::get().to(ok))
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    (format!("http://{addr}"), hits)
}

#[actix_web::test]
async fn test_failed_status_is_attempted_once_by_default() {
    let (base, hits) = spawn_counting_server();
    let mut client = ResilientClient::new(ResilientClientConfig::default(), None).unwrap();

    let result = client.get(&format!("{base}/flaky")).await;

    assert!(matches!(result, Err(ResilientClientError::RetryableStatus(503))));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[actix_web::test]
async fn test_configured_retries_are_honoured() {
    let (base, hits) = spawn_counting_server();
    let config = ResilientClientConfig {
        retry: RetryConfig {
            max_attempts: 2,
            initial_delay_ms: 1,
            max_delay_ms: 5,
            ..RetryConfig::default()
        },
        ..ResilientClientConfig::default()
    };
    let mut client = ResilientClient::new(config, None).unwrap();

    let result = client.get(&format!("{base}/flaky")).await;

    assert!(result.is_err());
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[actix_web::test]
async fn test_get_json_decodes_and_records_metrics() {
    let (base, _hits) = spawn_counting_server();
    let registry = Registry::new();
    let metrics = ResilientClientMetrics::new(&registry).unwrap();
    let mut client =
        ResilientClient::new(ResilientClientConfig::default(), Some(metrics.clone())).unwrap();

    let body: serde_json::Value = client.get_json(&format!("{base}/ok")).await.unwrap();
    assert_eq!(body["value"], 42);

    let successes = metrics
        .http_requests_total
        .with_label_values(&["127.0.0.1", "success"])
        .get();
    assert_eq!(successes, 1.0);
}

#[actix_web::test]
async fn test_get_json_rejects_undecodable_body() {
    let (base, _hits) = spawn_counting_server();
    let mut client = ResilientClient::new(ResilientClientConfig::default(), None).unwrap();

    let result: Result<Vec<u32>, _> = client.get_json(&format!("{base}/ok")).await;
    assert!(matches!(result, Err(ResilientClientError::Decode(_))));
}

#[actix_web::test]
async fn test_circuit_breaker_opens_within_one_client() {
    let (base, hits) = spawn_counting_server();
    let config = ResilientClientConfig {
        circuit_breaker: CircuitBreakerConfig {
            failure_threshold: 2,
            success_threshold: 1,
            timeout_seconds: 60,
        },
        ..ResilientClientConfig::default()
    };
    let mut client = ResilientClient::new(config, None).unwrap();
    let url = format!("{base}/flaky");

    assert!(client.get(&url).await.is_err());
    assert!(client.get(&url).await.is_err());
    assert!(matches!(
        client.get(&url).await,
        Err(ResilientClientError::CircuitBreakerOpen)
    ));
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_circuit_breaker_half_open_recovery() {
    let config = CircuitBreakerConfig {
        failure_threshold: 3,
        success_threshold: 2,
        timeout_seconds: 1,
    };
    let mut cb = SimpleCircuitBreaker::new(config);

    for _ in 0..3 {
        cb.on_failure();
    }
    assert_eq!(cb.state(), &CircuitBreakerState::Open);
    assert!(!cb.call_allowed());

    tokio::time::sleep(Duration::from_millis(1100)).await;

    assert!(cb.call_allowed());
    assert_eq!(cb.state(), &CircuitBreakerState::HalfOpen);

    cb.on_success();
    cb.on_success();
    assert_eq!(cb.state(), &CircuitBreakerState::Closed);
}

#[tokio::test]
async fn test_invalid_url_fails_without_panicking() {
    let mut client = ResilientClient::new(ResilientClientConfig::default(), None).unwrap();
    assert!(client.get("not-a-valid-url").await.is_err());
}
