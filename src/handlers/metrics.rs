//! Metrics endpoint handler.

use crate::{config::MetricsConfig, services::AppMetrics};
use actix_web::{Error, HttpRequest, HttpResponse, Result, web};
use paperclip::actix::api_v2_operation;

/// Prometheus metrics endpoint
///
/// Returns 503 when metrics are disabled or no collector is registered.
#[api_v2_operation(
    summary = "Prometheus Metrics Endpoint",
    description = "Returns Prometheus-formatted metrics for request, upstream and estimator activity.",
    tags("Metrics")
)]
pub async fn get_metrics(req: HttpRequest) -> Result<HttpResponse, Error> {
    if let Some(config) = req.app_data::<web::Data<MetricsConfig>>()
        && !config.enabled
    {
        return Ok(HttpResponse::ServiceUnavailable()
            .content_type("text/plain")
            .body("Metrics collection is disabled"));
    }

    let Some(metrics) = req.app_data::<web::Data<AppMetrics>>() else {
        return Err(actix_web::error::ErrorServiceUnavailable(
            "Metrics not available",
        ));
    };

    metrics.update_uptime();
    match metrics.render() {
        Ok(output) => Ok(HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4; charset=utf-8")
            .body(output)),
        Err(e) => Err(actix_web::error::ErrorInternalServerError(format!(
            "Failed to render metrics: {e}"
        ))),
    }
}
