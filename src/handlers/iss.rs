//! ISS position proxy handler.

use crate::{
    config::StargazerConfig,
    error::ApiError,
    models::IssPosition,
    services::{AppMetrics, IssService},
};
use actix_web::{Error, HttpRequest, Result, web};
use paperclip::actix::api_v2_operation;
use tracing::error;

const ISS_DEPENDENCY: &str = "open_notify";

/// Current ISS position
///
/// Passes the Open Notify payload through unchanged.
#[api_v2_operation(
    summary = "ISS Position Endpoint",
    description = "Returns the current latitude and longitude of the International Space Station.",
    tags("ISS")
)]
pub async fn iss(
    req: HttpRequest,
    config: web::Data<StargazerConfig>,
) -> Result<web::Json<IssPosition>, Error> {
    let metrics = req.app_data::<web::Data<AppMetrics>>();
    let upstream_metrics = metrics.map(|m| m.upstream.clone());

    let position = match IssService::new(&config, upstream_metrics) {
        Ok(mut service) => service.current_position().await,
        Err(e) => Err(e),
    };

    match position {
        Ok(position) => Ok(web::Json(position)),
        Err(e) => {
            error!(error = %e, "Failed to fetch ISS position");
            if let Some(metrics) = metrics {
                metrics.record_upstream_failure(ISS_DEPENDENCY);
            }
            Err(ApiError::IssUnavailable.into())
        }
    }
}
