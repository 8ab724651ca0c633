//! Light-pollution estimate handler.

use crate::{
    models::{CoordinateQuery, LightPollutionEstimate},
    services::{AppMetrics, light_pollution as estimator},
};
use actix_web::{Error, HttpRequest, Result, web};
use paperclip::actix::api_v2_operation;
use tracing::warn;

/// Estimated light pollution at a location
///
/// Missing parameters are a 400. Values that cannot be validated are
/// answered by the fallback estimator, marked `fallback: true`.
#[api_v2_operation(
    summary = "Light Pollution Endpoint",
    description = "Returns an estimated light-pollution level, score and darkness factor for ?lat=&lng=.",
    tags("Light Pollution")
)]
pub async fn light_pollution(
    req: HttpRequest,
    query: web::Query<CoordinateQuery>,
) -> Result<web::Json<LightPollutionEstimate>, Error> {
    query.require()?;

    let estimate = match query.coordinate() {
        Ok(coordinate) => estimator::estimate(&coordinate),
        Err(e) => {
            warn!(
                lat = ?query.lat,
                lng = ?query.lng,
                error = %e,
                "Coordinate rejected, using fallback light-pollution estimate"
            );
            if let Some(metrics) = req.app_data::<web::Data<AppMetrics>>() {
                metrics.record_light_pollution_fallback();
            }
            let (lat, lng) = query.lossy_values();
            estimator::fallback_estimate(lat, lng)
        }
    };

    Ok(web::Json(estimate))
}
