//! Stargazing assessment handlers.

use crate::{
    config::StargazerConfig,
    models::{CoordinateQuery, PossibilityResponse, StargazingReport},
    services::{AppMetrics, StargazingService, conditions},
};
use actix_web::{Error, HttpRequest, Result, web};
use chrono::Utc;
use paperclip::actix::api_v2_operation;
use tracing::debug;

/// Full stargazing report
///
/// Combines current weather, estimated light pollution and local time. A
/// weather outage degrades the report instead of failing the request.
#[api_v2_operation(
    summary = "Stargazing Report Endpoint",
    description = "Returns a stargazing verdict for ?lat=&lng= combining weather, light pollution and local night time.",
    tags("Stargazing")
)]
pub async fn stargazing(
    req: HttpRequest,
    query: web::Query<CoordinateQuery>,
    config: web::Data<StargazerConfig>,
) -> Result<web::Json<StargazingReport>, Error> {
    let coordinate = query.coordinate()?;
    let metrics = req.app_data::<web::Data<AppMetrics>>();

    let report = StargazingService::new(&config, metrics.map(|m| m.get_ref()))
        .assess(coordinate, Utc::now())
        .await;

    debug!(
        lat = coordinate.lat,
        lng = coordinate.lng,
        is_good = report.is_good_for_stargazing,
        "Stargazing report assembled"
    );

    Ok(web::Json(report))
}

/// Stargazing verdict for randomly simulated conditions
///
/// The location is validated but does not influence the simulated weather.
#[api_v2_operation(
    summary = "Stargazing Possibility Endpoint",
    description = "Returns a stargazing verdict for randomly simulated weather at ?lat=&lng=.",
    tags("Stargazing")
)]
pub async fn stargazing_possibility(
    query: web::Query<CoordinateQuery>,
) -> Result<web::Json<PossibilityResponse>, Error> {
    query.coordinate()?;

    let snapshot = conditions::simulate_snapshot(&mut rand::rng());
    let verdict = conditions::evaluate_simulated(&snapshot);

    Ok(web::Json(PossibilityResponse {
        is_good_for_stargazing: verdict.is_good_for_stargazing,
        recommendation: verdict.recommendation,
        weather_data: snapshot,
        factors: verdict.factors,
    }))
}
