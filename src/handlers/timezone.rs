//! Local time endpoint handler.

use crate::{
    config::StargazerConfig,
    models::{CoordinateQuery, TimezoneResponse},
    services::{AppMetrics, StargazingService},
};
use actix_web::{Error, HttpRequest, Result, web};
use chrono::Utc;
use paperclip::actix::api_v2_operation;

/// Local time and night status at a location
///
/// Uses the weather provider's UTC offset when it can be reached, otherwise
/// an estimate of one hour per 15 degrees of longitude.
#[api_v2_operation(
    summary = "Timezone Endpoint",
    description = "Returns the UTC offset, local time and night-time flag for ?lat=&lng=.",
    tags("Timezone")
)]
pub async fn timezone(
    req: HttpRequest,
    query: web::Query<CoordinateQuery>,
    config: web::Data<StargazerConfig>,
) -> Result<web::Json<TimezoneResponse>, Error> {
    let coordinate = query.coordinate()?;
    let metrics = req.app_data::<web::Data<AppMetrics>>();

    let local_time = StargazingService::new(&config, metrics.map(|m| m.get_ref()))
        .local_time(coordinate, Utc::now())
        .await;

    Ok(web::Json(TimezoneResponse {
        offset: local_time.offset_hours(),
        local_time_string: local_time.formatted(),
        is_night_time: config.night_window.is_night(local_time.hour()),
        source: local_time.source.as_str().to_string(),
    }))
}
