//! Weather proxy handler.

use crate::{
    config::StargazerConfig,
    error::ApiError,
    models::{CoordinateQuery, WeatherResponse},
    services::{
        AppMetrics, WeatherError, WeatherService, conditions, stargazing::WEATHER_DEPENDENCY,
    },
};
use actix_web::{Error, HttpRequest, Result, web};
use paperclip::actix::api_v2_operation;
use tracing::error;

/// Current weather at a location
///
/// Requires `lat` and `lng`. The verdict uses the quick-check thresholds
/// only; night time and light pollution are not considered here.
#[api_v2_operation(
    summary = "Weather Endpoint",
    description = "Returns current cloud cover, visibility, temperature and humidity for ?lat=&lng= with a weather-only stargazing verdict.",
    tags("Weather")
)]
pub async fn weather(
    req: HttpRequest,
    query: web::Query<CoordinateQuery>,
    config: web::Data<StargazerConfig>,
) -> Result<web::Json<WeatherResponse>, Error> {
    let coordinate = query.coordinate()?;

    let metrics = req.app_data::<web::Data<AppMetrics>>();
    let upstream_metrics = metrics.map(|m| m.upstream.clone());

    let current = match WeatherService::new(&config, upstream_metrics) {
        Ok(mut service) => service.current(&coordinate).await,
        Err(e) => Err(e),
    };

    match current {
        Ok(current) => {
            let is_good = conditions::quick_check(&current.snapshot);
            Ok(web::Json(WeatherResponse::new(current.snapshot, is_good)))
        }
        Err(WeatherError::MissingApiKey) => {
            error!("OPENWEATHER_API_KEY is not configured");
            Err(ApiError::MissingApiKey.into())
        }
        Err(e) => {
            error!(
                lat = coordinate.lat,
                lng = coordinate.lng,
                error = %e,
                "Failed to fetch weather data"
            );
            if let Some(metrics) = metrics {
                metrics.record_upstream_failure(WEATHER_DEPENDENCY);
            }
            Err(ApiError::WeatherUnavailable.into())
        }
    }
}
