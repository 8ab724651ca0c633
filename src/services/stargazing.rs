//! Aggregates weather, light pollution and local time into a report.

use crate::{
    config::StargazerConfig,
    models::{Coordinate, StargazingReport, TimeInfo},
    services::{
        conditions,
        light_pollution,
        metrics::AppMetrics,
        timezone::{LocalTime, NightWindow},
        weather::{CurrentWeather, WeatherError, WeatherService},
    },
};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// Dependency label used for weather provider failures
pub const WEATHER_DEPENDENCY: &str = "openweather";

/// Per-request aggregator
///
/// Upstream failures never fail the assessment; they are logged, counted
/// and replaced by the degraded path.
pub struct StargazingService<'a> {
    config: &'a StargazerConfig,
    metrics: Option<&'a AppMetrics>,
}

impl<'a> StargazingService<'a> {
    pub fn new(config: &'a StargazerConfig, metrics: Option<&'a AppMetrics>) -> Self {
        Self { config, metrics }
    }

    /// Assess stargazing conditions at a coordinate
    pub async fn assess(&self, coordinate: Coordinate, now: DateTime<Utc>) -> StargazingReport {
        let weather = self.fetch_weather(&coordinate).await;
        build_report(coordinate, weather, now, self.config.night_window)
    }

    /// Local time at a coordinate, using the provider offset when reachable
    pub async fn local_time(&self, coordinate: Coordinate, now: DateTime<Utc>) -> LocalTime {
        let offset = self
            .fetch_weather(&coordinate)
            .await
            .and_then(|w| w.utc_offset_seconds);
        LocalTime::resolve(now, &coordinate, offset)
    }

    async fn fetch_weather(&self, coordinate: &Coordinate) -> Option<CurrentWeather> {
        let upstream_metrics = self.metrics.map(|m| m.upstream.clone());

        let result = match WeatherService::new(self.config, upstream_metrics) {
            Ok(mut service) => service.current(coordinate).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(current) => Some(current),
            Err(WeatherError::MissingApiKey) => {
                debug!("No weather API key configured, skipping weather lookup");
                None
            }
            Err(e) => {
                warn!(
                    lat = coordinate.lat,
                    lng = coordinate.lng,
                    error = %e,
                    "Weather lookup failed, continuing without weather data"
                );
                if let Some(metrics) = self.metrics {
                    metrics.record_upstream_failure(WEATHER_DEPENDENCY);
                }
                None
            }
        }
    }
}

/// Assemble a report from already-fetched inputs
pub fn build_report(
    coordinate: Coordinate,
    weather: Option<CurrentWeather>,
    now: DateTime<Utc>,
    night_window: NightWindow,
) -> StargazingReport {
    let light_pollution = light_pollution::estimate(&coordinate);
    let offset = weather.as_ref().and_then(|w| w.utc_offset_seconds);
    let local_time = LocalTime::resolve(now, &coordinate, offset);
    let is_night = night_window.is_night(local_time.hour());
    let current_time = local_time.formatted();

    let verdict = match &weather {
        Some(current) => {
            conditions::evaluate(&current.snapshot, &light_pollution, is_night, &current_time)
        }
        None => conditions::evaluate_without_weather(&light_pollution, is_night, &current_time),
    };

    StargazingReport {
        location: coordinate,
        is_good_for_stargazing: verdict.is_good_for_stargazing,
        recommendation: verdict.recommendation,
        weather_data: weather.map(|w| w.snapshot),
        factors: verdict.factors,
        light_pollution,
        time_info: TimeInfo {
            current_time,
            is_night_time: is_night,
            utc_offset_hours: local_time.offset_hours(),
            source: local_time.source.as_str().to_string(),
            next_sunset: night_window.start_label(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FactorLabel, WeatherSnapshot};
    use chrono::TimeZone;

    fn clear_night() -> CurrentWeather {
        CurrentWeather {
            snapshot: WeatherSnapshot {
                cloud_cover: 5.0,
                visibility: 20.0,
                temperature: 4.0,
                humidity: 40.0,
                description: "clear sky".to_string(),
            },
            utc_offset_seconds: Some(0),
        }
    }

    #[test]
    fn test_report_with_weather() {
        // Remote Pacific location, 22:00 UTC
        let coordinate = Coordinate::new(10.0, -155.0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 22, 0, 0).unwrap();

        let report = build_report(coordinate, Some(clear_night()), now, NightWindow::default());

        assert!(report.is_good_for_stargazing);
        assert_eq!(report.recommendation, "Excellent conditions for stargazing tonight!");
        assert_eq!(report.time_info.current_time, "10:00 PM");
        assert_eq!(report.time_info.source, "provider");
        assert!(report.time_info.is_night_time);
        assert_eq!(report.time_info.next_sunset, "08:00 PM");
        assert_eq!(report.factors.light_pollution, Some(FactorLabel::Good));
        assert!(report.weather_data.is_some());
    }

    #[test]
    fn test_report_without_weather_uses_longitude() {
        // Longitude -75 estimates UTC-5: 03:00 UTC is 22:00 local
        let coordinate = Coordinate::new(44.0, -75.0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 3, 0, 0).unwrap();

        let report = build_report(coordinate, None, now, NightWindow::default());

        assert_eq!(report.time_info.source, "longitude");
        assert_eq!(report.time_info.utc_offset_hours, -5.0);
        assert_eq!(report.time_info.current_time, "10:00 PM");
        assert!(report.weather_data.is_none());
        assert_eq!(report.factors.cloud_cover, FactorLabel::Unknown);
        assert_eq!(report.factors.visibility, FactorLabel::Unknown);
        assert_eq!(report.factors.humidity, FactorLabel::Unknown);
    }

    #[test]
    fn test_daytime_report() {
        let coordinate = Coordinate::new(10.0, -155.0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 13, 30, 0).unwrap();

        let report = build_report(coordinate, Some(clear_night()), now, NightWindow::default());

        assert!(!report.is_good_for_stargazing);
        assert_eq!(
            report.recommendation,
            "It's 01:30 PM. Current conditions for stargazing later tonight:"
        );
        assert!(!report.time_info.is_night_time);
    }

    #[test]
    fn test_city_report_flags_light_pollution() {
        // Manhattan at midnight local time, clear skies
        let coordinate = Coordinate::new(40.7128, -74.006).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 5, 0, 0).unwrap();
        let weather = CurrentWeather {
            utc_offset_seconds: Some(-5 * 3600),
            ..clear_night()
        };

        let report = build_report(coordinate, Some(weather), now, NightWindow::default());

        assert!(!report.is_good_for_stargazing);
        assert_eq!(report.recommendation, "Stargazing isn't ideal - light pollution.");
        assert_eq!(report.light_pollution.raw_value, 45);
    }

    #[tokio::test]
    async fn test_assess_without_api_key() {
        let config = StargazerConfig::default();
        let service = StargazingService::new(&config, None);
        let coordinate = Coordinate::new(65.0, 20.0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 23, 0, 0).unwrap();

        let report = service.assess(coordinate, now).await;

        assert!(report.weather_data.is_none());
        assert_eq!(report.time_info.source, "longitude");
        // Longitude 20 estimates UTC+1
        assert_eq!(report.time_info.current_time, "12:00 AM");
        assert!(report.is_good_for_stargazing);
        assert_eq!(
            report.recommendation,
            "Conditions may be suitable, but weather data unavailable."
        );
    }
}
