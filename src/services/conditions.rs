//! Stargazing condition rules.
//!
//! Three threshold rules are in use and are kept apart on purpose:
//! [`STRICT`] drives the full assessment, [`QUICK_CHECK`] backs the weather
//! proxy, and [`SIMULATED`] backs the simulated-conditions endpoint.

use crate::models::{
    FactorLabel, FactorLabels, LightPollutionEstimate, StargazingVerdict, WeatherSnapshot,
};
use rand::Rng;

/// Pass/fail cutoffs for the three observed weather factors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConditionThresholds {
    /// Cloud cover must be strictly below this percentage
    pub max_cloud_cover: f64,
    /// Visibility must be strictly above this many kilometres
    pub min_visibility_km: f64,
    /// Humidity must be strictly below this percentage
    pub max_humidity: f64,
}

impl ConditionThresholds {
    pub fn cloud_cover_ok(&self, weather: &WeatherSnapshot) -> bool {
        weather.cloud_cover < self.max_cloud_cover
    }

    pub fn visibility_ok(&self, weather: &WeatherSnapshot) -> bool {
        weather.visibility > self.min_visibility_km
    }

    pub fn humidity_ok(&self, weather: &WeatherSnapshot) -> bool {
        weather.humidity < self.max_humidity
    }

    pub fn weather_ok(&self, weather: &WeatherSnapshot) -> bool {
        self.cloud_cover_ok(weather) && self.visibility_ok(weather) && self.humidity_ok(weather)
    }
}

/// Full assessment rule, combined with light pollution and night time
pub const STRICT: ConditionThresholds = ConditionThresholds {
    max_cloud_cover: 30.0,
    min_visibility_km: 10.0,
    max_humidity: 70.0,
};

/// Weather-only rule reported by the weather proxy
pub const QUICK_CHECK: ConditionThresholds = ConditionThresholds {
    max_cloud_cover: 30.0,
    min_visibility_km: 5.0,
    max_humidity: 80.0,
};

/// Rule applied to simulated conditions
pub const SIMULATED: ConditionThresholds = ConditionThresholds {
    max_cloud_cover: 30.0,
    min_visibility_km: 5.0,
    max_humidity: 80.0,
};

/// Light-pollution factor must be strictly above this
pub const MIN_LIGHT_POLLUTION_FACTOR: f64 = 0.5;

/// Issues listed in a negative recommendation
const MAX_LISTED_ISSUES: usize = 2;

fn daytime_message(local_time: &str) -> String {
    format!("It's {local_time}. Current conditions for stargazing later tonight:")
}

/// Evaluate observed weather and light pollution with the strict rule
///
/// Conditions only count as good at night. During the day the recommendation
/// reports the local time and defers to later tonight; the factor labels are
/// still filled in.
pub fn evaluate(
    weather: &WeatherSnapshot,
    light_pollution: &LightPollutionEstimate,
    is_night: bool,
    local_time: &str,
) -> StargazingVerdict {
    let cloud_cover = STRICT.cloud_cover_ok(weather);
    let visibility = STRICT.visibility_ok(weather);
    let humidity = STRICT.humidity_ok(weather);
    let dark_sky = light_pollution.factor > MIN_LIGHT_POLLUTION_FACTOR;

    let all_good = cloud_cover && visibility && humidity && dark_sky;

    let recommendation = if !is_night {
        daytime_message(local_time)
    } else if all_good {
        "Excellent conditions for stargazing tonight!".to_string()
    } else {
        let issues: Vec<&str> = [
            (cloud_cover, "cloudy skies"),
            (visibility, "poor visibility"),
            (humidity, "high humidity"),
            (dark_sky, "light pollution"),
        ]
        .into_iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, issue)| issue)
        .take(MAX_LISTED_ISSUES)
        .collect();
        format!("Stargazing isn't ideal - {}.", issues.join(", "))
    };

    StargazingVerdict {
        is_good_for_stargazing: is_night && all_good,
        recommendation,
        factors: FactorLabels {
            cloud_cover: cloud_cover.into(),
            visibility: visibility.into(),
            humidity: humidity.into(),
            light_pollution: Some(dark_sky.into()),
        },
    }
}

/// Verdict when no weather observation is available
pub fn evaluate_without_weather(
    light_pollution: &LightPollutionEstimate,
    is_night: bool,
    local_time: &str,
) -> StargazingVerdict {
    let dark_sky = light_pollution.factor > MIN_LIGHT_POLLUTION_FACTOR;

    let recommendation = if !is_night {
        daytime_message(local_time)
    } else if dark_sky {
        "Conditions may be suitable, but weather data unavailable.".to_string()
    } else {
        format!(
            "Light pollution is {}. Consider finding a darker location.",
            light_pollution.level.as_str().to_lowercase()
        )
    };

    StargazingVerdict {
        is_good_for_stargazing: is_night && dark_sky,
        recommendation,
        factors: FactorLabels {
            cloud_cover: FactorLabel::Unknown,
            visibility: FactorLabel::Unknown,
            humidity: FactorLabel::Unknown,
            light_pollution: Some(dark_sky.into()),
        },
    }
}

/// Weather-only verdict used by the weather proxy
pub fn quick_check(weather: &WeatherSnapshot) -> bool {
    QUICK_CHECK.weather_ok(weather)
}

/// Verdict for simulated conditions
pub fn evaluate_simulated(weather: &WeatherSnapshot) -> StargazingVerdict {
    let is_good = SIMULATED.weather_ok(weather);

    let recommendation = if is_good {
        "Great conditions for stargazing tonight!"
    } else {
        "Conditions are not ideal for stargazing. Try another night."
    };

    StargazingVerdict {
        is_good_for_stargazing: is_good,
        recommendation: recommendation.to_string(),
        factors: FactorLabels {
            cloud_cover: SIMULATED.cloud_cover_ok(weather).into(),
            visibility: SIMULATED.visibility_ok(weather).into(),
            humidity: SIMULATED.humidity_ok(weather).into(),
            light_pollution: None,
        },
    }
}

/// Random weather snapshot for the simulated-conditions endpoint
pub fn simulate_snapshot<R: Rng + ?Sized>(rng: &mut R) -> WeatherSnapshot {
    WeatherSnapshot {
        cloud_cover: rng.random_range(0.0..100.0),
        visibility: rng.random_range(0.0..10.0),
        temperature: rng.random_range(-10.0..20.0),
        humidity: rng.random_range(0.0..100.0),
        description: "Simulated conditions".to_string(),
    }
}
