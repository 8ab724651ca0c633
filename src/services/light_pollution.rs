//! Light-pollution estimation from static reference data.
//!
//! The primary estimator scans a table of well-known cities, then falls back
//! to coarse latitude/longitude buckets. A simplified estimator with its own
//! smaller table answers when a request carries coordinates the primary path
//! cannot accept. The two paths intentionally disagree near their thresholds.

use crate::models::{Coordinate, LightPollutionEstimate, LightPollutionLevel, degree_distance};

/// A named place with an approximate pollution score
struct ReferenceSite {
    name: &'static str,
    lat: f64,
    lng: f64,
    score: u32,
}

/// A named point used for region membership checks
struct RegionMarker {
    name: &'static str,
    lat: f64,
    lng: f64,
}

const fn site(name: &'static str, lat: f64, lng: f64, score: u32) -> ReferenceSite {
    ReferenceSite { name, lat, lng, score }
}

const fn marker(name: &'static str, lat: f64, lng: f64) -> RegionMarker {
    RegionMarker { name, lat, lng }
}

const CITY_MATCH_RADIUS: f64 = 0.3;
const COASTAL_RADIUS: f64 = 0.5;
const MOUNTAIN_RADIUS: f64 = 0.8;
const FALLBACK_CITY_RADIUS: f64 = 0.5;

/// Order matters: the first site within range wins.
const MAJOR_CITIES: &[ReferenceSite] = &[
    site("New York", 40.7128, -74.006, 45),
    site("Los Angeles", 34.0522, -118.2437, 42),
    site("London", 51.5074, -0.1278, 38),
    site("Paris", 48.8566, 2.3522, 35),
    site("Tokyo", 35.6762, 139.6503, 48),
    site("Beijing", 39.9042, 116.4074, 40),
    site("Mumbai", 19.076, 72.8777, 35),
    site("Delhi", 28.6139, 77.209, 38),
    site("Las Vegas", 36.1699, -115.1398, 50),
    site("Miami", 25.7617, -80.1918, 35),
    site("Houston", 29.7604, -95.3698, 32),
    site("Atlanta", 33.749, -84.388, 30),
    site("Chicago", 41.8781, -87.6298, 35),
    site("San Francisco", 37.7749, -122.4194, 28),
    site("Seattle", 47.6062, -122.3321, 25),
    site("Denver", 39.7392, -104.9903, 20),
    site("Portland", 45.5152, -122.6784, 22),
    site("Dallas", 32.7767, -96.797, 30),
    site("Philadelphia", 39.9526, -75.1652, 32),
    site("Boston", 42.3601, -71.0589, 30),
    site("Washington DC", 38.9072, -77.0369, 28),
    site("Dubai", 25.2048, 55.2708, 45),
    site("Hong Kong", 22.3193, 114.1694, 42),
    site("Singapore", 1.3521, 103.8198, 40),
    site("Seoul", 37.5665, 126.978, 38),
    site("Moscow", 55.7558, 37.6176, 35),
    site("Berlin", 52.52, 13.405, 30),
    site("Rome", 41.9028, 12.4964, 28),
    site("Madrid", 40.4168, -3.7038, 25),
    site("Istanbul", 41.0082, 28.9784, 32),
    site("Cairo", 30.0444, 31.2357, 35),
    site("Sydney", -33.8688, 151.2093, 25),
    site("Melbourne", -37.8136, 144.9631, 22),
    site("Wellington", -41.2866, 174.7756, 15),
    site("Reykjavik", 64.1353, -21.8952, 8),
    site("Longyearbyen", 78.2232, 15.6267, 5),
];

const COASTAL_REGIONS: &[RegionMarker] = &[
    marker("West Coast US", 36.1699, -115.1398),
    marker("East Coast US", 25.7617, -80.1918),
    marker("UK Coast", 51.5074, -0.1278),
    marker("Japan Coast", 35.6762, 139.6503),
];

const MOUNTAIN_REGIONS: &[RegionMarker] = &[
    marker("Rocky Mountains", 39.7392, -104.9903),
    marker("Sierra Nevada", 37.7749, -122.4194),
    marker("Cascade Range", 45.5152, -122.6784),
    marker("Swiss Alps", 46.8182, 8.2275),
    marker("Himalayas", 27.9881, 86.925),
];

const FALLBACK_CITIES: &[RegionMarker] = &[
    marker("New York", 40.7128, -74.006),
    marker("Los Angeles", 34.0522, -118.2437),
    marker("London", 51.5074, -0.1278),
    marker("Paris", 48.8566, 2.3522),
    marker("Tokyo", 35.6762, 139.6503),
    marker("Beijing", 39.9042, 116.4074),
    marker("Mumbai", 19.076, 72.8777),
    marker("Delhi", 28.6139, 77.209),
];

fn is_remote(abs_lat: f64, abs_lng: f64) -> bool {
    abs_lng > 150.0 || (abs_lng > 100.0 && abs_lat > 40.0)
}

fn within(regions: &[RegionMarker], coordinate: &Coordinate, radius: f64) -> bool {
    regions
        .iter()
        .any(|region| coordinate.degree_distance(region.lat, region.lng) < radius)
}

/// Build an estimate from a raw score using the level breakpoints
fn scored(
    score: u32,
    description: impl Into<String>,
    location_type: impl Into<String>,
) -> LightPollutionEstimate {
    let level = LightPollutionLevel::from_score(score);
    let factor = level.factor();
    LightPollutionEstimate {
        level,
        description: description.into(),
        factor,
        raw_value: score,
        is_good_for_stargazing: factor > 0.5,
        location_type: Some(location_type.into()),
        fallback: false,
    }
}

/// Estimate light pollution for a validated coordinate
pub fn estimate(coordinate: &Coordinate) -> LightPollutionEstimate {
    if let Some(city) = MAJOR_CITIES
        .iter()
        .find(|city| coordinate.degree_distance(city.lat, city.lng) < CITY_MATCH_RADIUS)
    {
        return scored(city.score, format!("Near {}", city.name), city.name);
    }

    let abs_lat = coordinate.lat.abs();
    let abs_lng = coordinate.lng.abs();

    if abs_lat > 70.0 {
        scored(5, "Arctic/Antarctic region", "Polar region")
    } else if abs_lat > 60.0 {
        scored(8, "High latitude - minimal light pollution", "High latitude")
    } else if is_remote(abs_lat, abs_lng) {
        scored(12, "Remote area - low light pollution", "Remote area")
    } else if within(COASTAL_REGIONS, coordinate, COASTAL_RADIUS) {
        scored(15, "Coastal area - moderate light pollution", "Coastal area")
    } else if within(MOUNTAIN_REGIONS, coordinate, MOUNTAIN_RADIUS) {
        scored(10, "Mountain region - low light pollution", "Mountain region")
    } else {
        scored(25, "Urban/suburban area - moderate light pollution", "Urban area")
    }
}

fn fallback(
    level: LightPollutionLevel,
    description: String,
    factor: f64,
    raw_value: u32,
) -> LightPollutionEstimate {
    LightPollutionEstimate {
        level,
        description,
        factor,
        raw_value,
        is_good_for_stargazing: factor > 0.5,
        location_type: None,
        fallback: true,
    }
}

/// Simplified estimator used when the primary path cannot run
///
/// Accepts any pair of floats. Comparisons against NaN are false, so
/// unparsable input lands on the default bucket.
pub fn fallback_estimate(lat: f64, lng: f64) -> LightPollutionEstimate {
    let abs_lat = lat.abs();
    let abs_lng = lng.abs();

    if let Some(city) = FALLBACK_CITIES
        .iter()
        .find(|city| degree_distance(lat, lng, city.lat, city.lng) < FALLBACK_CITY_RADIUS)
    {
        return fallback(
            LightPollutionLevel::High,
            format!("Near {} - heavy light pollution", city.name),
            0.3,
            40,
        );
    }

    if abs_lat > 60.0 {
        fallback(
            LightPollutionLevel::Low,
            "High latitude - minimal light pollution".to_string(),
            0.8,
            10,
        )
    } else if is_remote(abs_lat, abs_lng) {
        fallback(
            LightPollutionLevel::Medium,
            "Remote area - moderate light pollution".to_string(),
            0.6,
            20,
        )
    } else {
        fallback(
            LightPollutionLevel::Medium,
            "Urban/suburban area - moderate light pollution".to_string(),
            0.5,
            25,
        )
    }
}
