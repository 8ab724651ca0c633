//! Local time resolution and night-window checks.

use crate::models::Coordinate;
use chrono::{DateTime, FixedOffset, NaiveTime, Offset, Timelike, Utc};
use serde::{Deserialize, Serialize};

const SECONDS_PER_HOUR: i32 = 3600;

/// Where a UTC offset came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSource {
    /// Reported by the weather provider for the location
    Provider,
    /// Estimated from longitude, one hour per 15 degrees
    Longitude,
}

impl TimeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSource::Provider => "provider",
            TimeSource::Longitude => "longitude",
        }
    }
}

/// Wall-clock time at a location
#[derive(Debug, Clone, PartialEq)]
pub struct LocalTime {
    pub time: DateTime<FixedOffset>,
    pub offset_seconds: i32,
    pub source: TimeSource,
}

impl LocalTime {
    /// Resolve local time from a provider offset, or estimate it from longitude
    pub fn resolve(
        now: DateTime<Utc>,
        coordinate: &Coordinate,
        provider_offset: Option<i32>,
    ) -> Self {
        let (offset, source) = match provider_offset.and_then(plausible_offset) {
            Some(offset) => (offset, TimeSource::Provider),
            None => (longitude_offset(coordinate.lng), TimeSource::Longitude),
        };

        Self {
            time: now.with_timezone(&offset),
            offset_seconds: offset.local_minus_utc(),
            source,
        }
    }

    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    pub fn offset_hours(&self) -> f64 {
        f64::from(self.offset_seconds) / f64::from(SECONDS_PER_HOUR)
    }

    /// 12-hour clock label, e.g. "04:52 AM"
    pub fn formatted(&self) -> String {
        self.time.format("%I:%M %p").to_string()
    }
}

/// Provider offsets outside +/-18h are garbage
fn plausible_offset(seconds: i32) -> Option<FixedOffset> {
    if seconds.unsigned_abs() >= (18 * SECONDS_PER_HOUR).unsigned_abs() {
        return None;
    }
    FixedOffset::east_opt(seconds)
}

fn longitude_offset(lng: f64) -> FixedOffset {
    FixedOffset::east_opt(longitude_offset_seconds(lng)).unwrap_or_else(|| Utc.fix())
}

/// Solar-time estimate of the UTC offset for a longitude
pub fn longitude_offset_seconds(lng: f64) -> i32 {
    let hours = (lng / 15.0).round().clamp(-12.0, 12.0) as i32;
    hours * SECONDS_PER_HOUR
}

/// Hours of the day considered dark enough for stargazing
///
/// The window wraps midnight: `start_hour` is inclusive, `end_hour`
/// exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for NightWindow {
    fn default() -> Self {
        Self {
            start_hour: 20,
            end_hour: 6,
        }
    }
}

impl NightWindow {
    pub fn is_night(&self, hour: u32) -> bool {
        if self.start_hour <= self.end_hour {
            hour >= self.start_hour && hour < self.end_hour
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }

    /// Start of the window as a 12-hour clock label
    pub fn start_label(&self) -> String {
        NaiveTime::from_hms_opt(self.start_hour % 24, 0, 0)
            .map(|t| t.format("%I:%M %p").to_string())
            .unwrap_or_else(|| format!("{}:00", self.start_hour))
    }
}
