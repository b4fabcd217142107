//! Monitored location model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A monitored geographic point. Defined once at process start from
/// configuration and never mutated afterwards.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Short identifier used in logs and cache keys (e.g. "dublin")
    pub key: String,
    /// Display name shown in API responses (e.g. "Dublin, Ireland")
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// IANA timezone identifier (e.g. "Europe/Dublin")
    pub timezone: String,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        timezone: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            latitude,
            longitude,
            timezone: timezone.into(),
        }
    }

    /// Round coordinates for cache key generation
    #[must_use]
    pub fn rounded_coordinates(&self, precision: u32) -> (f64, f64) {
        let multiplier = 10_f64.powi(i32::try_from(precision).unwrap_or(4));
        let lat = (self.latitude * multiplier).round() / multiplier;
        let lon = (self.longitude * multiplier).round() / multiplier;
        (lat, lon)
    }

    /// Generate the forecast cache key for this location and date
    #[must_use]
    pub fn cache_key(&self, date: NaiveDate) -> String {
        let (lat, lon) = self.rounded_coordinates(2);
        format!("forecast:{lat:.2}:{lon:.2}:{date}")
    }
}
