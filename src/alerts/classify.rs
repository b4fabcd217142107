//! Forecast-day severity classification
//!
//! A pure rule table over one [`ForecastDay`]. Every rule is evaluated
//! independently and all applicable reasons are collected; the overall
//! severity is warning if any warning-tier rule fires, else info if any
//! info-tier rule fires, else none. Thresholds follow the WMO-code table
//! of the primary dashboard integration (wind info tier at 50 km/h).

use crate::models::{AlertNote, ForecastDay, Severity};

/// WMO codes indicating thunderstorms
const THUNDERSTORM: [u8; 3] = [95, 96, 99];
/// WMO codes indicating heavy rain or heavy snow
const HEAVY_PRECIPITATION: [u8; 5] = [65, 67, 75, 82, 86];
/// WMO codes indicating freezing rain or freezing drizzle
const FREEZING_RAIN: [u8; 4] = [56, 57, 66, 67];
/// WMO codes indicating light or moderate rain/snow
const LIGHT_PRECIPITATION: [u8; 6] = [61, 63, 71, 73, 80, 81];
/// WMO codes indicating fog
const FOG: [u8; 2] = [45, 48];

/// Result of classifying one forecast day
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Overall severity; `None` when no rule fired
    pub severity: Option<Severity>,
    /// All applicable reasons, in rule-table order
    pub reasons: Vec<String>,
}

impl Classification {
    /// Wire-shape alert note, joining the reasons into one message.
    /// `None` when no rule fired.
    #[must_use]
    pub fn note(&self) -> Option<AlertNote> {
        self.severity.map(|kind| AlertNote {
            kind,
            message: self.reasons.join(" • "),
        })
    }
}

/// Classify one forecast day. Pure: the result depends only on the
/// forecast fields, and calling it twice yields identical output.
#[must_use]
pub fn classify(day: &ForecastDay) -> Classification {
    let mut severity = None;
    let mut reasons = Vec::new();

    let mut hit = |tier: Severity, reason: String| {
        severity = match (severity, tier) {
            (Some(Severity::Warning), _) | (_, Severity::Warning) => Some(Severity::Warning),
            _ => Some(Severity::Info),
        };
        reasons.push(reason);
    };

    // Warning tier
    if THUNDERSTORM.contains(&day.weather_code) {
        hit(Severity::Warning, "⚡ Thunderstorms expected".to_string());
    }
    if HEAVY_PRECIPITATION.contains(&day.weather_code) {
        hit(
            Severity::Warning,
            format!("🌧️ Heavy precipitation: {}", day.description()),
        );
    }
    if FREEZING_RAIN.contains(&day.weather_code) {
        hit(
            Severity::Warning,
            "❄️ Freezing rain - dangerous travel conditions".to_string(),
        );
    }
    if day.temperature_min < 0.0 {
        hit(
            Severity::Warning,
            format!("🥶 Freezing temperatures: {}°C", day.temperature_min.round()),
        );
    }
    if day.temperature_max > 35.0 {
        hit(
            Severity::Warning,
            format!("🔥 Extreme heat: {}°C", day.temperature_max.round()),
        );
    }

    // Info tier
    if LIGHT_PRECIPITATION.contains(&day.weather_code) {
        hit(Severity::Info, format!("🌦️ {}", day.description()));
    }
    if day.windspeed_kmh > 50.0 {
        hit(
            Severity::Info,
            format!("💨 Strong winds: {} km/h", day.windspeed_kmh.round()),
        );
    }
    if day.precipitation_probability >= 70 {
        hit(
            Severity::Info,
            format!("☔ High chance of rain: {}%", day.precipitation_probability),
        );
    }
    if FOG.contains(&day.weather_code) {
        hit(Severity::Info, "🌫️ Foggy conditions".to_string());
    }

    Classification { severity, reasons }
}
