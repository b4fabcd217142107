//! Daily forecast model and WMO weather code interpretation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of forecast data for one location. Created per fetch call and
/// discarded after the response is built; never persisted.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastDay {
    /// Calendar date this forecast covers
    pub date: NaiveDate,
    /// Maximum temperature in Celsius
    pub temperature_max: f32,
    /// Minimum temperature in Celsius
    pub temperature_min: f32,
    /// Precipitation amount in mm
    pub precipitation_mm: f32,
    /// Maximum precipitation probability in percent (0-100)
    pub precipitation_probability: u8,
    /// Maximum wind speed in km/h
    pub windspeed_kmh: f32,
    /// WMO weather condition code
    pub weather_code: u8,
}

impl ForecastDay {
    /// Human-readable description of the coded weather condition
    #[must_use]
    pub fn description(&self) -> &'static str {
        weather_code_to_description(self.weather_code)
    }
}

/// Convert a WMO weather code to a human-readable description.
///
/// Weather codes: <https://open-meteo.com/en/docs>
#[must_use]
pub fn weather_code_to_description(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear_day() -> ForecastDay {
        ForecastDay {
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            temperature_max: 18.0,
            temperature_min: 9.0,
            precipitation_mm: 0.0,
            precipitation_probability: 5,
            windspeed_kmh: 12.0,
            weather_code: 0,
        }
    }

    #[test]
    fn test_weather_code_descriptions() {
        assert_eq!(weather_code_to_description(0), "Clear sky");
        assert_eq!(weather_code_to_description(45), "Foggy");
        assert_eq!(weather_code_to_description(61), "Slight rain");
        assert_eq!(weather_code_to_description(65), "Heavy rain");
        assert_eq!(weather_code_to_description(75), "Heavy snow");
        assert_eq!(weather_code_to_description(95), "Thunderstorm");
        assert_eq!(weather_code_to_description(99), "Thunderstorm with heavy hail");
        assert_eq!(weather_code_to_description(42), "Unknown");
    }

    #[test]
    fn test_forecast_day_description() {
        let mut day = clear_day();
        assert_eq!(day.description(), "Clear sky");
        day.weather_code = 95;
        assert_eq!(day.description(), "Thunderstorm");
    }
}
