//! Open-Meteo daily forecast client
//!
//! Fetches per-day forecast fields from the free Open-Meteo API (no key
//! required). One request covers the whole horizon for one location; there
//! is no retry — a failed location degrades to "no data" upstream.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::{ForecastProvider, MAX_FORECAST_DAYS};
use crate::config::WeatherConfig;
use crate::models::{ForecastDay, Location};
use crate::{Result, WeatherAlertError};

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weathercode,\
precipitation_sum,precipitation_probability_max,windspeed_10m_max";

/// HTTP client for the Open-Meteo forecast endpoint
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenMeteoClient {
    /// Create a client from the weather configuration section
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        Self::with_base_url(
            config.base_url.clone(),
            Duration::from_secs(u64::from(config.timeout_seconds)),
        )
    }

    /// Create a client against an explicit base URL, e.g. a mock server
    pub fn with_base_url(base_url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("wunderlists-weather/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                WeatherAlertError::config(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoClient {
    #[instrument(skip(self, location), fields(location = %location.key))]
    async fn daily_forecast(&self, location: &Location, days: u8) -> Result<Vec<ForecastDay>> {
        let days = days.clamp(1, MAX_FORECAST_DAYS);
        let url = format!("{}/forecast", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("timezone", location.timezone.clone()),
                ("daily", DAILY_FIELDS.to_string()),
                ("forecast_days", days.to_string()),
            ])
            .send()
            .await
            .map_err(|e| WeatherAlertError::upstream(&location.key, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Open-Meteo returned a non-success status");
            return Err(WeatherAlertError::upstream(
                &location.key,
                format!("HTTP {status}"),
            ));
        }

        let payload: ForecastResponse = response
            .json()
            .await
            .map_err(|e| WeatherAlertError::malformed(&location.key, e.to_string()))?;

        let mut forecast = payload.into_days(&location.key)?;
        forecast.sort_by_key(|day| day.date);
        debug!(days = forecast.len(), "retrieved daily forecast");
        Ok(forecast)
    }
}

/// Forecast response from the Open-Meteo daily endpoint
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailyData>,
}

/// Daily data arrays from Open-Meteo; all arrays are index-aligned with `time`
#[derive(Debug, Deserialize)]
struct DailyData {
    time: Vec<NaiveDate>,
    #[serde(rename = "temperature_2m_max", default)]
    temperature_max: Vec<Option<f32>>,
    #[serde(rename = "temperature_2m_min", default)]
    temperature_min: Vec<Option<f32>>,
    #[serde(rename = "weathercode", default)]
    weather_code: Vec<Option<u8>>,
    #[serde(rename = "precipitation_sum", default)]
    precipitation: Vec<Option<f32>>,
    #[serde(rename = "precipitation_probability_max", default)]
    precipitation_probability: Vec<Option<u8>>,
    #[serde(rename = "windspeed_10m_max", default)]
    windspeed: Vec<Option<f32>>,
}

impl ForecastResponse {
    /// Convert the index-aligned arrays into per-day records.
    ///
    /// Individual missing values fall back to neutral defaults; a missing
    /// `daily` block is a malformed payload.
    fn into_days(self, location_key: &str) -> Result<Vec<ForecastDay>> {
        let daily = self.daily.ok_or_else(|| {
            WeatherAlertError::malformed(location_key, "response is missing the daily block")
        })?;

        let days = daily
            .time
            .iter()
            .enumerate()
            .map(|(i, &date)| ForecastDay {
                date,
                temperature_max: daily.temperature_max.get(i).copied().flatten().unwrap_or(0.0),
                temperature_min: daily.temperature_min.get(i).copied().flatten().unwrap_or(0.0),
                precipitation_mm: daily.precipitation.get(i).copied().flatten().unwrap_or(0.0),
                precipitation_probability: daily
                    .precipitation_probability
                    .get(i)
                    .copied()
                    .flatten()
                    .unwrap_or(0),
                windspeed_kmh: daily.windspeed.get(i).copied().flatten().unwrap_or(0.0),
                weather_code: daily.weather_code.get(i).copied().flatten().unwrap_or(0),
            })
            .collect();

        Ok(days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "latitude": 53.3498,
        "longitude": -6.2603,
        "timezone": "Europe/Dublin",
        "daily": {
            "time": ["2025-06-01", "2025-06-02"],
            "temperature_2m_max": [17.2, 19.8],
            "temperature_2m_min": [8.4, 10.1],
            "weathercode": [61, 0],
            "precipitation_sum": [3.2, 0.0],
            "precipitation_probability_max": [80, 10],
            "windspeed_10m_max": [27.4, 14.9]
        }
    }"#;

    #[test]
    fn test_parse_daily_response() {
        let response: ForecastResponse = serde_json::from_str(SAMPLE).unwrap();
        let days = response.into_days("dublin").unwrap();

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(days[0].temperature_max, 17.2);
        assert_eq!(days[0].weather_code, 61);
        assert_eq!(days[0].precipitation_probability, 80);
        assert_eq!(days[1].windspeed_kmh, 14.9);
    }

    #[test]
    fn test_missing_daily_block_is_malformed() {
        let response: ForecastResponse =
            serde_json::from_str(r#"{"latitude": 53.3, "longitude": -6.2}"#).unwrap();
        let err = response.into_days("dublin").unwrap_err();
        assert!(matches!(
            err,
            WeatherAlertError::MalformedResponse { .. }
        ));
        assert!(err.is_degradable());
    }

    #[test]
    fn test_null_values_fall_back_to_defaults() {
        let json = r#"{
            "daily": {
                "time": ["2025-06-01"],
                "temperature_2m_max": [null],
                "temperature_2m_min": [5.0],
                "weathercode": [null],
                "precipitation_sum": [null],
                "precipitation_probability_max": [null],
                "windspeed_10m_max": [null]
            }
        }"#;
        let response: ForecastResponse = serde_json::from_str(json).unwrap();
        let days = response.into_days("dublin").unwrap();
        assert_eq!(days[0].temperature_max, 0.0);
        assert_eq!(days[0].temperature_min, 5.0);
        assert_eq!(days[0].weather_code, 0);
        assert_eq!(days[0].precipitation_probability, 0);
    }
}
