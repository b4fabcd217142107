//! HTTP handlers for the weather alert endpoints.
//!
//! Upstream weather failures never surface as errors here; the service
//! layer degrades them to `no_data` reports and every weather route
//! answers 200 with whatever data it has.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::WeatherAlertError;
use crate::alerts::AlertService;
use crate::models::{AlertSummary, ForecastSnapshot, Location, TaskAlerts};
use crate::tasks::TaskSource;

const DATA_SOURCE_NAME: &str = "Open-Meteo";
const DATA_SOURCE_LABEL: &str = "Open-Meteo API (free)";

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AlertService>,
    pub tasks: Arc<dyn TaskSource>,
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/alerts", get(get_alerts))
        .route("/refresh", get(refresh_alerts))
        .route("/test", get(test_weather))
        .route("/locations", get(get_locations))
}

#[derive(Debug, Deserialize)]
pub struct AlertsQuery {
    #[serde(default = "default_days_ahead")]
    pub days_ahead: i64,
}

fn default_days_ahead() -> i64 {
    7
}

#[derive(Debug, Serialize)]
pub struct AlertsResponse {
    pub alerts: Vec<TaskAlerts>,
    pub summary: AlertSummary,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    #[serde(flatten)]
    pub body: AlertsResponse,
    pub refresh_metadata: RefreshMetadata,
}

#[derive(Debug, Serialize)]
pub struct RefreshMetadata {
    pub refreshed_at: DateTime<Utc>,
    pub requested_days: i64,
    pub data_source: &'static str,
    pub locations: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TestResponse {
    pub status: &'static str,
    pub test_date: NaiveDate,
    pub locations: IndexMap<String, Option<ForecastSnapshot>>,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LocationsResponse {
    pub locations: Vec<LocationInfo>,
    pub data_source: DataSourceInfo,
}

#[derive(Debug, Serialize)]
pub struct LocationInfo {
    pub key: String,
    pub name: String,
    pub coordinates: Coordinates,
    pub timezone: String,
}

#[derive(Debug, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Location> for LocationInfo {
    fn from(location: &Location) -> Self {
        Self {
            key: location.key.clone(),
            name: location.name.clone(),
            coordinates: Coordinates {
                latitude: location.latitude,
                longitude: location.longitude,
            },
            timezone: location.timezone.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DataSourceInfo {
    pub name: &'static str,
    pub url: &'static str,
    pub api_key_required: bool,
    pub features: Vec<&'static str>,
}

/// Local failures (a broken task file, mostly) map to a 500 with the
/// error's user-facing message. Upstream failures never reach this path.
impl IntoResponse for WeatherAlertError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        let body = Json(serde_json::json!({ "error": self.user_message() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

#[instrument(skip(state))]
async fn get_alerts(
    State(state): State<AppState>,
    Query(query): Query<AlertsQuery>,
) -> Result<Json<AlertsResponse>, WeatherAlertError> {
    info!(days_ahead = query.days_ahead, "fetching weather alerts");
    let tasks = state.tasks.tasks().await?;
    let report = state.service.report(&tasks, query.days_ahead, false).await;
    Ok(Json(AlertsResponse {
        alerts: report.alerts,
        summary: report.summary,
    }))
}

#[instrument(skip(state))]
async fn refresh_alerts(
    State(state): State<AppState>,
    Query(query): Query<AlertsQuery>,
) -> Result<Json<RefreshResponse>, WeatherAlertError> {
    info!(days_ahead = query.days_ahead, "manual weather refresh requested");
    let tasks = state.tasks.tasks().await?;
    let report = state.service.report(&tasks, query.days_ahead, true).await;
    let locations = state
        .service
        .locations()
        .iter()
        .map(|l| l.name.clone())
        .collect();
    Ok(Json(RefreshResponse {
        body: AlertsResponse {
            alerts: report.alerts,
            summary: report.summary,
        },
        refresh_metadata: RefreshMetadata {
            refreshed_at: Utc::now(),
            requested_days: query.days_ahead,
            data_source: DATA_SOURCE_LABEL,
            locations,
        },
    }))
}

#[instrument(skip(state))]
async fn test_weather(State(state): State<AppState>) -> Json<TestResponse> {
    let (test_date, locations) = state.service.probe_tomorrow().await;
    let all_ok = locations.values().all(Option::is_some);
    Json(TestResponse {
        status: "ok",
        test_date,
        message: if all_ok {
            "Open-Meteo API is working correctly"
        } else {
            "Failed to fetch weather data"
        },
        locations,
    })
}

async fn get_locations(State(state): State<AppState>) -> Json<LocationsResponse> {
    Json(LocationsResponse {
        locations: state.service.locations().iter().map(Into::into).collect(),
        data_source: DataSourceInfo {
            name: DATA_SOURCE_NAME,
            url: "https://open-meteo.com/",
            api_key_required: false,
            features: vec![
                "16-day forecast",
                "Temperature (min/max)",
                "Precipitation probability",
                "Wind speed",
                "Weather codes (30+ conditions)",
            ],
        },
    })
}
