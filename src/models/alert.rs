//! Alert and summary models
//!
//! Alerts are derived fresh on every request from forecast data and never
//! stored. The wire layout mirrors what the React dashboard consumes: one
//! entry per matched travel-day task, nesting a per-location report keyed
//! by display name.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{ForecastDay, TravelTask, task::Priority};

/// Severity tier of a weather alert
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Actionable travel risk
    Warning,
    /// Minor or informational condition
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Severity plus the concatenated human-readable reasons
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AlertNote {
    #[serde(rename = "type")]
    pub kind: Severity,
    pub message: String,
}

/// Rounded forecast fields as shown on the dashboard
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastSnapshot {
    pub temperature_max: f32,
    pub temperature_min: f32,
    pub weather_description: String,
    pub precipitation_mm: f32,
    pub precipitation_probability: u8,
    pub windspeed_kmh: f32,
}

fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

impl From<&ForecastDay> for ForecastSnapshot {
    fn from(day: &ForecastDay) -> Self {
        Self {
            temperature_max: round1(day.temperature_max),
            temperature_min: round1(day.temperature_min),
            weather_description: day.description().to_string(),
            precipitation_mm: round1(day.precipitation_mm),
            precipitation_probability: day.precipitation_probability,
            windspeed_kmh: round1(day.windspeed_kmh),
        }
    }
}

fn is_false(value: &bool) -> bool {
    !value
}

/// Per-location report for one matched task.
///
/// When the fetch for the location failed (or the date fell outside the
/// fetched window) the snapshot is absent and `no_data` is set; such
/// reports never count toward warning/info totals.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LocationReport {
    pub location: String,
    pub date: NaiveDate,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub forecast: Option<ForecastSnapshot>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub no_data: bool,
    pub alert: Option<AlertNote>,
}

/// Task fields echoed back with each alert bundle
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TaskRef {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub priority: Priority,
}

impl From<&TravelTask> for TaskRef {
    fn from(task: &TravelTask) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date,
            priority: task.priority,
        }
    }
}

/// Alert bundle for one matched travel-day task: one report per monitored
/// location, in configured location order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TaskAlerts {
    pub task: TaskRef,
    pub weather: IndexMap<String, LocationReport>,
}

/// Inclusive due-date range over the matched tasks
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Counts reduced over the full alert sequence
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AlertSummary {
    /// Reports with severity warning or info; always warning + info
    pub total_alerts: usize,
    pub warning_count: usize,
    pub info_count: usize,
    /// Distinct matched travel-day tasks
    pub travel_days_checked: usize,
    /// Min/max due date among matched tasks, or null when none matched
    pub date_range: Option<DateRange>,
}

impl AlertSummary {
    /// Summary for a request that matched nothing
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_alerts: 0,
            warning_count: 0,
            info_count: 0,
            travel_days_checked: 0,
            date_range: None,
        }
    }
}
