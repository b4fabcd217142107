//! Data models for the weather-alert pipeline

pub mod alert;
pub mod forecast;
pub mod location;
pub mod task;

pub use alert::{
    AlertNote, AlertSummary, DateRange, ForecastSnapshot, LocationReport, Severity, TaskAlerts,
    TaskRef,
};
pub use forecast::{ForecastDay, weather_code_to_description};
pub use location::Location;
pub use task::{Priority, TravelTask};
