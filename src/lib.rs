//! Weather alert service for travel-day tasks.
//!
//! Fetches Open-Meteo daily forecasts for a fixed set of monitored
//! locations, classifies each day against a severity rule table, and
//! joins the results with upcoming travel-day tasks into alert bundles
//! served over a small HTTP API.

pub mod alerts;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;
pub mod weather;
pub mod web;

pub use error::WeatherAlertError;

pub type Result<T> = std::result::Result<T, WeatherAlertError>;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
