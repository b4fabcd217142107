//! Forecast fetching
//!
//! [`ForecastProvider`] is the seam between the alert pipeline and the
//! upstream weather API: [`open_meteo::OpenMeteoClient`] implements it over
//! HTTP, and [`cache::ForecastCache`] decorates any provider with a
//! short-lived in-memory cache.

use async_trait::async_trait;

use crate::Result;
use crate::models::{ForecastDay, Location};

pub mod cache;
pub mod open_meteo;

pub use cache::ForecastCache;
pub use open_meteo::OpenMeteoClient;

/// Maximum forecast horizon supported by the upstream API, in days
pub const MAX_FORECAST_DAYS: u8 = 16;

/// Source of multi-day forecasts for a single location.
///
/// Implementations return days ordered ascending by date, covering
/// `[today, today + days)`. A failure affects only the requested location;
/// callers continue processing other locations.
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    async fn daily_forecast(&self, location: &Location, days: u8) -> Result<Vec<ForecastDay>>;
}
