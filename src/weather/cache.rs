//! In-memory forecast cache
//!
//! Decorates a [`ForecastProvider`] with a freshness-window cache keyed by
//! (location, date). Entries are written once and simply expire; the
//! refresh endpoint bypasses the cache and overwrites. Keeping this a
//! wrapper rather than inlining it into the client lets tests run against
//! the bare provider or a zero-TTL cache.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::{ForecastProvider, MAX_FORECAST_DAYS};
use crate::Result;
use crate::models::{ForecastDay, Location};

struct StoredDay {
    day: ForecastDay,
    expires_at: Instant,
}

/// Caching decorator around a forecast provider
pub struct ForecastCache {
    inner: Arc<dyn ForecastProvider>,
    ttl: Duration,
    entries: RwLock<HashMap<String, StoredDay>>,
}

impl ForecastCache {
    /// Wrap a provider with the given freshness window
    pub fn new(inner: Arc<dyn ForecastProvider>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch the forecast for `[today, today + days)`, serving fresh cached
    /// days when available. `bypass` forces a fetch and overwrites the
    /// cached entries.
    #[instrument(skip(self, location), fields(location = %location.key))]
    pub async fn daily_forecast(
        &self,
        location: &Location,
        days: u8,
        bypass: bool,
    ) -> Result<Vec<ForecastDay>> {
        let days = days.clamp(1, MAX_FORECAST_DAYS);

        if !bypass {
            if let Some(cached) = self.lookup(location, days).await {
                debug!("forecast cache hit");
                return Ok(cached);
            }
        }

        let forecast = self.inner.daily_forecast(location, days).await?;
        self.store(location, &forecast).await;
        Ok(forecast)
    }

    /// Return the full horizon from cache, or `None` if any day is missing
    /// or stale
    async fn lookup(&self, location: &Location, days: u8) -> Option<Vec<ForecastDay>> {
        let today = Utc::now().date_naive();
        let now = Instant::now();
        let entries = self.entries.read().await;

        let mut forecast = Vec::with_capacity(usize::from(days));
        for offset in 0..i64::from(days) {
            let date = today + chrono::Duration::days(offset);
            let stored = entries.get(&location.cache_key(date))?;
            if now >= stored.expires_at {
                return None;
            }
            forecast.push(stored.day.clone());
        }
        Some(forecast)
    }

    async fn store(&self, location: &Location, forecast: &[ForecastDay]) {
        let expires_at = Instant::now() + self.ttl;
        let mut entries = self.entries.write().await;
        for day in forecast {
            entries.insert(
                location.cache_key(day.date),
                StoredDay {
                    day: day.clone(),
                    expires_at,
                },
            );
        }
    }
}
