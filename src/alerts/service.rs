//! Alert pipeline orchestration
//!
//! Fans forecast fetches out over the monitored locations, degrades failed
//! locations to "no data" rather than failing the batch, and runs the
//! matcher and aggregator over the result.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use futures::future::join_all;
use indexmap::IndexMap;
use tracing::{info, instrument, warn};

use crate::alerts::{match_travel_days, summarize};
use crate::models::{ForecastDay, ForecastSnapshot, Location, TaskAlerts, TravelTask};
use crate::models::AlertSummary;
use crate::weather::{ForecastCache, MAX_FORECAST_DAYS};

/// Result of one alert computation: the alert bundles plus their summary
#[derive(Debug, Clone)]
pub struct AlertReport {
    pub alerts: Vec<TaskAlerts>,
    pub summary: AlertSummary,
}

impl AlertReport {
    fn empty() -> Self {
        Self {
            alerts: Vec::new(),
            summary: AlertSummary::empty(),
        }
    }
}

/// Request-scoped alert pipeline over a cached forecast provider and a
/// fixed, injected location list
pub struct AlertService {
    provider: Arc<ForecastCache>,
    locations: Vec<Location>,
}

impl AlertService {
    pub fn new(provider: Arc<ForecastCache>, locations: Vec<Location>) -> Self {
        Self {
            provider,
            locations,
        }
    }

    /// Monitored locations in configured order
    #[must_use]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Compute the alert report for the given tasks over the next
    /// `days_ahead` days. `bypass_cache` forces fresh upstream fetches.
    pub async fn report(
        &self,
        tasks: &[TravelTask],
        days_ahead: i64,
        bypass_cache: bool,
    ) -> AlertReport {
        self.report_for(tasks, days_ahead, Utc::now().date_naive(), bypass_cache)
            .await
    }

    /// Same as [`AlertService::report`] with an explicit "today", which
    /// keeps the windowing deterministic under test.
    #[instrument(skip(self, tasks), fields(tasks = tasks.len()))]
    pub async fn report_for(
        &self,
        tasks: &[TravelTask],
        days_ahead: i64,
        today: NaiveDate,
        bypass_cache: bool,
    ) -> AlertReport {
        if days_ahead <= 0 {
            return AlertReport::empty();
        }
        let days = days_ahead.min(i64::from(MAX_FORECAST_DAYS)) as u8;

        let forecasts = self.fetch_all(days, bypass_cache).await;
        let alerts = match_travel_days(tasks, &self.locations, &forecasts, today, days_ahead);
        let summary = summarize(&alerts);

        info!(
            travel_tasks = summary.travel_days_checked,
            warnings = summary.warning_count,
            infos = summary.info_count,
            "computed weather alerts"
        );

        AlertReport { alerts, summary }
    }

    /// Fetch forecasts for every monitored location concurrently. Failed
    /// locations are logged and left out of the map; the matcher turns the
    /// gap into `no_data` reports.
    async fn fetch_all(&self, days: u8, bypass_cache: bool) -> HashMap<String, Vec<ForecastDay>> {
        let fetches = self.locations.iter().map(|location| async move {
            let result = self
                .provider
                .daily_forecast(location, days, bypass_cache)
                .await;
            (location.key.clone(), result)
        });

        let mut forecasts = HashMap::with_capacity(self.locations.len());
        for (key, result) in join_all(fetches).await {
            match result {
                Ok(days) => {
                    forecasts.insert(key, days);
                }
                Err(e) => {
                    warn!(location = %key, error = %e, "forecast fetch failed; continuing without data");
                }
            }
        }
        forecasts
    }

    /// Liveness probe: tomorrow's forecast snapshot for every monitored
    /// location, `None` where the fetch failed. Never touches the matcher.
    pub async fn probe_tomorrow(&self) -> (NaiveDate, IndexMap<String, Option<ForecastSnapshot>>) {
        let tomorrow = Utc::now().date_naive() + chrono::Duration::days(1);
        let forecasts = self.fetch_all(2, false).await;

        let mut snapshots = IndexMap::with_capacity(self.locations.len());
        for location in &self.locations {
            let snapshot = forecasts
                .get(&location.key)
                .and_then(|days| days.iter().find(|d| d.date == tomorrow))
                .map(ForecastSnapshot::from);
            snapshots.insert(location.name.clone(), snapshot);
        }
        (tomorrow, snapshots)
    }
}
