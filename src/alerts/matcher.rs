//! Travel-day matching
//!
//! Joins travel-day tasks against fetched forecasts by due date. Each
//! matched task yields one report per monitored location (denormalized
//! per-location, not per-task); a location whose fetch failed yields a
//! `no_data` report instead of a forecast snapshot.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use indexmap::IndexMap;

use crate::alerts::classify;
use crate::models::{
    ForecastDay, ForecastSnapshot, Location, LocationReport, TaskAlerts, TaskRef, TravelTask,
};

/// Match tasks against forecasts over `[today, today + days_ahead]`.
///
/// `forecasts` maps a location key to its fetched days; a missing key means
/// the fetch for that location failed and every report for it carries
/// `no_data`. Output preserves the tasks' relative order, and within each
/// task the configured location order. `days_ahead <= 0` matches nothing.
#[must_use]
pub fn match_travel_days(
    tasks: &[TravelTask],
    locations: &[Location],
    forecasts: &HashMap<String, Vec<ForecastDay>>,
    today: NaiveDate,
    days_ahead: i64,
) -> Vec<TaskAlerts> {
    if days_ahead <= 0 {
        return Vec::new();
    }
    // days_ahead comes straight from the query string; horizons past the
    // calendar maximum saturate instead of overflowing the date arithmetic.
    let window_end = today
        .checked_add_days(Days::new(days_ahead as u64))
        .unwrap_or(NaiveDate::MAX);

    tasks
        .iter()
        .filter(|task| {
            task.is_travel_day
                && !task.is_completed
                && task.due_date >= today
                && task.due_date <= window_end
        })
        .map(|task| {
            let mut weather = IndexMap::with_capacity(locations.len());
            for location in locations {
                weather.insert(
                    location.name.clone(),
                    location_report(location, task.due_date, forecasts),
                );
            }
            TaskAlerts {
                task: TaskRef::from(task),
                weather,
            }
        })
        .collect()
}

fn location_report(
    location: &Location,
    date: NaiveDate,
    forecasts: &HashMap<String, Vec<ForecastDay>>,
) -> LocationReport {
    let day = forecasts
        .get(&location.key)
        .and_then(|days| days.iter().find(|d| d.date == date));

    match day {
        Some(day) => LocationReport {
            location: location.name.clone(),
            date,
            forecast: Some(ForecastSnapshot::from(day)),
            no_data: false,
            alert: classify(day).note(),
        },
        None => LocationReport {
            location: location.name.clone(),
            date,
            forecast: None,
            no_data: true,
            alert: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, Severity};

    fn locations() -> Vec<Location> {
        vec![
            Location::new("dublin", "Dublin, Ireland", 53.3498, -6.2603, "Europe/Dublin"),
            Location::new("ile-de-re", "Île de Ré, France", 46.2, -1.4, "Europe/Paris"),
        ]
    }

    fn task(id: i64, due: NaiveDate, travel: bool, completed: bool) -> TravelTask {
        TravelTask {
            id,
            title: format!("Task {id}"),
            description: None,
            due_date: due,
            priority: Priority::Medium,
            is_travel_day: travel,
            is_completed: completed,
        }
    }

    fn forecast_day(date: NaiveDate, weather_code: u8) -> ForecastDay {
        ForecastDay {
            date,
            temperature_max: 20.0,
            temperature_min: 10.0,
            precipitation_mm: 0.0,
            precipitation_probability: 10,
            windspeed_kmh: 15.0,
            weather_code,
        }
    }

    fn horizon(days: i64, code_for: impl Fn(i64) -> u8) -> Vec<ForecastDay> {
        (0..days)
            .map(|offset| forecast_day(today() + chrono::Duration::days(offset), code_for(offset)))
            .collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_matched_task_gets_one_report_per_location() {
        let due = today() + chrono::Duration::days(3);
        let mut forecasts = HashMap::new();
        forecasts.insert("dublin".to_string(), horizon(7, |_| 95));
        forecasts.insert("ile-de-re".to_string(), horizon(7, |_| 0));

        let alerts = match_travel_days(
            &[task(1, due, true, false)],
            &locations(),
            &forecasts,
            today(),
            7,
        );

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].weather.len(), 2);

        let dublin = &alerts[0].weather["Dublin, Ireland"];
        assert_eq!(dublin.alert.as_ref().unwrap().kind, Severity::Warning);

        let ile = &alerts[0].weather["Île de Ré, France"];
        assert!(ile.alert.is_none());
        assert!(ile.forecast.is_some());
    }

    #[test]
    fn test_location_order_follows_configuration() {
        let due = today() + chrono::Duration::days(1);
        let mut forecasts = HashMap::new();
        forecasts.insert("dublin".to_string(), horizon(7, |_| 0));
        forecasts.insert("ile-de-re".to_string(), horizon(7, |_| 0));

        let alerts = match_travel_days(
            &[task(1, due, true, false)],
            &locations(),
            &forecasts,
            today(),
            7,
        );

        let names: Vec<&String> = alerts[0].weather.keys().collect();
        assert_eq!(names, vec!["Dublin, Ireland", "Île de Ré, France"]);
    }

    #[test]
    fn test_non_travel_tasks_produce_nothing() {
        let due = today() + chrono::Duration::days(2);
        let forecasts = HashMap::new();
        let alerts = match_travel_days(
            &[task(1, due, false, false)],
            &locations(),
            &forecasts,
            today(),
            7,
        );
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_completed_tasks_are_excluded() {
        let due = today() + chrono::Duration::days(1);
        let forecasts = HashMap::new();
        let alerts = match_travel_days(
            &[task(1, due, true, true)],
            &locations(),
            &forecasts,
            today(),
            7,
        );
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_due_date_outside_horizon_is_silently_excluded() {
        let forecasts = HashMap::new();
        let tasks = vec![
            task(1, today() + chrono::Duration::days(8), true, false),
            task(2, today() - chrono::Duration::days(1), true, false),
        ];
        let alerts = match_travel_days(&tasks, &locations(), &forecasts, today(), 7);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_due_date_at_horizon_end_matches() {
        // The matcher window is inclusive at the top; the fetch window is
        // not, so the boundary day reports no_data.
        let due = today() + chrono::Duration::days(7);
        let mut forecasts = HashMap::new();
        forecasts.insert("dublin".to_string(), horizon(7, |_| 0));
        forecasts.insert("ile-de-re".to_string(), horizon(7, |_| 0));

        let alerts = match_travel_days(
            &[task(1, due, true, false)],
            &locations(),
            &forecasts,
            today(),
            7,
        );

        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].weather["Dublin, Ireland"].no_data);
    }

    #[test]
    fn test_extreme_horizon_saturates_instead_of_overflowing() {
        // A request can carry any i64; the window must cap at the calendar
        // maximum rather than panic in the date arithmetic.
        let due = today() + chrono::Duration::days(3);
        let forecasts = HashMap::new();

        for days_ahead in [100_000_000_000, i64::MAX] {
            let alerts = match_travel_days(
                &[task(1, due, true, false)],
                &locations(),
                &forecasts,
                today(),
                days_ahead,
            );
            assert_eq!(alerts.len(), 1);
            assert!(alerts[0].weather["Dublin, Ireland"].no_data);
        }
    }

    #[test]
    fn test_failed_location_reports_no_data() {
        let due = today() + chrono::Duration::days(2);
        let mut forecasts = HashMap::new();
        // No entry for dublin: fetch failed.
        forecasts.insert("ile-de-re".to_string(), horizon(7, |_| 0));

        let alerts = match_travel_days(
            &[task(1, due, true, false)],
            &locations(),
            &forecasts,
            today(),
            7,
        );

        let dublin = &alerts[0].weather["Dublin, Ireland"];
        assert!(dublin.no_data);
        assert!(dublin.forecast.is_none());
        assert!(dublin.alert.is_none());

        let ile = &alerts[0].weather["Île de Ré, France"];
        assert!(!ile.no_data);
        assert!(ile.forecast.is_some());
    }

    #[test]
    fn test_zero_or_negative_horizon_matches_nothing() {
        let due = today();
        let mut forecasts = HashMap::new();
        forecasts.insert("dublin".to_string(), horizon(7, |_| 0));

        for days_ahead in [0, -3] {
            let alerts = match_travel_days(
                &[task(1, due, true, false)],
                &locations(),
                &forecasts,
                today(),
                days_ahead,
            );
            assert!(alerts.is_empty());
        }
    }

    #[test]
    fn test_tasks_preserve_relative_order() {
        let mut forecasts = HashMap::new();
        forecasts.insert("dublin".to_string(), horizon(7, |_| 0));
        forecasts.insert("ile-de-re".to_string(), horizon(7, |_| 0));

        let tasks = vec![
            task(5, today() + chrono::Duration::days(4), true, false),
            task(2, today() + chrono::Duration::days(1), true, false),
            task(9, today() + chrono::Duration::days(2), true, false),
        ];
        let alerts = match_travel_days(&tasks, &locations(), &forecasts, today(), 7);
        let ids: Vec<i64> = alerts.iter().map(|a| a.task.id).collect();
        assert_eq!(ids, vec![5, 2, 9]);
    }
}
