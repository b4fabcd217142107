//! Summary aggregation
//!
//! Pure reduction over the alert sequence. Reports with severity `none`
//! and `no_data` reports are excluded from the counts.

use crate::models::{AlertSummary, DateRange, Severity, TaskAlerts};

/// Reduce the full alert sequence to dashboard summary counts
#[must_use]
pub fn summarize(alerts: &[TaskAlerts]) -> AlertSummary {
    let mut warning_count = 0;
    let mut info_count = 0;

    for bundle in alerts {
        for report in bundle.weather.values() {
            match report.alert.as_ref().map(|note| note.kind) {
                Some(Severity::Warning) => warning_count += 1,
                Some(Severity::Info) => info_count += 1,
                None => {}
            }
        }
    }

    let date_range = alerts
        .iter()
        .map(|bundle| bundle.task.due_date)
        .fold(None::<DateRange>, |range, due| {
            Some(match range {
                None => DateRange { from: due, to: due },
                Some(range) => DateRange {
                    from: range.from.min(due),
                    to: range.to.max(due),
                },
            })
        });

    AlertSummary {
        total_alerts: warning_count + info_count,
        warning_count,
        info_count,
        travel_days_checked: alerts.len(),
        date_range,
    }
}
