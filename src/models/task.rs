//! Travel-day task model
//!
//! Tasks are owned by the dashboard's task store. This service only reads
//! them: the matcher filters to incomplete travel-day tasks due within the
//! requested horizon.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task priority as recorded by the dashboard
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A task record as supplied by the task store
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TravelTask {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Due date; travel-day matching joins on this
    pub due_date: NaiveDate,
    #[serde(default)]
    pub priority: Priority,
    /// Marks the task as representing travel
    #[serde(default)]
    pub is_travel_day: bool,
    #[serde(default)]
    pub is_completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_deserializes_with_defaults() {
        let task: TravelTask = serde_json::from_str(
            r#"{"id": 1, "title": "Fly to Dublin", "due_date": "2025-06-10"}"#,
        )
        .unwrap();
        assert_eq!(task.priority, Priority::Medium);
        assert!(!task.is_travel_day);
        assert!(!task.is_completed);
        assert!(task.description.is_none());
    }

    #[test]
    fn test_priority_serialization() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        let p: Priority = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(p, Priority::Low);
    }
}
