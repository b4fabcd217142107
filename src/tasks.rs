//! Task storage
//!
//! The dashboard's tasks live in a JSON file; the alert pipeline only
//! needs to read them. The trait seam keeps handlers testable without
//! touching the filesystem.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::Result;
use crate::WeatherAlertError;
use crate::models::TravelTask;

#[async_trait]
pub trait TaskSource: Send + Sync {
    async fn tasks(&self) -> Result<Vec<TravelTask>>;
}

/// Reads tasks from a JSON array file on every call. A missing file is an
/// empty task list, not an error; the dashboard may not have created it yet.
pub struct JsonTaskStore {
    path: PathBuf,
}

impl JsonTaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TaskSource for JsonTaskStore {
    async fn tasks(&self) -> Result<Vec<TravelTask>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "task file not found, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(WeatherAlertError::Io { source: e }),
        };

        let tasks: Vec<TravelTask> = serde_json::from_str(&raw).map_err(|e| {
            WeatherAlertError::validation(format!(
                "invalid task file {}: {e}",
                self.path.display()
            ))
        })?;
        debug!(count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }
}

/// Fixed in-memory task list for tests.
pub struct StaticTaskSource {
    tasks: Vec<TravelTask>,
}

impl StaticTaskSource {
    pub fn new(tasks: Vec<TravelTask>) -> Self {
        Self { tasks }
    }
}

#[async_trait]
impl TaskSource for StaticTaskSource {
    async fn tasks(&self) -> Result<Vec<TravelTask>> {
        Ok(self.tasks.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let store = JsonTaskStore::new("/nonexistent/tasks.json");
        let tasks = store.tasks().await.unwrap();
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn test_reads_json_array() {
        let dir = std::env::temp_dir().join("wunderlists-weather-tasks-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tasks.json");
        std::fs::write(
            &path,
            r#"[{"id": 1, "title": "Fly to Dublin", "due_date": "2026-09-03", "is_travel_day": true}]"#,
        )
        .unwrap();

        let tasks = JsonTaskStore::new(&path).tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Fly to Dublin");
        assert_eq!(
            tasks[0].due_date,
            NaiveDate::from_ymd_opt(2026, 9, 3).unwrap()
        );
        assert!(tasks[0].is_travel_day);
        assert!(!tasks[0].is_completed);
    }

    #[tokio::test]
    async fn test_invalid_json_is_a_validation_error() {
        let dir = std::env::temp_dir().join("wunderlists-weather-tasks-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = JsonTaskStore::new(&path).tasks().await.unwrap_err();
        assert!(matches!(err, WeatherAlertError::Validation { .. }));
    }
}
