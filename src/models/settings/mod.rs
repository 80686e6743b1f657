// Settings module
// Timeline configuration loaded from settings.toml

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{CalendarError, Result};
use crate::models::event::validate_color;
use crate::models::time_grid::TimeGrid;

/// Longest default duration the creation form will fill in (one week).
pub const MAX_DEFAULT_EVENT_DURATION: i64 = 7 * 24 * 60;

/// Where the event collection is mirrored between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageBackend {
    /// Nothing survives the session.
    Memory,
    /// Pretty-printed JSON array in a single file.
    JsonFile { path: PathBuf },
    /// One row of a SQLite key-value table.
    Sqlite { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineSettings {
    pub start_hour: u32,
    pub end_hour: u32,
    pub pixels_per_hour: f32,
    pub snap_minutes: u32,
    pub column_width: f32,
    /// Minutes used when the creation form leaves the duration empty.
    pub default_event_duration: i64,
    pub default_color: String,
    /// Seed three sample events when the store loads empty.
    pub seed_sample_events: bool,
    /// `None` resolves to a JSON file in the platform data directory.
    pub storage: Option<StorageBackend>,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            start_hour: 0,
            end_hour: 23,
            pixels_per_hour: 60.0,
            snap_minutes: 5,
            column_width: 120.0,
            default_event_duration: 60,
            default_color: "#b9daff".to_string(),
            seed_sample_events: true,
            storage: None,
        }
    }
}

impl TimelineSettings {
    pub fn time_grid(&self) -> Result<TimeGrid> {
        TimeGrid::new(
            self.start_hour,
            self.end_hour,
            self.pixels_per_hour,
            self.snap_minutes,
        )
    }

    /// Configured default duration, clamped to `1..=MAX_DEFAULT_EVENT_DURATION`
    /// minutes so an unvalidated record still yields a usable value.
    pub fn default_duration(&self) -> Duration {
        let minutes = self
            .default_event_duration
            .clamp(1, MAX_DEFAULT_EVENT_DURATION);
        Duration::try_minutes(minutes).unwrap_or_else(|| Duration::hours(1))
    }

    /// Check every field that has a constraint.
    pub fn validate(&self) -> Result<()> {
        self.time_grid()?;
        validate_color(&self.default_color)?;
        if self.default_event_duration <= 0 {
            return Err(CalendarError::validation(
                "Default event duration must be positive",
            ));
        }
        if self.default_event_duration > MAX_DEFAULT_EVENT_DURATION {
            return Err(CalendarError::validation(format!(
                "Default event duration must be at most {} minutes",
                MAX_DEFAULT_EVENT_DURATION
            )));
        }
        if !(self.column_width.is_finite() && self.column_width > 0.0) {
            return Err(CalendarError::validation(
                "Column width must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = TimelineSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.time_grid().unwrap(), TimeGrid::full_day());
        assert_eq!(settings.default_duration(), Duration::minutes(60));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = TimelineSettings::default();
        settings.start_hour = 20;
        settings.end_hour = 8;
        assert!(settings.validate().is_err());

        let mut settings = TimelineSettings::default();
        settings.default_color = "blue".to_string();
        assert!(settings.validate().is_err());

        let mut settings = TimelineSettings::default();
        settings.default_event_duration = 0;
        assert!(settings.validate().is_err());

        let mut settings = TimelineSettings::default();
        settings.default_event_duration = MAX_DEFAULT_EVENT_DURATION + 1;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_oversized_duration_is_clamped_not_fatal() {
        let settings = TimelineSettings {
            default_event_duration: i64::MAX,
            ..TimelineSettings::default()
        };
        assert!(settings.validate().is_err());
        assert_eq!(
            settings.default_duration(),
            Duration::minutes(MAX_DEFAULT_EVENT_DURATION)
        );
    }
}
