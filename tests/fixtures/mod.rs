// Test fixtures - reusable test data
// Provides consistent test data across all test files
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};

use timeline_calendar::models::settings::TimelineSettings;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// A day in June 2024, the month most scenarios run in
    pub fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    pub fn july(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, day).unwrap()
    }

    /// June `day`, 2024 at `hour:minute`
    pub fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        june(day).and_hms_opt(hour, minute, 0).unwrap()
    }
}

/// Sample stored snapshots
pub mod snapshots {
    /// One event per malformation the loader must survive, plus two keepers
    /// (ids 1 and 6).
    pub const MIXED: &str = r##"[
        {"id": 1, "title": "Team Meeting", "start": "2024-06-15T09:30:00", "end": "2024-06-15T11:00:00", "color": "#ffdab9"},
        {"id": 2, "title": "No end", "start": "2024-06-16T09:00:00", "color": "#ffdab9"},
        {"id": 3, "title": "Bad start", "start": "next tuesday", "end": "2024-06-16T10:00:00", "color": "#ffdab9"},
        {"id": 4, "title": "Backwards", "start": "2024-06-17T10:00:00", "end": "2024-06-17T09:00:00", "color": "#ffdab9"},
        {"id": 1, "title": "Duplicate", "start": "2024-06-18T10:00:00", "end": "2024-06-18T11:00:00", "color": "#ffdab9"},
        {"id": 5, "title": "  ", "start": "2024-06-19T10:00:00", "end": "2024-06-19T11:00:00", "color": "#ffdab9"},
        {"id": 6, "title": "Client Call", "start": "2024-06-20T14:00", "end": "2024-06-20T14:30:00+02:00", "color": "#b9ffda"},
        "not an object"
    ]"##;
}

/// Settings with sample seeding turned off
pub fn unseeded_settings() -> TimelineSettings {
    TimelineSettings {
        seed_sample_events: false,
        ..TimelineSettings::default()
    }
}
