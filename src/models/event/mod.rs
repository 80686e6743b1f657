// Event module
// Calendar event record owned by the event store

mod form;

pub use form::{EventDraft, EventForm};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CalendarError, Result};

/// Stable identifier assigned by the store at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A timed event shown in one day column of the timeline.
///
/// Fields are only reachable through accessors so that every instance
/// satisfies `end > start` and carries a non-empty title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    id: EventId,
    title: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    color: String,
}

impl CalendarEvent {
    /// Create a validated event.
    ///
    /// # Examples
    /// ```
    /// use timeline_calendar::models::event::{CalendarEvent, EventId};
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    /// let start = day.and_hms_opt(9, 30, 0).unwrap();
    /// let end = day.and_hms_opt(11, 0, 0).unwrap();
    /// let event = CalendarEvent::new(EventId(1), "Team Meeting", start, end, "#ffdab9").unwrap();
    /// assert_eq!(event.duration().num_minutes(), 90);
    /// ```
    pub fn new(
        id: EventId,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        color: impl Into<String>,
    ) -> Result<Self> {
        let title = title.into();
        let color = color.into();

        validate_title(&title)?;
        validate_times(start, end)?;
        validate_color(&color)?;

        Ok(Self {
            id,
            title,
            start,
            end,
            color,
        })
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Calendar day of the column this event renders in.
    pub fn day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Copy of this event with new boundaries, identity preserved.
    pub fn with_times(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        validate_times(start, end)?;
        Ok(Self {
            start,
            end,
            ..self.clone()
        })
    }

    /// Copy of this event starting at `start` with the same duration.
    pub fn moved_to(&self, start: NaiveDateTime) -> Result<Self> {
        let end = start.checked_add_signed(self.duration()).ok_or_else(|| {
            CalendarError::validation("Event would end past the supported date range")
        })?;
        self.with_times(start, end)
    }
}

pub(crate) fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(CalendarError::validation("Event title cannot be empty"));
    }
    Ok(())
}

pub(crate) fn validate_times(start: NaiveDateTime, end: NaiveDateTime) -> Result<()> {
    if end <= start {
        return Err(CalendarError::validation(
            "Event end time must be after start time",
        ));
    }
    Ok(())
}

/// Colors are opaque to layout but must still be `#RGB` or `#RRGGBB`.
pub(crate) fn validate_color(color: &str) -> Result<()> {
    let hex = color
        .strip_prefix('#')
        .filter(|hex| hex.len() == 3 || hex.len() == 6);
    match hex {
        Some(hex) if hex.chars().all(|c| c.is_ascii_hexdigit()) => Ok(()),
        _ => Err(CalendarError::validation(
            "Color must be in hex format (#RRGGBB or #RGB)",
        )),
    }
}
