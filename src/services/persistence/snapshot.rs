use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::event::{CalendarEvent, EventId};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Serialized form of one event inside the slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEvent {
    pub id: u64,
    pub title: String,
    pub start: String,
    pub end: String,
    pub color: String,
}

impl From<&CalendarEvent> for StoredEvent {
    fn from(event: &CalendarEvent) -> Self {
        Self {
            id: event.id().0,
            title: event.title().to_string(),
            start: event.start().format(TIMESTAMP_FORMAT).to_string(),
            end: event.end().format(TIMESTAMP_FORMAT).to_string(),
            color: event.color().to_string(),
        }
    }
}

impl StoredEvent {
    fn into_event(self) -> Result<CalendarEvent> {
        // The store hands out `max(id) + 1` next, so the top id is unusable.
        if self.id == u64::MAX {
            anyhow::bail!("id {} is out of range", self.id);
        }
        let start = parse_timestamp(&self.start)
            .with_context(|| format!("unparsable start '{}'", self.start))?;
        let end =
            parse_timestamp(&self.end).with_context(|| format!("unparsable end '{}'", self.end))?;
        Ok(CalendarEvent::new(
            EventId(self.id),
            self.title,
            start,
            end,
            self.color,
        )?)
    }
}

pub fn encode_snapshot(events: &[CalendarEvent]) -> Result<String> {
    let stored: Vec<StoredEvent> = events.iter().map(StoredEvent::from).collect();
    serde_json::to_string_pretty(&stored).context("failed to serialize events")
}

/// Decode the slot contents, dropping entries that do not describe a valid
/// event. Only a value that is not a JSON array fails as a whole.
pub fn decode_snapshot(data: &str) -> Result<Vec<CalendarEvent>> {
    let entries: Vec<serde_json::Value> =
        serde_json::from_str(data).context("stored events are not a JSON array")?;

    let mut seen = HashSet::new();
    let mut events = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        let decoded = serde_json::from_value::<StoredEvent>(entry)
            .context("missing or mistyped fields")
            .and_then(StoredEvent::into_event);

        match decoded {
            Ok(event) if seen.insert(event.id()) => events.push(event),
            Ok(event) => {
                log::warn!("Dropping stored event #{}: duplicate id {}", index, event.id());
            }
            Err(err) => {
                log::warn!("Dropping stored event #{}: {:#}", index, err);
            }
        }
    }

    Ok(events)
}

/// Accepts local ISO-8601 with or without seconds, and RFC 3339 (the offset
/// is discarded since the timeline has no timezone handling).
fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_local())
        })
}
