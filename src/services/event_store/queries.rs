use chrono::NaiveDate;

use super::EventStore;
use crate::models::event::{CalendarEvent, EventId};
use crate::utils::date::is_same_day;

impl EventStore {
    pub fn get(&self, id: EventId) -> Option<CalendarEvent> {
        self.events.iter().find(|event| event.id() == id).cloned()
    }

    /// Every event ordered by start, then id.
    pub fn list_all(&self) -> Vec<CalendarEvent> {
        sorted(self.events.iter().cloned().collect())
    }

    /// Events starting on any day from `first_day` through `last_day`.
    pub fn list(&self, first_day: NaiveDate, last_day: NaiveDate) -> Vec<CalendarEvent> {
        sorted(
            self.events
                .iter()
                .filter(|event| {
                    let day = event.day();
                    day >= first_day && day <= last_day
                })
                .cloned()
                .collect(),
        )
    }

    pub fn list_for_day(&self, day: NaiveDate) -> Vec<CalendarEvent> {
        sorted(
            self.events
                .iter()
                .filter(|event| is_same_day(event.start(), day))
                .cloned()
                .collect(),
        )
    }
}

fn sorted(mut events: Vec<CalendarEvent>) -> Vec<CalendarEvent> {
    events.sort_by_key(|event| (event.start(), event.id()));
    events
}
