use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use super::{EventStore, ResizeEdge};
use crate::error::{CalendarError, Result};
use crate::models::event::{CalendarEvent, EventDraft, EventId};

impl EventStore {
    /// Add a new event with a fresh id.
    pub fn create(
        &mut self,
        title: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        color: &str,
    ) -> Result<CalendarEvent> {
        // Validate before consuming an id so failed input leaves no gaps.
        let event = CalendarEvent::new(EventId(self.next_id), title, start, end, color)?;
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| CalendarError::validation("No event ids left"))?;

        log::info!("Created event {} '{}' at {}", event.id(), event.title(), event.start());
        self.events.push(event.clone());
        self.persist();
        Ok(event)
    }

    pub fn create_from_draft(&mut self, draft: &EventDraft) -> Result<CalendarEvent> {
        self.create(&draft.title, draft.start, draft.end, &draft.color)
    }

    /// Move an event to `start`, keeping its duration.
    pub fn reschedule(&mut self, id: EventId, start: NaiveDateTime) -> Result<CalendarEvent> {
        let index = self.position(id)?;
        let moved = self.events[index].moved_to(start)?;
        Ok(self.replace(index, moved))
    }

    /// Move an event to `day` at `hour:00`, keeping its duration.
    pub fn move_to(&mut self, id: EventId, day: NaiveDate, hour: u32) -> Result<CalendarEvent> {
        let time = NaiveTime::from_hms_opt(hour, 0, 0)
            .ok_or_else(|| CalendarError::validation(format!("Hour {} is out of range", hour)))?;
        self.reschedule(id, day.and_time(time))
    }

    /// Shift one boundary of an event by a signed `delta`.
    pub fn resize(&mut self, id: EventId, edge: ResizeEdge, delta: Duration) -> Result<CalendarEvent> {
        let index = self.position(id)?;
        let current = &self.events[index];
        let shifted = |time: NaiveDateTime| {
            time.checked_add_signed(delta).ok_or_else(|| {
                CalendarError::validation("Resize would leave the supported date range")
            })
        };
        let (start, end) = match edge {
            ResizeEdge::Start => (shifted(current.start())?, current.end()),
            ResizeEdge::End => (current.start(), shifted(current.end())?),
        };
        let resized = current.with_times(start, end)?;
        Ok(self.replace(index, resized))
    }

    pub fn remove(&mut self, id: EventId) -> Result<()> {
        let index = self.position(id)?;
        let removed = self.events.remove(index);
        log::info!("Removed event {} '{}'", removed.id(), removed.title());
        self.persist();
        Ok(())
    }

    fn replace(&mut self, index: usize, event: CalendarEvent) -> CalendarEvent {
        log::debug!(
            "Updated event {}: {} -> {}",
            event.id(),
            event.start(),
            event.end()
        );
        self.events[index] = event.clone();
        self.persist();
        event
    }
}
