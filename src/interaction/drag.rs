// Drag-to-move gesture state
//
// The event keeps its original times while dragging; the hovered cell only
// drives a preview until the drop commits it.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::models::event::{CalendarEvent, EventId};
use crate::models::time_grid::TimeGrid;
use crate::services::layout::GridCell;

#[derive(Clone, Debug, PartialEq)]
pub struct DragContext {
    pub event_id: EventId,
    pub original_start: NaiveDateTime,
    pub original_end: NaiveDateTime,
    /// Cell under the pointer when the drag began.
    pub origin: GridCell,
    pub hovered: GridCell,
    pub target_day: NaiveDate,
    pub target_hour: u32,
}

impl DragContext {
    pub fn from_event(event: &CalendarEvent, origin: GridCell) -> Self {
        Self {
            event_id: event.id(),
            original_start: event.start(),
            original_end: event.end(),
            origin,
            hovered: origin,
            target_day: event.day(),
            target_hour: event.start().hour(),
        }
    }

    pub fn duration(&self) -> Duration {
        self.original_end - self.original_start
    }

    /// Recompute the drop target for a new hovered cell.
    ///
    /// The pointer's offset inside the event is kept, so grabbing the middle
    /// of a block and moving down one hour moves the start down one hour.
    pub fn update_hover(&mut self, hovered: GridCell, grid: &TimeGrid) {
        let shift = minute_of_day(hovered.time) - minute_of_day(self.origin.time);
        let first = i64::from(grid.start_hour()) * 60;
        let last = i64::from(grid.end_hour()) * 60 + 59;
        let start = (minute_of_day(self.original_start.time()) + shift).clamp(first, last);

        self.hovered = hovered;
        self.target_day = hovered.day;
        self.target_hour = (start / 60) as u32;
    }

    /// A drag that never left its starting cell is a click, not a move.
    pub fn has_moved(&self) -> bool {
        self.hovered != self.origin
    }

    pub fn target_start(&self) -> NaiveDateTime {
        let time = NaiveTime::from_hms_opt(self.target_hour, 0, 0).unwrap_or(NaiveTime::MIN);
        self.target_day.and_time(time)
    }

    /// Where the event would land if dropped now.
    pub fn preview(&self) -> (NaiveDateTime, NaiveDateTime) {
        if !self.has_moved() {
            return (self.original_start, self.original_end);
        }
        let start = self.target_start();
        match start.checked_add_signed(self.duration()) {
            Some(end) => (start, end),
            None => (self.original_start, self.original_end),
        }
    }
}

fn minute_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour() * 60 + time.minute())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn cell(day: u32, hour: u32, minute: u32) -> GridCell {
        let at = at(day, hour, minute);
        GridCell {
            day: at.date(),
            time: at.time(),
        }
    }

    fn meeting() -> CalendarEvent {
        CalendarEvent::new(EventId(1), "Team Meeting", at(15, 9, 30), at(15, 11, 0), "#ffdab9")
            .unwrap()
    }

    #[test]
    fn test_initial_preview_is_original() {
        let context = DragContext::from_event(&meeting(), cell(15, 10, 0));
        assert!(!context.has_moved());
        assert_eq!(context.preview(), (at(15, 9, 30), at(15, 11, 0)));
    }

    #[test]
    fn test_hover_keeps_pointer_offset() {
        let mut context = DragContext::from_event(&meeting(), cell(15, 10, 0));
        context.update_hover(cell(16, 14, 30), &TimeGrid::full_day());

        assert_eq!(context.target_day, NaiveDate::from_ymd_opt(2024, 6, 16).unwrap());
        assert_eq!(context.target_hour, 14);
        assert_eq!(context.preview(), (at(16, 14, 0), at(16, 15, 30)));
    }

    #[test]
    fn test_hover_clamps_to_grid_hours() {
        let grid = TimeGrid::new(8, 18, 60.0, 5).unwrap();
        let mut context = DragContext::from_event(&meeting(), cell(15, 10, 0));
        context.update_hover(cell(15, 8, 0), &grid);
        assert_eq!(context.target_hour, 8);

        context.update_hover(cell(15, 23, 55), &grid);
        assert_eq!(context.target_hour, 18);
    }

    #[test]
    fn test_preview_past_last_date_keeps_original() {
        let last = NaiveDate::MAX;
        let eve = last.pred_opt().unwrap();
        let event = CalendarEvent::new(
            EventId(9),
            "Long haul",
            eve.and_hms_opt(22, 0, 0).unwrap(),
            last.and_hms_opt(23, 0, 0).unwrap(),
            "#ffdab9",
        )
        .unwrap();
        let origin = GridCell {
            day: eve,
            time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
        };
        let mut context = DragContext::from_event(&event, origin);

        context.update_hover(
            GridCell {
                day: last,
                ..origin
            },
            &TimeGrid::full_day(),
        );
        assert!(context.has_moved());
        assert_eq!(context.preview(), (event.start(), event.end()));
    }
}
