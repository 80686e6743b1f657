// Event Resize System
//
// Resizing events by dragging handles on event borders.
// - Top/Bottom handles: adjust start/end time
// - Left/Right handles: adjust start/end date by whole days

use chrono::{Duration, NaiveDateTime};

use crate::models::event::{CalendarEvent, EventId};
use crate::models::time_grid::TimeGrid;
use crate::services::event_store::ResizeEdge;
use crate::services::layout::{DayColumns, GridPoint};

/// Which edge of the event is being resized
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    /// Top edge - adjusts start time
    Top,
    /// Bottom edge - adjusts end time
    Bottom,
    /// Left edge - adjusts start date
    Left,
    /// Right edge - adjusts end date
    Right,
}

impl ResizeHandle {
    /// Returns true if this handle adjusts time (vertical drag)
    pub fn is_vertical(&self) -> bool {
        matches!(self, ResizeHandle::Top | ResizeHandle::Bottom)
    }

    /// Event boundary moved by this handle
    pub fn edge(&self) -> ResizeEdge {
        match self {
            ResizeHandle::Top | ResizeHandle::Left => ResizeEdge::Start,
            ResizeHandle::Bottom | ResizeHandle::Right => ResizeEdge::End,
        }
    }
}

/// Context for an active resize operation
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeContext {
    /// The event being resized
    pub event_id: EventId,
    /// Which handle is being dragged
    pub handle: ResizeHandle,
    /// Original event start time
    pub original_start: NaiveDateTime,
    /// Original event end time
    pub original_end: NaiveDateTime,
    /// Pointer position when the handle was grabbed
    pub origin: GridPoint,
    /// Last accepted displacement of the edge
    pub delta: Duration,
}

impl ResizeContext {
    pub fn new(event: &CalendarEvent, handle: ResizeHandle, origin: GridPoint) -> Self {
        Self {
            event_id: event.id(),
            handle,
            original_start: event.start(),
            original_end: event.end(),
            origin,
            delta: Duration::zero(),
        }
    }

    /// Translate the accumulated pointer displacement into an edge delta.
    ///
    /// A delta that would leave less than one snap unit of event is ignored
    /// and the last valid one is kept.
    pub fn update_pointer(&mut self, pointer: GridPoint, grid: &TimeGrid, columns: &DayColumns) {
        let delta = if self.handle.is_vertical() {
            Duration::try_minutes(grid.offset_to_minutes_delta(pointer.y - self.origin.y))
        } else {
            let days = ((pointer.x - self.origin.x) / columns.width()).round();
            if !days.is_finite() {
                return;
            }
            Duration::try_days(days as i64)
        };
        let Some(delta) = delta else {
            return;
        };

        // Out of the calendar's range counts as invalid too
        let Some((start, end)) = self.apply(delta) else {
            return;
        };
        if end - start >= Duration::minutes(i64::from(grid.snap_minutes())) {
            self.delta = delta;
        }
    }

    fn apply(&self, delta: Duration) -> Option<(NaiveDateTime, NaiveDateTime)> {
        match self.handle.edge() {
            ResizeEdge::Start => Some((
                self.original_start.checked_add_signed(delta)?,
                self.original_end,
            )),
            ResizeEdge::End => Some((
                self.original_start,
                self.original_end.checked_add_signed(delta)?,
            )),
        }
    }

    /// Start and end the event would have if released now
    pub fn preview(&self) -> (NaiveDateTime, NaiveDateTime) {
        self.apply(self.delta)
            .unwrap_or((self.original_start, self.original_end))
    }

    pub fn has_changed(&self) -> bool {
        self.delta != Duration::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn meeting() -> CalendarEvent {
        CalendarEvent::new(EventId(1), "Team Meeting", at(15, 9, 30), at(15, 11, 0), "#ffdab9")
            .unwrap()
    }

    fn columns() -> DayColumns {
        DayColumns::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), 30, 100.0)
    }

    #[test]
    fn test_resize_handle_is_vertical() {
        assert!(ResizeHandle::Top.is_vertical());
        assert!(ResizeHandle::Bottom.is_vertical());
        assert!(!ResizeHandle::Left.is_vertical());
        assert!(!ResizeHandle::Right.is_vertical());
    }

    #[test]
    fn test_handle_edges() {
        assert_eq!(ResizeHandle::Top.edge(), ResizeEdge::Start);
        assert_eq!(ResizeHandle::Left.edge(), ResizeEdge::Start);
        assert_eq!(ResizeHandle::Bottom.edge(), ResizeEdge::End);
        assert_eq!(ResizeHandle::Right.edge(), ResizeEdge::End);
    }

    #[test]
    fn test_bottom_handle_snaps_vertical_delta() {
        let mut context = ResizeContext::new(&meeting(), ResizeHandle::Bottom, GridPoint::new(1450.0, 660.0));
        context.update_pointer(GridPoint::new(1460.0, 722.0), &TimeGrid::full_day(), &columns());

        assert_eq!(context.delta, Duration::minutes(60));
        assert_eq!(context.preview(), (at(15, 9, 30), at(15, 12, 0)));
        assert!(context.has_changed());
    }

    #[test]
    fn test_top_handle_cannot_pass_end() {
        let mut context = ResizeContext::new(&meeting(), ResizeHandle::Top, GridPoint::new(1450.0, 570.0));
        let grid = TimeGrid::full_day();

        context.update_pointer(GridPoint::new(1450.0, 630.0), &grid, &columns());
        assert_eq!(context.preview(), (at(15, 10, 30), at(15, 11, 0)));

        context.update_pointer(GridPoint::new(1450.0, 700.0), &grid, &columns());
        assert_eq!(context.preview(), (at(15, 10, 30), at(15, 11, 0)));
    }

    #[test]
    fn test_right_handle_moves_end_by_days() {
        let mut context = ResizeContext::new(&meeting(), ResizeHandle::Right, GridPoint::new(1490.0, 600.0));
        context.update_pointer(GridPoint::new(1700.0, 900.0), &TimeGrid::full_day(), &columns());

        assert_eq!(context.delta, Duration::days(2));
        assert_eq!(context.preview(), (at(15, 9, 30), at(17, 11, 0)));
    }

    #[test]
    fn test_pointer_past_calendar_range_is_ignored() {
        let mut context = ResizeContext::new(&meeting(), ResizeHandle::Right, GridPoint::new(1490.0, 600.0));
        let grid = TimeGrid::full_day();
        context.update_pointer(GridPoint::new(1700.0, 600.0), &grid, &columns());

        // Representable day count, but far beyond the last date
        context.update_pointer(GridPoint::new(1.0e12, 600.0), &grid, &columns());
        assert_eq!(context.delta, Duration::days(2));

        // Day count too large for a duration at all
        context.update_pointer(GridPoint::new(1.0e30, 600.0), &grid, &columns());
        assert_eq!(context.preview(), (at(15, 9, 30), at(17, 11, 0)));

        let mut bottom = ResizeContext::new(&meeting(), ResizeHandle::Bottom, GridPoint::new(1450.0, 660.0));
        bottom.update_pointer(GridPoint::new(1450.0, 1.0e30), &grid, &columns());
        assert!(!bottom.has_changed());
        assert_eq!(bottom.preview(), (at(15, 9, 30), at(15, 11, 0)));
    }
}
