//! Layout engine.
//!
//! Turns events into day-column geometry and pointer positions back into grid
//! cells. Everything here is a pure function of the event, the [`TimeGrid`]
//! and the column metrics.
//!
//! Overlapping events on the same day are not packed into lanes; their
//! blocks simply overlap.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::event::{CalendarEvent, EventId};
use crate::models::time_grid::TimeGrid;
use crate::models::view_month::ViewMonth;

/// Vertical placement of one event inside its day column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventLayout {
    pub id: EventId,
    pub day: NaiveDate,
    pub top: f32,
    pub height: f32,
}

impl EventLayout {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Position relative to the top-left corner of the first day column.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridPoint {
    pub x: f32,
    pub y: f32,
}

impl GridPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Day and snapped time under a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub day: NaiveDate,
    pub time: NaiveTime,
}

impl GridCell {
    pub fn start(&self) -> NaiveDateTime {
        self.day.and_time(self.time)
    }
}

/// Axis-aligned rectangle in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl GridRect {
    pub fn contains(&self, point: GridPoint) -> bool {
        point.x >= self.left
            && point.x < self.left + self.width
            && point.y >= self.top
            && point.y < self.top + self.height
    }
}

pub fn layout(event: &CalendarEvent, grid: &TimeGrid) -> EventLayout {
    let (top, height) = layout_span(event.start(), event.end(), grid);
    EventLayout {
        id: event.id(),
        day: event.day(),
        top,
        height,
    }
}

/// `(top, height)` of a block running from `start` to `end`.
///
/// The height never drops below one snap unit so short events stay
/// draggable. An end on a later day is cut at the bottom of the grid.
pub fn layout_span(start: NaiveDateTime, end: NaiveDateTime, grid: &TimeGrid) -> (f32, f32) {
    let top = grid.time_to_offset(start.time());
    let bottom = if end.date() > start.date() {
        grid.height()
    } else {
        grid.time_to_offset(end.time())
    };
    (top, (bottom - top).max(grid.snap_height()))
}

/// Layouts for one day's events, in store order.
pub fn layout_day(events: &[CalendarEvent], grid: &TimeGrid) -> Vec<EventLayout> {
    events.iter().map(|event| layout(event, grid)).collect()
}

/// Horizontal metrics of the visible day columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayColumns {
    first_day: NaiveDate,
    count: u32,
    width: f32,
}

impl DayColumns {
    pub fn new(first_day: NaiveDate, count: u32, width: f32) -> Self {
        Self {
            first_day,
            count,
            width: width.max(1.0),
        }
    }

    pub fn for_month(month: &ViewMonth, width: f32) -> Self {
        Self::new(month.first_day(), month.days_in_month(), width)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn total_width(&self) -> f32 {
        self.count as f32 * self.width
    }

    pub fn index_of(&self, day: NaiveDate) -> Option<u32> {
        let index = (day - self.first_day).num_days();
        u32::try_from(index).ok().filter(|index| *index < self.count)
    }

    pub fn column_left(&self, day: NaiveDate) -> Option<f32> {
        self.index_of(day).map(|index| index as f32 * self.width)
    }

    /// Day under horizontal position `x`, clamped to the first/last column.
    pub fn day_at(&self, x: f32) -> Option<NaiveDate> {
        if self.count == 0 {
            return None;
        }
        let index = if x.is_finite() {
            (x / self.width).floor().clamp(0.0, (self.count - 1) as f32) as u64
        } else {
            0
        };
        self.first_day.checked_add_days(chrono::Days::new(index))
    }

    pub fn hit_test(&self, point: GridPoint, grid: &TimeGrid) -> Option<GridCell> {
        Some(GridCell {
            day: self.day_at(point.x)?,
            time: grid.offset_to_time(point.y),
        })
    }

    /// Screen rectangle of a laid-out event, if its day is visible.
    pub fn event_rect(&self, layout: &EventLayout) -> Option<GridRect> {
        Some(GridRect {
            left: self.column_left(layout.day)?,
            top: layout.top,
            width: self.width,
            height: layout.height,
        })
    }
}
