//! Timeline state container.
//!
//! Owns everything one month view needs: the visible [`ViewMonth`], the
//! [`TimeGrid`], the [`EventStore`] and the [`InteractionController`]. The
//! renderer reads from it and forwards pointer callbacks to it.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::error::{CalendarError, Result};
use crate::interaction::{GesturePreview, InteractionController, ResizeHandle};
use crate::models::event::{CalendarEvent, EventForm, EventId};
use crate::models::settings::TimelineSettings;
use crate::models::time_grid::TimeGrid;
use crate::models::view_month::ViewMonth;
use crate::services::event_store::EventStore;
use crate::services::layout::{self, DayColumns, EventLayout, GridPoint, GridRect};

/// Title, day of month, start (h, m), length in minutes, color.
const SAMPLE_EVENTS: [(&str, u32, (u32, u32), i64, &str); 3] = [
    ("Team Meeting", 15, (10, 30), 90, "#ffdab9"),
    ("Client Call", 20, (14, 0), 90, "#b9ffda"),
    ("Workshop", 25, (9, 0), 480, "#dab9ff"),
];

pub struct Timeline {
    settings: TimelineSettings,
    month: ViewMonth,
    grid: TimeGrid,
    store: EventStore,
    controller: InteractionController,
}

impl Timeline {
    /// Timeline showing the month of `today`.
    ///
    /// An invalid grid configuration falls back to the full-day grid. Sample
    /// events are seeded only into a store whose slot never held anything, so
    /// a deliberately emptied calendar stays empty and unreadable contents
    /// are not overwritten.
    pub fn new(settings: TimelineSettings, store: EventStore, today: NaiveDate) -> Self {
        let grid = settings.time_grid().unwrap_or_else(|err| {
            log::warn!("Falling back to the full-day grid: {}", err);
            TimeGrid::full_day()
        });

        let mut timeline = Self {
            settings,
            month: ViewMonth::containing(today),
            grid,
            store,
            controller: InteractionController::new(),
        };
        let first_run = timeline.store.is_empty() && !timeline.store.had_saved_data();
        if first_run && timeline.settings.seed_sample_events {
            timeline.seed_samples();
        }
        timeline
    }

    fn seed_samples(&mut self) {
        for (title, day, (hour, minute), minutes, color) in SAMPLE_EVENTS {
            let Some(start) = self.month.day(day).and_hms_opt(hour, minute, 0) else {
                continue;
            };
            let Some(end) = start.checked_add_signed(Duration::minutes(minutes)) else {
                continue;
            };
            if let Err(err) = self.store.create(title, start, end, color) {
                log::warn!("Skipping sample event '{}': {}", title, err);
            }
        }
        log::info!("Seeded {} sample events for {}", self.store.len(), self.month);
    }

    pub fn settings(&self) -> &TimelineSettings {
        &self.settings
    }

    pub fn month(&self) -> ViewMonth {
        self.month
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn columns(&self) -> DayColumns {
        DayColumns::for_month(&self.month, self.settings.column_width)
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn persistence_error(&self) -> Option<&CalendarError> {
        self.store.last_persistence_error()
    }

    pub fn visible_days(&self) -> Vec<NaiveDate> {
        self.month.days()
    }

    pub fn hours(&self) -> Vec<u32> {
        self.grid.hours().collect()
    }

    pub fn visible_events(&self) -> Vec<CalendarEvent> {
        self.store.list(self.month.first_day(), self.month.last_day())
    }

    pub fn events_for_day(&self, day: NaiveDate) -> Vec<CalendarEvent> {
        self.store.list_for_day(day)
    }

    pub fn layouts_for_day(&self, day: NaiveDate) -> Vec<EventLayout> {
        layout::layout_day(&self.events_for_day(day), &self.grid)
    }

    /// Block of a stored event in grid coordinates, if its day is shown.
    pub fn event_rect(&self, id: EventId) -> Option<GridRect> {
        let event = self.store.get(id)?;
        self.columns().event_rect(&layout::layout(&event, &self.grid))
    }

    /// Topmost event whose block contains `point`.
    pub fn event_at(&self, point: GridPoint) -> Option<EventId> {
        let columns = self.columns();
        let day = columns.day_at(point.x)?;
        self.layouts_for_day(day)
            .iter()
            .rev()
            .find(|layout| {
                columns
                    .event_rect(layout)
                    .is_some_and(|rect| rect.contains(point))
            })
            .map(|layout| layout.id)
    }

    pub fn navigate_previous(&mut self) {
        self.show_month(self.month.previous());
    }

    pub fn navigate_next(&mut self) {
        self.show_month(self.month.next());
    }

    fn show_month(&mut self, month: ViewMonth) {
        self.controller.cancel();
        self.month = month;
        log::info!("Showing {}", self.month.title());
    }

    /// Validate the form and add the event it describes.
    pub fn create_event(&mut self, form: &EventForm) -> Result<CalendarEvent> {
        let draft = form.parse(self.settings.default_duration(), &self.settings.default_color)?;
        self.store.create_from_draft(&draft)
    }

    pub fn delete_event(&mut self, id: EventId) -> Result<()> {
        if self.controller.active_event_id() == Some(id) {
            self.controller.cancel();
        }
        self.store.remove(id)
    }

    /// Pointer-down on an event body.
    pub fn on_drag_start(&mut self, id: EventId, point: GridPoint) -> bool {
        let (Some(event), Some(cell)) = (
            self.store.get(id),
            self.columns().hit_test(point, &self.grid),
        ) else {
            return false;
        };
        self.controller.begin_drag(&event, cell)
    }

    pub fn on_drag_move(&mut self, point: GridPoint) {
        if let Some(cell) = self.columns().hit_test(point, &self.grid) {
            self.controller.drag_to(cell, &self.grid);
        }
    }

    pub fn on_drop(&mut self) -> Option<CalendarEvent> {
        self.controller.finish_drag(&mut self.store)
    }

    /// Pointer-down on one of an event's resize handles.
    pub fn on_resize_start(&mut self, id: EventId, handle: ResizeHandle, point: GridPoint) -> bool {
        match self.store.get(id) {
            Some(event) => self.controller.begin_resize(&event, handle, point),
            None => false,
        }
    }

    pub fn on_resize_move(&mut self, point: GridPoint) {
        let columns = self.columns();
        self.controller.resize_to(point, &self.grid, &columns);
    }

    pub fn on_resize_end(&mut self) -> Option<CalendarEvent> {
        self.controller.finish_resize(&mut self.store)
    }

    pub fn on_cancel(&mut self) -> bool {
        self.controller.cancel()
    }

    pub fn on_pointer_leave(&mut self) -> bool {
        let cancelled = self.controller.cancel();
        if cancelled {
            log::debug!("Pointer left the grid; gesture cancelled");
        }
        cancelled
    }

    pub fn gesture_preview(&self) -> Option<GesturePreview> {
        self.controller.preview()
    }

    /// Ghost block for the active gesture, placed on the preview's start day.
    pub fn preview_layout(&self) -> Option<EventLayout> {
        let preview = self.gesture_preview()?;
        let (top, height) = layout::layout_span(preview.start, preview.end, &self.grid);
        Some(EventLayout {
            id: preview.event_id,
            day: preview.start.date(),
            top,
            height,
        })
    }

    /// Default start for the "New event" form: the first day shown at the
    /// first grid hour.
    pub fn default_slot(&self) -> NaiveDateTime {
        self.month
            .first_day()
            .and_hms_opt(self.grid.start_hour(), 0, 0)
            .unwrap_or_else(|| self.month.first_day().and_time(chrono::NaiveTime::MIN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::persistence::MemorySlot;

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        june(day).and_hms_opt(hour, minute, 0).unwrap()
    }

    fn unseeded() -> TimelineSettings {
        TimelineSettings {
            seed_sample_events: false,
            ..TimelineSettings::default()
        }
    }

    fn with_meeting() -> (Timeline, EventId) {
        let mut store = EventStore::new();
        let meeting = store
            .create("Team Meeting", at(15, 9, 30), at(15, 11, 0), "#ffdab9")
            .unwrap();
        (Timeline::new(unseeded(), store, june(3)), meeting.id())
    }

    #[test]
    fn test_empty_store_is_seeded() {
        let timeline = Timeline::new(TimelineSettings::default(), EventStore::new(), june(3));
        let titles: Vec<_> = timeline
            .visible_events()
            .iter()
            .map(|event| event.title().to_string())
            .collect();
        assert_eq!(titles, ["Team Meeting", "Client Call", "Workshop"]);

        let meeting = &timeline.events_for_day(june(15))[0];
        assert_eq!(meeting.start(), at(15, 10, 30));
        assert_eq!(meeting.end(), at(15, 12, 0));
    }

    #[test]
    fn test_loaded_store_is_not_seeded() {
        let (timeline, _) = with_meeting();
        assert_eq!(timeline.store().len(), 1);

        let settings = TimelineSettings::default();
        let slot = MemorySlot::with_contents(
            r##"[{"id":4,"title":"Dentist","start":"2024-06-02T08:00:00","end":"2024-06-02T08:30:00","color":"#ffffff"}]"##,
        );
        let timeline = Timeline::new(settings, EventStore::open(Box::new(slot)), june(3));
        assert_eq!(timeline.store().len(), 1);
    }

    #[test]
    fn test_unreadable_slot_is_neither_seeded_nor_overwritten() {
        let truncated = r##"[{"id":1,"title":"Important","start":"2024-06-02T08:00:00","##;
        let slot = MemorySlot::with_contents(truncated);

        let timeline = Timeline::new(
            TimelineSettings::default(),
            EventStore::open(Box::new(slot.clone())),
            june(3),
        );
        assert!(timeline.store().is_empty());
        assert!(timeline.persistence_error().is_some());
        assert_eq!(slot.contents().as_deref(), Some(truncated));
    }

    #[test]
    fn test_emptied_calendar_stays_empty() {
        let slot = MemorySlot::new();
        let mut timeline = Timeline::new(
            TimelineSettings::default(),
            EventStore::open(Box::new(slot.clone())),
            june(3),
        );
        let seeded: Vec<_> = timeline.store().list_all().iter().map(|e| e.id()).collect();
        assert_eq!(seeded.len(), 3);
        for id in seeded {
            timeline.delete_event(id).unwrap();
        }
        assert_eq!(slot.contents().unwrap().trim(), "[]");

        let relaunched = Timeline::new(
            TimelineSettings::default(),
            EventStore::open(Box::new(slot)),
            june(3),
        );
        assert!(relaunched.store().is_empty());
    }

    #[test]
    fn test_client_call_sample_lasts_ninety_minutes() {
        let timeline = Timeline::new(TimelineSettings::default(), EventStore::new(), june(3));
        let call = &timeline.events_for_day(june(20))[0];
        assert_eq!(call.title(), "Client Call");
        assert_eq!(call.start(), at(20, 14, 0));
        assert_eq!(call.end(), at(20, 15, 30));
    }

    #[test]
    fn test_navigation_rescopes_visible_events() {
        let (mut timeline, _) = with_meeting();
        timeline
            .create_event(&EventForm {
                title: "Fireworks".into(),
                date: "2024-07-04".into(),
                hour: "21".into(),
                ..EventForm::default()
            })
            .unwrap();

        assert_eq!(timeline.visible_days().len(), 30);
        assert_eq!(timeline.visible_events().len(), 1);

        timeline.navigate_next();
        assert_eq!(timeline.month().title(), "July 2024");
        assert_eq!(timeline.visible_days().len(), 31);
        let july = timeline.visible_events();
        assert_eq!(july.len(), 1);
        assert_eq!(july[0].title(), "Fireworks");
        assert_eq!(july[0].duration(), Duration::minutes(60));

        timeline.navigate_previous();
        timeline.navigate_previous();
        assert_eq!(timeline.month().title(), "May 2024");
        assert!(timeline.visible_events().is_empty());
    }

    #[test]
    fn test_drag_by_pointer_moves_event() {
        let (mut timeline, id) = with_meeting();
        // Column 14 is June 15th at the default 120 px width.
        assert!(timeline.on_drag_start(id, GridPoint::new(1740.0, 600.0)));
        timeline.on_drag_move(GridPoint::new(1980.0, 870.0));

        let preview = timeline.gesture_preview().unwrap();
        assert_eq!((preview.start, preview.end), (at(16, 14, 0), at(16, 15, 30)));
        assert_eq!(timeline.preview_layout().unwrap().day, june(16));

        let moved = timeline.on_drop().unwrap();
        assert_eq!(moved.start(), at(16, 14, 0));
        assert!(timeline.events_for_day(june(15)).is_empty());
        assert_eq!(timeline.events_for_day(june(16)).len(), 1);
    }

    #[test]
    fn test_resize_by_pointer_grows_layout() {
        let (mut timeline, id) = with_meeting();
        assert!(timeline.on_resize_start(id, ResizeHandle::Bottom, GridPoint::new(1740.0, 660.0)));
        timeline.on_resize_move(GridPoint::new(1740.0, 720.0));
        timeline.on_resize_end().unwrap();

        let layout = timeline.layouts_for_day(june(15))[0];
        assert_eq!(layout.height, 150.0);
    }

    #[test]
    fn test_pointer_leave_cancels_gesture() {
        let (mut timeline, id) = with_meeting();
        timeline.on_drag_start(id, GridPoint::new(1740.0, 600.0));
        timeline.on_drag_move(GridPoint::new(1980.0, 870.0));

        assert!(timeline.on_pointer_leave());
        assert_eq!(timeline.on_drop(), None);
        assert_eq!(timeline.events_for_day(june(15))[0].start(), at(15, 9, 30));
        assert!(!timeline.on_cancel());
    }

    #[test]
    fn test_event_at_and_delete() {
        let (mut timeline, id) = with_meeting();
        assert_eq!(timeline.event_at(GridPoint::new(1740.0, 600.0)), Some(id));
        assert_eq!(timeline.event_at(GridPoint::new(1740.0, 700.0)), None);
        let rect = timeline.event_rect(id).unwrap();
        assert_eq!((rect.left, rect.top, rect.height), (1680.0, 570.0, 90.0));

        timeline.on_drag_start(id, GridPoint::new(1740.0, 600.0));
        timeline.delete_event(id).unwrap();
        assert!(timeline.controller().is_idle());
        assert!(timeline.delete_event(id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_create_event_reports_validation() {
        let (mut timeline, _) = with_meeting();
        let err = timeline
            .create_event(&EventForm {
                title: "   ".into(),
                date: "2024-06-10".into(),
                hour: "9".into(),
                ..EventForm::default()
            })
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(timeline.store().len(), 1);
    }

    #[test]
    fn test_invalid_grid_falls_back_to_full_day() {
        let settings = TimelineSettings {
            snap_minutes: 7,
            ..unseeded()
        };
        let timeline = Timeline::new(settings, EventStore::new(), june(3));
        assert_eq!(timeline.grid(), &TimeGrid::full_day());
        assert_eq!(timeline.hours().len(), 24);
        assert_eq!(timeline.default_slot(), at(1, 0, 0));
    }
}
