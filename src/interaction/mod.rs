//! Interaction controller.
//!
//! A single-gesture state machine: `Idle`, `Dragging` or `Resizing`. Both
//! gestures only preview while the pointer moves and commit to the
//! [`EventStore`] once on release, so cancelling never has anything to
//! restore.

pub mod drag;
pub mod resize;

pub use drag::DragContext;
pub use resize::{ResizeContext, ResizeHandle};

use chrono::NaiveDateTime;

use crate::error::CalendarError;
use crate::models::event::{CalendarEvent, EventId};
use crate::models::time_grid::TimeGrid;
use crate::services::event_store::EventStore;
use crate::services::layout::{DayColumns, GridCell, GridPoint};

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging(DragContext),
    Resizing(ResizeContext),
}

/// Candidate times of the event under the active gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GesturePreview {
    pub event_id: EventId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Debug, Default)]
pub struct InteractionController {
    gesture: Gesture,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.gesture, Gesture::Idle)
    }

    pub fn active_event_id(&self) -> Option<EventId> {
        match &self.gesture {
            Gesture::Idle => None,
            Gesture::Dragging(drag) => Some(drag.event_id),
            Gesture::Resizing(resize) => Some(resize.event_id),
        }
    }

    pub fn preview(&self) -> Option<GesturePreview> {
        let (event_id, (start, end)) = match &self.gesture {
            Gesture::Idle => return None,
            Gesture::Dragging(drag) => (drag.event_id, drag.preview()),
            Gesture::Resizing(resize) => (resize.event_id, resize.preview()),
        };
        Some(GesturePreview {
            event_id,
            start,
            end,
        })
    }

    /// Idle -> Dragging. Rejected while another gesture is active.
    pub fn begin_drag(&mut self, event: &CalendarEvent, origin: GridCell) -> bool {
        if !self.is_idle() {
            log::debug!("Ignoring drag of event {}: gesture in progress", event.id());
            return false;
        }
        log::debug!("Drag started for event {} at {:?}", event.id(), origin);
        self.gesture = Gesture::Dragging(DragContext::from_event(event, origin));
        true
    }

    pub fn drag_to(&mut self, hovered: GridCell, grid: &TimeGrid) {
        if let Gesture::Dragging(drag) = &mut self.gesture {
            drag.update_hover(hovered, grid);
        }
    }

    /// Dragging -> Idle, committing the move.
    ///
    /// Returns the moved event, or `None` when nothing changed or the event
    /// vanished mid-gesture.
    pub fn finish_drag(&mut self, store: &mut EventStore) -> Option<CalendarEvent> {
        if !matches!(self.gesture, Gesture::Dragging(_)) {
            return None;
        }
        let Gesture::Dragging(drag) = std::mem::take(&mut self.gesture) else {
            return None;
        };
        if !drag.has_moved() {
            log::debug!("Drag of event {} ended where it began", drag.event_id);
            return None;
        }

        let outcome = store.move_to(drag.event_id, drag.target_day, drag.target_hour);
        settle(drag.event_id, "move", outcome)
    }

    /// Idle -> Resizing. Rejected while another gesture is active.
    pub fn begin_resize(&mut self, event: &CalendarEvent, handle: ResizeHandle, origin: GridPoint) -> bool {
        if !self.is_idle() {
            log::debug!("Ignoring resize of event {}: gesture in progress", event.id());
            return false;
        }
        log::debug!("Resize started for event {} on {:?}", event.id(), handle);
        self.gesture = Gesture::Resizing(ResizeContext::new(event, handle, origin));
        true
    }

    pub fn resize_to(&mut self, pointer: GridPoint, grid: &TimeGrid, columns: &DayColumns) {
        if let Gesture::Resizing(resize) = &mut self.gesture {
            resize.update_pointer(pointer, grid, columns);
        }
    }

    /// Resizing -> Idle, committing the accumulated delta.
    pub fn finish_resize(&mut self, store: &mut EventStore) -> Option<CalendarEvent> {
        if !matches!(self.gesture, Gesture::Resizing(_)) {
            return None;
        }
        let Gesture::Resizing(resize) = std::mem::take(&mut self.gesture) else {
            return None;
        };
        if !resize.has_changed() {
            return None;
        }

        let outcome = store.resize(resize.event_id, resize.handle.edge(), resize.delta);
        settle(resize.event_id, "resize", outcome)
    }

    /// Any state -> Idle without touching the store.
    pub fn cancel(&mut self) -> bool {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => false,
            gesture => {
                log::debug!("Cancelled gesture {:?}", gesture);
                true
            }
        }
    }
}

fn settle(
    id: EventId,
    action: &str,
    outcome: crate::error::Result<CalendarEvent>,
) -> Option<CalendarEvent> {
    match outcome {
        Ok(event) => Some(event),
        Err(CalendarError::NotFound(_)) => {
            log::debug!("Event {} was deleted mid-gesture; {} dropped", id, action);
            None
        }
        Err(err) => {
            log::warn!("Rejected {} of event {}: {}", action, id, err);
            None
        }
    }
}
