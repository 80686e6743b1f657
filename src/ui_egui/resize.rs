// Resize handle geometry and drawing
//
// Event blocks expose four grab zones:
// - Top/Bottom: adjust start/end time
// - Left/Right: adjust start/end day

use egui::{Pos2, Rect, Vec2};

use crate::interaction::ResizeHandle;

/// Width of the left/right hit zones
pub const SIDE_HANDLE_WIDTH: f32 = 6.0;
/// Visual size of the handle circle
pub const HANDLE_VISUAL_SIZE: f32 = 6.0;

pub fn cursor_icon(handle: ResizeHandle) -> egui::CursorIcon {
    if handle.is_vertical() {
        egui::CursorIcon::ResizeVertical
    } else {
        egui::CursorIcon::ResizeHorizontal
    }
}

/// Hit zones for the handles of one event block
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandleRects {
    pub top: Option<Rect>,
    pub bottom: Option<Rect>,
    pub left: Option<Rect>,
    pub right: Option<Rect>,
}

impl HandleRects {
    pub fn for_event(event_rect: Rect) -> Self {
        let event_height = event_rect.height();

        // The middle half of a block always stays draggable.
        let zone_height = (event_height / 4.0).min(10.0);
        let side_width = SIDE_HANDLE_WIDTH.min(event_rect.width() / 4.0);

        Self {
            top: Some(Rect::from_min_size(
                event_rect.left_top(),
                Vec2::new(event_rect.width(), zone_height),
            )),
            bottom: Some(Rect::from_min_size(
                Pos2::new(event_rect.left(), event_rect.bottom() - zone_height),
                Vec2::new(event_rect.width(), zone_height),
            )),
            left: Some(Rect::from_min_size(
                event_rect.left_top(),
                Vec2::new(side_width, event_height),
            )),
            right: Some(Rect::from_min_size(
                Pos2::new(event_rect.right() - side_width, event_rect.top()),
                Vec2::new(side_width, event_height),
            )),
        }
    }

    /// Check if a point hits any handle and return which one.
    ///
    /// Side zones win over top/bottom where they overlap at the corners.
    pub fn hit_test(&self, pos: Pos2) -> Option<ResizeHandle> {
        let hits = |rect: Option<Rect>| rect.is_some_and(|r| r.contains(pos));
        if hits(self.left) {
            Some(ResizeHandle::Left)
        } else if hits(self.right) {
            Some(ResizeHandle::Right)
        } else if hits(self.top) {
            Some(ResizeHandle::Top)
        } else if hits(self.bottom) {
            Some(ResizeHandle::Bottom)
        } else {
            None
        }
    }
}

/// Draw resize handles on an event.
pub fn draw_handles(
    painter: &egui::Painter,
    handles: &HandleRects,
    hovered_handle: Option<ResizeHandle>,
    color: egui::Color32,
) {
    let draw_handle = |rect: Rect, handle: ResizeHandle| {
        let is_hovered = hovered_handle == Some(handle);
        // Position the visual circle at the edge, not center of hit zone
        let center = match handle {
            ResizeHandle::Top => Pos2::new(rect.center().x, rect.top() + HANDLE_VISUAL_SIZE / 2.0 + 1.0),
            ResizeHandle::Bottom => Pos2::new(rect.center().x, rect.bottom() - HANDLE_VISUAL_SIZE / 2.0 - 1.0),
            ResizeHandle::Left => Pos2::new(rect.left() + HANDLE_VISUAL_SIZE / 2.0, rect.center().y),
            ResizeHandle::Right => Pos2::new(rect.right() - HANDLE_VISUAL_SIZE / 2.0, rect.center().y),
        };
        let radius = if is_hovered {
            HANDLE_VISUAL_SIZE / 2.0 + 1.0
        } else {
            HANDLE_VISUAL_SIZE / 2.0
        };

        painter.circle_filled(
            center,
            radius,
            if is_hovered {
                egui::Color32::WHITE
            } else {
                egui::Color32::from_rgba_unmultiplied(255, 255, 255, 200)
            },
        );
        painter.circle_stroke(
            center,
            radius,
            egui::Stroke::new(1.0, color.linear_multiply(0.6)),
        );
    };

    for (rect, handle) in [
        (handles.top, ResizeHandle::Top),
        (handles.bottom, ResizeHandle::Bottom),
        (handles.left, ResizeHandle::Left),
        (handles.right, ResizeHandle::Right),
    ] {
        if let Some(rect) = rect {
            draw_handle(rect, handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_icons() {
        assert_eq!(cursor_icon(ResizeHandle::Top), egui::CursorIcon::ResizeVertical);
        assert_eq!(cursor_icon(ResizeHandle::Right), egui::CursorIcon::ResizeHorizontal);
    }

    #[test]
    fn test_tall_event_handles() {
        let rect = Rect::from_min_size(Pos2::new(100.0, 100.0), Vec2::new(120.0, 90.0));
        let handles = HandleRects::for_event(rect);

        assert_eq!(handles.hit_test(Pos2::new(160.0, 104.0)), Some(ResizeHandle::Top));
        assert_eq!(handles.hit_test(Pos2::new(160.0, 186.0)), Some(ResizeHandle::Bottom));
        assert_eq!(handles.hit_test(Pos2::new(102.0, 150.0)), Some(ResizeHandle::Left));
        assert_eq!(handles.hit_test(Pos2::new(218.0, 150.0)), Some(ResizeHandle::Right));
        assert_eq!(handles.hit_test(Pos2::new(160.0, 150.0)), None);
    }

    #[test]
    fn test_short_event_keeps_drag_area() {
        let rect = Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(120.0, 30.0));
        let handles = HandleRects::for_event(rect);

        assert_eq!(handles.hit_test(Pos2::new(60.0, 5.0)), Some(ResizeHandle::Top));
        assert_eq!(handles.hit_test(Pos2::new(60.0, 15.0)), None);
        assert_eq!(handles.hit_test(Pos2::new(60.0, 25.0)), Some(ResizeHandle::Bottom));
    }
}
