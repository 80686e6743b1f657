//! Month timeline rendering.
//!
//! One painted surface holds the day headers, the hour labels and every day
//! column. Pointer input on that surface is translated into grid
//! coordinates and forwarded to the [`Timeline`].

use chrono::{NaiveDate, Timelike};
use egui::{Align2, Color32, FontId, Pos2, Rect, Response, Sense, Stroke, Vec2};

use super::utils::{event_fill, format_time_range, text_color_for, with_alpha, DEFAULT_EVENT_COLOR};
use crate::interaction::{Gesture, ResizeHandle};
use crate::models::event::EventId;
use crate::services::layout::{self, GridPoint, GridRect};
use crate::services::timeline::Timeline;
use crate::ui_egui::resize::{cursor_icon, draw_handles, HandleRects};

pub const TIME_LABEL_WIDTH: f32 = 56.0;
pub const HEADER_HEIGHT: f32 = 40.0;

/// Requests the view hands back to the app
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimelineViewResponse {
    /// Double-click on an empty cell: open the form for this day and hour.
    pub create_at: Option<(NaiveDate, u32)>,
    /// Secondary click on an event.
    pub delete_requested: Option<EventId>,
}

/// Maps between screen positions and grid coordinates.
#[derive(Clone, Copy)]
struct GridFrame {
    /// Top-left corner of the first day column.
    origin: Pos2,
    /// Visible part of the day columns.
    body: Rect,
}

impl GridFrame {
    fn to_grid(self, pos: Pos2) -> GridPoint {
        GridPoint::new(pos.x - self.origin.x, pos.y - self.origin.y)
    }

    fn to_screen(self, rect: GridRect) -> Rect {
        Rect::from_min_size(
            self.origin + Vec2::new(rect.left, rect.top),
            Vec2::new(rect.width, rect.height),
        )
    }
}

pub fn render_timeline(ui: &mut egui::Ui, timeline: &mut Timeline, today: NaiveDate) -> TimelineViewResponse {
    let mut result = TimelineViewResponse::default();
    let size = Vec2::new(
        TIME_LABEL_WIDTH + timeline.columns().total_width(),
        HEADER_HEIGHT + timeline.grid().height(),
    );

    egui::ScrollArea::both()
        .id_source("timeline_scroll")
        .drag_to_scroll(false)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
            let origin = rect.min + Vec2::new(TIME_LABEL_WIDTH, HEADER_HEIGHT);
            let frame = GridFrame {
                origin,
                body: Rect::from_min_max(origin, rect.max).intersect(ui.clip_rect()),
            };

            handle_input(ui.ctx(), timeline, frame, &response, &mut result);
            let hovered = hovered_target(timeline, frame, &response);
            update_cursor(ui.ctx(), timeline, hovered);

            let painter = ui.painter_at(rect);
            paint_grid(&painter, ui.visuals(), timeline, frame, rect, today);
            paint_events(&painter, timeline, frame, hovered);
            paint_preview(&painter, timeline, frame);
        });

    result
}

fn handle_input(
    ctx: &egui::Context,
    timeline: &mut Timeline,
    frame: GridFrame,
    response: &Response,
    result: &mut TimelineViewResponse,
) {
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) && timeline.on_cancel() {
        log::debug!("Gesture cancelled with Escape");
    }

    if response.drag_started_by(egui::PointerButton::Primary) {
        // The drag is only recognised after some movement; start from where
        // the button went down.
        let press = ctx
            .input(|i| i.pointer.press_origin())
            .or_else(|| response.interact_pointer_pos());
        if let Some(press) = press.filter(|pos| frame.body.contains(*pos)) {
            begin_gesture(timeline, frame, press);
        }
    }

    if response.dragged_by(egui::PointerButton::Primary) {
        if let Some(pos) = response.interact_pointer_pos() {
            if !frame.body.contains(pos) {
                timeline.on_pointer_leave();
            } else {
                let point = frame.to_grid(pos);
                if is_dragging(timeline) {
                    timeline.on_drag_move(point);
                } else if is_resizing(timeline) {
                    timeline.on_resize_move(point);
                }
            }
        }
    }

    if response.drag_stopped() {
        let committed = if is_dragging(timeline) {
            timeline.on_drop()
        } else if is_resizing(timeline) {
            timeline.on_resize_end()
        } else {
            None
        };
        if let Some(event) = committed {
            log::info!("Event {} now {} - {}", event.id(), event.start(), event.end());
        }
    }

    if response.double_clicked() {
        if let Some(pos) = response.interact_pointer_pos().filter(|pos| frame.body.contains(*pos)) {
            let point = frame.to_grid(pos);
            if timeline.event_at(point).is_none() {
                result.create_at = timeline
                    .columns()
                    .hit_test(point, timeline.grid())
                    .map(|cell| (cell.day, cell.time.hour()));
            }
        }
    }

    if response.secondary_clicked() {
        if let Some(pos) = response.interact_pointer_pos().filter(|pos| frame.body.contains(*pos)) {
            result.delete_requested = timeline.event_at(frame.to_grid(pos));
        }
    }
}

fn is_dragging(timeline: &Timeline) -> bool {
    matches!(timeline.controller().gesture(), Gesture::Dragging(_))
}

fn is_resizing(timeline: &Timeline) -> bool {
    matches!(timeline.controller().gesture(), Gesture::Resizing(_))
}

fn begin_gesture(timeline: &mut Timeline, frame: GridFrame, press: Pos2) {
    let point = frame.to_grid(press);
    let Some(id) = timeline.event_at(point) else {
        return;
    };
    let handle = timeline
        .event_rect(id)
        .and_then(|rect| HandleRects::for_event(frame.to_screen(rect)).hit_test(press));

    match handle {
        Some(handle) => timeline.on_resize_start(id, handle, point),
        None => timeline.on_drag_start(id, point),
    };
}

/// Event and handle under the pointer while no gesture is active.
fn hovered_target(
    timeline: &Timeline,
    frame: GridFrame,
    response: &Response,
) -> Option<(EventId, Option<ResizeHandle>)> {
    if !timeline.controller().is_idle() {
        return None;
    }
    let pos = response.hover_pos().filter(|pos| frame.body.contains(*pos))?;
    let id = timeline.event_at(frame.to_grid(pos))?;
    let handle = timeline
        .event_rect(id)
        .and_then(|rect| HandleRects::for_event(frame.to_screen(rect)).hit_test(pos));
    Some((id, handle))
}

fn update_cursor(ctx: &egui::Context, timeline: &Timeline, hovered: Option<(EventId, Option<ResizeHandle>)>) {
    let icon = match timeline.controller().gesture() {
        Gesture::Dragging(_) => Some(egui::CursorIcon::Grabbing),
        Gesture::Resizing(resize) => Some(cursor_icon(resize.handle)),
        Gesture::Idle => match hovered {
            Some((_, Some(handle))) => Some(cursor_icon(handle)),
            Some((_, None)) => Some(egui::CursorIcon::Grab),
            None => None,
        },
    };
    if let Some(icon) = icon {
        ctx.set_cursor_icon(icon);
    }
}

fn paint_grid(
    painter: &egui::Painter,
    visuals: &egui::Visuals,
    timeline: &Timeline,
    frame: GridFrame,
    rect: Rect,
    today: NaiveDate,
) {
    let columns = timeline.columns();
    let grid = timeline.grid();
    let line_color = visuals.widgets.noninteractive.bg_stroke.color;
    let text_color = visuals.text_color();

    painter.rect_filled(rect, 0.0, visuals.extreme_bg_color);

    for (index, day) in timeline.visible_days().into_iter().enumerate() {
        let left = frame.origin.x + index as f32 * columns.width();
        let header = Rect::from_min_size(
            Pos2::new(left, rect.top()),
            Vec2::new(columns.width(), HEADER_HEIGHT),
        );
        if day == today {
            painter.rect_filled(header, 0.0, visuals.selection.bg_fill.linear_multiply(0.4));
        }
        painter.text(
            Pos2::new(header.center().x, header.top() + 4.0),
            Align2::CENTER_TOP,
            day.format("%a").to_string(),
            FontId::proportional(11.0),
            Color32::GRAY,
        );
        painter.text(
            Pos2::new(header.center().x, header.top() + 18.0),
            Align2::CENTER_TOP,
            day.format("%-d").to_string(),
            FontId::proportional(14.0),
            text_color,
        );
        painter.line_segment(
            [Pos2::new(left, rect.top()), Pos2::new(left, rect.bottom())],
            Stroke::new(1.0, line_color),
        );
    }

    for hour in grid.hours() {
        let y = frame.origin.y + grid.hour_to_offset(hour, 0);
        painter.line_segment(
            [Pos2::new(frame.origin.x - 4.0, y), Pos2::new(rect.right(), y)],
            Stroke::new(1.0, line_color),
        );
        painter.text(
            Pos2::new(frame.origin.x - 6.0, y + 2.0),
            Align2::RIGHT_TOP,
            format!("{:02}:00", hour),
            FontId::proportional(12.0),
            Color32::GRAY,
        );
    }

    painter.line_segment(
        [
            Pos2::new(rect.left(), frame.origin.y),
            Pos2::new(rect.right(), frame.origin.y),
        ],
        Stroke::new(1.0, line_color),
    );
}

fn paint_events(
    painter: &egui::Painter,
    timeline: &Timeline,
    frame: GridFrame,
    hovered: Option<(EventId, Option<ResizeHandle>)>,
) {
    let columns = timeline.columns();
    let active = timeline.controller().active_event_id();

    for event in timeline.visible_events() {
        let Some(rect) = columns.event_rect(&layout::layout(&event, timeline.grid())) else {
            continue;
        };
        let block = frame.to_screen(rect);
        let fill = event_fill(event.color());
        let (fill, text) = if active == Some(event.id()) {
            // The ghost shows where it goes; the source block stays faded.
            (with_alpha(fill, 90), with_alpha(text_color_for(fill), 120))
        } else {
            (fill, text_color_for(fill))
        };

        painter.rect_filled(block.shrink(1.0), 4.0, fill);
        painter.rect_stroke(block.shrink(1.0), 4.0, Stroke::new(1.0, Color32::from_black_alpha(40)));

        let label = painter.with_clip_rect(block.shrink(2.0).intersect(painter.clip_rect()));
        label.text(
            block.left_top() + Vec2::new(6.0, 3.0),
            Align2::LEFT_TOP,
            event.title(),
            FontId::proportional(12.0),
            text,
        );
        if block.height() >= 32.0 {
            label.text(
                block.left_top() + Vec2::new(6.0, 18.0),
                Align2::LEFT_TOP,
                format_time_range(event.start(), event.end()),
                FontId::proportional(10.0),
                text,
            );
        }

        if let Some((id, handle)) = hovered {
            if id == event.id() {
                draw_handles(painter, &HandleRects::for_event(block), handle, fill);
            }
        }
    }
}

/// Translucent silhouette of where the active gesture would leave the event.
fn paint_preview(painter: &egui::Painter, timeline: &Timeline, frame: GridFrame) {
    let Some(preview) = timeline.preview_layout() else {
        return;
    };
    let Some(rect) = timeline.columns().event_rect(&preview) else {
        return;
    };
    let color = timeline
        .store()
        .get(preview.id)
        .map(|event| event_fill(event.color()))
        .unwrap_or(DEFAULT_EVENT_COLOR);
    let block = frame.to_screen(rect).shrink(1.0);

    painter.rect_filled(block, 4.0, with_alpha(color, 160));
    painter.rect_stroke(block, 4.0, Stroke::new(2.0, color.linear_multiply(0.8)));

    // Accent bar on the left side
    let bar = Rect::from_min_size(block.left_top(), Vec2::new(4.0, block.height()));
    painter.rect_filled(bar, 2.0, Color32::from_black_alpha(60));

    if let Some(times) = timeline.gesture_preview() {
        painter.with_clip_rect(block.intersect(painter.clip_rect())).text(
            block.left_top() + Vec2::new(8.0, 3.0),
            Align2::LEFT_TOP,
            format_time_range(times.start, times.end),
            FontId::proportional(11.0),
            text_color_for(color),
        );
    }
}
