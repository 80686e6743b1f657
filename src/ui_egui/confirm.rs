//! Confirmation dialog for deleting events.

use egui::{Context, RichText};

use crate::models::event::{CalendarEvent, EventId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub event_id: EventId,
    pub event_title: String,
}

impl PendingDelete {
    pub fn for_event(event: &CalendarEvent) -> Self {
        Self {
            event_id: event.id(),
            event_title: event.title().to_string(),
        }
    }

    pub fn message(&self) -> String {
        format!(
            "Are you sure you want to delete \"{}\"?\n\nThis action cannot be undone.",
            self.event_title
        )
    }
}

/// Result of a confirmation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmResult {
    Confirmed,
    Cancelled,
    Pending,
}

#[derive(Debug, Default)]
pub struct ConfirmDialogState {
    pending: Option<PendingDelete>,
}

impl ConfirmDialogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, pending: PendingDelete) {
        self.pending = Some(pending);
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PendingDelete> {
        self.pending.as_ref()
    }

    /// Close the dialog, handing back whatever was pending.
    pub fn take(&mut self) -> Option<PendingDelete> {
        self.pending.take()
    }

    /// Render the confirmation dialog and return the result
    pub fn render(&mut self, ctx: &Context) -> ConfirmResult {
        let Some(pending) = &self.pending else {
            return ConfirmResult::Pending;
        };

        let mut result = ConfirmResult::Pending;

        egui::Window::new("Delete Event")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(300.0);
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    ui.label(RichText::new("⚠").size(24.0).color(egui::Color32::from_rgb(220, 150, 50)));
                    ui.label(pending.message());
                });

                ui.add_space(15.0);
                ui.separator();

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let confirm = egui::Button::new(RichText::new("Delete").color(egui::Color32::WHITE))
                        .fill(egui::Color32::from_rgb(180, 60, 60));
                    if ui.add(confirm).clicked() {
                        result = ConfirmResult::Confirmed;
                    }
                    ui.add_space(10.0);
                    if ui.button("Cancel").clicked() {
                        result = ConfirmResult::Cancelled;
                    }
                });
            });

        // Escape also dismisses.
        if result == ConfirmResult::Pending && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            result = ConfirmResult::Cancelled;
        }
        result
    }
}
