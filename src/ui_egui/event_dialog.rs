use chrono::{NaiveDate, NaiveDateTime, Timelike};
use egui::{Color32, RichText};

use crate::models::event::EventForm;
use crate::services::timeline::Timeline;
use crate::ui_egui::views::utils::parse_color;

const PRESET_COLORS: [(&str, &str); 6] = [
    ("Peach", "#ffdab9"),
    ("Mint", "#b9ffda"),
    ("Lavender", "#dab9ff"),
    ("Sky", "#b9daff"),
    ("Lemon", "#fff5b9"),
    ("Rose", "#ffb9c6"),
];

/// State for the "New Event" window
pub struct EventDialogState {
    pub form: EventForm,
    pub error_message: Option<String>,
}

impl EventDialogState {
    /// Dialog prefilled for a grid cell.
    pub fn for_slot(day: NaiveDate, hour: u32) -> Self {
        Self {
            form: EventForm::for_slot(day, hour),
            error_message: None,
        }
    }

    pub fn for_start(start: NaiveDateTime) -> Self {
        Self::for_slot(start.date(), start.hour())
    }
}

/// What the user did with the dialog this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Open,
    Saved,
    Cancelled,
}

/// Render the event dialog; on Save the form goes straight to the timeline
/// and validation errors stay in the dialog.
pub fn render_event_dialog(
    ctx: &egui::Context,
    state: &mut EventDialogState,
    timeline: &mut Timeline,
) -> DialogOutcome {
    let mut outcome = DialogOutcome::Open;
    let default_color = timeline.settings().default_color.clone();
    let default_duration = timeline.settings().default_event_duration;

    egui::Window::new("New Event")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            if let Some(ref error) = state.error_message {
                ui.colored_label(Color32::RED, RichText::new(error).strong());
                ui.add_space(8.0);
            }

            egui::Grid::new("event_form_grid")
                .num_columns(2)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Title:");
                    ui.text_edit_singleline(&mut state.form.title);
                    ui.end_row();

                    ui.label("Date:");
                    ui.add(egui::TextEdit::singleline(&mut state.form.date).hint_text("YYYY-MM-DD"));
                    ui.end_row();

                    ui.label("Start:");
                    ui.add(egui::TextEdit::singleline(&mut state.form.hour).hint_text("HH:MM"));
                    ui.end_row();

                    ui.label("Minutes:");
                    ui.add(
                        egui::TextEdit::singleline(&mut state.form.duration_minutes)
                            .hint_text(default_duration.to_string()),
                    );
                    ui.end_row();

                    ui.label("Color:");
                    ui.horizontal(|ui| {
                        ui.add(
                            egui::TextEdit::singleline(&mut state.form.color)
                                .hint_text(default_color.as_str())
                                .desired_width(80.0),
                        );
                        let shown = if state.form.color.trim().is_empty() {
                            &default_color
                        } else {
                            &state.form.color
                        };
                        if let Some(swatch) = parse_color(shown) {
                            let (rect, _) =
                                ui.allocate_exact_size(egui::vec2(18.0, 18.0), egui::Sense::hover());
                            ui.painter().rect_filled(rect, 3.0, swatch);
                        }
                    });
                    ui.end_row();
                });

            ui.horizontal(|ui| {
                ui.label("Presets:");
                for (name, hex) in PRESET_COLORS {
                    if ui.button(name).clicked() {
                        state.form.color = hex.to_string();
                    }
                }
            });

            ui.add_space(8.0);
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    match timeline.create_event(&state.form) {
                        Ok(event) => {
                            log::info!("Saved event {} from dialog", event.id());
                            outcome = DialogOutcome::Saved;
                        }
                        Err(err) => state.error_message = Some(err.to_string()),
                    }
                }
                if ui.button("Cancel").clicked() {
                    outcome = DialogOutcome::Cancelled;
                }
            });
        });

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_start_truncates_to_hour() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(14, 35, 0)
            .unwrap();
        let state = EventDialogState::for_start(start);
        assert_eq!(state.form.date, "2024-06-15");
        assert_eq!(state.form.hour, "14:00");
        assert!(state.error_message.is_none());
    }
}
