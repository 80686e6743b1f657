use chrono::Local;
use egui::{Color32, RichText};

use super::confirm::{ConfirmDialogState, ConfirmResult, PendingDelete};
use super::event_dialog::{render_event_dialog, DialogOutcome, EventDialogState};
use super::views::{render_timeline, TimelineViewResponse};
use crate::models::settings::TimelineSettings;
use crate::services::event_store::EventStore;
use crate::services::settings::resolve_storage;
use crate::services::timeline::Timeline;

pub struct TimelineApp {
    timeline: Timeline,
    event_dialog: Option<EventDialogState>,
    confirm_dialog: ConfirmDialogState,
    /// Last error shown in the status bar
    status_error: Option<String>,
    /// Store error already surfaced, so a dismissed message stays dismissed
    seen_error: Option<String>,
}

impl TimelineApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: TimelineSettings) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let backend = resolve_storage(&settings);
        log::info!("Using event storage {:?}", backend);
        let store = EventStore::from_backend(&backend);

        Self::with_timeline(Timeline::new(settings, store, Local::now().date_naive()))
    }

    pub fn with_timeline(timeline: Timeline) -> Self {
        let status_error = timeline.persistence_error().map(|err| err.to_string());
        Self {
            timeline,
            event_dialog: None,
            confirm_dialog: ConfirmDialogState::new(),
            seen_error: status_error.clone(),
            status_error,
        }
    }

    fn render_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("month_header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("◀ Previous").clicked() {
                    self.timeline.navigate_previous();
                }
                ui.add_space(8.0);
                ui.heading(self.timeline.month().title());
                ui.add_space(8.0);
                if ui.button("Next ▶").clicked() {
                    self.timeline.navigate_next();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("➕ New event").clicked() && self.event_dialog.is_none() {
                        self.event_dialog = Some(EventDialogState::for_start(self.timeline.default_slot()));
                    }
                });
            });
        });
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    let count = self.timeline.visible_events().len();
                    ui.label(
                        RichText::new(format!(
                            "{} event{} this month",
                            count,
                            if count == 1 { "" } else { "s" }
                        ))
                        .color(Color32::from_gray(100)),
                    );

                    if let Some(error) = &self.status_error {
                        ui.separator();
                        ui.colored_label(Color32::from_rgb(200, 60, 60), error);
                        if ui.small_button("✕").clicked() {
                            self.status_error = None;
                        }
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new("Drag to move · drag edges to resize · right-click to delete · Esc cancels")
                                .small()
                                .color(Color32::from_gray(110)),
                        );
                    });
                });
            });
    }

    fn handle_view_response(&mut self, response: TimelineViewResponse) {
        if let Some((day, hour)) = response.create_at {
            if self.event_dialog.is_none() {
                self.event_dialog = Some(EventDialogState::for_slot(day, hour));
            }
        }
        if let Some(id) = response.delete_requested {
            if let Some(event) = self.timeline.store().get(id) {
                self.confirm_dialog.request(PendingDelete::for_event(&event));
            }
        }
    }

    fn render_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(state) = self.event_dialog.as_mut() {
            match render_event_dialog(ctx, state, &mut self.timeline) {
                DialogOutcome::Open => {}
                DialogOutcome::Saved | DialogOutcome::Cancelled => self.event_dialog = None,
            }
        }

        match self.confirm_dialog.render(ctx) {
            ConfirmResult::Pending => {}
            ConfirmResult::Cancelled => {
                self.confirm_dialog.take();
            }
            ConfirmResult::Confirmed => {
                if let Some(pending) = self.confirm_dialog.take() {
                    // Already gone is fine: the confirmation was about removing it.
                    if let Err(err) = self.timeline.delete_event(pending.event_id) {
                        log::debug!("Delete of event {} skipped: {}", pending.event_id, err);
                    }
                }
            }
        }
    }

    fn refresh_status(&mut self) {
        let current = self.timeline.persistence_error().map(|err| err.to_string());
        if current != self.seen_error {
            self.status_error = current.clone();
            self.seen_error = current;
        }
    }
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_header(ctx);
        self.render_status_bar(ctx);

        let modal_open = self.event_dialog.is_some() || self.confirm_dialog.is_open();
        let response = egui::CentralPanel::default()
            .show(ctx, |ui| {
                ui.add_enabled_ui(!modal_open, |ui| {
                    render_timeline(ui, &mut self.timeline, Local::now().date_naive())
                })
                .inner
            })
            .inner;

        self.handle_view_response(response);
        self.render_dialogs(ctx);
        self.refresh_status();
    }
}
