// Timeline Calendar Application
// Main entry point

use timeline_calendar::models::settings::TimelineSettings;
use timeline_calendar::services::settings::SettingsService;
use timeline_calendar::ui_egui::TimelineApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Timeline Calendar");

    let settings = match SettingsService::from_project_dirs() {
        Some(service) => {
            // First launch: leave a settings file the user can edit
            if !service.path().exists() {
                if let Err(err) = service.update(&TimelineSettings::default()) {
                    log::warn!("Could not write default settings: {:#}", err);
                }
            }
            service.load_or_default()
        }
        None => {
            log::warn!("No config directory available, using default settings");
            TimelineSettings::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Timeline Calendar")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Timeline Calendar",
        options,
        Box::new(|cc| Ok(Box::new(TimelineApp::new(cc, settings)))),
    )
}
