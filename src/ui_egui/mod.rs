mod app;
mod confirm;
mod event_dialog;
pub mod resize;
mod views;

pub use app::TimelineApp;
