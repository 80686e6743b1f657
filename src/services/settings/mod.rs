// Settings service
// TOML-backed configuration for the timeline

mod service;

pub use service::{resolve_storage, SettingsService};
