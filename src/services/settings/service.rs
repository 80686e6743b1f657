use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::settings::{StorageBackend, TimelineSettings};

const SETTINGS_FILE: &str = "settings.toml";
const EVENTS_FILE: &str = "events.json";

/// Loads and saves `TimelineSettings` as TOML.
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service for the platform config directory, if one can be resolved.
    pub fn from_project_dirs() -> Option<Self> {
        project_dirs().map(|dirs| Self::new(dirs.config_dir().join(SETTINGS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read settings; a missing file yields the defaults.
    pub fn get(&self) -> Result<TimelineSettings> {
        if !self.path.exists() {
            return Ok(TimelineSettings::default());
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let settings: TimelineSettings = toml::from_str(&data)
            .with_context(|| format!("Failed to parse settings in {}", self.path.display()))?;
        settings
            .validate()
            .with_context(|| format!("Invalid settings in {}", self.path.display()))?;
        Ok(settings)
    }

    /// Like [`get`](Self::get) but never fails: problems are logged and the
    /// defaults are used instead.
    pub fn load_or_default(&self) -> TimelineSettings {
        match self.get() {
            Ok(settings) => {
                log::info!("Loaded settings from {}", self.path.display());
                settings
            }
            Err(err) => {
                log::warn!("Using default settings: {:#}", err);
                TimelineSettings::default()
            }
        }
    }

    pub fn update(&self, settings: &TimelineSettings) -> Result<()> {
        settings.validate().context("Refusing to save invalid settings")?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {}", parent.display()))?;
        }
        let data = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, data)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))?;
        Ok(())
    }
}

/// Storage backend to use, resolving the unset default to a JSON file in the
/// platform data directory (or memory when there is none).
pub fn resolve_storage(settings: &TimelineSettings) -> StorageBackend {
    if let Some(storage) = &settings.storage {
        return storage.clone();
    }
    match project_dirs() {
        Some(dirs) => StorageBackend::JsonFile {
            path: dirs.data_dir().join(EVENTS_FILE),
        },
        None => {
            log::warn!("No data directory available; events will not be saved");
            StorageBackend::Memory
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "Ken24T", "TimelineCalendar")
}
