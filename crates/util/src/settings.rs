//! Persisted widget settings.
//!
//! The navigation view is configured by three values: the site hosting the
//! backing lists, the selected list, and the header text drawn above the
//! links. They are kept in a small JSON file in the standard configuration
//! directory (`~/.config/navlist/settings.json` on most platforms). Only
//! configuration lives here; fetched list data is never written to disk.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::{config_dir, home_dir};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Environment variable allowing callers to override the settings file path.
pub const SETTINGS_PATH_ENV: &str = "NAVLIST_SETTINGS_PATH";

/// Default filename for the JSON payload.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persisted configuration values.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    /// Absolute URL of the site whose lists back the navigation.
    pub site_url: Option<String>,
    /// Identifier of the backing list; `None` means nothing is selected.
    pub selected_list_id: Option<String>,
    /// Heading drawn above the navigation links.
    pub header_text: Option<String>,
}

impl WidgetSettings {
    /// The selected list id, treating blank values as "no selection".
    pub fn selected_list(&self) -> Option<&str> {
        self.selected_list_id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }
}

/// JSON-file backed settings store.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    settings: WidgetSettings,
}

impl SettingsStore {
    /// Open the store at the default path (or `NAVLIST_SETTINGS_PATH`).
    pub fn open_default() -> Result<Self, SettingsError> {
        Self::open(default_settings_path())
    }

    /// Open the store at `path`. A missing file yields default settings.
    pub fn open(path: PathBuf) -> Result<Self, SettingsError> {
        let settings = load_settings(&path)?;
        debug!(path = %path.display(), "settings loaded");
        Ok(Self { path, settings })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &WidgetSettings {
        &self.settings
    }

    /// Apply `change` and write the result to disk.
    pub fn update(&mut self, change: impl FnOnce(&mut WidgetSettings)) -> Result<(), SettingsError> {
        change(&mut self.settings);
        self.save()
    }

    fn save(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(&self.settings)?;
        fs::write(&self.path, data)?;
        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let trimmed = path.trim();
    if trimmed == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = trimmed.strip_prefix("~/").or_else(|| trimmed.strip_prefix("~\\")) {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(trimmed)
}

/// Settings path honoring the `NAVLIST_SETTINGS_PATH` override.
pub fn default_settings_path() -> PathBuf {
    if let Ok(path) = env::var(SETTINGS_PATH_ENV)
        && !path.trim().is_empty()
    {
        return expand_tilde(&path);
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("navlist")
        .join(SETTINGS_FILE_NAME)
}

fn load_settings(path: &Path) -> Result<WidgetSettings, SettingsError> {
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(settings) => Ok(settings),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse settings file; using defaults"
                );
                Ok(WidgetSettings::default())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(WidgetSettings::default()),
        Err(error) => Err(SettingsError::Io(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SettingsStore::open(dir.path().join("settings.json")).expect("open");
        assert_eq!(store.settings(), &WidgetSettings::default());
    }

    #[test]
    fn updates_round_trip_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("settings.json");

        let mut store = SettingsStore::open(path.clone()).expect("open");
        store
            .update(|settings| {
                settings.selected_list_id = Some("c3a1".into());
                settings.header_text = Some("Quick links".into());
            })
            .expect("update");

        let reopened = SettingsStore::open(path).expect("reopen");
        assert_eq!(reopened.settings().selected_list(), Some("c3a1"));
        assert_eq!(reopened.settings().header_text.as_deref(), Some("Quick links"));
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").expect("write");

        let store = SettingsStore::open(path).expect("open");
        assert_eq!(store.settings(), &WidgetSettings::default());
    }

    #[test]
    fn blank_selection_counts_as_none() {
        let settings = WidgetSettings {
            selected_list_id: Some("  ".into()),
            ..WidgetSettings::default()
        };
        assert_eq!(settings.selected_list(), None);
    }

    #[test]
    fn default_path_honors_environment_override() {
        let override_path = "~/custom/navlist/settings.json";
        temp_env::with_var(SETTINGS_PATH_ENV, Some(override_path), || {
            assert_eq!(default_settings_path(), expand_tilde(override_path));
        });
    }
}
