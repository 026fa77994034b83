use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::shared::paths::{ensure_dir, get_storage_dir};

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Name attached to reviews submitted from this machine.
    pub username: String,
    /// Initial sort order for the dish listing ("name" or "rating").
    pub default_sort: String,
    /// Whether clicking a star rating shows a desktop notification.
    pub rating_notifications: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            username: "guest".to_string(),
            default_sort: "name".to_string(),
            rating_notifications: true,
        }
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse settings: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

/// Get the path to the settings file
fn get_settings_path() -> PathBuf {
    get_storage_dir().join("settings.json")
}

/// Load settings from disk, returning default if file doesn't exist or is invalid
pub fn load_settings() -> AppSettings {
    let path = get_settings_path();

    if !path.exists() {
        eprintln!("[TASTEBUD] Settings file not found, using defaults");
        return AppSettings::default();
    }

    match load_settings_from_file(&path) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("[TASTEBUD] Failed to load settings: {}, using defaults", e);
            AppSettings::default()
        }
    }
}

/// Internal function to load settings from a specific path
fn load_settings_from_file(path: &PathBuf) -> Result<AppSettings, SettingsError> {
    let contents = std::fs::read_to_string(path)?;
    let settings = serde_json::from_str(&contents)?;
    Ok(settings)
}

/// Save settings to disk
pub fn save_settings(settings: &AppSettings) -> Result<(), SettingsError> {
    let storage_dir = get_storage_dir();
    ensure_dir(&storage_dir)?;

    let path = get_settings_path();
    let contents = serde_json::to_string_pretty(settings)?;
    std::fs::write(&path, contents)?;

    tracing::info!(target: "system", "Settings saved to {:?}", path);
    Ok(())
}

fn validate(settings: &AppSettings) -> Result<(), SettingsError> {
    if settings.username.trim().is_empty() {
        return Err(SettingsError::InvalidValue(
            "username cannot be empty".to_string(),
        ));
    }
    match settings.default_sort.as_str() {
        "name" | "rating" => Ok(()),
        other => Err(SettingsError::InvalidValue(format!(
            "unknown sort order: {}",
            other
        ))),
    }
}

/// Tauri command: Get current settings
#[tauri::command]
pub fn get_settings() -> AppSettings {
    load_settings()
}

/// Tauri command: Replace settings
#[tauri::command]
pub fn update_settings(settings: AppSettings) -> Result<AppSettings, String> {
    let mut settings = settings;
    settings.username = settings.username.trim().to_string();

    validate(&settings).map_err(|e| e.to_string())?;
    save_settings(&settings).map_err(|e| e.to_string())?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.username, "guest");
        assert_eq!(settings.default_sort, "name");
        assert!(settings.rating_notifications);
    }

    #[test]
    fn test_validate_rejects_unknown_sort() {
        let settings = AppSettings {
            default_sort: "spicy".to_string(),
            ..AppSettings::default()
        };
        assert!(validate(&settings).is_err());
    }

    #[test]
    fn test_validate_rejects_blank_username() {
        let settings = AppSettings {
            username: "   ".to_string(),
            ..AppSettings::default()
        };
        assert!(validate(&settings).is_err());
    }
}
