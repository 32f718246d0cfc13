use std::path::PathBuf;

use dirs::preference_dir;

pub const APP_NAME: &str = "gridmaze";
pub const SETTINGS_FILE: &str = "settings.ron";

/// Directory holding the settings file, current directory when the platform has none.
pub fn base_path() -> PathBuf {
    preference_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}
