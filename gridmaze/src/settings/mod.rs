use std::{
    fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};

use gridmaze_core::{
    algorithms::{DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_SIZE},
    Generator,
};
use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{base_path, SETTINGS_FILE};

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Cannot access settings file {0:?}; {1}")]
    Io(PathBuf, #[source] io::Error),
    #[error("Invalid settings file {0:?}; {1}")]
    Format(PathBuf, #[source] ron::error::SpannedError),
}

/// Color names for each kind of cell, parsed by [`colored::Color`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScheme {
    pub wall: String,
    pub open: String,
    pub start: String,
    pub end: String,
    pub path: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            wall: "white".into(),
            open: "bright black".into(),
            start: "green".into(),
            end: "red".into(),
            path: "yellow".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub size: usize,
    pub max_size: usize,
    pub max_attempts: usize,
    pub extra_paths: bool,
    pub log_level: Option<String>,
    pub colors: ColorScheme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            size: 11,
            max_size: DEFAULT_MAX_SIZE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            extra_paths: false,
            log_level: None,
            colors: ColorScheme::default(),
        }
    }
}

impl Settings {
    pub fn default_path() -> PathBuf {
        base_path().join(SETTINGS_FILE)
    }

    fn options() -> ron::Options {
        ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
    }

    pub fn from_ron(text: &str) -> Result<Self, ron::error::SpannedError> {
        Self::options().from_str(text)
    }

    /// Loads settings from `path`, writing the default file there first if it doesn't exist.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Self::write_default(path)?;
                DEFAULT_SETTINGS.to_string()
            }
            Err(err) => return Err(SettingsError::Io(path.to_owned(), err)),
        };

        Self::from_ron(&text).map_err(|err| SettingsError::Format(path.to_owned(), err))
    }

    pub fn write_default(path: &Path) -> Result<(), SettingsError> {
        let io_err = |err| SettingsError::Io(path.to_owned(), err);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, DEFAULT_SETTINGS).map_err(io_err)
    }

    /// Generator configured from these settings, `extra_paths` may still be forced on.
    pub fn generator(&self, extra_paths: bool) -> Generator {
        Generator::new()
            .max_size(self.max_size)
            .max_attempts(self.max_attempts)
            .extra_paths(self.extra_paths || extra_paths)
    }

    /// Parsed `log_level`, `None` when unset or not a level name.
    pub fn log_level(&self) -> Option<log::LevelFilter> {
        self.log_level
            .as_deref()
            .and_then(|level| log::LevelFilter::from_str(level).ok())
    }
}
