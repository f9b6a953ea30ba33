// SPDX-License-Identifier: GPL-3.0-only

//! Persisted user settings

use crate::backends::camera::types::{FlashMode, LensPreference};
use crate::constants::storage::APP_DIR_NAME;
use crate::constants::DEFAULT_FPS;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Camera the screen opens with
    pub lens_preference: LensPreference,
    /// Requested frame rate (30 or 60)
    pub fps: u32,
    pub shutter_sound: bool,
    pub flash: FlashMode,
    pub hdr: bool,
    /// Where stable capture copies go; platform data dir when unset
    pub storage_dir: Option<PathBuf>,
    /// Gallery root; platform picture/video dirs when unset
    pub library_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lens_preference: LensPreference::Back,
            fps: DEFAULT_FPS,
            shutter_sound: true,
            flash: FlashMode::Off,
            hdr: false,
            storage_dir: None,
            library_dir: None,
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                warn!("No config directory on this platform, using defaults");
                Self::default()
            }
        }
    }

    /// Load from `path`; a missing or unreadable file yields defaults
    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file yet, using defaults");
                return Self::default();
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Failed to read config, using defaults");
                return Self::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Corrupt config, using defaults");
                Self::default()
            }
        }
    }

    /// Save to the default location
    pub fn save(&self) -> AppResult<()> {
        let path = Self::default_path()
            .ok_or_else(|| AppError::Config("no config directory on this platform".into()))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::Config(format!("{}: {}", parent.display(), e)))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), "Config saved");
        Ok(())
    }

    /// Directory for stable capture copies
    pub fn storage_dir(&self) -> PathBuf {
        self.storage_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(home_dir)
                .join(APP_DIR_NAME)
                .join("captures")
        })
    }

    /// Gallery folder for photos
    pub fn photos_dir(&self) -> PathBuf {
        match &self.library_dir {
            Some(root) => root.join("photos"),
            None => dirs::picture_dir()
                .unwrap_or_else(|| home_dir().join("Pictures"))
                .join(APP_DIR_NAME),
        }
    }

    /// Gallery folder for videos
    pub fn videos_dir(&self) -> PathBuf {
        match &self.library_dir {
            Some(root) => root.join("videos"),
            None => dirs::video_dir()
                .unwrap_or_else(|| home_dir().join("Videos"))
                .join(APP_DIR_NAME),
        }
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}
