use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::types::playback::PlaybackSettings;

/// Window placement in logical points, saved on close and restored on
/// the next launch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// The two values that survive a restart: window geometry and volume.
/// Everything else (playlist, mute, rate) is rebuilt from scratch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSettings {
    pub geometry: Option<WindowGeometry>,
    pub volume: u8,
}

impl Default for StoredSettings {
    fn default() -> Self {
        StoredSettings {
            geometry: None,
            volume: PlaybackSettings::DEFAULT_VOLUME,
        }
    }
}

impl StoredSettings {
    /// `$XDG_CONFIG_HOME/medley/settings.json` (or the platform
    /// equivalent). `None` when no config dir exists at all.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("medley").join("settings.json"))
    }

    /// Loads settings, falling back to defaults on a first run or an
    /// unreadable file. Never an error: a missing store is a normal
    /// condition, not a failure.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from_file(&path).unwrap_or_default(),
            None => StoredSettings::default(),
        }
    }

    /// Saves settings, logging and swallowing any I/O failure.
    pub fn save(&self) {
        let Some(path) = Self::default_path() else {
            warn!("No config directory available, settings not saved");
            return;
        };
        if let Err(err) = self.save_to_file(&path) {
            warn!("Failed to save settings to {}: {}", path.display(), err);
        }
    }

    pub fn load_from_file(path: &std::path::Path) -> std::io::Result<StoredSettings> {
        let mut file = File::open(path)?;
        let mut json = String::new();
        file.read_to_string(&mut json)?;
        serde_json::from_str(&json).map_err(std::io::Error::other)
    }

    pub fn save_to_file(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_volume_and_geometry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let saved = StoredSettings {
            geometry: Some(WindowGeometry {
                x: 24.0,
                y: 48.0,
                width: 1200.0,
                height: 800.0,
            }),
            volume: 42,
        };
        saved.save_to_file(&path).unwrap();

        let loaded = StoredSettings::load_from_file(&path).unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.volume, 42);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");

        let loaded = StoredSettings::load_from_file(&path).unwrap_or_default();
        assert_eq!(loaded.volume, 70);
        assert!(loaded.geometry.is_none());
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        let loaded = StoredSettings::load_from_file(&path).unwrap_or_default();
        assert_eq!(loaded, StoredSettings::default());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medley").join("settings.json");

        StoredSettings::default().save_to_file(&path).unwrap();
        assert!(path.exists());
    }
}
