//! Persistent user settings.

use std::io;
use std::path::{Path, PathBuf};

use filedeck_core::{ConflictResolution, ControllerConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Persistent user settings stored in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Show hidden files.
    pub show_hidden: bool,
    /// What paste and move do when the destination name is taken.
    pub conflict_resolution: ConflictResolution,
    /// List directories before files.
    pub dirs_first: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            show_hidden: true,
            conflict_resolution: ConflictResolution::default(),
            dirs_first: true,
        }
    }
}

impl UserSettings {
    /// Get the config file path.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("filedeck").join("settings.toml"))
    }

    /// Load settings from disk, or return defaults.
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load settings from a specific file, falling back to defaults when it
    /// is missing or malformed.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Self::default();
        };

        toml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring malformed settings file");
            Self::default()
        })
    }

    /// Save settings to disk.
    pub fn save(&self) -> io::Result<PathBuf> {
        let path = Self::config_path()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "No config directory"))?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save settings to a specific file.
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        std::fs::write(path, content)
    }

    /// Controller configuration for a session starting in `start_dir`.
    pub fn controller_config(&self, start_dir: impl Into<PathBuf>) -> ControllerConfig {
        ControllerConfig {
            start_dir: start_dir.into(),
            show_hidden: self.show_hidden,
            conflict_resolution: self.conflict_resolution,
        }
    }
}
