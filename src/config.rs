//! Optional user-authored settings in `<app dir>/config.toml`.
//!
//! The player only reads this file. A missing file means defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs::{self, AppDirError};
use crate::audio::AudioOutputConfig;
use crate::waveform::{DEFAULT_CACHE_ENTRIES, DEFAULT_THUMBNAIL_RESOLUTION};

/// Filename of the settings file inside the app directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Repaint tick that animates the playback cursor.
pub const DEFAULT_REPAINT_INTERVAL_MS: u64 = 16;

/// Errors raised while locating or parsing the settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    AppDir(#[from] AppDirError),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// All settings, each section falling back to defaults when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output host/device preferences.
    pub audio_output: AudioOutputConfig,
    /// Thumbnail resolution and cache size.
    pub thumbnail: ThumbnailSettings,
    /// Window behaviour.
    pub ui: UiSettings,
}

/// `[thumbnail]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailSettings {
    /// Source frames folded into each thumbnail peak.
    pub resolution: usize,
    /// Thumbnails kept in the in-memory cache.
    pub cache_entries: usize,
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_THUMBNAIL_RESOLUTION,
            cache_entries: DEFAULT_CACHE_ENTRIES,
        }
    }
}

/// `[ui]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Milliseconds between cursor repaints.
    pub repaint_interval_ms: u64,
}

impl UiSettings {
    /// Repaint interval, never shorter than one millisecond.
    pub fn repaint_interval(&self) -> Duration {
        Duration::from_millis(self.repaint_interval_ms.max(1))
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            repaint_interval_ms: DEFAULT_REPAINT_INTERVAL_MS,
        }
    }
}

/// Location of the settings file, creating the app directory if needed.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load settings from the app directory, returning defaults if missing.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    load_from(&config_path()?)
}

/// Load settings from `path`, returning defaults if it does not exist.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = load_from(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.thumbnail.resolution, 512);
        assert_eq!(config.thumbnail.cache_entries, 5);
        assert_eq!(config.ui.repaint_interval(), Duration::from_millis(16));
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "[audio_output]\nsample_rate = 48000\n\n[thumbnail]\ncache_entries = 2\n",
        )
        .unwrap();

        let config = load_from(&path).unwrap();
        assert_eq!(config.audio_output.sample_rate, Some(48_000));
        assert_eq!(config.thumbnail.cache_entries, 2);
        assert_eq!(config.thumbnail.resolution, DEFAULT_THUMBNAIL_RESOLUTION);
        assert_eq!(config.ui, UiSettings::default());
    }

    #[test]
    fn malformed_toml_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[ui\nrepaint_interval_ms = ").unwrap();

        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { path: ref p, .. } if p == &path));
    }

    #[test]
    fn zero_repaint_interval_is_raised_to_one_millisecond() {
        let settings = UiSettings {
            repaint_interval_ms: 0,
        };
        assert_eq!(settings.repaint_interval(), Duration::from_millis(1));
    }
}
