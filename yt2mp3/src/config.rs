//! Persistent configuration stored as JSON.
//!
//! The file holds a single object, `{"base_download_location": "<path>"}`.
//! It is loaded once at startup and written back only when it changes.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "yt2mp3";
const CONFIG_FILENAME: &str = "config.json";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root directory of the `<artist>/[<playlist>/]<title>.mp3` layout
    pub base_download_location: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_download_location: default_base_dir(),
        }
    }
}

impl Config {
    /// Platform config file path, e.g. `~/.config/yt2mp3/config.json`.
    pub fn default_path() -> ConfigResult<PathBuf> {
        let mut path = dirs::config_dir().ok_or(ConfigError::MissingConfigDir)?;
        path.push(APP_NAME);
        path.push(CONFIG_FILENAME);
        Ok(path)
    }

    /// Load from `path`. Returns `None` if the file is missing or empty.
    pub fn load(path: &Path) -> ConfigResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice(&data)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_vec_pretty(self)?;
        fs::write(path, json).map_err(io_err)?;

        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Load the config at `path`, apply the folder override, and persist it if it changed
    /// or did not exist yet.
    pub fn resolve(path: &Path, folder: Option<&Path>) -> ConfigResult<Self> {
        let loaded = Self::load(path)?;
        let mut dirty = loaded.is_none();
        let mut config = loaded.unwrap_or_default();

        if let Some(folder) = folder {
            let folder = std::path::absolute(folder).map_err(|source| ConfigError::Io {
                path: folder.to_path_buf(),
                source,
            })?;

            if folder != config.base_download_location {
                tracing::info!(folder = %folder.display(), "base download location changed");
                config.base_download_location = folder;
                dirty = true;
            }
        }

        if dirty {
            config.save(path)?;
        }

        Ok(config)
    }
}

/// `<audio dir>/YT`, falling back to `~/Music/YT`, then `./YT`.
fn default_base_dir() -> PathBuf {
    dirs::audio_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Music")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("YT")
}
