use crate::host::thumbnail::DEFAULT_THUMBNAIL_SIZE;
use crate::layout::AssetLayout;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "lightforge";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("thumbnail size must be at least 1 pixel")]
    ZeroThumbnailSize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `textures/...`
    pub asset_root: PathBuf,
    pub thumbnail_cache_dir: PathBuf,
    /// Longest edge of generated thumbnails
    pub thumbnail_size: u32,
}

impl Default for Config {
    /// - Linux: ~/.local/share/lightforge and ~/.cache/lightforge/thumbnails
    /// - macOS: ~/Library/Application Support/lightforge and ~/Library/Caches/lightforge/thumbnails
    /// - Windows: %APPDATA%\lightforge and %LOCALAPPDATA%\lightforge\thumbnails
    fn default() -> Self {
        let asset_root = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);

        let thumbnail_cache_dir = dirs_next::cache_dir()
            .or_else(dirs_next::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("thumbnails");

        Config {
            asset_root,
            thumbnail_cache_dir,
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
        }
    }
}

impl Config {
    /// Default location of the config file itself
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
    }

    /// Read a config file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&json).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(io_err)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thumbnail_size == 0 {
            return Err(ConfigError::ZeroThumbnailSize);
        }
        Ok(())
    }

    pub fn layout(&self) -> AssetLayout {
        AssetLayout::new(&self.asset_root)
    }
}
