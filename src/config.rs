use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Application configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeConfig,
    pub layout: LayoutConfig,
    pub font: FontConfig,
    pub content: ContentConfig,
    pub ui: UiConfig,
}

/// Theme configuration
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ThemeConfig {
    /// "dark" or "light"
    pub mode: String,
}

/// Layout configuration
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of the navigation sidebar (in pixels)
    pub sidebar_width: f32,
    /// Maximum width of the centred content column (in pixels)
    pub content_max_width: f32,
    /// Maximum width of screenshots (in pixels)
    pub image_width: f32,
}

/// Font and text rendering configuration
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct FontConfig {
    /// Size of body text (in points)
    pub font_size: f32,
    /// Size of code blocks (in points)
    pub code_font_size: f32,
}

/// Where page content and screenshots come from
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory of `<page>.md` files replacing the built-in pages; empty for none
    pub dir: String,
    /// Root for relative image paths; empty for the working directory
    pub assets_dir: String,
    /// Reload pages when files in `dir` change
    pub watch: bool,
}

/// UI behavior configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct UiConfig {
    /// Section opened at startup, e.g. "installation-guide/general-requirement"
    pub start_section: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            mode: "dark".to_string(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            sidebar_width: 280.0,
            content_max_width: 740.0,
            image_width: 700.0,
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        FontConfig {
            font_size: 14.0,
            code_font_size: 12.0,
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        ContentConfig {
            dir: String::new(),
            assets_dir: String::new(),
            watch: true,
        }
    }
}

impl ContentConfig {
    pub fn override_dir(&self) -> Option<PathBuf> {
        non_empty_path(&self.dir)
    }

    /// Directory relative image paths are resolved against
    pub fn assets_root(&self) -> PathBuf {
        non_empty_path(&self.assets_dir)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn non_empty_path(value: &str) -> Option<PathBuf> {
    let value = value.trim();
    (!value.is_empty()).then(|| PathBuf::from(value))
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "attendance-guide")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from `path`; a missing file gives the defaults,
    /// a broken one is reported and also gives the defaults
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!("No config file at {}", path.display());
            return Config::default();
        }
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}", e);
                warn!("Using default configuration");
                Config::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Create a default config file at `path` if it doesn't exist
    pub fn create_default(path: &Path) -> Result<bool, ConfigError> {
        if path.exists() {
            return Ok(false);
        }
        Config::default().save_to(path)?;
        Ok(true)
    }
}
