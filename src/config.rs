use crate::state::{
    BoundsError, ZoomBounds, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_ROTATION_STEP,
    DEFAULT_ZOOM_STEP,
};
use crate::viewer::safe_zone::DEFAULT_MARGIN;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the config directory")]
    NoConfigDir,
    #[error("failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to write {}: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid zoom bounds: {0}")]
    Bounds(#[from] BoundsError),
    #[error("rotation step must be between 1 and 359 degrees, got {0}")]
    RotationStep(i32),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub viewer: ViewerConfig,
    #[serde(default)]
    pub appearance: AppearanceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f32,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f32,
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f32,
    #[serde(default = "default_rotation_step")]
    pub rotation_step: i32,
    /// Fraction of the viewport covered by each dimmed band.
    #[serde(default = "default_safe_zone_margin")]
    pub safe_zone_margin: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppearanceConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
}

// Default value functions
fn default_min_zoom() -> f32 {
    DEFAULT_MIN_ZOOM
}

fn default_max_zoom() -> f32 {
    DEFAULT_MAX_ZOOM
}

fn default_zoom_step() -> f32 {
    DEFAULT_ZOOM_STEP
}

fn default_rotation_step() -> i32 {
    DEFAULT_ROTATION_STEP
}

fn default_safe_zone_margin() -> f64 {
    DEFAULT_MARGIN
}

fn default_theme() -> String {
    "light".to_string()
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            zoom_step: default_zoom_step(),
            rotation_step: default_rotation_step(),
            safe_zone_margin: default_safe_zone_margin(),
        }
    }
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
        }
    }
}

impl ViewerConfig {
    pub fn zoom_bounds(&self) -> Result<ZoomBounds, BoundsError> {
        ZoomBounds::new(self.min_zoom, self.max_zoom, self.zoom_step)
    }
}

impl AppearanceConfig {
    pub fn is_dark(&self) -> bool {
        self.theme.eq_ignore_ascii_case("dark")
    }
}

/// Get the path to the config file
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dirs =
        directories::ProjectDirs::from("", "", "floorplanner").ok_or(ConfigError::NoConfigDir)?;
    Ok(dirs.config_dir().join("config.toml"))
}

/// Parse and check a config file's contents.
pub fn parse_config(path: &Path, content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.viewer.zoom_bounds()?;
    if !(1..360).contains(&config.viewer.rotation_step) {
        return Err(ConfigError::RotationStep(config.viewer.rotation_step));
    }
    Ok(config)
}

/// Load configuration from `path`. A missing file yields defaults.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(path, &content)
}

/// Load configuration from the platform config directory, falling back to
/// defaults on any error.
pub fn load_config() -> AppConfig {
    match config_path().and_then(|path| load_config_from(&path)) {
        Ok(config) => config,
        Err(e) => {
            warn!("{e}. Using defaults.");
            AppConfig::default()
        }
    }
}

/// Save configuration to `path`, creating its directory if needed.
pub fn save_config(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let toml = toml::to_string_pretty(config)?;

    std::fs::write(path, toml).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}
