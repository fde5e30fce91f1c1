//! Configuration file handling.
//!
//! Loads tuning constants from `~/.config/affine/config.toml` or a custom
//! path. Every key is optional; missing keys keep their built-in defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::camera::Tuning;
use crate::input::Timing;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

/// `[camera]` section. Angles are in radians.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub accel: f64,
    pub decel: f64,
    pub max_vel: f64,
    pub turn_accel: f64,
    pub turn_decel: f64,
    pub turn_max_vel: f64,
    pub pan_step: f64,
    pub zoom_step: f64,
    pub tilt_step: f64,
    pub height_step: f64,
    pub theta: f64,
    pub tilt: f64,
    pub height: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Tuning::default().into()
    }
}

impl From<Tuning> for CameraConfig {
    fn from(t: Tuning) -> Self {
        Self {
            accel: t.accel,
            decel: t.decel,
            max_vel: t.max_vel,
            turn_accel: t.turn_accel,
            turn_decel: t.turn_decel,
            turn_max_vel: t.turn_max_vel,
            pan_step: t.pan_step,
            zoom_step: t.zoom_step,
            tilt_step: t.tilt_step,
            height_step: t.height_step,
            theta: t.initial_theta,
            tilt: t.initial_tilt,
            height: t.initial_height,
        }
    }
}

impl From<CameraConfig> for Tuning {
    fn from(c: CameraConfig) -> Self {
        Self {
            accel: c.accel,
            decel: c.decel,
            max_vel: c.max_vel,
            turn_accel: c.turn_accel,
            turn_decel: c.turn_decel,
            turn_max_vel: c.turn_max_vel,
            pan_step: c.pan_step,
            zoom_step: c.zoom_step,
            tilt_step: c.tilt_step,
            height_step: c.height_step,
            initial_theta: c.theta,
            initial_tilt: c.tilt,
            initial_height: c.height,
        }
    }
}

/// `[render]` section.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// First framebuffer row painted by the projection
    pub horizon: u32,
    pub frame_interval_ms: u64,
    pub view_poll_timeout_ms: u64,
    pub escape_timeout_ms: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let timing = Timing::default();
        Self {
            horizon: 0,
            frame_interval_ms: timing.frame_interval.as_millis() as u64,
            view_poll_timeout_ms: timing.view_poll_timeout.as_millis() as u64,
            escape_timeout_ms: timing.escape_timeout.as_millis() as u64,
        }
    }
}

impl RenderConfig {
    pub fn timing(&self) -> Timing {
        Timing {
            view_poll_timeout: Duration::from_millis(self.view_poll_timeout_ms),
            frame_interval: Duration::from_millis(self.frame_interval_ms),
            escape_timeout: Duration::from_millis(self.escape_timeout_ms),
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path.map(PathBuf::from).or_else(default_path) else {
            return Ok(Config::default());
        };

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            log::info!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            log::debug!("No config at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }

    pub fn tuning(&self) -> Tuning {
        self.camera.into()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
        }
    }
}

/// Get the default config file path, if the platform has a config directory.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("affine").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load(Some(Path::new("/nonexistent/affine/config.toml"))).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.tuning(), Tuning::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let file = write_config("[camera]\nmax_vel = 4.0\n\n[render]\nhorizon = 12\n");
        let config = Config::load(Some(file.path())).unwrap();

        assert_eq!(config.camera.max_vel, 4.0);
        assert_eq!(config.camera.accel, 0.3);
        assert_eq!(config.render.horizon, 12);
        assert_eq!(config.render.frame_interval_ms, 33);
    }

    #[test]
    fn test_empty_file() {
        let file = write_config("");
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let file = write_config("[camera\naccel = ");
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_unknown_key_is_error() {
        let file = write_config("[camera]\nwarp = 9\n");
        assert!(Config::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_tuning_round_trip_through_config() {
        let tuning = Tuning {
            accel: 1.0,
            initial_height: 42.0,
            ..Tuning::default()
        };
        let back: Tuning = CameraConfig::from(tuning).into();
        assert_eq!(back, tuning);
    }

    #[test]
    fn test_render_timing() {
        let render = RenderConfig {
            frame_interval_ms: 50,
            ..RenderConfig::default()
        };
        assert_eq!(render.timing().frame_interval, Duration::from_millis(50));
        assert_eq!(render.timing().view_poll_timeout, Duration::from_millis(100));
    }
}
