//! Viewer configuration, loadable from JSON.

use quatview_core::{DEFAULT_TRAIL_CAPACITY, DEFAULT_VIEW_DISTANCE};
use quatview_render::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Pixel size of one drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    pub width: u32,
    pub height: u32,
}

impl SurfaceConfig {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Playback settings for recorded streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// 1 (slowest) to 100 (fastest).
    pub speed: u32,
    /// Restart from the first frame after the last one.
    pub looping: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: 10,
            looping: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub enable_tracy: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_tracy: false,
        }
    }
}

/// Everything the viewer needs to set up its state and surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub view_3d: SurfaceConfig,
    pub view_2d: SurfaceConfig,
    pub trail_capacity: usize,
    pub normalize: bool,
    pub view_distance: f64,
    pub background: Color,
    pub playback: PlaybackConfig,
    pub logging: LoggingConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            view_3d: SurfaceConfig::new(600, 400),
            view_2d: SurfaceConfig::new(400, 400),
            trail_capacity: DEFAULT_TRAIL_CAPACITY,
            normalize: true,
            view_distance: DEFAULT_VIEW_DISTANCE,
            background: Color::from_hex(0x111111),
            playback: PlaybackConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Read and validate a JSON config file. Missing keys take defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, surface) in [("view_3d", self.view_3d), ("view_2d", self.view_2d)] {
            if surface.width == 0 || surface.height == 0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be at least 1x1, got {}x{}",
                    surface.width, surface.height
                )));
            }
        }
        if self.trail_capacity == 0 {
            return Err(ConfigError::Invalid("trail_capacity must be at least 1".into()));
        }
        if !(self.view_distance.is_finite() && self.view_distance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "view_distance must be positive, got {}",
                self.view_distance
            )));
        }
        if !(1..=100).contains(&self.playback.speed) {
            return Err(ConfigError::Invalid(format!(
                "playback speed must be in 1..=100, got {}",
                self.playback.speed
            )));
        }
        Ok(())
    }

    pub fn with_view_3d(mut self, width: u32, height: u32) -> Self {
        self.view_3d = SurfaceConfig::new(width, height);
        self
    }

    pub fn with_view_2d(mut self, width: u32, height: u32) -> Self {
        self.view_2d = SurfaceConfig::new(width, height);
        self
    }

    pub fn with_trail_capacity(mut self, capacity: usize) -> Self {
        self.trail_capacity = capacity;
        self
    }

    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn with_view_distance(mut self, view_distance: f64) -> Self {
        self.view_distance = view_distance;
        self
    }

    pub fn with_speed(mut self, speed: u32) -> Self {
        self.playback.speed = speed;
        self
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.playback.looping = looping;
        self
    }

    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }
}
