//! Gameplay tunables
//!
//! Loaded from an optional JSON file. Every field has a default, so a file
//! only needs the values it changes:
//!
//! ```json
//! { "move_rate": 10.0, "seed": 1234, "palette": { "head": [255, 255, 0] } }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Window size in pixels. Not configurable.
pub const WINDOW_WIDTH: u32 = 720;
pub const WINDOW_HEIGHT: u32 = 720;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_PATH: &str = "snake.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Colors as RGB triples
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: (u8, u8, u8),
    pub grid_line: (u8, u8, u8),
    /// Grid line opacity, lines are alpha-blended over the background
    pub grid_alpha: u8,
    pub food_a: (u8, u8, u8),
    pub food_b: (u8, u8, u8),
    pub head: (u8, u8, u8),
    pub body: (u8, u8, u8),
    pub tail: (u8, u8, u8),
    /// Flash color during the restart countdown
    pub dead: (u8, u8, u8),
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: (0x1b, 0x1d, 0x22),
            grid_line: (0xf1, 0xf1, 0x00),
            grid_alpha: 24,
            food_a: (0xff, 0x5a, 0x36),
            food_b: (0xff, 0xc8, 0x3c),
            head: (0x00, 0xe0, 0x40),
            body: (0x00, 0xc0, 0x00),
            tail: (0x00, 0x60, 0x20),
            dead: (0xd0, 0x20, 0x20),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cell edge length in pixels
    pub cell_size: f32,
    /// Grid spans `[-half_extent, half_extent]` cells on each axis
    pub half_extent: i32,
    /// Cells per second
    pub move_rate: f32,
    /// Speed multiplier while a turn is queued
    pub turn_boost: f32,
    /// Seconds between food spawns
    pub food_spawn_interval: f32,
    /// Seconds an uneaten food stays on the field
    pub food_lifespan: f32,
    /// Food slots
    pub food_capacity: usize,
    /// Seconds between game over and restart
    pub restart_delay: f32,
    /// Simulation step in seconds
    pub fixed_step: f32,
    /// Longest frame delta fed to the simulation
    pub max_frame_delta: f32,
    /// Food placement seed; clock-seeded when absent
    pub seed: Option<u64>,
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_size: 24.0,
            half_extent: 14,
            move_rate: 8.0,
            turn_boost: 1.5,
            food_spawn_interval: 3.0,
            food_lifespan: 10.0,
            food_capacity: 8,
            restart_delay: 2.0,
            fixed_step: 1.0 / 120.0,
            max_frame_delta: 0.25,
            seed: None,
            palette: Palette::default(),
        }
    }
}

impl GameConfig {
    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&json).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise. Parse errors still fail.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: "<inline>".to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("cell_size", self.cell_size),
            ("move_rate", self.move_rate),
            ("turn_boost", self.turn_boost),
            ("food_spawn_interval", self.food_spawn_interval),
            ("food_lifespan", self.food_lifespan),
            ("restart_delay", self.restart_delay),
            ("fixed_step", self.fixed_step),
            ("max_frame_delta", self.max_frame_delta),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if self.half_extent < 1 {
            return Err(ConfigError::Invalid(format!(
                "half_extent must be at least 1, got {}",
                self.half_extent
            )));
        }
        if self.food_capacity == 0 {
            return Err(ConfigError::Invalid("food_capacity must be non-zero".into()));
        }
        let side = (self.half_extent as i64 * 2 + 1) as f32 * self.cell_size;
        if side > WINDOW_WIDTH.min(WINDOW_HEIGHT) as f32 {
            return Err(ConfigError::Invalid(format!(
                "grid is {}px wide, window is {}x{}",
                side, WINDOW_WIDTH, WINDOW_HEIGHT
            )));
        }
        Ok(())
    }
}
