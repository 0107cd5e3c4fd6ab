//! Simulation configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```json
//! {
//!   "particle_count": 500,
//!   "particle_size": 6.0,
//!   "walls": { "left": -2.0, "right": 2.0, "top": 1.5, "bottom": -1.5 }
//! }
//! ```

use crate::error::ConfigError;
use crate::spawn::SpawnBounds;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Reflecting walls. A particle at or past a wall has that velocity
/// component negated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Walls {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for Walls {
    fn default() -> Self {
        Self {
            left: -2.7,
            right: 2.7,
            top: 2.0,
            bottom: -2.0,
        }
    }
}

/// Startup and tuning values for a [`Simulation`](crate::Simulation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Particles spawned at start.
    pub particle_count: usize,
    /// Initial visual size in pixels.
    pub particle_size: f32,
    /// Initial collision divisor; threshold is `particle_size / collide_scale`.
    pub collide_scale: f32,
    /// Size added per "grow" input.
    pub size_step: f32,
    /// Added to both size and divisor every sudden-death frame.
    pub sudden_death_step: f32,
    /// Fraction of the initial count at or below which sudden death starts.
    pub sudden_death_ratio: f32,
    /// Particle count at or below which sudden death always applies.
    pub sudden_death_floor: usize,
    pub walls: Walls,
    /// Half-size of the spawn square.
    pub spawn_extent: f32,
    /// Per-axis initial speed limit.
    pub max_speed: f32,
    pub acceleration: Vec3,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            particle_count: 100,
            particle_size: 10.0,
            collide_scale: 100.0,
            size_step: 0.5,
            sudden_death_step: 0.005,
            sudden_death_ratio: 0.1,
            sudden_death_floor: 5,
            walls: Walls::default(),
            spawn_extent: 1.0,
            max_speed: 1.0,
            acceleration: Vec3::new(0.0, -0.05, 0.0),
            window_width: 800,
            window_height: 600,
        }
    }
}

impl SimConfig {
    /// Load a config from a JSON file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SimConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.particle_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "particle_size must be positive, got {}",
                self.particle_size
            )));
        }
        if !(self.collide_scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "collide_scale must be positive, got {}",
                self.collide_scale
            )));
        }
        if !(self.walls.left < self.walls.right) {
            return Err(ConfigError::Invalid(format!(
                "left wall ({}) must be left of right wall ({})",
                self.walls.left, self.walls.right
            )));
        }
        if !(self.walls.bottom < self.walls.top) {
            return Err(ConfigError::Invalid(format!(
                "bottom wall ({}) must be below top wall ({})",
                self.walls.bottom, self.walls.top
            )));
        }
        for (name, value) in [
            ("spawn_extent", self.spawn_extent),
            ("max_speed", self.max_speed),
        ] {
            // Sampling spans [-value, value), so the full width must fit in an f32.
            if !(value >= 0.0 && (2.0 * value).is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be non-negative and finite when doubled, got {}",
                    name, value
                )));
            }
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::Invalid("window size must be non-zero".into()));
        }
        Ok(())
    }

    pub fn spawn_bounds(&self) -> SpawnBounds {
        SpawnBounds {
            extent: self.spawn_extent,
            max_speed: self.max_speed,
            acceleration: self.acceleration,
        }
    }

    /// Particle count at or below which sudden death kicks in.
    pub fn sudden_death_threshold(&self, initial_count: usize) -> usize {
        let by_ratio = (initial_count as f32 * self.sudden_death_ratio) as usize;
        by_ratio.max(self.sudden_death_floor)
    }
}
