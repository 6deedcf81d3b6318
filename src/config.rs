//! Startup configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! gives the stock scene. Values can also be set with the builder methods.
//!
//! ```
//! use lightcone::Config;
//!
//! let config = Config::default()
//!     .with_particle_count(5_000)
//!     .with_animation_speed(1.0);
//! assert!(config.validate().is_ok());
//! ```

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::controls::ControlId;
use crate::error::ConfigError;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of haze particles.
    pub particle_count: u32,
    /// Half-width of the cube particles are kept inside.
    pub bounds: f32,
    /// Radius of the horizontal spawn disk.
    pub spawn_radius: f32,
    /// Spawn height range `[min, max]`.
    pub spawn_height: [f32; 2],
    /// Per-axis velocity magnitude limit, in units per frame.
    pub max_velocity: f32,
    pub auto_rotate: bool,
    pub animation_speed: f32,
    pub fog_density: f32,
    /// Cone gradient start color, `#rrggbb`.
    pub color1: String,
    /// Cone gradient end color, `#rrggbb`.
    pub color2: String,
    /// RNG seed for particle placement. Random when absent.
    pub seed: Option<u64>,
    /// Controls exposed by the panel.
    pub controls: Vec<ControlId>,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            particle_count: 3000,
            bounds: 15.0,
            spawn_radius: 12.0,
            spawn_height: [-5.0, 15.0],
            max_velocity: 0.01,
            auto_rotate: true,
            animation_speed: 0.3,
            fog_density: 0.05,
            color1: "#4488ff".to_string(),
            color2: "#88ccff".to_string(),
            seed: None,
            controls: ControlId::ALL.to_vec(),
            window_width: 1280,
            window_height: 720,
        }
    }
}

impl Config {
    /// Load a config from a JSON file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse a config from JSON text and validate it.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_animation_speed(mut self, speed: f32) -> Self {
        self.animation_speed = speed;
        self
    }

    pub fn with_auto_rotate(mut self, enabled: bool) -> Self {
        self.auto_rotate = enabled;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_controls(mut self, controls: Vec<ControlId>) -> Self {
        self.controls = controls;
        self
    }

    /// Check ranges and colors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::Invalid("particle_count must be > 0".into()));
        }
        if !(self.bounds > 0.0) {
            return Err(ConfigError::Invalid("bounds must be > 0".into()));
        }
        if !(self.spawn_radius >= 0.0) || self.spawn_radius > self.bounds {
            return Err(ConfigError::Invalid(format!(
                "spawn_radius must be in [0, {}]",
                self.bounds
            )));
        }
        let [lo, hi] = self.spawn_height;
        if lo > hi || lo < -self.bounds || hi > self.bounds {
            return Err(ConfigError::Invalid(format!(
                "spawn_height must be an ordered range inside [-{b}, {b}]",
                b = self.bounds
            )));
        }
        if !(self.max_velocity >= 0.0) {
            return Err(ConfigError::Invalid("max_velocity must be >= 0".into()));
        }
        if !(self.animation_speed >= 0.0) {
            return Err(ConfigError::Invalid("animation_speed must be >= 0".into()));
        }
        if !(self.fog_density >= 0.0) {
            return Err(ConfigError::Invalid("fog_density must be >= 0".into()));
        }
        parse_hex_color(&self.color1)?;
        parse_hex_color(&self.color2)?;
        Ok(())
    }

    /// Cone gradient endpoints as linear RGB in `[0, 1]`.
    pub fn cone_colors(&self) -> Result<(Vec3, Vec3), ConfigError> {
        Ok((parse_hex_color(&self.color1)?, parse_hex_color(&self.color2)?))
    }
}

/// Parse an sRGB `#rrggbb` (leading `#` optional) into linear RGB in `[0, 1]`.
///
/// The surface is sRGB, so shader outputs must be linear for the written
/// color to come back out as the hex value.
pub fn parse_hex_color(text: &str) -> Result<Vec3, ConfigError> {
    let hex = text.strip_prefix('#').unwrap_or(text);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidColor(text.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map(|v| srgb_to_linear(v as f32 / 255.0))
            .map_err(|_| ConfigError::InvalidColor(text.to_string()))
    };
    Ok(Vec3::new(channel(0)?, channel(2)?, channel(4)?))
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
