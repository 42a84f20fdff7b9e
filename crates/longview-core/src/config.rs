use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::buffer::PixelFormat;
use crate::consts::{
    DEFAULT_DECELERATION, DEFAULT_FRAME_INTERVAL_MS, DEFAULT_LONG_PRESS_TIMEOUT_MS,
    DEFAULT_MAX_FLING_VELOCITY, DEFAULT_MIN_FLING_VELOCITY, DEFAULT_MIN_PHYSICS_VELOCITY,
    DEFAULT_TAP_TIMEOUT_MS, DEFAULT_TOUCH_SLOP,
};
use crate::error::{LongviewError, Result};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Storage format for decoded regions.
    #[serde(default)]
    pub pixel_format: PixelFormat,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub gestures: GestureConfig,
}

impl ViewerConfig {
    /// Parse a TOML document and reject values the simulation cannot run with.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.physics.validate()?;
        self.gestures.validate()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Constant deceleration applied to a fling, in pixels/second².
    pub deceleration: f32,
    /// Simulated time per `tick()`.
    pub frame_interval_ms: u32,
    /// Flings slower than this never start.
    pub min_velocity: f32,
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<()> {
        positive("physics.deceleration", self.deceleration)?;
        if self.frame_interval_ms == 0 {
            return Err(invalid("physics.frame_interval_ms", 0, "must be at least 1"));
        }
        non_negative("physics.min_velocity", self.min_velocity)
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            deceleration: DEFAULT_DECELERATION,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            min_velocity: DEFAULT_MIN_PHYSICS_VELOCITY,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub touch_slop: f32,
    pub min_fling_velocity: f32,
    pub max_fling_velocity: f32,
    pub tap_timeout_ms: u64,
    pub long_press_timeout_ms: u64,
    /// When disabled a held press never turns into a long-press.
    pub long_press_enabled: bool,
}

impl GestureConfig {
    pub fn validate(&self) -> Result<()> {
        non_negative("gestures.touch_slop", self.touch_slop)?;
        non_negative("gestures.min_fling_velocity", self.min_fling_velocity)?;
        positive("gestures.max_fling_velocity", self.max_fling_velocity)?;
        if self.max_fling_velocity < self.min_fling_velocity {
            return Err(invalid(
                "gestures.max_fling_velocity",
                self.max_fling_velocity,
                "must not be below min_fling_velocity",
            ));
        }
        Ok(())
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: DEFAULT_TOUCH_SLOP,
            min_fling_velocity: DEFAULT_MIN_FLING_VELOCITY,
            max_fling_velocity: DEFAULT_MAX_FLING_VELOCITY,
            tap_timeout_ms: DEFAULT_TAP_TIMEOUT_MS,
            long_press_timeout_ms: DEFAULT_LONG_PRESS_TIMEOUT_MS,
            long_press_enabled: true,
        }
    }
}

fn invalid(field: &'static str, value: impl ToString, reason: &'static str) -> LongviewError {
    LongviewError::InvalidConfig {
        field,
        value: value.to_string(),
        reason,
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be a finite number above zero"))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be a finite number, zero or more"))
    }
}
