//! Game configuration - board geometry and fall timing
//!
//! Both sections deserialize from TOML/JSON with every field optional; missing
//! fields take the defaults from [`crate::types`]. Construct a game only from a
//! configuration that passed [`GameConfig::validate`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{
    BLOCK_INIT_FALL_STEP_SECONDS, BLOCK_MAX_FALL_STEP_SECONDS, BLOCK_SPEED_INC_MULTIPLIER,
    BLOCK_SPEED_INC_PERIOD_SECONDS, BOARD_DEPTH, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_OVERSHOOT_Y,
};

/// Rejected configuration values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("board {axis} must be greater than zero")]
    ZeroDimension { axis: &'static str },

    #[error("board layers must be square, got width {width} and depth {depth}")]
    NonSquareLayer { width: u32, depth: u32 },

    #[error("board height {height} must be below {limit}")]
    TooTall { height: u32, limit: u32 },

    #[error("{name} must be a finite number of seconds greater than zero, got {value}")]
    InvalidInterval { name: &'static str, value: f32 },

    #[error("max fall step ({max}s) must not be slower than the initial fall step ({initial}s)")]
    MaxSlowerThanInitial { max: f32, initial: f32 },

    #[error("speed increase multiplier must be finite and non-negative, got {0}")]
    InvalidMultiplier(f32),
}

/// Board geometry in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    pub width: u32,
    pub depth: u32,
    pub height: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            depth: BOARD_DEPTH,
            height: BOARD_HEIGHT,
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, value) in [
            ("width", self.width),
            ("depth", self.depth),
            ("height", self.height),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroDimension { axis });
            }
        }
        if self.width != self.depth {
            return Err(ConfigError::NonSquareLayer {
                width: self.width,
                depth: self.depth,
            });
        }
        let limit = SPAWN_OVERSHOOT_Y as u32;
        if self.height >= limit {
            return Err(ConfigError::TooTall {
                height: self.height,
                limit,
            });
        }
        Ok(())
    }
}

/// Fall timing, all intervals in seconds per one-cell step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    pub init_fall_step_seconds: f32,
    /// Interval used while accelerating
    pub max_fall_step_seconds: f32,
    pub speed_inc_multiplier: f32,
    pub speed_inc_period_seconds: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            init_fall_step_seconds: BLOCK_INIT_FALL_STEP_SECONDS,
            max_fall_step_seconds: BLOCK_MAX_FALL_STEP_SECONDS,
            speed_inc_multiplier: BLOCK_SPEED_INC_MULTIPLIER,
            speed_inc_period_seconds: BLOCK_SPEED_INC_PERIOD_SECONDS,
        }
    }
}

impl TimingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("init_fall_step_seconds", self.init_fall_step_seconds),
            ("max_fall_step_seconds", self.max_fall_step_seconds),
            ("speed_inc_period_seconds", self.speed_inc_period_seconds),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidInterval { name, value });
            }
        }
        if self.max_fall_step_seconds > self.init_fall_step_seconds {
            return Err(ConfigError::MaxSlowerThanInitial {
                max: self.max_fall_step_seconds,
                initial: self.init_fall_step_seconds,
            });
        }
        if !self.speed_inc_multiplier.is_finite() || self.speed_inc_multiplier < 0.0 {
            return Err(ConfigError::InvalidMultiplier(self.speed_inc_multiplier));
        }
        Ok(())
    }
}

/// Everything the core needs to start a game
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub board: BoardConfig,
    pub timing: TimingConfig,
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.board.validate()?;
        self.timing.validate()
    }
}
