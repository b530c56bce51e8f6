//! Game configuration and its validation errors.

use thiserror::Error;

use crate::scoring::SpeedCurve;
use crate::types::{
    INITIAL_SPEED_MS, MIN_SPEED_MS, POINTS_PER_LINE, SPEED_STEP_MS, SPEED_UP_EVERY_MS,
};

/// Rejected game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("initial speed must be positive, got {0}ms")]
    NonPositiveInitialSpeed(u32),
    #[error("minimum speed must be positive, got {0}ms")]
    NonPositiveMinSpeed(u32),
    #[error("minimum speed {min}ms is slower than the initial speed {initial}ms")]
    MinAboveInitial { min: u32, initial: u32 },
    #[error("speed-up cadence must be positive")]
    ZeroSpeedUpCadence,
    #[error("piece sequence must contain at least one piece")]
    EmptySequence,
}

/// Tunables of a game. Defaults reproduce the standard rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Descent interval of a fresh game.
    pub initial_speed_ms: u32,
    /// Descent interval floor.
    pub min_speed_ms: u32,
    /// Interval decrease per speed-up.
    pub speed_step_ms: u32,
    /// Elapsed play time between speed-ups.
    pub speed_up_every_ms: u64,
    pub points_per_line: u32,
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_speed_ms == 0 {
            return Err(ConfigError::NonPositiveInitialSpeed(self.initial_speed_ms));
        }
        if self.min_speed_ms == 0 {
            return Err(ConfigError::NonPositiveMinSpeed(self.min_speed_ms));
        }
        if self.min_speed_ms > self.initial_speed_ms {
            return Err(ConfigError::MinAboveInitial {
                min: self.min_speed_ms,
                initial: self.initial_speed_ms,
            });
        }
        if self.speed_up_every_ms == 0 {
            return Err(ConfigError::ZeroSpeedUpCadence);
        }
        Ok(())
    }

    pub fn speed_curve(&self) -> SpeedCurve {
        SpeedCurve {
            initial_ms: self.initial_speed_ms,
            min_ms: self.min_speed_ms,
            step_ms: self.speed_step_ms,
            every_ms: self.speed_up_every_ms,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_speed_ms: INITIAL_SPEED_MS,
            min_speed_ms: MIN_SPEED_MS,
            speed_step_ms: SPEED_STEP_MS,
            speed_up_every_ms: SPEED_UP_EVERY_MS,
            points_per_line: POINTS_PER_LINE,
        }
    }
}
