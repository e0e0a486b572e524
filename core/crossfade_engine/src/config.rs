use std::time::Duration;

use thiserror::Error;

use crate::constants::{DEFAULT_FADE_SECS, DEFAULT_TARGET_GAIN};

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("fade duration must be a finite, non-negative number of seconds, got {0}")]
    InvalidFadeDuration(f64),

    #[error("target gain must be finite and non-negative, got {0}")]
    InvalidTargetGain(f32),
}

/// How long each fade lasts and what volume a stream settles at between fades.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeOptions {
    /// Length of both the fade-in and the fade-out.
    pub fade_duration: Duration,
    /// Linear volume multiplier outside the fades (0.0 to 1.0+).
    pub target_gain: f32,
}

impl FadeOptions {
    pub const fn new(fade_duration: Duration, target_gain: f32) -> Self {
        Self {
            fade_duration,
            target_gain,
        }
    }

    /// Builds options from a seconds value, rejecting what a `Duration` can't hold.
    pub fn from_secs(fade_secs: f64, target_gain: f32) -> Result<Self, ConfigError> {
        if !fade_secs.is_finite() || fade_secs < 0.0 {
            return Err(ConfigError::InvalidFadeDuration(fade_secs));
        }
        if !target_gain.is_finite() || target_gain < 0.0 {
            return Err(ConfigError::InvalidTargetGain(target_gain));
        }

        Ok(Self::new(Duration::from_secs_f64(fade_secs), target_gain))
    }
}

impl Default for FadeOptions {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_FADE_SECS), DEFAULT_TARGET_GAIN)
    }
}
