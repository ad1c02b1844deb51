//! Match configuration
//!
//! A [`MatchConfig`] is built once by the host and handed to
//! [`crate::Match::new`]. Nothing below the match controller reads
//! configuration on its own.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rng::Randomizer;
use crate::types::{
    DEFAULT_HEIGHT, DEFAULT_INTERVAL_MS, DEFAULT_MIN_INTERVAL_MS, DEFAULT_POINTS_PER_LINE,
    DEFAULT_POINTS_PER_PIECE, DEFAULT_SPEED_STEP_MS, DEFAULT_WIDTH, MAX_DIMENSION,
};

/// Match configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub width: u8,
    pub height: u8,
    pub initial_interval_ms: u32,
    pub speed_step_ms: u32,
    pub min_interval_ms: u32,
    pub points_per_piece: u32,
    pub points_per_line: u32,
    pub seed: u32,
    pub randomizer: Randomizer,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            initial_interval_ms: DEFAULT_INTERVAL_MS,
            speed_step_ms: DEFAULT_SPEED_STEP_MS,
            min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
            points_per_piece: DEFAULT_POINTS_PER_PIECE,
            points_per_line: DEFAULT_POINTS_PER_LINE,
            seed: 1,
            randomizer: Randomizer::Bag,
        }
    }
}

/// Grid axis named in a [`ConfigError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => write!(f, "width"),
            Axis::Height => write!(f, "height"),
        }
    }
}

/// Rejected configuration, reported before any match state exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroWidth,
    ZeroHeight,
    DimensionTooLarge { axis: Axis, value: u8, max: u8 },
    ZeroMinInterval,
    MinIntervalNotBelowInitial { min: u32, initial: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroWidth => write!(f, "grid width must be positive"),
            Self::ZeroHeight => write!(f, "grid height must be positive"),
            Self::DimensionTooLarge { axis, value, max } => {
                write!(f, "grid {axis} {value} exceeds the maximum of {max}")
            }
            Self::ZeroMinInterval => write!(f, "minimum interval must be positive"),
            Self::MinIntervalNotBelowInitial { min, initial } => write!(
                f,
                "minimum interval ({min}ms) must be below the initial interval ({initial}ms)"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl MatchConfig {
    /// Small-grid configuration with the default timing and scoring.
    pub fn with_size(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Check every constraint the match relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, value) in [(Axis::Width, self.width), (Axis::Height, self.height)] {
            if value == 0 {
                return Err(match axis {
                    Axis::Width => ConfigError::ZeroWidth,
                    Axis::Height => ConfigError::ZeroHeight,
                });
            }
            if value > MAX_DIMENSION {
                return Err(ConfigError::DimensionTooLarge {
                    axis,
                    value,
                    max: MAX_DIMENSION,
                });
            }
        }
        if self.min_interval_ms == 0 {
            return Err(ConfigError::ZeroMinInterval);
        }
        if self.min_interval_ms >= self.initial_interval_ms {
            return Err(ConfigError::MinIntervalNotBelowInitial {
                min: self.min_interval_ms,
                initial: self.initial_interval_ms,
            });
        }
        Ok(())
    }

    /// Overlay `DUEL_*` environment variables on the defaults.
    ///
    /// Recognized: `DUEL_WIDTH`, `DUEL_HEIGHT`, `DUEL_INTERVAL_MS`,
    /// `DUEL_SPEED_STEP_MS`, `DUEL_MIN_INTERVAL_MS`, `DUEL_POINTS_PER_PIECE`,
    /// `DUEL_POINTS_PER_LINE`, `DUEL_SEED`, `DUEL_RANDOMIZER`.
    pub fn from_env() -> Self {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary key lookup.
    ///
    /// Unparsable values keep the current setting and log a warning.
    pub fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn read<T: std::str::FromStr + Copy>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
            current: T,
        ) -> T {
            match lookup(key).map(|s| s.trim().to_string()) {
                None => current,
                Some(raw) if raw.is_empty() => current,
                Some(raw) => match raw.parse() {
                    Ok(v) => v,
                    Err(_) => {
                        tracing::warn!(key, value = %raw, "ignoring unparsable setting");
                        current
                    }
                },
            }
        }

        self.width = read(&lookup, "DUEL_WIDTH", self.width);
        self.height = read(&lookup, "DUEL_HEIGHT", self.height);
        self.initial_interval_ms = read(&lookup, "DUEL_INTERVAL_MS", self.initial_interval_ms);
        self.speed_step_ms = read(&lookup, "DUEL_SPEED_STEP_MS", self.speed_step_ms);
        self.min_interval_ms = read(&lookup, "DUEL_MIN_INTERVAL_MS", self.min_interval_ms);
        self.points_per_piece = read(&lookup, "DUEL_POINTS_PER_PIECE", self.points_per_piece);
        self.points_per_line = read(&lookup, "DUEL_POINTS_PER_LINE", self.points_per_line);
        self.seed = read(&lookup, "DUEL_SEED", self.seed);

        if let Some(raw) = lookup("DUEL_RANDOMIZER") {
            match Randomizer::from_str(raw.trim()) {
                Some(r) => self.randomizer = r,
                None => tracing::warn!(value = %raw, "ignoring unknown DUEL_RANDOMIZER"),
            }
        }

        self
    }
}
