//! Error types for configuration, storage and session commands.

use std::fmt;

use crate::sim::GamePhase;

/// A tuning value outside its sane range. Fatal at startup.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Canvas width or height is not positive.
    Canvas { width: f32, height: f32 },
    /// Road edges are inverted or leave the canvas.
    Road { left: f32, right: f32 },
    /// At least one lane is required.
    NoLanes,
    /// A speed, rate or extent that must be non-negative (or positive) is not.
    Negative { field: &'static str, value: f32 },
    /// Spawn floor is non-positive or above the initial interval.
    SpawnInterval { initial: f32, min: f32 },
    /// Difficulty interval must be positive.
    DifficultyInterval(f32),
    /// Collision shrink would collapse a bounding box.
    CollisionShrink { shrink: f32, smallest_half_extent: f32 },
    /// Wobble would carry an enemy out of its lane.
    Wobble { amplitude: f32, lane_slack: f32 },
    /// A car variant with no top speed.
    CarSpec { name: String },
    /// Malformed tuning document.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Canvas { width, height } => {
                write!(f, "canvas must be positive, got {width}x{height}")
            }
            ConfigError::Road { left, right } => {
                write!(f, "road [{left}, {right}] must be non-empty and inside the canvas")
            }
            ConfigError::NoLanes => write!(f, "road needs at least one lane"),
            ConfigError::Negative { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            ConfigError::SpawnInterval { initial, min } => write!(
                f,
                "spawn interval floor {min} must be positive and not exceed initial {initial}"
            ),
            ConfigError::DifficultyInterval(secs) => {
                write!(f, "difficulty interval must be positive, got {secs}")
            }
            ConfigError::CollisionShrink {
                shrink,
                smallest_half_extent,
            } => write!(
                f,
                "collision shrink {shrink} must be below the smallest half extent {smallest_half_extent}"
            ),
            ConfigError::Wobble {
                amplitude,
                lane_slack,
            } => write!(
                f,
                "wobble amplitude {amplitude} exceeds lane slack {lane_slack}"
            ),
            ConfigError::CarSpec { name } => {
                write!(f, "car '{name}' needs a positive max speed and non-negative acceleration")
            }
            ConfigError::Parse(msg) => write!(f, "invalid tuning document: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// High score storage failure. Never fatal: the score stays in memory.
#[derive(Debug)]
pub enum StorageError {
    /// Backend not present (no window, no LocalStorage, read-only disk).
    Unavailable,
    /// Underlying file I/O failed.
    Io(std::io::Error),
    /// Stored value could not be decoded.
    Corrupt(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "storage unavailable"),
            StorageError::Io(err) => write!(f, "storage I/O error: {err}"),
            StorageError::Corrupt(msg) => write!(f, "stored high score is corrupt: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Corrupt(err.to_string())
    }
}

/// A session command issued in a phase that does not accept it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseError {
    pub command: &'static str,
    pub phase: GamePhase,
}

impl fmt::Display for PhaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not allowed in phase {:?}", self.command, self.phase)
    }
}

impl std::error::Error for PhaseError {}
