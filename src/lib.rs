//! Turbo Rush - A top-down lane-dodging arcade racer
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (kinematics, spawning, collisions, scoring)
//! - `tuning`: Data-driven game balance, validated at startup
//! - `game`: Session host that runs ticks and publishes frames to observers
//! - `highscores` / `persistence`: Best score tracking and storage backends
//! - `audio`: Sound effect mapping (Web Audio synthesis on wasm32)
//! - `web`: Browser exports (wasm32 only)

pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{ConfigError, PhaseError, StorageError};
pub use game::{FrameObserver, Game};
pub use highscores::HighScores;
pub use tuning::{CarKind, CarSpec, GameConfig};

/// Default tuning values.
///
/// The arcade feel was tuned at 60 frames per second; every rate here is
/// that per-frame value rescaled to per-second so ticks can use any `dt`.
pub mod consts {
    /// Frame rate the per-frame tuning was authored at
    pub const REFERENCE_FPS: f32 = 60.0;

    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 480.0;
    pub const CANVAS_HEIGHT: f32 = 720.0;

    /// Road layout
    pub const ROAD_LEFT: f32 = 80.0;
    pub const ROAD_RIGHT: f32 = 400.0;
    pub const LANE_COUNT: usize = 3;

    /// Player car (half extents, centre y fixed near the bottom)
    pub const PLAYER_HALF_WIDTH: f32 = 20.0;
    pub const PLAYER_HALF_HEIGHT: f32 = 36.0;
    pub const PLAYER_Y: f32 = CANVAS_HEIGHT - 160.0;

    /// Speed decay with no throttle (px/s²)
    pub const FRICTION: f32 = 0.05 * REFERENCE_FPS * REFERENCE_FPS;
    /// Brake deceleration (px/s²)
    pub const DECELERATION: f32 = 0.2 * REFERENCE_FPS * REFERENCE_FPS;
    /// Lateral speed while steering (px/s)
    pub const STEER_SPEED: f32 = 7.0 * REFERENCE_FPS;

    /// Enemy cars
    pub const ENEMY_HALF_WIDTH: f32 = 20.0;
    pub const ENEMY_HALF_HEIGHT: f32 = 34.0;
    pub const ENEMY_BASE_SPEED: f32 = 4.0 * REFERENCE_FPS;
    /// Upper bound of per-enemy random speed bonus (px/s)
    pub const ENEMY_SPEED_JITTER: f32 = 1.0 * REFERENCE_FPS;
    pub const ENEMY_SPAWN_INTERVAL: f32 = 1.2;
    pub const ENEMY_SPAWN_INTERVAL_MIN: f32 = 0.5;
    pub const ENEMY_SPAWN_SHRINK_PER_LEVEL: f32 = 0.1;

    /// Lateral wobble (px, rad/s)
    pub const WOBBLE_AMPLITUDE: f32 = 6.0;
    pub const WOBBLE_FREQUENCY: f32 = 2.5;

    /// Difficulty ramp - every N seconds speed increases
    pub const DIFFICULTY_INTERVAL: f32 = 20.0;
    pub const DIFFICULTY_SPEED_INC: f32 = 0.8 * REFERENCE_FPS;

    /// Collision AABB shrink per side (forgiving near-misses)
    pub const COLLISION_SHRINK: f32 = 8.0;
    /// Extra band around the shrunk box that counts as a near miss
    pub const NEAR_MISS_MARGIN: f32 = 24.0;

    /// Scoring
    pub const POINTS_PER_SECOND: f32 = 10.0;
    pub const NEAR_MISS_BONUS: u64 = 50;
    pub const SCORE_MILESTONE: u64 = 100;

    /// Road animation
    pub const STRIPE_HEIGHT: f32 = 40.0;
    pub const STRIPE_GAP: f32 = 40.0;
}
