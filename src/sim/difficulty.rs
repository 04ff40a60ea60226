//! Difficulty ramp
//!
//! Everything here is a pure function of survival time (via the level), so
//! the ramp cannot drift from the clock no matter how ticks are sliced.

use crate::tuning::GameConfig;

/// `1 + floor(survival_time / difficulty_interval)`
pub fn difficulty_level(survival_time: f64, config: &GameConfig) -> u32 {
    let steps = (survival_time.max(0.0) / f64::from(config.difficulty_interval)).floor();
    // Saturates at u32::MAX for absurd survival times
    1u32.saturating_add(steps as u32)
}

/// Enemy base speed (px/s) at a level
pub fn enemy_base_speed(level: u32, config: &GameConfig) -> f32 {
    config.enemy_base_speed + level.saturating_sub(1) as f32 * config.difficulty_speed_inc
}

/// Countdown rearm value after a spawn at `level`:
/// `max(spawn_interval_min, spawn_interval - level * spawn_shrink_per_level)`.
/// The very first spawn of a run waits the full `spawn_interval`.
pub fn spawn_interval(level: u32, config: &GameConfig) -> f32 {
    let shrunk = config.spawn_interval - level as f32 * config.spawn_shrink_per_level;
    shrunk.max(config.spawn_interval_min)
}
