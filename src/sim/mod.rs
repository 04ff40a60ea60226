//! Gameplay simulation module
//!
//! All gameplay logic lives here. It stays free of rendering, audio and
//! storage:
//! - Every rate is scaled by the `dt` passed in
//! - Randomness comes only from the session's seeded RNG
//! - Stable iteration order (enemies by spawn id)

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod kinematics;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use collision::{Aabb, find_collision, find_near_misses};
pub use difficulty::{difficulty_level, enemy_base_speed, spawn_interval};
pub use kinematics::step_player;
pub use snapshot::{EnemyView, PlayerView, Snapshot};
pub use spawner::{Spawner, advance_enemies, retire_enemies, spawn_enemy};
pub use state::{Enemy, GameEvent, GamePhase, GameState, PALETTE_COUNT, Player};
pub use tick::{TickInput, tick};
