//! Read-only frame view for rendering and audio collaborators

use serde::{Deserialize, Serialize};

use super::state::{GamePhase, GameState};
use crate::tuning::CarKind;

/// Player car as drawn this frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    /// Speed / top speed, 0..=1
    pub speed_ratio: f32,
    pub speed_kmh: f32,
    /// Steering direction, for the renderer's lean
    pub steer: i8,
}

/// One enemy car as drawn this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    /// Centre x including wobble
    pub x: f32,
    pub y: f32,
    pub palette: u8,
    pub wobble: f32,
}

/// Everything presentation needs, copied out of the session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub car: CarKind,
    pub car_name: String,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub survival_time: f64,
    pub score: u64,
    pub high_score: u64,
    pub difficulty_level: u32,
    pub near_misses: u32,
    pub road_scroll: f32,
}

impl Snapshot {
    pub fn capture(state: &GameState, high_score: u64) -> Self {
        let player = &state.player;
        Self {
            phase: state.phase,
            car: state.car,
            car_name: state.config().car(state.car).name.clone(),
            player: PlayerView {
                x: player.pos.x,
                y: player.pos.y,
                speed: player.speed,
                speed_ratio: state.speed_ratio(),
                speed_kmh: state.display_speed_kmh(),
                steer: player.steer,
            },
            enemies: state
                .enemies
                .iter()
                .map(|e| {
                    let center = e.center();
                    EnemyView {
                        id: e.id,
                        x: center.x,
                        y: center.y,
                        palette: e.palette,
                        wobble: e.wobble,
                    }
                })
                .collect(),
            survival_time: state.survival_time,
            score: state.score,
            high_score,
            difficulty_level: state.difficulty_level(),
            near_misses: state.near_misses,
            road_scroll: state.road_scroll,
        }
    }
}
