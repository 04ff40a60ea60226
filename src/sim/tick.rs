//! Frame-driven simulation tick
//!
//! One call per rendered frame with the elapsed time. Stage order is fixed:
//! 1. player kinematics
//! 2. advance and retire enemies
//! 3. spawn countdown
//! 4. collision and near-miss tests swept over this tick's movement
//! 5. survival time, difficulty and score
//!
//! Publishing to presentation collaborators is the host's step 6.

use serde::{Deserialize, Serialize};

use super::collision::{find_collision, find_near_misses};
use super::kinematics::step_player;
use super::spawner::{advance_enemies, retire_enemies, spawn_enemy};
use super::state::{GameEvent, GamePhase, GameState};

/// Cap on milestone events raised by one tick
const MAX_MILESTONES_PER_TICK: u64 = 8;

/// Input sample for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Accelerate
    pub throttle: bool,
    /// Brake (wins over throttle)
    pub brake: bool,
    /// Steering direction: negative left, positive right, 0 straight
    pub steer: i8,
}

/// Advance the session by `dt` seconds.
///
/// Does nothing outside `Playing`, which also freezes the counters after a
/// collision. Non-finite or negative `dt` counts as zero.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

    // 1. Player
    state.player = step_player(state.player, input, state.config(), dt);
    let period = state.config().stripe_period();
    if period > 0.0 {
        state.road_scroll = (state.road_scroll + state.player.speed * dt) % period;
    }

    // 2. Enemies
    let config = state.config_handle();
    advance_enemies(&mut state.enemies, &config, dt);
    let mut escaped = retire_enemies(&mut state.enemies, &config);
    if !escaped.is_empty() {
        log::trace!("Retired {} enemies, {} live", escaped.len(), state.enemies.len());
    }

    // 3. Spawn
    let level = state.difficulty_level();
    if state.spawner.update(dt, level, &config) {
        let id = state.next_entity_id();
        let enemy = spawn_enemy(id, level, &config, state.rng_mut());
        log::trace!("Spawned enemy {} in lane {} at {:.0} px/s", id, enemy.lane, enemy.speed);
        state.enemies.push(enemy);
    }

    // 4. Collision ends the run before anything else accrues. Enemies that
    // left the screen this tick are swept too.
    let hit = [
        find_collision(&state.player, &escaped, &config, dt),
        find_collision(&state.player, &state.enemies, &config, dt),
    ]
    .into_iter()
    .flatten()
    .min();
    if let Some(enemy_id) = hit {
        state.enemies.retain(|e| e.id != enemy_id);
        state.push_event(GameEvent::Collision { enemy_id });
        state.end_run();
        return;
    }
    let mut grazed = find_near_misses(&state.player, &mut escaped, &config, dt);
    grazed.extend(find_near_misses(&state.player, &mut state.enemies, &config, dt));
    for enemy_id in grazed {
        state.near_misses += 1;
        state.push_event(GameEvent::NearMiss { enemy_id });
        log::debug!("Near miss with enemy {}", enemy_id);
    }

    // 5. Clock, difficulty, score
    state.survival_time += f64::from(dt);
    let new_level = state.difficulty_level();
    if new_level > level {
        log::info!("Difficulty up: level {}", new_level);
        state.push_event(GameEvent::DifficultyUp { level: new_level });
    }

    let old_score = state.score;
    let new_score = state.compute_score().max(old_score);
    state.score = new_score;
    let step = config.score_milestone;
    if step > 0 {
        // Only the most recent multiples when a huge frame crosses many
        let last = new_score / step;
        let first = (old_score / step + 1).max(last.saturating_sub(MAX_MILESTONES_PER_TICK - 1));
        for multiple in first..=last {
            state.push_event(GameEvent::ScoreMilestone {
                score: multiple * step,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::GameConfig;

    const DT: f32 = 1.0 / 60.0;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::with_seed(GameConfig::default(), seed).expect("valid tuning");
        state.start().expect("start");
        state.drain_events();
        state
    }

    #[test]
    fn test_no_tick_outside_playing() {
        let mut state = GameState::with_seed(GameConfig::default(), 1).expect("valid tuning");
        let input = TickInput {
            throttle: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.player.speed, 0.0);
        assert_eq!(state.survival_time, 0.0);
    }

    #[test]
    fn test_survival_and_score_accrue() {
        let mut state = playing(1);
        for _ in 0..40 {
            tick(&mut state, &TickInput::default(), 0.05);
        }
        assert!((state.survival_time - 2.0).abs() < 1e-4);
        // An enemy spawned but cannot reach the player in 2 s
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.enemies.is_empty());
        assert!(state.score >= 19);
    }

    #[test]
    fn test_bad_dt_is_ignored() {
        let mut state = playing(1);
        tick(&mut state, &TickInput::default(), f32::NAN);
        tick(&mut state, &TickInput::default(), -1.0);
        tick(&mut state, &TickInput::default(), f32::INFINITY);
        assert_eq!(state.survival_time, 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_milestones_fire_once_per_multiple() {
        let mut state = playing(1);
        // 25 s at 10 points/s, in one frame: milestones 100 and 200
        state.enemies.clear();
        tick(&mut state, &TickInput::default(), 25.0);
        let events = state.drain_events();
        let milestones: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::ScoreMilestone { score } => Some(*score),
                _ => None,
            })
            .collect();
        assert_eq!(milestones, vec![100, 200]);
        assert!(events.contains(&GameEvent::DifficultyUp { level: 2 }));
    }

    #[test]
    fn test_road_scroll_wraps() {
        let mut state = playing(1);
        let input = TickInput {
            throttle: true,
            ..Default::default()
        };
        for _ in 0..120 {
            tick(&mut state, &input, DT);
            assert!(state.road_scroll >= 0.0 && state.road_scroll < 80.0);
        }
    }

    #[test]
    fn test_huge_frame_saturates() {
        let mut state = playing(1);
        tick(&mut state, &TickInput::default(), 1.0e11);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.difficulty_level(), u32::MAX);
        assert!(state.score >= 999_000_000_000);
        let milestones = state
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::ScoreMilestone { .. }))
            .count();
        assert_eq!(milestones, MAX_MILESTONES_PER_TICK as usize);
        assert_eq!(
            state.events().last(),
            Some(&GameEvent::ScoreMilestone {
                score: state.score / 100 * 100
            })
        );
    }
}
