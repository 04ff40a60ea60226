//! Demo/attract mode driver
//!
//! Produces the same input sample a player would, so the simulation cannot
//! tell it apart from a human. Holds the throttle and steers for the lane
//! with the most open road ahead.

use super::state::GameState;
use super::tick::TickInput;

/// Switch lanes only when another lane is clearer by this much (px)
const LANE_SWITCH_MARGIN: f32 = 40.0;
/// Close enough to the lane centre to stop steering (px)
const CENTER_DEADBAND: f32 = 4.0;

/// Input sample for the current frame
pub fn autopilot_input(state: &GameState) -> TickInput {
    let config = state.config();
    let player = &state.player;
    let lane_width = config.lane_width();

    // Lane the player is mostly in
    let current = (((player.pos.x - config.road_left) / lane_width).floor().max(0.0) as usize)
        .min(config.lane_count - 1);

    // Distance to the closest enemy still ahead of (or alongside) the player
    let reach = config.player_half_height + config.enemy_half_height;
    let clearance = |lane: usize| {
        state
            .enemies
            .iter()
            .filter(|e| e.lane == lane && e.pos.y < player.pos.y + reach)
            .map(|e| player.pos.y - e.pos.y)
            .fold(f32::INFINITY, f32::min)
    };

    let mut target = current;
    let mut best = clearance(current);
    for lane in 0..config.lane_count {
        let open = clearance(lane);
        // Moving two lanes crosses the middle one, so it must be passable too
        let path_clear = (lane.min(current)..=lane.max(current)).all(|l| clearance(l) > reach * 1.5);
        if path_clear && open > best + LANE_SWITCH_MARGIN {
            target = lane;
            best = open;
        }
    }

    let dx = config.lane_center(target) - player.pos.x;
    let steer = if dx > CENTER_DEADBAND {
        1
    } else if dx < -CENTER_DEADBAND {
        -1
    } else {
        0
    };

    TickInput {
        throttle: true,
        brake: false,
        steer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawner::spawn_enemy;
    use crate::tuning::GameConfig;

    #[test]
    fn test_dodges_enemy_in_lane() {
        let mut state = GameState::with_seed(GameConfig::default(), 4).expect("valid tuning");
        state.start().expect("start");

        let id = state.next_entity_id();
        let mut rng = rand_pcg::Pcg32::new(1, 1);
        let mut enemy = spawn_enemy(id, 1, state.config(), &mut rng);
        enemy.lane = 1;
        enemy.pos.x = state.config().lane_center(1);
        enemy.pos.y = 300.0;
        state.enemies.push(enemy);

        let input = autopilot_input(&state);
        assert!(input.throttle);
        assert_ne!(input.steer, 0);
    }

    #[test]
    fn test_holds_lane_on_open_road() {
        let mut state = GameState::with_seed(GameConfig::default(), 4).expect("valid tuning");
        state.start().expect("start");
        let input = autopilot_input(&state);
        assert_eq!(input.steer, 0);
    }
}
