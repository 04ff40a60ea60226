//! Player vehicle kinematics
//!
//! Arcade handling: throttle accelerates toward the car's top speed, letting
//! go lets friction bleed speed off, braking bleeds it faster. Steering is
//! discrete: a held direction moves the car sideways at a fixed rate and
//! releasing it stops lateral motion immediately.

use super::state::Player;
use super::tick::TickInput;
use crate::tuning::GameConfig;

/// Advance the player by one tick. Pure: same inputs, same result.
pub fn step_player(player: Player, input: &TickInput, config: &GameConfig, dt: f32) -> Player {
    let car = config.car(player.car);

    let speed = if input.brake {
        player.speed - config.deceleration * dt
    } else if input.throttle {
        player.speed + car.acceleration * dt
    } else {
        player.speed - config.friction * dt
    };

    let steer = input.steer.signum();
    let (min_x, max_x) = config.player_x_bounds();
    let x = player.pos.x + f32::from(steer) * config.steer_speed * dt;

    let mut next = player;
    next.speed = speed.clamp(0.0, car.max_speed);
    next.pos.x = x.clamp(min_x, max_x);
    next.lateral_shift = next.pos.x - player.pos.x;
    next.steer = steer;
    next
}
