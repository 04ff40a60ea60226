//! Enemy spawning, advancement and retirement

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::{enemy_base_speed, spawn_interval};
use super::state::{Enemy, PALETTE_COUNT};
use crate::tuning::GameConfig;

/// Countdown to the next spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    /// Seconds until the next enemy appears
    pub countdown: f32,
}

impl Spawner {
    /// Armed with the initial interval
    pub fn new(config: &GameConfig) -> Self {
        Self {
            countdown: config.spawn_interval,
        }
    }

    /// Advance the countdown by `dt`. Returns true when an enemy is due, and
    /// rearms with the interval for `level`. At most one spawn per call.
    pub fn update(&mut self, dt: f32, level: u32, config: &GameConfig) -> bool {
        self.countdown -= dt;
        if self.countdown > 0.0 {
            return false;
        }
        self.countdown = spawn_interval(level, config);
        true
    }
}

/// Build an enemy just above the visible area on a random lane
pub fn spawn_enemy(id: u32, level: u32, config: &GameConfig, rng: &mut Pcg32) -> Enemy {
    let lane = rng.random_range(0..config.lane_count);
    let jitter = if config.enemy_speed_jitter > 0.0 {
        rng.random_range(0.0..config.enemy_speed_jitter)
    } else {
        0.0
    };

    Enemy {
        id,
        lane,
        pos: Vec2::new(config.lane_center(lane), -config.enemy_half_height),
        speed: enemy_base_speed(level, config) + jitter,
        palette: rng.random_range(0..PALETTE_COUNT),
        wobble: 0.0,
        wobble_dir: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
        wobble_phase: rng.random_range(0.0..std::f32::consts::TAU),
        wobble_timer: 0.0,
        grazing: false,
        near_missed: false,
    }
}

/// Move every enemy down its lane and update its wobble
pub fn advance_enemies(enemies: &mut [Enemy], config: &GameConfig, dt: f32) {
    for enemy in enemies.iter_mut() {
        enemy.pos.y += enemy.speed * dt;
        enemy.wobble_timer += dt;
        let angle = enemy.wobble_phase + enemy.wobble_timer * config.wobble_frequency;
        enemy.wobble = config.wobble_amplitude * enemy.wobble_dir * angle.sin();
    }
}

/// Take out enemies that have fully left the bottom of the screen, in id
/// order. They may still have crossed the player on the way out.
pub fn retire_enemies(enemies: &mut Vec<Enemy>, config: &GameConfig) -> Vec<Enemy> {
    let limit = config.canvas_height + config.enemy_half_height;
    let (escaped, live): (Vec<Enemy>, Vec<Enemy>) =
        enemies.drain(..).partition(|e| e.pos.y > limit);
    *enemies = live;
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_countdown_fires_once_and_rearms() {
        let config = GameConfig::default();
        let mut spawner = Spawner::new(&config);

        assert!(!spawner.update(1.0, 1, &config));
        assert!(spawner.update(0.3, 1, &config));
        assert!((spawner.countdown - 1.1).abs() < 1e-6);

        // A huge frame still yields a single spawn
        assert!(spawner.update(10.0, 3, &config));
        assert!((spawner.countdown - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_spawned_enemy_on_lane_above_screen() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let centers = config.lane_centers();

        for id in 0..200 {
            let enemy = spawn_enemy(id, 2, &config, &mut rng);
            assert!(enemy.lane < config.lane_count);
            assert_eq!(enemy.pos.x, centers[enemy.lane]);
            assert!(enemy.pos.y < 0.0);
            assert!(enemy.speed >= enemy_base_speed(2, &config));
            assert!(enemy.speed < enemy_base_speed(2, &config) + config.enemy_speed_jitter);
            assert!(enemy.palette < PALETTE_COUNT);
            assert!(enemy.wobble_dir == 1.0 || enemy.wobble_dir == -1.0);
        }
    }

    #[test]
    fn test_all_lanes_used() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut seen = [false; 3];
        for id in 0..100 {
            seen[spawn_enemy(id, 1, &config, &mut rng).lane] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_wobble_stays_in_band() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut enemies: Vec<Enemy> = (0..10).map(|id| spawn_enemy(id, 1, &config, &mut rng)).collect();

        for _ in 0..600 {
            advance_enemies(&mut enemies, &config, 1.0 / 60.0);
            for enemy in &enemies {
                assert!(enemy.wobble.abs() <= config.wobble_amplitude + 1e-4);
                let lane_half = config.lane_width() / 2.0;
                assert!((enemy.center().x - enemy.pos.x).abs() + config.enemy_half_width <= lane_half);
            }
        }
    }

    #[test]
    fn test_retire_off_screen() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut enemies = vec![
            spawn_enemy(1, 1, &config, &mut rng),
            spawn_enemy(2, 1, &config, &mut rng),
        ];
        enemies[0].pos.y = config.canvas_height + config.enemy_half_height + 0.5;
        enemies[1].pos.y = config.canvas_height;

        let escaped = retire_enemies(&mut enemies, &config);
        assert_eq!(escaped.len(), 1);
        assert_eq!(escaped[0].id, 1);
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].id, 2);
    }
}
