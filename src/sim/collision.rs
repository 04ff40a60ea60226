//! Collision and near-miss detection
//!
//! Both cars' boxes are shrunk by a fixed margin per side before testing, so
//! sprites that visibly graze each other do not end the run. A wider band
//! around the shrunk box catches near misses for bonus points.

use glam::Vec2;

use super::state::{Enemy, Player};
use crate::tuning::GameConfig;

/// Axis-aligned box stored as centre and half extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    /// Box with `margin` removed from every side (never inverted)
    pub fn shrink(&self, margin: f32) -> Self {
        Self::new(self.center, (self.half - Vec2::splat(margin)).max(Vec2::ZERO))
    }

    /// Box with `margin` added to every side
    pub fn grow(&self, margin: f32) -> Self {
        Self::new(self.center, self.half + Vec2::splat(margin))
    }

    /// Strict overlap: touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let delta = (self.center - other.center).abs();
        let reach = self.half + other.half;
        delta.x < reach.x && delta.y < reach.y
    }

    /// Strict overlap at any point while `self` travelled by `motion` to its
    /// current centre, `other` held still. Slab test over t in [0, 1].
    pub fn swept_overlaps(&self, other: &Aabb, motion: Vec2) -> bool {
        let reach = self.half + other.half;
        let start = self.center - motion - other.center;
        let mut t_enter = 0.0f32;
        let mut t_exit = 1.0f32;

        for axis in 0..2 {
            let (s, m, r) = (start[axis], motion[axis], reach[axis]);
            if m == 0.0 {
                if s.abs() >= r {
                    return false;
                }
                continue;
            }
            let t0 = (-r - s) / m;
            let t1 = (r - s) / m;
            t_enter = t_enter.max(t0.min(t1));
            t_exit = t_exit.min(t0.max(t1));
        }

        t_enter < t_exit
    }
}

/// Player hit box (already shrunk)
pub fn player_box(player: &Player, config: &GameConfig) -> Aabb {
    Aabb::new(
        player.pos,
        Vec2::new(config.player_half_width, config.player_half_height),
    )
    .shrink(config.collision_shrink)
}

/// Enemy hit box at its wobbled position (already shrunk)
pub fn enemy_box(enemy: &Enemy, config: &GameConfig) -> Aabb {
    Aabb::new(
        enemy.center(),
        Vec2::new(config.enemy_half_width, config.enemy_half_height),
    )
    .shrink(config.collision_shrink)
}

/// Enemy travel relative to the player over the last `dt` seconds
fn relative_motion(player: &Player, enemy: &Enemy, dt: f32) -> Vec2 {
    Vec2::new(-player.lateral_shift, enemy.speed * dt)
}

/// First enemy (in id order) that touched the player during the last `dt`
/// seconds of movement, if any. Sweeping the path means a long frame cannot
/// carry an enemy clean through the player.
pub fn find_collision(
    player: &Player,
    enemies: &[Enemy],
    config: &GameConfig,
    dt: f32,
) -> Option<u32> {
    let hit_box = player_box(player, config);
    enemies
        .iter()
        .find(|enemy| {
            enemy_box(enemy, config).swept_overlaps(&hit_box, relative_motion(player, enemy, dt))
        })
        .map(|enemy| enemy.id)
}

/// Award near misses.
///
/// An enemy becomes a candidate once its path over the last `dt` seconds
/// enters the band around the player without touching, and is awarded when
/// its centre passes the player's centre line. Each enemy is awarded at most
/// once. Returns the ids awarded this call.
pub fn find_near_misses(
    player: &Player,
    enemies: &mut [Enemy],
    config: &GameConfig,
    dt: f32,
) -> Vec<u32> {
    let hit_box = player_box(player, config);
    let band = hit_box.grow(config.near_miss_margin);
    let mut awarded = Vec::new();

    for enemy in enemies.iter_mut().filter(|e| !e.near_missed) {
        let enemy_hit = enemy_box(enemy, config);
        let motion = relative_motion(player, enemy, dt);
        if enemy_hit.swept_overlaps(&band, motion) && !enemy_hit.swept_overlaps(&hit_box, motion) {
            enemy.grazing = true;
        }
        if enemy.grazing && enemy.pos.y > player.pos.y {
            enemy.near_missed = true;
            awarded.push(enemy.id);
        }
    }

    awarded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::CarKind;

    fn enemy_at(id: u32, x: f32, y: f32) -> Enemy {
        Enemy {
            id,
            lane: 0,
            pos: Vec2::new(x, y),
            speed: 240.0,
            palette: 0,
            wobble: 0.0,
            wobble_dir: 1.0,
            wobble_phase: 0.0,
            wobble_timer: 0.0,
            grazing: false,
            near_missed: false,
        }
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(15.0, 0.0), Vec2::new(10.0, 10.0));
        let c = Aabb::new(Vec2::new(20.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c), "touching edges are not a hit");
        assert!(!a.shrink(3.0).overlaps(&b.shrink(3.0)));
        assert_eq!(a.shrink(50.0).half, Vec2::ZERO);
    }

    #[test]
    fn test_shrink_forgives_visual_overlap() {
        let config = GameConfig::default();
        let player = Player::new(CarKind::Racer, &config);

        // Sprites overlap by 10 px horizontally, hit boxes do not
        let x = player.pos.x + config.player_half_width + config.enemy_half_width - 10.0;
        let enemies = [enemy_at(1, x, player.pos.y)];
        assert_eq!(find_collision(&player, &enemies, &config, 0.0), None);

        // Dead centre is a hit
        let enemies = [enemy_at(1, x, player.pos.y), enemy_at(2, player.pos.x, player.pos.y - 20.0)];
        assert_eq!(find_collision(&player, &enemies, &config, 0.0), Some(2));
    }

    #[test]
    fn test_collision_uses_wobbled_position() {
        let config = GameConfig::default();
        let player = Player::new(CarKind::Racer, &config);

        // Just outside the shrunk reach; wobble pushes it in
        let reach = (config.player_half_width - config.collision_shrink)
            + (config.enemy_half_width - config.collision_shrink);
        let mut enemy = enemy_at(1, player.pos.x + reach + 2.0, player.pos.y);
        assert_eq!(find_collision(&player, std::slice::from_ref(&enemy), &config, 0.0), None);
        enemy.wobble = -4.0;
        assert_eq!(find_collision(&player, &[enemy], &config, 0.0), Some(1));
    }

    #[test]
    fn test_near_miss_counts_once() {
        let config = GameConfig::default();
        let player = Player::new(CarKind::Racer, &config);

        // Beside the player: inside the band, outside the hit box
        let x = player.pos.x + 40.0;
        let mut enemies = vec![enemy_at(1, x, player.pos.y - 60.0)];

        let mut total = 0;
        for _ in 0..20 {
            assert_eq!(find_collision(&player, &enemies, &config, 0.0), None);
            total += find_near_misses(&player, &mut enemies, &config, 0.0).len();
            enemies[0].pos.y += 8.0;
        }
        assert_eq!(total, 1);
        assert!(enemies[0].near_missed);
    }

    #[test]
    fn test_far_enemy_is_not_near_miss() {
        let config = GameConfig::default();
        let player = Player::new(CarKind::Racer, &config);
        let mut enemies = vec![enemy_at(1, player.pos.x + 106.0, player.pos.y - 60.0)];

        for _ in 0..30 {
            assert!(find_near_misses(&player, &mut enemies, &config, 0.0).is_empty());
            enemies[0].pos.y += 8.0;
        }
        assert!(!enemies[0].grazing);
    }

    #[test]
    fn test_swept_overlap_catches_pass_through() {
        let player = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(12.0, 28.0));
        let enemy = Aabb::new(Vec2::new(0.0, 200.0), Vec2::new(12.0, 26.0));

        // Ended far below but started far above: went straight through
        assert!(!enemy.overlaps(&player));
        assert!(enemy.swept_overlaps(&player, Vec2::new(0.0, 400.0)));
        // Started below the player: never touched
        assert!(!enemy.swept_overlaps(&player, Vec2::new(0.0, 100.0)));
        // Same lane offset as a neighbouring lane: the path misses sideways
        let beside = Aabb::new(Vec2::new(60.0, 200.0), Vec2::new(12.0, 26.0));
        assert!(!beside.swept_overlaps(&player, Vec2::new(0.0, 400.0)));
        // No motion is the plain overlap test
        assert!(!enemy.swept_overlaps(&player, Vec2::ZERO));
        let touching = Aabb::new(Vec2::new(0.0, 54.0), Vec2::new(12.0, 26.0));
        assert!(!touching.swept_overlaps(&player, Vec2::ZERO));
    }

    #[test]
    fn test_long_frame_still_collides() {
        let config = GameConfig::default();
        let player = Player::new(CarKind::Racer, &config);

        // 240 px/s for 2 s from 374: ends at 854, past the player and off screen
        let enemy = enemy_at(1, player.pos.x, 854.0);
        assert_eq!(find_collision(&player, std::slice::from_ref(&enemy), &config, 0.0), None);
        assert_eq!(find_collision(&player, &[enemy], &config, 2.0), Some(1));
    }

    #[test]
    fn test_long_frame_still_grazes() {
        let config = GameConfig::default();
        let player = Player::new(CarKind::Racer, &config);

        // Beside the player, jumped from well above to well below in one frame
        let mut enemies = vec![enemy_at(1, player.pos.x + 40.0, player.pos.y + 200.0)];
        assert_eq!(find_collision(&player, &enemies, &config, 2.0), None);
        assert_eq!(find_near_misses(&player, &mut enemies, &config, 2.0), vec![1]);
    }

    #[test]
    fn test_steering_through_enemy_collides() {
        let config = GameConfig::default();
        let mut player = Player::new(CarKind::Racer, &config);

        // Swerved 200 px in one frame, from one side of a stopped enemy to the other
        let enemy = enemy_at(1, player.pos.x, player.pos.y);
        player.pos.x += 100.0;
        player.lateral_shift = 200.0;
        assert_eq!(find_collision(&player, std::slice::from_ref(&enemy), &config, 0.0), Some(1));

        player.lateral_shift = 0.0;
        assert_eq!(find_collision(&player, &[enemy], &config, 0.0), None);
    }
}
