//! Data-driven game balance
//!
//! One immutable `GameConfig` is loaded at startup, validated, and then
//! shared by reference with every simulation step.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Player car variants, chosen before a run and fixed for its duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CarKind {
    /// Green Saber: highest top speed
    #[default]
    Racer,
    /// Pink Spark: middle of the road
    Hatchback,
    /// Public Taxi: slow and steady
    Taxi,
}

impl CarKind {
    pub const ALL: [CarKind; 3] = [CarKind::Racer, CarKind::Hatchback, CarKind::Taxi];

    pub fn as_str(&self) -> &'static str {
        match self {
            CarKind::Racer => "racer",
            CarKind::Hatchback => "hatchback",
            CarKind::Taxi => "taxi",
        }
    }

    /// Accepts the variant name or the paint colour it ships in
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "racer" | "green" => Some(CarKind::Racer),
            "hatchback" | "pink" => Some(CarKind::Hatchback),
            "taxi" | "yellow" => Some(CarKind::Taxi),
            _ => None,
        }
    }
}

/// Handling figures for one car variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarSpec {
    /// Display name
    pub name: String,
    /// Top speed (px/s)
    pub max_speed: f32,
    /// Throttle acceleration (px/s²)
    pub acceleration: f32,
    /// Speedometer reading at top speed (km/h)
    pub display_kmh: f32,
}

impl CarSpec {
    fn new(name: &str, max_speed_per_frame: f32, accel_per_frame: f32, display_kmh: f32) -> Self {
        Self {
            name: name.to_string(),
            max_speed: max_speed_per_frame * REFERENCE_FPS,
            acceleration: accel_per_frame * REFERENCE_FPS * REFERENCE_FPS,
            display_kmh,
        }
    }
}

/// The three variants' specs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarSpecs {
    pub racer: CarSpec,
    pub hatchback: CarSpec,
    pub taxi: CarSpec,
}

impl Default for CarSpecs {
    fn default() -> Self {
        Self {
            racer: CarSpec::new("Green Saber", 12.0, 0.3, 300.0),
            hatchback: CarSpec::new("Pink Spark", 8.8, 0.25, 220.0),
            taxi: CarSpec::new("Public Taxi", 6.0, 0.2, 150.0),
        }
    }
}

/// Complete tuning set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Geometry ===
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub road_left: f32,
    pub road_right: f32,
    pub lane_count: usize,

    // === Player ===
    pub player_half_width: f32,
    pub player_half_height: f32,
    /// Fixed centre y of the player car
    pub player_y: f32,
    /// Speed decay with no throttle (px/s²)
    pub friction: f32,
    /// Brake deceleration (px/s²)
    pub deceleration: f32,
    /// Lateral speed while steering (px/s)
    pub steer_speed: f32,
    pub cars: CarSpecs,

    // === Enemies ===
    pub enemy_half_width: f32,
    pub enemy_half_height: f32,
    pub enemy_base_speed: f32,
    pub enemy_speed_jitter: f32,
    /// Seconds between spawns at level 1
    pub spawn_interval: f32,
    /// Spawn interval never drops below this
    pub spawn_interval_min: f32,
    pub spawn_shrink_per_level: f32,
    pub wobble_amplitude: f32,
    pub wobble_frequency: f32,

    // === Difficulty ===
    pub difficulty_interval: f32,
    pub difficulty_speed_inc: f32,

    // === Collision ===
    pub collision_shrink: f32,
    pub near_miss_margin: f32,

    // === Scoring ===
    pub points_per_second: f32,
    pub near_miss_bonus: u64,
    /// Points between milestone events (0 disables them)
    pub score_milestone: u64,

    // === Road animation ===
    pub stripe_height: f32,
    pub stripe_gap: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            road_left: ROAD_LEFT,
            road_right: ROAD_RIGHT,
            lane_count: LANE_COUNT,

            player_half_width: PLAYER_HALF_WIDTH,
            player_half_height: PLAYER_HALF_HEIGHT,
            player_y: PLAYER_Y,
            friction: FRICTION,
            deceleration: DECELERATION,
            steer_speed: STEER_SPEED,
            cars: CarSpecs::default(),

            enemy_half_width: ENEMY_HALF_WIDTH,
            enemy_half_height: ENEMY_HALF_HEIGHT,
            enemy_base_speed: ENEMY_BASE_SPEED,
            enemy_speed_jitter: ENEMY_SPEED_JITTER,
            spawn_interval: ENEMY_SPAWN_INTERVAL,
            spawn_interval_min: ENEMY_SPAWN_INTERVAL_MIN,
            spawn_shrink_per_level: ENEMY_SPAWN_SHRINK_PER_LEVEL,
            wobble_amplitude: WOBBLE_AMPLITUDE,
            wobble_frequency: WOBBLE_FREQUENCY,

            difficulty_interval: DIFFICULTY_INTERVAL,
            difficulty_speed_inc: DIFFICULTY_SPEED_INC,

            collision_shrink: COLLISION_SHRINK,
            near_miss_margin: NEAR_MISS_MARGIN,

            points_per_second: POINTS_PER_SECOND,
            near_miss_bonus: NEAR_MISS_BONUS,
            score_milestone: SCORE_MILESTONE,

            stripe_height: STRIPE_HEIGHT,
            stripe_gap: STRIPE_GAP,
        }
    }
}

impl GameConfig {
    /// Parse a tuning document on top of the defaults, then validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Stats for a car variant
    pub fn car(&self, kind: CarKind) -> &CarSpec {
        match kind {
            CarKind::Racer => &self.cars.racer,
            CarKind::Hatchback => &self.cars.hatchback,
            CarKind::Taxi => &self.cars.taxi,
        }
    }

    #[inline]
    pub fn lane_width(&self) -> f32 {
        (self.road_right - self.road_left) / self.lane_count as f32
    }

    /// Centre x of lane `index` (0 = leftmost)
    #[inline]
    pub fn lane_center(&self, index: usize) -> f32 {
        self.road_left + self.lane_width() * (index as f32 + 0.5)
    }

    pub fn lane_centers(&self) -> Vec<f32> {
        (0..self.lane_count).map(|i| self.lane_center(i)).collect()
    }

    /// Player spawns in the middle of the road
    pub fn player_start_x(&self) -> f32 {
        (self.road_left + self.road_right) / 2.0
    }

    /// Allowed range of the player's centre x
    pub fn player_x_bounds(&self) -> (f32, f32) {
        (
            self.road_left + self.player_half_width,
            self.road_right - self.player_half_width,
        )
    }

    /// Length of one stripe + gap cycle of the road markings
    pub fn stripe_period(&self) -> f32 {
        self.stripe_height + self.stripe_gap
    }

    /// Check every value is within sane bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return Err(ConfigError::Canvas {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if !(self.road_left >= 0.0
            && self.road_left < self.road_right
            && self.road_right <= self.canvas_width)
        {
            return Err(ConfigError::Road {
                left: self.road_left,
                right: self.road_right,
            });
        }
        if self.lane_count == 0 {
            return Err(ConfigError::NoLanes);
        }

        let non_negative = [
            ("player_half_width", self.player_half_width),
            ("player_half_height", self.player_half_height),
            ("friction", self.friction),
            ("deceleration", self.deceleration),
            ("steer_speed", self.steer_speed),
            ("enemy_half_width", self.enemy_half_width),
            ("enemy_half_height", self.enemy_half_height),
            ("enemy_base_speed", self.enemy_base_speed),
            ("enemy_speed_jitter", self.enemy_speed_jitter),
            ("spawn_shrink_per_level", self.spawn_shrink_per_level),
            ("wobble_amplitude", self.wobble_amplitude),
            ("wobble_frequency", self.wobble_frequency),
            ("difficulty_speed_inc", self.difficulty_speed_inc),
            ("collision_shrink", self.collision_shrink),
            ("near_miss_margin", self.near_miss_margin),
            ("points_per_second", self.points_per_second),
            ("stripe_height", self.stripe_height),
            ("stripe_gap", self.stripe_gap),
        ];
        for (field, value) in non_negative {
            // NaN fails this comparison too
            if !(value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if !(self.spawn_interval_min > 0.0 && self.spawn_interval_min <= self.spawn_interval) {
            return Err(ConfigError::SpawnInterval {
                initial: self.spawn_interval,
                min: self.spawn_interval_min,
            });
        }
        if !(self.difficulty_interval > 0.0) {
            return Err(ConfigError::DifficultyInterval(self.difficulty_interval));
        }

        let smallest_half_extent = self
            .player_half_width
            .min(self.player_half_height)
            .min(self.enemy_half_width)
            .min(self.enemy_half_height);
        if self.collision_shrink >= smallest_half_extent {
            return Err(ConfigError::CollisionShrink {
                shrink: self.collision_shrink,
                smallest_half_extent,
            });
        }

        let lane_slack = self.lane_width() / 2.0 - self.enemy_half_width;
        if self.wobble_amplitude > lane_slack {
            return Err(ConfigError::Wobble {
                amplitude: self.wobble_amplitude,
                lane_slack,
            });
        }

        for kind in CarKind::ALL {
            let car = self.car(kind);
            if !(car.max_speed > 0.0 && car.acceleration >= 0.0) {
                return Err(ConfigError::CarSpec {
                    name: car.name.clone(),
                });
            }
        }

        Ok(())
    }
}
