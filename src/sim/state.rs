//! Session state and core simulation types
//!
//! `GameState` is the single source of truth for a session: the phase
//! machine, counters, the player car and the live enemy set. Kinematics and
//! the spawner mutate only their own entities; phase and score change only
//! through the methods here and the tick.

use std::sync::Arc;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::difficulty_level;
use super::spawner::Spawner;
use crate::error::{ConfigError, PhaseError};
use crate::tuning::{CarKind, GameConfig};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Waiting for car selection and the start command
    #[default]
    Start,
    /// Active gameplay
    Playing,
    /// Run ended by a collision, counters frozen
    GameOver,
}

/// Discrete notifications raised during a tick or by a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run began
    GameStart,
    /// The player hit an enemy; raised once per run
    Collision { enemy_id: u32 },
    /// An enemy grazed past without contact
    NearMiss { enemy_id: u32 },
    /// Score crossed a multiple of the milestone step
    ScoreMilestone { score: u64 },
    /// Difficulty level went up
    DifficultyUp { level: u32 },
    /// Best score improved
    NewHighScore { score: u64 },
}

/// Number of cosmetic enemy colour palettes
pub const PALETTE_COUNT: u8 = 5;

/// The player's car
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub car: CarKind,
    /// Centre position; y never changes during a run
    pub pos: Vec2,
    /// Forward speed (px/s), within [0, car max speed]
    pub speed: f32,
    /// Last applied steering direction (-1, 0, 1)
    pub steer: i8,
    /// Sideways distance moved during the last step (px)
    pub lateral_shift: f32,
}

impl Player {
    pub fn new(car: CarKind, config: &GameConfig) -> Self {
        Self {
            car,
            pos: Vec2::new(config.player_start_x(), config.player_y),
            speed: 0.0,
            steer: 0,
            lateral_shift: 0.0,
        }
    }
}

/// An enemy car driving down its lane toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub lane: usize,
    /// Lane centre x and current y (wobble excluded)
    pub pos: Vec2,
    /// Downward speed (px/s)
    pub speed: f32,
    /// Cosmetic colour palette index
    pub palette: u8,
    /// Current lateral offset from the lane centre
    pub wobble: f32,
    /// Wobble direction (+1 or -1)
    pub wobble_dir: f32,
    /// Wobble phase offset (radians)
    pub wobble_phase: f32,
    /// Seconds since spawn, drives the wobble
    pub wobble_timer: f32,
    /// Entered the near-miss band this pass
    pub grazing: bool,
    /// Near miss already awarded for this enemy
    pub near_missed: bool,
}

impl Enemy {
    /// Centre including the cosmetic wobble offset
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.wobble, self.pos.y)
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the spawner RNG was created from
    pub seed: u64,
    rng: Pcg32,
    config: Arc<GameConfig>,
    /// Current phase
    pub phase: GamePhase,
    /// Car selected for the next or current run
    pub car: CarKind,
    pub player: Player,
    /// Live enemies, in spawn (id) order
    pub enemies: Vec<Enemy>,
    pub spawner: Spawner,
    /// Seconds survived this run
    pub survival_time: f64,
    /// Near misses this run
    pub near_misses: u32,
    /// Score, recomputed at the end of each tick
    pub score: u64,
    /// Road marking offset for the renderer
    pub road_scroll: f32,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// New session in `Start`, RNG seeded from entropy
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_seed(config, rand::random())
    }

    /// New session in `Start` with a fixed RNG seed. The tuning is
    /// validated first; the simulation relies on it being sane.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let car = CarKind::default();
        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(car, &config),
            spawner: Spawner::new(&config),
            config: Arc::new(config),
            phase: GamePhase::Start,
            car,
            enemies: Vec::new(),
            survival_time: 0.0,
            near_misses: 0,
            score: 0,
            road_scroll: 0.0,
            events: Vec::new(),
            next_id: 1,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Shared handle to the tuning, for stages that also borrow entities mutably
    pub(crate) fn config_handle(&self) -> Arc<GameConfig> {
        Arc::clone(&self.config)
    }

    pub(crate) fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Difficulty derived from survival time, never stored
    pub fn difficulty_level(&self) -> u32 {
        difficulty_level(self.survival_time, &self.config)
    }

    /// Player speed as a fraction of the selected car's top speed
    pub fn speed_ratio(&self) -> f32 {
        let max = self.config.car(self.player.car).max_speed;
        (self.player.speed / max).clamp(0.0, 1.0)
    }

    /// Speedometer reading (km/h)
    pub fn display_speed_kmh(&self) -> f32 {
        self.speed_ratio() * self.config.car(self.player.car).display_kmh
    }

    /// Score implied by the current counters
    pub fn compute_score(&self) -> u64 {
        let time_points = (self.survival_time * self.config.points_per_second as f64).floor();
        let bonus = u64::from(self.near_misses).saturating_mul(self.config.near_miss_bonus);
        (time_points as u64).saturating_add(bonus)
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take every event raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Choose the car for the next run
    pub fn select_car(&mut self, car: CarKind) -> Result<(), PhaseError> {
        self.require(GamePhase::Start, "select_car")?;
        self.car = car;
        self.player = Player::new(car, &self.config);
        log::info!("Selected car: {}", self.config.car(car).name);
        Ok(())
    }

    /// Start → Playing with every run counter reset
    pub fn start(&mut self) -> Result<(), PhaseError> {
        self.require(GamePhase::Start, "start")?;
        self.reset_run();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::GameStart);
        log::info!("Run started with {}", self.config.car(self.car).name);
        Ok(())
    }

    /// Playing → GameOver. Returns false (and changes nothing) in any other phase
    pub fn end_run(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::GameOver;
        log::info!(
            "Game over: score {} after {:.1}s (level {}, {} near misses)",
            self.score,
            self.survival_time,
            self.difficulty_level(),
            self.near_misses
        );
        true
    }

    /// GameOver → Start, fully reset
    pub fn restart(&mut self) -> Result<(), PhaseError> {
        self.require(GamePhase::GameOver, "restart")?;
        self.reset_run();
        self.phase = GamePhase::Start;
        Ok(())
    }

    fn require(&self, phase: GamePhase, command: &'static str) -> Result<(), PhaseError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(PhaseError {
                command,
                phase: self.phase,
            })
        }
    }

    fn reset_run(&mut self) {
        self.player = Player::new(self.car, &self.config);
        self.enemies.clear();
        self.spawner = Spawner::new(&self.config);
        self.survival_time = 0.0;
        self.near_misses = 0;
        self.score = 0;
        self.road_scroll = 0.0;
    }
}
