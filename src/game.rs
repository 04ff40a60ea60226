//! Session host
//!
//! Owns the session state, the high score tracker and the observers. Each
//! `frame` runs one simulation tick, folds the new score into the high score,
//! then publishes the snapshot and the frame's events to every observer
//! before returning. Commands between frames publish the same way.

use crate::error::{ConfigError, PhaseError};
use crate::highscores::HighScores;
use crate::persistence::HighScoreStore;
use crate::sim::{GameEvent, GameState, Snapshot, TickInput, tick};
use crate::tuning::{CarKind, GameConfig};

/// What observers receive once per publish
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub snapshot: &'a Snapshot,
    /// Events raised since the previous publish, in order
    pub events: &'a [GameEvent],
    /// Player speed / top speed, sampled every frame for the engine sound
    pub speed_ratio: f32,
}

/// A read-only consumer of published frames (renderer, audio, HUD)
pub trait FrameObserver {
    fn on_frame(&mut self, frame: &Frame<'_>);
}

/// A running game session
pub struct Game {
    state: GameState,
    high_scores: HighScores,
    observers: Vec<Box<dyn FrameObserver>>,
    snapshot: Snapshot,
    last_events: Vec<GameEvent>,
}

impl Game {
    /// Validate the tuning and load the stored high score
    pub fn new(config: GameConfig, store: Box<dyn HighScoreStore>) -> Result<Self, ConfigError> {
        let state = GameState::new(config)?;
        Ok(Self::from_parts(state, HighScores::load(store)))
    }

    /// Host an existing state (e.g. a seeded one in tests)
    pub fn from_parts(state: GameState, high_scores: HighScores) -> Self {
        let snapshot = Snapshot::capture(&state, high_scores.best());
        Self {
            state,
            high_scores,
            observers: Vec::new(),
            snapshot,
            last_events: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn FrameObserver>) {
        self.observers.push(observer);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Events from the latest publish
    pub fn last_events(&self) -> &[GameEvent] {
        &self.last_events
    }

    pub fn high_score(&self) -> u64 {
        self.high_scores.best()
    }

    pub fn select_car(&mut self, car: CarKind) -> Result<(), PhaseError> {
        self.state.select_car(car)?;
        self.publish();
        Ok(())
    }

    pub fn start(&mut self) -> Result<(), PhaseError> {
        self.state.start()?;
        self.publish();
        Ok(())
    }

    pub fn restart(&mut self) -> Result<(), PhaseError> {
        self.state.restart()?;
        self.publish();
        Ok(())
    }

    /// Run one frame: tick, high score, publish
    pub fn frame(&mut self, input: &TickInput, dt: f32) -> &Snapshot {
        tick(&mut self.state, input, dt);
        if self.high_scores.submit(self.state.score) {
            self.state.push_event(GameEvent::NewHighScore {
                score: self.state.score,
            });
        }
        self.publish();
        &self.snapshot
    }

    fn publish(&mut self) {
        self.last_events = self.state.drain_events();
        self.snapshot = Snapshot::capture(&self.state, self.high_scores.best());
        let frame = Frame {
            snapshot: &self.snapshot,
            events: &self.last_events,
            speed_ratio: self.state.speed_ratio(),
        };
        for observer in self.observers.iter_mut() {
            observer.on_frame(&frame);
        }
    }
}
