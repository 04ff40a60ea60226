//! Turbo Rush - native entry point
//!
//! Runs a headless session driven by the demo autopilot and logs how it went.
//! The browser build starts from `turbo_rush::web` instead.

#[cfg(not(target_arch = "wasm32"))]
use std::process::ExitCode;

#[cfg(not(target_arch = "wasm32"))]
use turbo_rush::game::{Frame, FrameObserver};
#[cfg(not(target_arch = "wasm32"))]
use turbo_rush::persistence::JsonFileStore;
#[cfg(not(target_arch = "wasm32"))]
use turbo_rush::sim::{GameEvent, GamePhase, autopilot_input};
#[cfg(not(target_arch = "wasm32"))]
use turbo_rush::{CarKind, Game, GameConfig};

/// Fixed simulation step for headless runs
#[cfg(not(target_arch = "wasm32"))]
const DT: f32 = 1.0 / 60.0;
/// Stop a run that is still going after this long (s)
#[cfg(not(target_arch = "wasm32"))]
const MAX_RUN_SECONDS: f64 = 180.0;

/// Logs gameplay events as they are published
#[cfg(not(target_arch = "wasm32"))]
struct EventLog;

#[cfg(not(target_arch = "wasm32"))]
impl FrameObserver for EventLog {
    fn on_frame(&mut self, frame: &Frame<'_>) {
        for event in frame.events {
            match event {
                GameEvent::Collision { enemy_id } => {
                    log::info!("Crashed into enemy #{}", enemy_id)
                }
                GameEvent::DifficultyUp { level } => log::info!("Difficulty level {}", level),
                GameEvent::NewHighScore { score } => log::debug!("New high score {}", score),
                other => log::debug!("{:?}", other),
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> Result<GameConfig, String> {
    match std::env::var("TURBO_RUSH_TUNING") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .map_err(|e| format!("Failed to read tuning file {}: {}", path, e))?;
            let config = GameConfig::from_json(&json)
                .map_err(|e| format!("Invalid tuning file {}: {}", path, e))?;
            log::info!("Loaded tuning from {}", path);
            Ok(config)
        }
        Err(_) => Ok(GameConfig::default()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    env_logger::init();
    log::info!("Turbo Rush (native) starting...");

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let score_path = std::env::var("TURBO_RUSH_SCORES")
        .unwrap_or_else(|_| String::from("turbo_rush_highscore.json"));
    let mut game = match Game::new(config, Box::new(JsonFileStore::new(score_path))) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Invalid tuning: {}", e);
            return ExitCode::FAILURE;
        }
    };
    game.add_observer(Box::new(EventLog));

    if let Ok(name) = std::env::var("TURBO_RUSH_CAR") {
        match CarKind::parse(&name) {
            Some(car) => {
                if let Err(e) = game.select_car(car) {
                    log::warn!("{}", e);
                }
            }
            None => log::warn!("Unknown car '{}', keeping {}", name, game.state().car.as_str()),
        }
    }

    if let Err(e) = game.start() {
        log::error!("{}", e);
        return ExitCode::FAILURE;
    }
    log::info!(
        "Driving the {} (seed {})",
        game.state().config().car(game.state().car).name,
        game.state().seed
    );

    while game.state().phase == GamePhase::Playing && game.state().survival_time < MAX_RUN_SECONDS {
        let input = autopilot_input(game.state());
        game.frame(&input, DT);
    }

    let state = game.state();
    let outcome = if state.phase == GamePhase::GameOver {
        "crashed"
    } else {
        "time limit reached"
    };
    log::info!(
        "Run over ({}): survived {:.1}s, {} near misses, score {}, best {}",
        outcome,
        state.survival_time,
        state.near_misses,
        state.score,
        game.high_score()
    );
    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is turbo_rush::web::wasm_main, this is just to satisfy the compiler
}
