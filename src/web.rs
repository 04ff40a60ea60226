//! Browser entry points
//!
//! The page owns the canvas, the keyboard and `requestAnimationFrame`; it
//! calls `frame` once per animation frame and draws from `snapshot_json`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::audio::AudioManager;
use crate::game::Game;
use crate::persistence::LocalStorageStore;
use crate::sim::{TickInput, autopilot_input};
use crate::tuning::{CarKind, GameConfig};

/// Longest step a single frame may take (s); covers tab switches
const MAX_FRAME_DT: f32 = 0.1;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Turbo Rush starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    audio: Rc<RefCell<AudioManager>>,
    autopilot: bool,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebGame, JsValue> {
        let mut game = Game::new(GameConfig::default(), Box::new(LocalStorageStore::default()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let audio = Rc::new(RefCell::new(AudioManager::new()));
        game.add_observer(Box::new(Rc::clone(&audio)));
        Ok(WebGame {
            game,
            audio,
            autopilot: false,
        })
    }

    /// Choose a car by name; only honoured on the start screen
    pub fn select_car(&mut self, name: &str) -> bool {
        let Some(car) = CarKind::parse(name) else {
            log::warn!("Unknown car '{}'", name);
            return false;
        };
        match self.game.select_car(car) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("{}", e);
                false
            }
        }
    }

    pub fn start(&mut self) -> bool {
        self.game.start().is_ok()
    }

    pub fn restart(&mut self) -> bool {
        self.game.restart().is_ok()
    }

    /// Call from a user gesture; browsers keep audio suspended until then
    pub fn resume_audio(&self) {
        self.audio.borrow().resume();
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.audio.borrow_mut().set_muted(muted);
    }

    /// 0.0 - 1.0, scales effects and the engine hum
    pub fn set_master_volume(&mut self, volume: f32) {
        self.audio.borrow_mut().set_master_volume(volume);
    }

    /// 0.0 - 1.0, effects only
    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.audio.borrow_mut().set_sfx_volume(volume);
    }

    /// Let the demo driver take the wheel
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    /// Advance one animation frame. `steer` is -1, 0 or 1.
    pub fn frame(&mut self, throttle: bool, brake: bool, steer: i32, dt_ms: f64) {
        let dt = if dt_ms.is_finite() && dt_ms > 0.0 {
            ((dt_ms / 1000.0) as f32).min(MAX_FRAME_DT)
        } else {
            0.0
        };
        let input = if self.autopilot {
            autopilot_input(self.game.state())
        } else {
            TickInput {
                throttle,
                brake,
                steer: steer.signum() as i8,
            }
        };
        self.game.frame(&input, dt);
    }

    /// Latest snapshot as JSON for the page's renderer
    pub fn snapshot_json(&self) -> String {
        match serde_json::to_string(self.game.snapshot()) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Snapshot serialization failed: {}", e);
                String::from("{}")
            }
        }
    }

    pub fn high_score(&self) -> f64 {
        self.game.high_score() as f64
    }
}
