//! Clot Pulse entry point
//!
//! On wasm32 this exposes a [`ClotPulse`] handle the JS host drives from its
//! animation loop. Natively it runs a headless autopilot session and prints a
//! summary, which is handy for balance checks.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use wasm_bindgen::prelude::*;

    use clot_pulse::GameConfig;
    use clot_pulse::sim::GameState;

    /// Game handle owned by the JS host
    #[wasm_bindgen]
    pub struct ClotPulse {
        state: GameState,
    }

    #[wasm_bindgen]
    impl ClotPulse {
        /// Create a game at the menu. `config_json` may override any defaults.
        #[wasm_bindgen(constructor)]
        pub fn new(config_json: Option<String>) -> ClotPulse {
            let config = config_json
                .as_deref()
                .map(GameConfig::from_json_or_default)
                .unwrap_or_default();
            let seed = js_sys::Date::now() as u64;
            log::info!("Game created with seed: {}", seed);
            ClotPulse {
                state: GameState::new(config, seed),
            }
        }

        pub fn start_session(&mut self) -> Result<(), JsValue> {
            self.state.start_session().map_err(|e| {
                log::error!("Cannot start session: {}", e);
                JsValue::from_str(&e.to_string())
            })
        }

        pub fn set_player_target(&mut self, x: f32) {
            self.state.set_player_target(x);
        }

        pub fn fire_intent(&mut self) {
            self.state.fire_intent();
        }

        pub fn show_science_modal(&mut self) {
            self.state.show_science_modal();
        }

        /// Advance one frame and return the snapshot as JSON
        pub fn advance_frame(&mut self, dt_ms: f32) -> String {
            let snapshot = self.state.advance_frame(dt_ms);
            match serde_json::to_string(&snapshot) {
                Ok(json) => json,
                Err(e) => {
                    log::warn!("Snapshot serialization failed: {:?}", e);
                    String::from("{}")
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Clot Pulse starting...");
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clot_pulse::GameConfig;
    use clot_pulse::sim::{GamePhase, GameState};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let config = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => GameConfig::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read {}: {}", path, e);
                GameConfig::default()
            }
        },
        None => GameConfig::default(),
    };

    log::info!("Clot Pulse (native) headless run, seed {}", seed);
    let mut state = GameState::new(config, seed);
    if let Err(e) = state.start_session() {
        log::error!("Cannot start session: {}", e);
        std::process::exit(1);
    }

    // Three minutes at ~60 fps
    const FRAME_MS: f32 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 3 * 60 * 60;
    let mut frames = 0;
    while state.phase == GamePhase::Playing && frames < MAX_FRAMES {
        if let Some(x) = autopilot_target(&state) {
            state.set_player_target(x);
        }
        state.advance_frame(FRAME_MS);
        frames += 1;
    }

    let snapshot = state.snapshot();
    println!(
        "{:?} after {:.1}s: score {}, max combo {}, destroyed {}, escaped {}, CRS {:.1}%",
        snapshot.phase,
        snapshot.stats.elapsed_ms / 1000.0,
        snapshot.score,
        snapshot.max_combo,
        snapshot.stats.clots_destroyed,
        snapshot.stats.clots_escaped,
        snapshot.crs.percentage
    );
}

/// Track the lowest clot; grab a falling power-up when nothing is close
#[cfg(not(target_arch = "wasm32"))]
fn autopilot_target(state: &clot_pulse::sim::GameState) -> Option<f32> {
    let lowest = state
        .clots
        .iter()
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    let threatened = lowest.is_some_and(|c| c.pos.y > state.config.height * 0.5);
    if !threatened {
        if let Some(p) = state.power_ups.first() {
            return Some(p.pos.x);
        }
    }
    lowest.map(|c| c.pos.x)
}
