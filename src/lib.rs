//! Connectbook core crate.
//!
//! Profile tokens pop up on an 800×600 canvas at a steadily increasing rate.
//! Drag a link from one token to another to clear the target and score; a drag
//! that ends anywhere else costs a life. The board filling up or running out of
//! lives ends the game.
//!
//! The rules ([`game`]) and scene drawing ([`render`]) are platform-free and
//! tested natively; the `web` module is the thin wasm-bindgen glue.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod game;
mod log;
pub mod render;
pub mod rng;
mod web;

pub use config::GameConfig;
pub use error::GameError;
pub use game::{Effect, EndReason, Game, GameState, InputEvent, Point};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::start_connect_mode(GameConfig::default())?;
    Ok(())
}

/// Start with a JSON config; unspecified fields keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json).inspect_err(|err| {
        log::log_line(&format!("connectbook: rejected config: {err}"));
    })?;
    web::start_connect_mode(config)?;
    Ok(())
}

/// Also wired to the game-over summary's restart button.
#[wasm_bindgen]
pub fn restart_game() {
    web::restart_session();
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn game_snapshot() -> Option<String> {
    web::snapshot_json()
}
