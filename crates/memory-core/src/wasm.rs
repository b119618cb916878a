//! WebAssembly bindings for the memory game engine.
//!
//! This module exposes the game engine to JavaScript through wasm-bindgen.
//! The page owns rendering and `setTimeout`: after every call it reads
//! `needsRedraw()` and `pendingResolution()` and acts on them.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::actions::{GameEvent, ResolutionTicket};
#[cfg(feature = "wasm")]
use crate::config::GameConfig;
#[cfg(feature = "wasm")]
use crate::game::{GameError, GameState};
#[cfg(feature = "wasm")]
use crate::session::{DisplaySurface, MemoryGame};
#[cfg(feature = "wasm")]
use std::time::Duration;

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Surface state mirrored to the page between calls
#[cfg(feature = "wasm")]
#[derive(Debug, Default)]
struct BrowserSurface {
    dirty: bool,
    turns_label: String,
    pending: Option<(ResolutionTicket, Duration)>,
    won: bool,
}

#[cfg(feature = "wasm")]
impl DisplaySurface for BrowserSurface {
    fn redraw(&mut self, _game: &GameState) {
        self.dirty = true;
    }

    fn show_turns(&mut self, label: &str) {
        self.turns_label = label.to_string();
    }

    fn schedule_resolution(&mut self, ticket: ResolutionTicket, delay: Duration) {
        self.pending = Some((ticket, delay));
    }

    fn cancel_resolution(&mut self, ticket: ResolutionTicket) {
        if matches!(self.pending, Some((pending, _)) if pending == ticket) {
            self.pending = None;
        }
    }

    fn announce_win(&mut self, _turns: u32) {
        self.won = true;
    }
}

#[cfg(feature = "wasm")]
fn events_json(result: Result<Vec<GameEvent>, GameError>) -> Result<String, JsValue> {
    match result {
        Ok(events) => Ok(serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())),
        Err(e) => Err(JsValue::from_str(&format!("Action failed: {}", e))),
    }
}

/// WASM-exposed game wrapper
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmMemoryGame {
    game: MemoryGame<BrowserSurface>,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmMemoryGame {
    /// Create a new game with the given number of pairs
    #[wasm_bindgen(constructor)]
    pub fn new(pair_count: usize) -> Result<WasmMemoryGame, JsValue> {
        let config = GameConfig {
            pair_count,
            ..GameConfig::default()
        };
        let game = MemoryGame::new(&config, BrowserSurface::default())
            .map_err(|e| JsValue::from_str(&format!("Invalid game: {}", e)))?;
        Ok(WasmMemoryGame { game })
    }

    /// Click at a horizontal canvas coordinate, returns events JSON
    pub fn click(&mut self, x: f64) -> Result<String, JsValue> {
        events_json(self.game.click_at(x))
    }

    /// Select a tile by index, returns events JSON
    #[wasm_bindgen(js_name = selectTile)]
    pub fn select_tile(&mut self, index: usize) -> Result<String, JsValue> {
        events_json(self.game.select_tile(index))
    }

    /// Apply the deferred resolution scheduled under `generation`
    pub fn resolve(&mut self, generation: u64) -> Result<String, JsValue> {
        if matches!(self.game.surface().pending, Some((t, _)) if t.generation == generation) {
            self.game.surface_mut().pending = None;
        }
        events_json(self.game.resolve(ResolutionTicket::new(generation)))
    }

    /// Reshuffle and start over
    pub fn reset(&mut self) -> Result<String, JsValue> {
        self.game.surface_mut().won = false;
        events_json(self.game.reset())
    }

    /// Get the current game state as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        serde_json::to_string(self.game.state()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Get board state as JSON (for rendering)
    #[wasm_bindgen(js_name = getBoard)]
    pub fn get_board(&self) -> String {
        serde_json::to_string(self.game.state().board()).unwrap_or_else(|_| "{}".to_string())
    }

    /// The "Turns: N" label
    #[wasm_bindgen(js_name = getTurnsLabel)]
    pub fn get_turns_label(&self) -> String {
        self.game.surface().turns_label.clone()
    }

    /// Whether the board changed since the last call, clearing the flag
    #[wasm_bindgen(js_name = needsRedraw)]
    pub fn needs_redraw(&mut self) -> bool {
        std::mem::take(&mut self.game.surface_mut().dirty)
    }

    /// Generation of the resolution to schedule, if any
    #[wasm_bindgen(js_name = pendingResolution)]
    pub fn pending_resolution(&self) -> Option<u64> {
        self.game.surface().pending.map(|(t, _)| t.generation)
    }

    /// Delay before calling `resolve`, in milliseconds
    #[wasm_bindgen(js_name = getRevealDelayMs)]
    pub fn get_reveal_delay_ms(&self) -> u32 {
        u32::try_from(self.game.state().reveal_delay().as_millis()).unwrap_or(u32::MAX)
    }

    /// Check if every pair has been found
    #[wasm_bindgen(js_name = isComplete)]
    pub fn is_complete(&self) -> bool {
        self.game.surface().won && self.game.state().is_complete()
    }
}
