//! WebAssembly bindings for the hexstack engine.
//!
//! This module exposes the game engine to JavaScript through wasm-bindgen.
//! Every structured value crosses the boundary as a JSON string.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::actions::GameAction;
#[cfg(feature = "wasm")]
use crate::board::PlacementOutcome;
#[cfg(feature = "wasm")]
use crate::cards::CardCatalog;
#[cfg(feature = "wasm")]
use crate::config::GameConfig;
#[cfg(feature = "wasm")]
use crate::game::GameState;
#[cfg(feature = "wasm")]
use crate::hex::HexCoord;
#[cfg(feature = "wasm")]
use crate::tile::TileType;

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmGame {
    state: GameState,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmGame {
    /// Create a game from configuration and card catalog JSON.
    /// An empty string selects the standard configuration or catalog.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, catalog_json: &str) -> Result<WasmGame, JsValue> {
        let config = if config_json.trim().is_empty() {
            GameConfig::default()
        } else {
            GameConfig::from_json(config_json)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };

        let catalog = if catalog_json.trim().is_empty() {
            CardCatalog::standard()
        } else {
            CardCatalog::from_json(catalog_json)
                .map_err(|e| JsValue::from_str(&format!("Invalid card catalog: {}", e)))?
        };

        let state = GameState::new(config, catalog)
            .map_err(|e| JsValue::from_str(&format!("Cannot create game: {}", e)))?;
        Ok(WasmGame { state })
    }

    /// Get the whole game as JSON (for rendering)
    #[wasm_bindgen(js_name = getSnapshot)]
    pub fn get_snapshot(&self) -> String {
        serde_json::to_string(&self.state.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Get the current phase as a string
    #[wasm_bindgen(js_name = getPhase)]
    pub fn get_phase(&self) -> String {
        serde_json::to_string(&self.state.phase()).unwrap_or_else(|_| "\"Unknown\"".to_string())
    }

    /// Get the board as JSON
    #[wasm_bindgen(js_name = getBoard)]
    pub fn get_board(&self) -> String {
        let board_json = self.state.board().to_json_friendly();
        serde_json::to_string(&board_json).unwrap_or_else(|_| "{}".to_string())
    }

    /// Get the market slots as a JSON array of arrays
    #[wasm_bindgen(js_name = getMarket)]
    pub fn get_market(&self) -> String {
        let slots: Vec<&[TileType]> = self.state.market().slots().iter().map(|s| s.tiles()).collect();
        serde_json::to_string(&slots).unwrap_or_else(|_| "[]".to_string())
    }

    /// Get the score sheet as JSON
    #[wasm_bindgen(js_name = getScores)]
    pub fn get_scores(&self) -> String {
        serde_json::to_string(&self.state.score_sheet()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Get valid actions as JSON array
    #[wasm_bindgen(js_name = getValidActions)]
    pub fn get_valid_actions(&self) -> String {
        serde_json::to_string(&self.state.valid_actions()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Check a placement without applying it
    #[wasm_bindgen(js_name = canPlaceTile)]
    pub fn can_place_tile(&self, q: i32, r: i32, tile_json: &str) -> Result<String, JsValue> {
        let tile: TileType = serde_json::from_str(tile_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid tile JSON: {}", e)))?;
        let outcome = match HexCoord::try_new(q, r) {
            Some(coord) => self.state.can_place_tile(coord, tile),
            None => PlacementOutcome::InvalidCoordinate,
        };
        Ok(serde_json::to_string(&outcome).unwrap_or_else(|_| "\"InvalidType\"".to_string()))
    }

    /// Apply an action from JSON, returns events JSON or error
    #[wasm_bindgen(js_name = applyAction)]
    pub fn apply_action(&mut self, action_json: &str) -> Result<String, JsValue> {
        let action: GameAction = serde_json::from_str(action_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid action JSON: {}", e)))?;

        match self.state.apply_action(action) {
            Ok(events) => Ok(serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())),
            Err(e) => Err(JsValue::from_str(&format!("Action failed: {}", e))),
        }
    }

    /// Total points so far
    #[wasm_bindgen(js_name = getTotalScore)]
    pub fn get_total_score(&self) -> u32 {
        self.state.score_sheet().total()
    }
}
