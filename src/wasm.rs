use wasm_bindgen::prelude::*;

use crate::game::{GameInstance, parse_difficulty};
use crate::types::{Coord, parse_coord};

/// Browser handle around [`GameInstance`].
#[wasm_bindgen]
pub struct WasmGame {
    inner: GameInstance,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new(level: u8, human_first: bool) -> WasmGame {
        WasmGame {
            inner: GameInstance::new_with_default_selector(level, human_first),
        }
    }

    /// Plays the human move at 1-indexed `(row, col)`.
    pub fn place(&mut self, row: u8, col: u8) -> Result<JsValue, JsValue> {
        self.inner.place(Coord::new(row, col)).map_err(to_js_error)?;
        self.state()
    }

    /// Same as `place`, reading the move from typed text such as `"3,5"`.
    pub fn place_text(&mut self, input: &str) -> Result<JsValue, JsValue> {
        let coord = parse_coord(input).map_err(to_js_error)?;
        self.inner.place(coord).map_err(to_js_error)?;
        self.state()
    }

    pub fn ai_move(&mut self) -> Result<JsValue, JsValue> {
        self.inner.do_ai_move().map_err(to_js_error)?;
        self.state()
    }

    pub fn pass(&mut self) -> Result<JsValue, JsValue> {
        self.inner.pass().map_err(to_js_error)?;
        self.state()
    }

    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.get_legal_moves()).map_err(JsValue::from)
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.to_game_state()).map_err(JsValue::from)
    }

    pub fn result(&self) -> Result<JsValue, JsValue> {
        if !self.inner.is_game_over {
            return Err(to_js_error("game is not over".to_string()));
        }
        serde_wasm_bindgen::to_value(&self.inner.to_game_result()).map_err(JsValue::from)
    }

    /// Renders the board as text.
    pub fn render(&self) -> String {
        self.inner.board().to_string()
    }
}

/// Validates a typed difficulty, returning the search depth.
#[wasm_bindgen]
pub fn difficulty_from_text(input: &str) -> Result<u8, JsValue> {
    parse_difficulty(input).map_err(to_js_error)
}

fn to_js_error(message: String) -> JsValue {
    JsValue::from_str(&message)
}
