use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod game;
pub mod types;
pub mod wasm;

pub use ai::{Decision, choose_move};
pub use board::{Board, MoveRejection};
pub use types::{Cell, Color, Coord, Winner};

/// A fresh board with the four central pieces.
pub fn new_game() -> Board {
    Board::new()
}

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
