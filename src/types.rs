use std::fmt;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: u8 = 8;

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Dark,
    Light,
}

impl Color {
    pub fn other(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Self::Dark => 'X',
            Self::Light => 'O',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Stone(Color),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }

    /// 0=empty, 1=dark, 2=light.
    pub fn code(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Stone(Color::Dark) => 1,
            Self::Stone(Color::Light) => 2,
        }
    }
}

/// A board coordinate, 1-indexed on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// True iff both axes lie in `1..=8`.
    pub fn is_legal(self) -> bool {
        (1..=BOARD_SIZE).contains(&self.row) && (1..=BOARD_SIZE).contains(&self.col)
    }

    /// Zero-based `(row, col)` for grid access.
    pub(crate) fn index(self) -> (usize, usize) {
        (self.row as usize - 1, self.col as usize - 1)
    }

    /// Steps one cell along `(dr, dc)`, or `None` when that leaves the board.
    pub(crate) fn step(self, (dr, dc): (i8, i8)) -> Option<Self> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        let next = Self::new(u8::try_from(row).ok()?, u8::try_from(col).ok()?);
        next.is_legal().then_some(next)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Winner {
    Dark,
    Light,
    Tie,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub board: Vec<u8>,
    pub human: Color,
    pub current_player: Color,
    pub dark_count: u8,
    pub light_count: u8,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the previous action was a pass.
    /// - `false` when the previous action was a normal move.
    pub is_pass: bool,
    /// Most recent AI move, if the AI has moved.
    pub last_ai_move: Option<Coord>,
    /// Nodes visited by the most recent AI search.
    pub last_ai_nodes: u64,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: Winner,
    pub dark_count: u8,
    pub light_count: u8,
}

/// Reads a move typed as free text: the first two digits become
/// `(row, col)`, anything else is ignored.
pub fn parse_coord(input: &str) -> Result<Coord, String> {
    let mut digits = input
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| d as u8);

    let (Some(row), Some(col)) = (digits.next(), digits.next()) else {
        return Err(format!("expected two digits (row,col), got {input:?}"));
    };

    let coord = Coord::new(row, col);
    if !coord.is_legal() {
        return Err(format!("move {coord} is out of bounds"));
    }
    Ok(coord)
}

/// `"y"` in any case means the human moves first.
pub fn parse_turn_order(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("y")
}
