use std::fmt;

use crate::types::{BOARD_SIZE, Cell, Color, Coord, Winner};

const SIDE: usize = BOARD_SIZE as usize;
const NUM_SQUARES: usize = SIDE * SIDE;
const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Why a player-facing placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    OutOfRange(Coord),
    Occupied(Coord),
    NoFlank(Coord),
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(c) => write!(f, "move {c} is out of bounds"),
            Self::Occupied(c) => write!(f, "there is already a piece at {c}"),
            Self::NoFlank(c) => write!(f, "move {c} does not capture anything"),
        }
    }
}

impl std::error::Error for MoveRejection {}

/// Reversi board: grid, cached scores and the two side identities.
///
/// Scores are only trustworthy right after [`Board::recompute_score`];
/// placements never update them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: [[Cell; SIDE]; SIDE],
    score_dark: u8,
    score_light: u8,
    pub mover: Color,
    pub opponent: Color,
    flank_anchors: Vec<Coord>,
}

impl Board {
    /// Creates the initial board:
    /// (4,4)=dark, (4,5)=light, (5,4)=light, (5,5)=dark.
    pub fn new() -> Self {
        let mut grid = [[Cell::Empty; SIDE]; SIDE];
        grid[3][3] = Cell::Stone(Color::Dark);
        grid[3][4] = Cell::Stone(Color::Light);
        grid[4][3] = Cell::Stone(Color::Light);
        grid[4][4] = Cell::Stone(Color::Dark);

        Self {
            grid,
            score_dark: 2,
            score_light: 2,
            mover: Color::Dark,
            opponent: Color::Light,
            flank_anchors: Vec::new(),
        }
    }

    /// Builds a board from eight rows of `X` (dark), `O` (light) and `.`,
    /// with scores already recomputed.
    pub fn from_rows(rows: [&str; SIDE]) -> Self {
        let mut board = Self::new();
        for (r, line) in rows.iter().enumerate() {
            let mut cells = line.chars().filter(|c| !c.is_whitespace());
            for c in 0..SIDE {
                board.grid[r][c] = match cells.next() {
                    Some('X') => Cell::Stone(Color::Dark),
                    Some('O') => Cell::Stone(Color::Light),
                    _ => Cell::Empty,
                };
            }
        }
        board.recompute_score();
        board
    }

    /// Fixes which colour the game's first-named side plays.
    pub fn set_sides(&mut self, mover: Color) {
        self.mover = mover;
        self.opponent = mover.other();
    }

    pub fn cell(&self, coord: Coord) -> Cell {
        let (r, c) = coord.index();
        self.grid[r][c]
    }

    fn set(&mut self, coord: Coord, cell: Cell) {
        let (r, c) = coord.index();
        self.grid[r][c] = cell;
    }

    /// Strict placement used by move generation and search: `false` means
    /// "not a legal move" and leaves the board untouched.
    ///
    /// Callers must pass an in-range coordinate.
    pub fn attempt_move(&mut self, coord: Coord, color: Color) -> bool {
        debug_assert!(coord.is_legal(), "attempt_move() called with {coord:?}");
        self.place(coord, color).is_ok()
    }

    /// Player-facing placement. On success every flanked line is repainted
    /// and the origin cell is set to `color`; on failure the reason is
    /// returned so the caller can ask again.
    pub fn place(&mut self, coord: Coord, color: Color) -> Result<(), MoveRejection> {
        if !coord.is_legal() {
            return Err(MoveRejection::OutOfRange(coord));
        }
        if !self.cell(coord).is_empty() {
            return Err(MoveRejection::Occupied(coord));
        }

        self.collect_flank_anchors(coord, color);
        if self.flank_anchors.is_empty() {
            return Err(MoveRejection::NoFlank(coord));
        }

        self.capture(coord, color);
        self.set(coord, Cell::Stone(color));
        Ok(())
    }

    /// Anchors found by the most recent placement attempt.
    pub fn flank_anchors(&self) -> &[Coord] {
        &self.flank_anchors
    }

    fn collect_flank_anchors(&mut self, origin: Coord, color: Color) {
        self.flank_anchors.clear();
        let opp = Cell::Stone(color.other());

        for dir in DIRECTIONS {
            let mut next = origin.step(dir);
            let mut has_opponent = false;

            while let Some(coord) = next {
                match self.cell(coord) {
                    cell if cell == opp => {
                        has_opponent = true;
                        next = coord.step(dir);
                    }
                    Cell::Stone(_) => {
                        if has_opponent {
                            self.flank_anchors.push(coord);
                        }
                        break;
                    }
                    Cell::Empty => break,
                }
            }
        }
    }

    fn capture(&mut self, origin: Coord, color: Color) {
        let anchors = std::mem::take(&mut self.flank_anchors);
        for &anchor in &anchors {
            let dir = (
                (anchor.row as i8 - origin.row as i8).signum(),
                (anchor.col as i8 - origin.col as i8).signum(),
            );

            let mut next = origin.step(dir);
            while let Some(coord) = next {
                self.set(coord, Cell::Stone(color));
                if coord == anchor {
                    break;
                }
                next = coord.step(dir);
            }
        }
        self.flank_anchors = anchors;
    }

    /// Rescans the grid and overwrites both cached scores.
    pub fn recompute_score(&mut self) {
        let (dark, light) = self.count();
        self.score_dark = dark;
        self.score_light = light;
    }

    /// Cached `(dark, light)` scores.
    pub fn scores(&self) -> (u8, u8) {
        (self.score_dark, self.score_light)
    }

    pub fn score_of(&self, color: Color) -> u8 {
        match color {
            Color::Dark => self.score_dark,
            Color::Light => self.score_light,
        }
    }

    /// Live `(dark, light)` piece counts.
    pub fn count(&self) -> (u8, u8) {
        self.grid
            .iter()
            .flatten()
            .fold((0, 0), |(dark, light), cell| match cell {
                Cell::Stone(Color::Dark) => (dark + 1, light),
                Cell::Stone(Color::Light) => (dark, light + 1),
                Cell::Empty => (dark, light),
            })
    }

    pub fn empty_count(&self) -> u8 {
        self.grid.iter().flatten().filter(|c| c.is_empty()).count() as u8
    }

    /// Full board, or either colour's cached score is zero.
    pub fn is_game_over(&self) -> bool {
        self.empty_count() == 0 || self.score_dark == 0 || self.score_light == 0
    }

    /// Piece differential from `color`'s point of view, from a live count.
    pub fn outcome(&self, color: Color) -> i32 {
        let (dark, light) = self.count();
        let diff = dark as i32 - light as i32;
        match color {
            Color::Dark => diff,
            Color::Light => -diff,
        }
    }

    /// `None` while the game is still running.
    pub fn winner(&mut self) -> Option<Winner> {
        if !self.is_game_over() {
            return None;
        }

        self.recompute_score();
        Some(match self.score_dark.cmp(&self.score_light) {
            std::cmp::Ordering::Greater => Winner::Dark,
            std::cmp::Ordering::Less => Winner::Light,
            std::cmp::Ordering::Equal => Winner::Tie,
        })
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=dark, 2=light.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut out = [0u8; NUM_SQUARES];
        for (slot, cell) in out.iter_mut().zip(self.grid.iter().flatten()) {
            *slot = cell.code();
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "  +-+-+-+-+-+-+-+-+";
        writeln!(f, "Score {} vs {}", self.score_dark, self.score_light)?;
        writeln!(f, "   1 2 3 4 5 6 7 8")?;
        writeln!(f, "{rule}")?;
        for (r, row) in self.grid.iter().enumerate() {
            write!(f, "{} |", r + 1)?;
            for cell in row {
                let glyph = match cell {
                    Cell::Empty => '.',
                    Cell::Stone(color) => color.glyph(),
                };
                write!(f, "{glyph}|")?;
            }
            writeln!(f)?;
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}
