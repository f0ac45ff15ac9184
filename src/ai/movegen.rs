use once_cell::sync::Lazy;

use crate::board::Board;
use crate::types::{BOARD_SIZE, Color, Coord};

/// All 64 coordinates, row 1..8 then column 1..8.
pub static ROW_MAJOR: Lazy<Vec<Coord>> = Lazy::new(|| {
    (1..=BOARD_SIZE)
        .flat_map(|row| (1..=BOARD_SIZE).map(move |col| Coord::new(row, col)))
        .collect()
});

/// Lazily yields `(coord, child)` for every legal move of `color`, in
/// row-major order. Each child is a fresh clone with the move applied and
/// its score recomputed; the parent board is never touched.
pub struct Successors<'a> {
    board: &'a Board,
    color: Color,
    next: usize,
}

impl Iterator for Successors<'_> {
    type Item = (Coord, Board);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&coord) = ROW_MAJOR.get(self.next) {
            self.next += 1;
            let mut child = self.board.clone();
            if child.attempt_move(coord, self.color) {
                child.recompute_score();
                return Some((coord, child));
            }
        }
        None
    }
}

pub fn successors(board: &Board, color: Color) -> Successors<'_> {
    Successors {
        board,
        color,
        next: 0,
    }
}

/// Returns legal moves for `color` in row-major order.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Coord> {
    successors(board, color).map(|(coord, _)| coord).collect()
}

pub fn has_legal_move(board: &Board, color: Color) -> bool {
    successors(board, color).next().is_some()
}
