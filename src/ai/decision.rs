use crate::ai::movegen::successors;
use crate::ai::search::{MAX_SCORE, MIN_SCORE, SearchConfig, Searcher};
use crate::board::Board;
use crate::types::{Color, Coord};

/// Result of one AI turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Moved { coord: Coord, score: i32 },
    /// The acting colour had nothing to play; the board is unchanged.
    NoLegalMove,
}

impl Decision {
    pub fn coord(&self) -> Option<Coord> {
        match self {
            Self::Moved { coord, .. } => Some(*coord),
            Self::NoLegalMove => None,
        }
    }
}

/// Picks and plays a move for `color` with a default-configured searcher.
pub fn choose_move(board: &mut Board, color: Color, depth: u8) -> Decision {
    Searcher::new(SearchConfig::with_depth(depth)).choose_move(board, color)
}

impl Searcher {
    /// Scores every legal move of `color` and commits the best one to
    /// `board`. Each candidate is followed by a maximizing search for the
    /// same colour at `depth - 1`; the first move in row-major order wins
    /// ties.
    pub fn choose_move(&mut self, board: &mut Board, color: Color) -> Decision {
        self.begin();
        let depth = self.config().depth.saturating_sub(1);
        let mut best: Option<(Coord, i32)> = None;

        for (coord, child) in successors(board, color) {
            let score = self.minimax(&child, color, depth, true, MIN_SCORE, MAX_SCORE);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((coord, score));
            }
        }

        let decision = match best {
            Some((coord, score)) => {
                let applied = board.attempt_move(coord, color);
                debug_assert!(applied, "chosen move {coord} must be legal");
                board.recompute_score();
                Decision::Moved { coord, score }
            }
            None => Decision::NoLegalMove,
        };

        self.finish();
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn two_equal_moves() -> Board {
        Board::from_rows([
            "...OX...",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "...OX...",
        ])
    }

    #[test]
    fn depth_one_from_opening_takes_first_single_flip() {
        let mut board = Board::new();

        let decision = choose_move(&mut board, Color::Dark, 1);

        assert_eq!(
            decision,
            Decision::Moved {
                coord: Coord::new(3, 5),
                score: 3
            }
        );
        assert_eq!(board.scores(), (4, 1));
        assert_eq!(board.cell(Coord::new(4, 5)), Cell::Stone(Color::Dark));
    }

    #[test]
    fn ties_go_to_first_row_major_move() {
        for depth in 1..=3 {
            let mut board = two_equal_moves();

            let decision = choose_move(&mut board, Color::Dark, depth);

            assert_eq!(decision.coord(), Some(Coord::new(1, 3)), "depth {depth}");
            assert_eq!(board.cell(Coord::new(1, 4)), Cell::Stone(Color::Dark));
            assert_eq!(board.cell(Coord::new(8, 4)), Cell::Stone(Color::Light));
        }
    }

    #[test]
    fn same_input_gives_same_move() {
        let mut start = Board::new();
        choose_move(&mut start, Color::Dark, 2);
        choose_move(&mut start, Color::Light, 2);

        let mut a = start.clone();
        let mut b = start.clone();

        let first = choose_move(&mut a, Color::Dark, 4);
        let second = choose_move(&mut b, Color::Dark, 4);

        assert_eq!(first, second);
        assert_eq!(a, b);
    }

    #[test]
    fn no_legal_move_leaves_board_alone() {
        let mut board = Board::from_rows([
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXO",
            "XXXXXXX.",
        ]);
        let before = board.clone();

        let decision = choose_move(&mut board, Color::Light, 3);

        assert_eq!(decision, Decision::NoLegalMove);
        assert_eq!(decision.coord(), None);
        assert_eq!(board, before);
    }

    #[test]
    fn chosen_move_is_recorded_in_stats() {
        let mut searcher = Searcher::new(SearchConfig::with_depth(3));
        let mut board = Board::new();

        let decision = searcher.choose_move(&mut board, Color::Dark);

        assert!(decision.coord().is_some());
        assert!(searcher.stats().nodes >= 4);
        let (dark, light) = board.scores();
        assert_eq!(dark as u32 + light as u32 + board.empty_count() as u32, 64);
    }

    #[test]
    fn greedy_capture_is_preferred_at_depth_one() {
        let mut board = Board::from_rows([
            "........",
            ".O......",
            "..O.....",
            "...X....",
            "........",
            "........",
            "XOOO....",
            "........",
        ]);

        let decision = choose_move(&mut board, Color::Dark, 1);

        assert_eq!(decision.coord(), Some(Coord::new(7, 5)));
        assert_eq!(board.scores(), (6, 2));
    }
}
