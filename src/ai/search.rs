use serde::{Deserialize, Serialize};
use web_time::{Duration, Instant};

use crate::ai::movegen::{has_legal_move, successors};
use crate::board::Board;
use crate::types::Color;

pub const MIN_SCORE: i32 = i32::MIN;
pub const MAX_SCORE: i32 = i32::MAX;
pub const MIN_DEPTH: u8 = 1;
pub const MAX_DEPTH: u8 = 10;
const DEFAULT_DEPTH: u8 = 3;

/// What a node does when the side to act has no legal move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoMovePolicy {
    /// Return the node's starting extreme (`MIN_SCORE` when maximizing,
    /// `MAX_SCORE` when minimizing). Nothing is passed to the other side.
    #[default]
    Sentinel,
    /// Hand the turn to the other colour at the same depth; when neither
    /// side can move the node is scored as terminal.
    PassTurn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub depth: u8,
    pub pruning: bool,
    pub no_move: NoMovePolicy,
}

impl SearchConfig {
    pub fn with_depth(depth: u8) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            pruning: true,
            no_move: NoMovePolicy::Sentinel,
        }
    }
}

/// Counters for the most recent top-level call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
    pub elapsed: Duration,
}

/// Depth-bounded minimax with optional alpha-beta pruning.
///
/// `player` is fixed for the whole walk and is the side whose piece
/// differential is maximized; maximizing nodes move `player`, minimizing
/// nodes move `player.other()`. Every child is an owned clone.
pub struct Searcher {
    config: SearchConfig,
    stats: SearchStats,
    start_time: Instant,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
            start_time: Instant::now(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Full-window search from `board`.
    pub fn search(&mut self, board: &Board, player: Color, depth: u8, is_max: bool) -> i32 {
        self.begin();
        let score = self.minimax(board, player, depth, is_max, MIN_SCORE, MAX_SCORE);
        self.finish();
        score
    }

    pub(crate) fn begin(&mut self) {
        self.stats = SearchStats::default();
        self.start_time = Instant::now();
    }

    pub(crate) fn finish(&mut self) {
        self.stats.elapsed = self.start_time.elapsed();
    }

    pub(crate) fn minimax(
        &mut self,
        board: &Board,
        player: Color,
        depth: u8,
        is_max: bool,
        alpha: i32,
        beta: i32,
    ) -> i32 {
        self.stats.nodes += 1;

        if depth == 0 || board.is_game_over() {
            return board.outcome(player);
        }

        let acting = if is_max { player } else { player.other() };
        let mut best = if is_max { MIN_SCORE } else { MAX_SCORE };
        let mut alpha = alpha;
        let mut beta = beta;
        let mut moved = false;

        for (_, child) in successors(board, acting) {
            moved = true;
            let score = self.minimax(&child, player, depth - 1, !is_max, alpha, beta);

            if is_max {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }

            if self.config.pruning && beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        if !moved && self.config.no_move == NoMovePolicy::PassTurn {
            if !has_legal_move(board, acting.other()) {
                return board.outcome(player);
            }
            return self.minimax(board, player, depth, !is_max, alpha, beta);
        }

        best
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::movegen::legal_moves;

    fn unpruned(no_move: NoMovePolicy) -> Searcher {
        Searcher::new(SearchConfig {
            pruning: false,
            no_move,
            ..SearchConfig::default()
        })
    }

    fn pruned(no_move: NoMovePolicy) -> Searcher {
        Searcher::new(SearchConfig {
            pruning: true,
            no_move,
            ..SearchConfig::default()
        })
    }

    /// Positions reached by always playing the first legal move.
    fn opening_line(plies: usize) -> Vec<Board> {
        let mut board = Board::new();
        let mut color = Color::Dark;
        let mut out = vec![board.clone()];

        for _ in 0..plies {
            let Some(&mv) = legal_moves(&board, color).first() else {
                color = color.other();
                continue;
            };
            assert!(board.attempt_move(mv, color));
            board.recompute_score();
            out.push(board.clone());
            color = color.other();
        }
        out
    }

    fn light_stuck() -> Board {
        Board::from_rows([
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXO",
            "XXXXXXX.",
        ])
    }

    #[test]
    fn depth_zero_returns_piece_differential() {
        let mut searcher = Searcher::default();
        let board = Board::new();

        assert_eq!(searcher.search(&board, Color::Dark, 0, true), 0);
        assert_eq!(searcher.stats().nodes, 1);
    }

    #[test]
    fn depth_one_maximizes_over_opening_moves() {
        let mut searcher = Searcher::default();
        let board = Board::new();

        assert_eq!(searcher.search(&board, Color::Dark, 1, true), 3);
        assert_eq!(searcher.search(&board, Color::Dark, 1, false), -3);
    }

    #[test]
    fn finished_game_is_scored_without_expansion() {
        let mut searcher = Searcher::default();
        let board = Board::from_rows(["XXXXXOOO"; 8]);

        assert_eq!(searcher.search(&board, Color::Light, 5, true), -16);
        assert_eq!(searcher.stats().nodes, 1);
    }

    #[test]
    fn pruning_matches_plain_minimax() {
        for board in opening_line(12).iter().step_by(3) {
            for depth in 1..=4 {
                for player in [Color::Dark, Color::Light] {
                    for is_max in [true, false] {
                        let mut with = pruned(NoMovePolicy::Sentinel);
                        let mut without = unpruned(NoMovePolicy::Sentinel);

                        let a = with.search(board, player, depth, is_max);
                        let b = without.search(board, player, depth, is_max);

                        assert_eq!(a, b, "depth {depth}, {player:?}, is_max {is_max}");
                        assert!(with.stats().nodes <= without.stats().nodes);
                        assert_eq!(without.stats().cutoffs, 0);
                    }
                }
            }
        }
    }

    #[test]
    fn pruning_matches_plain_minimax_with_pass_turn() {
        let board = light_stuck();
        for depth in 1..=3 {
            let a = pruned(NoMovePolicy::PassTurn).search(&board, Color::Dark, depth, false);
            let b = unpruned(NoMovePolicy::PassTurn).search(&board, Color::Dark, depth, false);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn stuck_minimizing_side_returns_sentinel() {
        let mut searcher = Searcher::default();

        assert_eq!(searcher.search(&light_stuck(), Color::Dark, 2, false), MAX_SCORE);
    }

    #[test]
    fn stuck_maximizing_side_returns_sentinel() {
        let mut searcher = Searcher::default();

        assert_eq!(searcher.search(&light_stuck(), Color::Light, 2, true), MIN_SCORE);
    }

    #[test]
    fn pass_turn_lets_the_other_side_move() {
        let mut searcher = pruned(NoMovePolicy::PassTurn);

        assert_eq!(searcher.search(&light_stuck(), Color::Dark, 2, false), 64);
        assert_eq!(searcher.search(&light_stuck(), Color::Light, 2, true), -64);
    }

    #[test]
    fn pass_turn_with_no_moves_for_either_side_is_terminal() {
        let board = Board::from_rows([
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXXX",
            "XXXXXXX.",
            "XXXXXX.O",
        ]);
        let mut searcher = pruned(NoMovePolicy::PassTurn);

        assert!(legal_moves(&board, Color::Dark).is_empty());
        assert!(legal_moves(&board, Color::Light).is_empty());
        assert_eq!(searcher.search(&board, Color::Dark, 3, true), 60);
    }

    #[test]
    fn search_does_not_mutate_input() {
        let board = opening_line(6).pop().unwrap();
        let before = board.clone();

        Searcher::default().search(&board, Color::Dark, 3, true);

        assert_eq!(board, before);
    }

    #[test]
    fn repeated_search_is_deterministic() {
        let board = opening_line(8).pop().unwrap();
        let mut searcher = Searcher::default();

        let first = searcher.search(&board, Color::Light, 4, true);
        let first_nodes = searcher.stats().nodes;
        let second = searcher.search(&board, Color::Light, 4, true);

        assert_eq!(first, second);
        assert_eq!(first_nodes, searcher.stats().nodes);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: SearchConfig = serde_json::from_str(r#"{"no_move":"pass_turn"}"#).unwrap();

        assert_eq!(config.depth, 3);
        assert!(config.pruning);
        assert_eq!(config.no_move, NoMovePolicy::PassTurn);
        assert_eq!(SearchConfig::with_depth(7).depth, 7);
    }
}
