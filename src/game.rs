use crate::ai::movegen::{has_legal_move, legal_moves};
use crate::ai::search::{MAX_DEPTH, MIN_DEPTH};
use crate::ai::{Decision, SearchConfig, SearchStats, Searcher};
use crate::board::Board;
use crate::types::{Color, Coord, GameResult, GameState, Winner};

/// Picks and commits a move for `color`, reporting what it did.
pub trait MoveSelector: Send + Sync {
    fn decide(&mut self, board: &mut Board, color: Color, level: u8) -> Decision;

    /// Counters from the most recent `decide` call, when the selector keeps any.
    fn last_stats(&self) -> SearchStats {
        SearchStats::default()
    }
}

/// Minimax/alpha-beta selector searching `level` plies.
#[derive(Debug, Default, Clone, Copy)]
pub struct MinimaxSelector {
    base: SearchConfig,
    last: SearchStats,
}

impl MinimaxSelector {
    pub fn new(base: SearchConfig) -> Self {
        Self {
            base,
            last: SearchStats::default(),
        }
    }
}

impl MoveSelector for MinimaxSelector {
    fn decide(&mut self, board: &mut Board, color: Color, level: u8) -> Decision {
        let mut searcher = Searcher::new(SearchConfig {
            depth: level,
            ..self.base
        });
        let decision = searcher.choose_move(board, color);
        self.last = searcher.stats();
        decision
    }

    fn last_stats(&self) -> SearchStats {
        self.last
    }
}

/// One human-versus-AI game. The human always plays `board.mover`.
pub struct GameInstance {
    board: Board,
    pub current_player: Color,
    pub level: u8,
    pub is_game_over: bool,
    pub is_pass: bool,
    pub last_ai_move: Option<Coord>,
    selector: Box<dyn MoveSelector>,
}

impl GameInstance {
    /// Dark always moves first; the human is Dark iff `human_first`. When the
    /// AI opens, it plays its first move here.
    pub fn new(level: u8, human_first: bool, selector: Box<dyn MoveSelector>) -> Self {
        let human = if human_first { Color::Dark } else { Color::Light };
        let mut board = Board::new();
        board.set_sides(human);

        let mut game = Self {
            board,
            current_player: Color::Dark,
            level: clamp_difficulty(level),
            is_game_over: false,
            is_pass: false,
            last_ai_move: None,
            selector,
        };

        if !human_first {
            // The opening position always has moves for both sides.
            let _ = game.do_ai_move();
        }
        game
    }

    pub fn new_with_default_selector(level: u8, human_first: bool) -> Self {
        Self::new(level, human_first, Box::new(MinimaxSelector::default()))
    }

    pub fn human(&self) -> Color {
        self.board.mover
    }

    pub fn ai(&self) -> Color {
        self.board.opponent
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Plays the human's move. A rejected move leaves the game unchanged.
    pub fn place(&mut self, coord: Coord) -> Result<(), String> {
        if self.is_game_over {
            return Err("game is already over".to_string());
        }
        if self.current_player != self.human() {
            return Err("it is not the player's turn".to_string());
        }

        self.board
            .place(coord, self.human())
            .map_err(|e| format!("illegal move: {e}"))?;
        self.board.recompute_score();
        self.after_move();
        Ok(())
    }

    /// Lets the AI play. `Decision::NoLegalMove` is reported as a pass.
    pub fn do_ai_move(&mut self) -> Result<Decision, String> {
        if self.is_game_over {
            return Err("game is already over".to_string());
        }
        if self.current_player != self.ai() {
            return Err("it is not AI's turn".to_string());
        }

        let ai = self.ai();
        let decision = self.selector.decide(&mut self.board, ai, self.level);
        match decision {
            Decision::Moved { coord, .. } => {
                self.last_ai_move = Some(coord);
                self.after_move();
            }
            Decision::NoLegalMove => self.pass_turn(),
        }
        Ok(decision)
    }

    pub fn has_legal_moves_for_current(&self) -> bool {
        has_legal_move(&self.board, self.current_player)
    }

    /// Skips the current side's turn; only allowed when it has no move.
    pub fn pass(&mut self) -> Result<(), String> {
        if self.is_game_over {
            return Err("game is already over".to_string());
        }
        if self.has_legal_moves_for_current() {
            return Err("cannot pass while a legal move exists".to_string());
        }
        self.pass_turn();
        Ok(())
    }

    pub fn get_legal_moves(&self) -> Vec<Coord> {
        legal_moves(&self.board, self.current_player)
    }

    pub fn to_game_state(&self) -> GameState {
        let (dark_count, light_count) = self.board.scores();
        GameState {
            board: self.board.to_array().to_vec(),
            human: self.human(),
            current_player: self.current_player,
            dark_count,
            light_count,
            is_game_over: self.is_game_over,
            is_pass: self.is_pass,
            last_ai_move: self.last_ai_move,
            last_ai_nodes: self.selector.last_stats().nodes,
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let (dark_count, light_count) = self.board.count();
        let winner = self.board.clone().winner().unwrap_or(
            match dark_count.cmp(&light_count) {
                std::cmp::Ordering::Greater => Winner::Dark,
                std::cmp::Ordering::Less => Winner::Light,
                std::cmp::Ordering::Equal => Winner::Tie,
            },
        );
        GameResult {
            winner,
            dark_count,
            light_count,
        }
    }

    fn after_move(&mut self) {
        self.is_pass = false;
        self.current_player = self.current_player.other();
        if self.board.is_game_over() {
            self.is_game_over = true;
        }
    }

    fn pass_turn(&mut self) {
        self.is_pass = true;
        self.current_player = self.current_player.other();
        if !self.has_legal_moves_for_current() {
            self.is_game_over = true;
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current_player: Color) {
        let human = self.human();
        self.board = board;
        self.board.set_sides(human);
        self.current_player = current_player;
        self.is_game_over = false;
        self.is_pass = false;
    }
}

pub fn clamp_difficulty(level: u8) -> u8 {
    level.clamp(MIN_DEPTH, MAX_DEPTH)
}

/// Accepts a whole number in `0..=10`; `0` is raised to the minimum depth.
pub fn parse_difficulty(input: &str) -> Result<u8, String> {
    let text = input.trim();
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return Err("needs to be a numeric value".to_string());
    }

    match text.parse::<u8>() {
        Ok(level) if level <= MAX_DEPTH => Ok(clamp_difficulty(level)),
        _ => Err(format!("select a difficulty between {MIN_DEPTH} and {MAX_DEPTH}")),
    }
}
