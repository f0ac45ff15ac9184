pub mod decision;
pub mod movegen;
pub mod search;

pub use decision::{Decision, choose_move};
pub use search::{NoMovePolicy, SearchConfig, SearchStats, Searcher};
