pub mod board;
pub mod engine;
pub mod tt;
pub mod uci;
pub mod zobrist;

pub use board::{
    find_best_move, Board, BoardBuilder, Color, GameState, Move, Piece, SearchConfig,
    SearchResult, Square,
};
pub use engine::{GameController, Highlighter};
pub use tt::EvalCache;
