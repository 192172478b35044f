//! Chess board representation and game logic.
//!
//! An 8x8 grid of value-typed occupants with turn, king cache, en passant and
//! game-state tracking. Moves are generated as pseudo-legal candidates and
//! filtered by simulating them on a copy and testing for self-check.
//!
//! # Example
//! ```
//! use chess_core::board::{Board, GameState};
//!
//! let mut board = Board::new();
//! assert_eq!(board.legal_moves().len(), 20);
//! assert!(board.attempt_move(1, 4, 3, 4));
//! assert_eq!(board.game_state(), GameState::Active);
//! ```

mod attacks;
mod builder;
mod debug;
mod error;
mod eval;
mod fen;
mod legal;
mod make_unmake;
mod movegen;
pub mod prelude;
mod pst;
mod rules;
mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use attacks::{aligns_with_pin, is_blocking_square, Check, Direction, Pin};
pub use builder::BoardBuilder;
pub use error::{FenError, MoveError, MoveParseError, PositionError, SquareError};
pub use eval::{MATE_SCORE, MOBILITY_WEIGHT};
pub use fen::{parse_coordinate_move, START_FEN};
pub use make_unmake::UnmakeInfo;
pub use pst::pst_value;
pub use state::{Board, GameState};
pub use types::{
    CastlingRights, Color, Move, MoveList, MoveListIntoIter, Occupant, Piece, Square,
};

// Public API - search functions and configuration
pub use search::{
    find_best_move, find_best_move_logged, LogFacadeLogger, SearchConfig, SearchInfo,
    SearchLogger, SearchResult, StdoutLogger, DEFAULT_DEPTH,
};

pub(crate) use types::{castle_side, file_to_index, rank_to_index, PROMOTION_PIECES};
