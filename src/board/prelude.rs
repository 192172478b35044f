//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! # Example
//! ```
//! use chess_core::board::prelude::*;
//!
//! let board = Board::new();
//! let result = find_best_move(&board, Color::White, &SearchConfig::default());
//! assert!(result.best_move.is_some());
//! ```

pub use super::{
    find_best_move, Board, BoardBuilder, Color, FenError, GameState, Move, MoveError, MoveList,
    MoveParseError, Piece, SearchConfig, SearchResult, Square,
};
