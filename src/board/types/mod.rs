//! Core chess types.
//!
//! - `Piece` and `Color` - piece kinds and sides
//! - `Square` - (row, col) board coordinate
//! - `Occupant` - what stands on a square, with its moved flag
//! - `Move` and `MoveList` - move representation
//! - `CastlingRights` - castling availability derived from moved flags

mod castling;
mod moves;
mod occupant;
mod piece;
mod square;

pub use castling::CastlingRights;
pub use moves::{Move, MoveList, MoveListIntoIter};
pub use occupant::Occupant;
pub use piece::{Color, Piece};
pub use square::Square;

pub(crate) use castling::castle_side;
pub(crate) use piece::PROMOTION_PIECES;
pub(crate) use square::{file_to_index, rank_to_index};
