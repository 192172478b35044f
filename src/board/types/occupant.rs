//! Square occupant: a piece of some color with its moved flag.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::{Color, Piece};

/// What stands on an occupied square.
///
/// Occupants are plain values owned by the board grid; the square they stand on
/// is their position, so grid and piece coordinates cannot disagree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Occupant {
    pub color: Color,
    pub piece: Piece,
    /// Set on the first move and never cleared. Gates castling and the pawn double step.
    pub has_moved: bool,
}

impl Occupant {
    /// An occupant that has not moved yet
    #[inline]
    #[must_use]
    pub const fn new(color: Color, piece: Piece) -> Self {
        Occupant {
            color,
            piece,
            has_moved: false,
        }
    }

    /// An occupant already flagged as moved
    #[inline]
    #[must_use]
    pub const fn moved(color: Color, piece: Piece) -> Self {
        Occupant {
            color,
            piece,
            has_moved: true,
        }
    }

    #[inline]
    #[must_use]
    pub fn is(self, color: Color, piece: Piece) -> bool {
        self.color == color && self.piece == piece
    }

    /// FEN letter, uppercase for White
    #[inline]
    #[must_use]
    pub fn to_fen_char(self) -> char {
        self.piece.to_fen_char(self.color)
    }
}
