//! Error types for chess board operations.

use std::fmt;

use super::types::{Color, Piece, Square};

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string has too few parts (needs at least 4)
    TooFewParts { found: usize },
    /// Invalid piece character in position string
    InvalidPiece { char: char },
    /// Invalid castling character
    InvalidCastling { char: char },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid en passant square
    InvalidEnPassant { found: String },
    /// Wrong number of ranks in position string
    InvalidRankCount { found: usize },
    /// Too many or too few files in a rank
    InvalidFileCount { rank: usize, files: usize },
    /// Position violates a board invariant
    InvalidPosition(PositionError),
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN must have at least 4 parts, found {found}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in FEN")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "Invalid castling character '{char}' in FEN")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}'")
            }
            FenError::InvalidRankCount { found } => {
                write!(f, "FEN position must have 8 ranks, found {found}")
            }
            FenError::InvalidFileCount { rank, files } => {
                write!(f, "Rank {rank} has {files} files, expected 8")
            }
            FenError::InvalidPosition(err) => write!(f, "Invalid position: {err}"),
        }
    }
}

impl std::error::Error for FenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FenError::InvalidPosition(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PositionError> for FenError {
    fn from(err: PositionError) -> Self {
        FenError::InvalidPosition(err)
    }
}

/// Error type for coordinate move parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4-5 characters)
    InvalidLength { len: usize },
    /// Invalid square notation in move
    InvalidSquare { notation: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "Move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "Invalid square notation in '{notation}'")
            }
            MoveParseError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// Error type for square construction and parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Row out of bounds (must be 0-7)
    RowOutOfBounds { row: usize },
    /// Column out of bounds (must be 0-7)
    ColOutOfBounds { col: usize },
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RowOutOfBounds { row } => {
                write!(f, "Row {row} out of bounds (must be 0-7)")
            }
            SquareError::ColOutOfBounds { col } => {
                write!(f, "Column {col} out of bounds (must be 0-7)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Error type for rejected move commands and failed move application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// No piece on the source square
    EmptySource { square: Square },
    /// Source piece belongs to the side not on move
    WrongSide { square: Square, to_move: Color },
    /// Move is not legal in the current position
    Illegal { mv: String },
    /// Game already ended in checkmate or stalemate
    GameOver,
    /// King moved two columns but no unmoved rook stands in the corner
    CastlingRookMissing { square: Square },
    /// Placed piece not found on its destination afterwards
    PieceVanished { square: Square },
    /// No pawn promotion is waiting for a piece choice
    NoPendingPromotion,
    /// Pawns may not promote to this piece
    InvalidPromotionPiece { piece: Piece },
}

impl MoveError {
    /// Whether this error reports a broken board invariant rather than a rejected request
    #[must_use]
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            MoveError::CastlingRookMissing { .. } | MoveError::PieceVanished { .. }
        )
    }
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::EmptySource { square } => write!(f, "No piece on {square}"),
            MoveError::WrongSide { square, to_move } => {
                write!(f, "Piece on {square} does not belong to {to_move}, who is to move")
            }
            MoveError::Illegal { mv } => write!(f, "Illegal move '{mv}'"),
            MoveError::GameOver => write!(f, "Game is over, no further moves accepted"),
            MoveError::CastlingRookMissing { square } => {
                write!(f, "Castling rook missing on {square}")
            }
            MoveError::PieceVanished { square } => {
                write!(f, "Piece vanished from {square} after placement")
            }
            MoveError::NoPendingPromotion => write!(f, "No promotion is pending"),
            MoveError::InvalidPromotionPiece { piece } => {
                write!(f, "Cannot promote to {piece:?}")
            }
        }
    }
}

impl std::error::Error for MoveError {}

/// Error type for constructed positions that break board invariants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// Each side needs exactly one king
    KingCount { color: Color, found: usize },
    /// Pawns cannot stand on the first or last rank
    PawnOnBackRank { square: Square },
    /// Row or column outside 0..8
    OffBoard { square: Square },
    /// The side that just moved cannot still be in check
    OpponentInCheck { color: Color },
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::KingCount { color, found } => {
                write!(f, "{color} must have exactly one king, found {found}")
            }
            PositionError::PawnOnBackRank { square } => {
                write!(f, "Pawn on back rank at {square}")
            }
            PositionError::OffBoard { square } => {
                write!(f, "Square ({}, {}) is off the board", square.0, square.1)
            }
            PositionError::OpponentInCheck { color } => {
                write!(f, "{color} is in check but not to move")
            }
        }
    }
}

impl std::error::Error for PositionError {}

#[cfg(test)]
mod tests {
    use super::*;

    // FenError tests
    #[test]
    fn test_fen_error_too_few_parts() {
        let err = FenError::TooFewParts { found: 2 };
        assert!(err.to_string().contains('2'));
        assert!(err.to_string().contains('4'));
    }

    #[test]
    fn test_fen_error_invalid_piece() {
        let err = FenError::InvalidPiece { char: 'z' };
        assert!(err.to_string().contains("'z'"));
    }

    #[test]
    fn test_fen_error_wraps_position_error() {
        let err: FenError = PositionError::KingCount {
            color: Color::Black,
            found: 0,
        }
        .into();
        assert!(err.to_string().contains("Black"));
        assert!(std::error::Error::source(&err).is_some());
    }

    // MoveParseError tests
    #[test]
    fn test_move_parse_error_invalid_length() {
        let err = MoveParseError::InvalidLength { len: 3 };
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_move_parse_error_invalid_square() {
        let err = MoveParseError::InvalidSquare {
            notation: "z9z9".to_string(),
        };
        assert!(err.to_string().contains("z9z9"));
    }

    // SquareError tests
    #[test]
    fn test_square_error_row_bounds() {
        let err = SquareError::RowOutOfBounds { row: 9 };
        assert!(err.to_string().contains('9'));
    }

    #[test]
    fn test_square_error_invalid_notation() {
        let err = SquareError::InvalidNotation {
            notation: "xyz".to_string(),
        };
        assert!(err.to_string().contains("xyz"));
    }

    // MoveError tests
    #[test]
    fn test_move_error_messages() {
        let err = MoveError::EmptySource {
            square: Square(3, 3),
        };
        assert!(err.to_string().contains("d4"));
        let err = MoveError::Illegal {
            mv: "e2e5".to_string(),
        };
        assert!(err.to_string().contains("e2e5"));
    }

    #[test]
    fn test_move_error_invariant_classification() {
        assert!(MoveError::CastlingRookMissing {
            square: Square(0, 7)
        }
        .is_invariant_violation());
        assert!(!MoveError::GameOver.is_invariant_violation());
    }

    #[test]
    fn test_error_clone() {
        let err = FenError::InvalidPiece { char: 'x' };
        let cloned = err.clone();
        assert_eq!(err, cloned);
    }
}
