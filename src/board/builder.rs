//! Fluent builder for constructing chess positions.
//!
//! Allows creating positions piece by piece rather than parsing FEN strings.
//! Moved flags are derived on build: pawns off their start rank count as moved,
//! and kings and rooks count as unmoved only where the castling rights say so.
//!
//! # Example
//! ```
//! use chess_core::board::{BoardBuilder, Color, Piece, Square};
//!
//! let board = BoardBuilder::new()
//!     .piece(Square(0, 4), Color::White, Piece::King)
//!     .piece(Square(7, 4), Color::Black, Piece::King)
//!     .piece(Square(1, 0), Color::White, Piece::Pawn)
//!     .side_to_move(Color::White)
//!     .build()
//!     .unwrap();
//! assert_eq!(board.count(Color::White, Piece::Pawn), 1);
//! ```

use super::state::KING_HOME_COL;
use super::{Board, CastlingRights, Color, Occupant, Piece, PositionError, Square};

/// A fluent builder for constructing `Board` positions.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    pieces: Vec<(Square, Color, Piece)>,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_pawn: Option<Square>,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardBuilder {
    /// Create a new empty board builder.
    #[must_use]
    pub fn new() -> Self {
        BoardBuilder {
            pieces: Vec::new(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant_pawn: None,
        }
    }

    /// Create a builder starting from the standard initial position.
    #[must_use]
    pub fn starting_position() -> Self {
        let board = Board::new();
        BoardBuilder {
            pieces: board
                .occupied_squares()
                .map(|(sq, o)| (sq, o.color, o.piece))
                .collect(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::all(),
            en_passant_pawn: None,
        }
    }

    /// Place a piece on the board, replacing any previous occupant.
    #[must_use]
    pub fn piece(mut self, square: Square, color: Color, piece: Piece) -> Self {
        self.pieces.retain(|(sq, _, _)| *sq != square);
        self.pieces.push((square, color, piece));
        self
    }

    /// Remove a piece from a square.
    #[must_use]
    pub fn clear(mut self, square: Square) -> Self {
        self.pieces.retain(|(sq, _, _)| *sq != square);
        self
    }

    /// Set the side to move.
    #[must_use]
    pub const fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    /// Set castling rights from a `CastlingRights` value.
    #[must_use]
    pub const fn castling(mut self, rights: CastlingRights) -> Self {
        self.castling_rights = rights;
        self
    }

    /// Enable kingside castling for a color.
    #[must_use]
    pub fn castle_kingside(mut self, color: Color) -> Self {
        self.castling_rights.set(color, true);
        self
    }

    /// Enable queenside castling for a color.
    #[must_use]
    pub fn castle_queenside(mut self, color: Color) -> Self {
        self.castling_rights.set(color, false);
        self
    }

    /// Disable all castling rights.
    #[must_use]
    pub const fn no_castling_rights(mut self) -> Self {
        self.castling_rights = CastlingRights::none();
        self
    }

    /// Mark the pawn on `pawn` as having just advanced two squares.
    ///
    /// Ignored on build unless an enemy pawn of the side not to move stands there.
    #[must_use]
    pub const fn en_passant_pawn(mut self, pawn: Square) -> Self {
        self.en_passant_pawn = Some(pawn);
        self
    }

    /// Build the board, checking squares, king count, pawn placement and check.
    ///
    /// # Errors
    /// Returns `PositionError` if a square is off the board, a side does not have
    /// exactly one king, a pawn stands on the first or last rank, or the side not
    /// to move is in check.
    pub fn build(self) -> Result<Board, PositionError> {
        let off_board = self
            .pieces
            .iter()
            .map(|&(sq, _, _)| sq)
            .chain(self.en_passant_pawn)
            .find(|sq| Square::new(sq.0, sq.1).is_none());
        if let Some(square) = off_board {
            return Err(PositionError::OffBoard { square });
        }

        for color in Color::BOTH {
            let found = self
                .pieces
                .iter()
                .filter(|(_, c, p)| *c == color && *p == Piece::King)
                .count();
            if found != 1 {
                return Err(PositionError::KingCount { color, found });
            }
        }

        let mut board = Board::empty();
        for (square, color, piece) in self.pieces {
            if piece == Piece::Pawn && (square.0 == 0 || square.0 == 7) {
                return Err(PositionError::PawnOnBackRank { square });
            }
            let occupant = Occupant {
                color,
                piece,
                has_moved: derive_moved_flag(square, color, piece, self.castling_rights),
            };
            board.set_occupant(square, occupant);
        }

        board.side_to_move = self.side_to_move;
        board.en_passant = self.en_passant_pawn.filter(|&pawn| {
            let double_stepper = self.side_to_move.opponent();
            pawn.0 == self.side_to_move.en_passant_rank()
                && board
                    .occupant_at(pawn)
                    .is_some_and(|o| o.is(double_stepper, Piece::Pawn))
        });
        let waiting = self.side_to_move.opponent();
        if board.is_in_check(waiting) {
            return Err(PositionError::OpponentInCheck { color: waiting });
        }
        board.refresh_game_state();
        Ok(board)
    }
}

/// Moved flag implied by square and castling rights
fn derive_moved_flag(square: Square, color: Color, piece: Piece, rights: CastlingRights) -> bool {
    let home = color.back_rank();
    match piece {
        Piece::Pawn => square.0 != color.pawn_start_rank(),
        Piece::King => {
            square != Square(home, KING_HOME_COL)
                || !(rights.has(color, true) || rights.has(color, false))
        }
        Piece::Rook => {
            let kingside = square == Square(home, 7) && rights.has(color, true);
            let queenside = square == Square(home, 0) && rights.has(color, false);
            !(kingside || queenside)
        }
        _ => false,
    }
}
