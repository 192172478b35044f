use log::warn;

use super::state::GameState;
use super::{Board, Color, Move, MoveError, Occupant, Piece, Square, PROMOTION_PIECES};

/// Everything `make_move` touched, enough for `unmake_move` to restore the position.
#[derive(Clone, Copy, Debug)]
pub struct UnmakeInfo {
    pub(crate) mv: Move,
    pub(crate) moved: Occupant,
    pub(crate) captured: Option<(Square, Occupant)>,
    pub(crate) rook: Option<(Square, Square, Occupant)>,
    pub(crate) previous_en_passant: Option<Square>,
    pub(crate) previous_king_squares: [Square; 2],
    pub(crate) previous_game_state: GameState,
    pub(crate) previous_pending_promotion: Option<Square>,
    pub(crate) previous_side: Color,
}

impl UnmakeInfo {
    /// The piece removed by the move, with the square it stood on
    #[must_use]
    pub fn captured(&self) -> Option<(Square, Occupant)> {
        self.captured
    }
}

impl Board {
    /// Apply a move's effects and flip the turn, without any legality check.
    ///
    /// Effects run in a fixed order: castling rook, capture (the en passant victim
    /// stands on the mover's origin row and the destination column), relocation
    /// with the moved flag, king cache, en passant bookkeeping, auto-promotion to
    /// queen. The game state is not recomputed; `play_move` does that.
    ///
    /// # Errors
    /// `MoveError::EmptySource` if no piece stands on `from`, or an invariant
    /// violation (logged at warn) if castling finds no rook or the placed piece is
    /// missing afterwards. On a castling error nothing has been mutated.
    pub fn make_move(&mut self, mv: Move) -> Result<UnmakeInfo, MoveError> {
        let Some(moved) = self.occupant_at(mv.from) else {
            return Err(MoveError::EmptySource { square: mv.from });
        };
        let mut info = UnmakeInfo {
            mv,
            moved,
            captured: None,
            rook: None,
            previous_en_passant: self.en_passant,
            previous_king_squares: self.king_squares,
            previous_game_state: self.game_state,
            previous_pending_promotion: self.pending_promotion,
            previous_side: self.side_to_move,
        };

        if moved.piece == Piece::King && mv.from.0 == mv.to.0 && mv.col_distance() == 2 {
            let kingside = mv.to.1 > mv.from.1;
            let rook_from = Square(mv.from.0, if kingside { 7 } else { 0 });
            let rook_to = Square(mv.from.0, if kingside { mv.from.1 + 1 } else { mv.from.1 - 1 });
            let rook = self
                .occupant_at(rook_from)
                .filter(|o| o.is(moved.color, Piece::Rook));
            let Some(rook) = rook else {
                warn!("castling {mv} aborted: no {} rook on {rook_from}", moved.color);
                return Err(MoveError::CastlingRookMissing { square: rook_from });
            };
            self.take_occupant(rook_from);
            self.set_occupant(rook_to, Occupant { has_moved: true, ..rook });
            info.rook = Some((rook_from, rook_to, rook));
        }

        let diagonal_to_empty =
            moved.piece == Piece::Pawn && mv.from.1 != mv.to.1 && self.is_empty(mv.to);
        if diagonal_to_empty {
            let victim_sq = Square(mv.from.0, mv.to.1);
            if self.piece_at(victim_sq) == Some((moved.color.opponent(), Piece::Pawn)) {
                info.captured = self.take_occupant(victim_sq).map(|o| (victim_sq, o));
            }
        } else {
            info.captured = self.take_occupant(mv.to).map(|o| (mv.to, o));
        }

        self.take_occupant(mv.from);
        self.set_occupant(mv.to, Occupant { has_moved: true, ..moved });
        if self.piece_at(mv.to) != Some((moved.color, moved.piece)) {
            warn!("{mv}: moved {:?} not found on {} after placement", moved.piece, mv.to);
            return Err(MoveError::PieceVanished { square: mv.to });
        }

        self.en_passant = if moved.piece == Piece::Pawn && mv.row_distance() == 2 {
            Some(mv.to)
        } else {
            None
        };

        self.pending_promotion = None;
        if moved.piece == Piece::Pawn && mv.to.0 == moved.color.pawn_promotion_rank() {
            self.set_occupant(mv.to, Occupant::moved(moved.color, Piece::Queen));
            self.pending_promotion = Some(mv.to);
        }

        self.side_to_move = self.side_to_move.opponent();
        Ok(info)
    }

    /// Restore every field `make_move` changed
    pub fn unmake_move(&mut self, info: UnmakeInfo) {
        let mv = info.mv;
        self.take_occupant(mv.to);
        self.squares[mv.from.0][mv.from.1] = Some(info.moved);
        if let Some((rook_from, rook_to, rook)) = info.rook {
            self.take_occupant(rook_to);
            self.squares[rook_from.0][rook_from.1] = Some(rook);
        }
        if let Some((sq, occupant)) = info.captured {
            self.squares[sq.0][sq.1] = Some(occupant);
        }
        self.king_squares = info.previous_king_squares;
        self.en_passant = info.previous_en_passant;
        self.game_state = info.previous_game_state;
        self.pending_promotion = info.previous_pending_promotion;
        self.side_to_move = info.previous_side;
    }

    /// The position after `mv`, leaving `self` untouched
    ///
    /// # Errors
    /// Same as [`Board::make_move`].
    pub fn after(&self, mv: Move) -> Result<Board, MoveError> {
        let mut next = *self;
        next.make_move(mv)?;
        Ok(next)
    }

    /// Apply a move and re-derive the game state for the side now to move
    ///
    /// # Errors
    /// Same as [`Board::make_move`].
    pub fn play_move(&mut self, mv: Move) -> Result<UnmakeInfo, MoveError> {
        let info = self.make_move(mv)?;
        self.refresh_game_state();
        Ok(info)
    }

    /// Swap the queen from the last auto-promotion for the chosen piece.
    ///
    /// Choosing `Queen` keeps the piece and clears the pending flag.
    ///
    /// # Errors
    /// `NoPendingPromotion` when the previous ply was not a promotion,
    /// `InvalidPromotionPiece` for pawn or king.
    pub fn replace_promoted_piece(&mut self, piece: Piece) -> Result<(), MoveError> {
        if !PROMOTION_PIECES.contains(&piece) {
            return Err(MoveError::InvalidPromotionPiece { piece });
        }
        let Some(sq) = self.pending_promotion else {
            return Err(MoveError::NoPendingPromotion);
        };
        let Some(queen) = self.occupant_at(sq) else {
            warn!("promoted piece missing from {sq}");
            return Err(MoveError::PieceVanished { square: sq });
        };
        self.set_occupant(sq, Occupant::moved(queen.color, piece));
        self.pending_promotion = None;
        self.refresh_game_state();
        Ok(())
    }
}
