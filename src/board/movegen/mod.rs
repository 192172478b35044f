//! Pseudo-legal candidate generation.
//!
//! Candidates obey piece geometry only. Whether a move is playable is decided
//! later by `can_move_to` and the self-check test in `legal.rs`.

mod kings;
mod knights;
mod pawns;
mod sliders;

use super::{Board, Piece, Square};

impl Board {
    /// Pseudo-legal destination squares for the piece on `from`, in generation order
    #[must_use]
    pub fn candidate_squares(&self, from: Square) -> Vec<Square> {
        let mut out = Vec::with_capacity(28);
        let Some(occupant) = self.occupant_at(from) else {
            return out;
        };
        match occupant.piece {
            Piece::King => self.king_candidates(from, &mut out),
            Piece::Pawn => self.pawn_candidates(from, &mut out),
            Piece::Knight => self.knight_candidates(from, &mut out),
            Piece::Bishop | Piece::Rook | Piece::Queen => {
                self.slider_candidates(from, occupant.piece, &mut out);
            }
        }
        out
    }
}
