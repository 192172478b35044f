//! Static evaluation from one side's point of view.

use super::pst::pst_value;
use super::{Board, Color};

/// Magnitude of a checkmate score at a leaf
pub const MATE_SCORE: i32 = 30000;

/// Centipawns per legal move of mobility advantage
pub const MOBILITY_WEIGHT: i32 = 5;

impl Board {
    /// Material plus piece-square score, positive when `perspective` is ahead
    #[must_use]
    pub fn material_and_position(&self, perspective: Color) -> i32 {
        self.occupied_squares()
            .map(|(sq, o)| {
                let score = o.piece.value() + pst_value(o.piece, o.color, sq);
                if o.color == perspective {
                    score
                } else {
                    -score
                }
            })
            .sum()
    }

    /// Static evaluation for `perspective`.
    ///
    /// Material and piece-square terms plus `MOBILITY_WEIGHT` per legal move of
    /// advantage. When the side to move has no legal move the result is
    /// overridden: `-MATE_SCORE` if `perspective` is mated, `MATE_SCORE` if the
    /// other side is, and 0 for stalemate.
    #[must_use]
    pub fn evaluate(&self, perspective: Color) -> i32 {
        let own_moves = self.legal_moves_for(perspective).len() as i32;
        let other_moves = self.legal_moves_for(perspective.opponent()).len() as i32;

        let side_moves = if self.side_to_move == perspective {
            own_moves
        } else {
            other_moves
        };
        if side_moves == 0 {
            if !self.is_in_check(self.side_to_move) {
                return 0;
            }
            return if self.side_to_move == perspective {
                -MATE_SCORE
            } else {
                MATE_SCORE
            };
        }

        self.material_and_position(perspective) + MOBILITY_WEIGHT * (own_moves - other_moves)
    }
}
