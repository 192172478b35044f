//! Per-piece movement predicate.
//!
//! `can_move_to` re-validates a candidate against the piece's geometry, the
//! occupancy of its path and destination, and the special-move conditions
//! (castling, en passant). It does not test for self-check.

use super::{Board, Color, Piece, Square};

impl Board {
    /// Whether the piece on `from` may move to `to` by its own rules
    #[must_use]
    pub fn can_move_to(&self, from: Square, to: Square) -> bool {
        if from.0 >= 8 || from.1 >= 8 || to.0 >= 8 || to.1 >= 8 || from == to {
            return false;
        }
        let Some(mover) = self.occupant_at(from) else {
            return false;
        };
        let row_diff = from.0.abs_diff(to.0);
        let col_diff = from.1.abs_diff(to.1);

        match mover.piece {
            Piece::King => {
                if row_diff <= 1 && col_diff <= 1 {
                    return self.can_land(to, mover.color);
                }
                !mover.has_moved
                    && row_diff == 0
                    && col_diff == 2
                    && !self.is_in_check(mover.color)
                    && self.castling_target(from, to.1 > from.1) == Some(to)
            }
            Piece::Queen => {
                (row_diff == 0 || col_diff == 0 || row_diff == col_diff)
                    && self.is_path_clear(from, to)
                    && self.can_land(to, mover.color)
            }
            Piece::Rook => {
                (row_diff == 0 || col_diff == 0)
                    && self.is_path_clear(from, to)
                    && self.can_land(to, mover.color)
            }
            Piece::Bishop => {
                row_diff == col_diff
                    && self.is_path_clear(from, to)
                    && self.can_land(to, mover.color)
            }
            Piece::Knight => {
                ((row_diff == 2 && col_diff == 1) || (row_diff == 1 && col_diff == 2))
                    && self.can_land(to, mover.color)
            }
            Piece::Pawn => self.pawn_can_move_to(from, to, mover.color, mover.has_moved),
        }
    }

    fn pawn_can_move_to(&self, from: Square, to: Square, color: Color, has_moved: bool) -> bool {
        let dir = color.pawn_direction();
        let row_step = to.0 as isize - from.0 as isize;
        if row_step.signum() != dir {
            return false;
        }
        let col_diff = from.1.abs_diff(to.1);

        if col_diff == 0 {
            if row_step == dir {
                return self.is_empty(to);
            }
            if row_step == 2 * dir && !has_moved {
                return from
                    .offset(dir, 0)
                    .is_some_and(|middle| self.is_empty(middle))
                    && self.is_empty(to);
            }
            return false;
        }

        if col_diff == 1 && row_step == dir {
            if self.color_on(to) == Some(color.opponent()) {
                return self.piece_on(to) != Some(Piece::King);
            }
            return self.is_en_passant_capture(from, to, color);
        }
        false
    }

    /// Whether a diagonal pawn step from `from` to `to` captures the pawn that just double-stepped
    pub(crate) fn is_en_passant_capture(&self, from: Square, to: Square, color: Color) -> bool {
        if from.0 != color.en_passant_rank() {
            return false;
        }
        let Some(victim) = self.en_passant else {
            return false;
        };
        victim.0 == from.0
            && victim.1 == to.1
            && self.piece_at(victim) == Some((color.opponent(), Piece::Pawn))
    }

    /// Empty, or held by an enemy piece other than the king
    fn can_land(&self, to: Square, color: Color) -> bool {
        match self.occupant_at(to) {
            None => true,
            Some(o) => o.color != color && o.piece != Piece::King,
        }
    }

    /// Every square strictly between `from` and `to` is empty
    fn is_path_clear(&self, from: Square, to: Square) -> bool {
        let dr = (to.0 as isize - from.0 as isize).signum();
        let dc = (to.1 as isize - from.1 as isize).signum();
        let mut current = from;
        loop {
            let Some(next) = current.offset(dr, dc) else {
                return false;
            };
            if next == to {
                return true;
            }
            if !self.is_empty(next) {
                return false;
            }
            current = next;
        }
    }
}
