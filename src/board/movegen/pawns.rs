use super::super::{Board, Square};

impl Board {
    /// One step, double step from the start, and both diagonals.
    ///
    /// Diagonals are emitted whatever stands there; capture validity is decided
    /// by the movement rules.
    pub(crate) fn pawn_candidates(&self, from: Square, out: &mut Vec<Square>) {
        let Some(pawn) = self.occupant_at(from) else {
            return;
        };
        let dir = pawn.color.pawn_direction();
        let Some(one_step) = from.offset(dir, 0) else {
            return;
        };
        if self.is_empty(one_step) {
            out.push(one_step);
        }
        if !pawn.has_moved {
            if let Some(two_step) = from.offset(2 * dir, 0) {
                if self.is_empty(one_step) && self.is_empty(two_step) {
                    out.push(two_step);
                }
            }
        }
        for dc in [-1, 1] {
            if let Some(diagonal) = from.offset(dir, dc) {
                out.push(diagonal);
            }
        }
    }
}
