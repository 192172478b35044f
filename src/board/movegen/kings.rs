use super::super::{Board, Piece, Square};

impl Board {
    /// Adjacent squares not held by a friendly piece, then castling targets
    pub(crate) fn king_candidates(&self, from: Square, out: &mut Vec<Square>) {
        let Some(king) = self.occupant_at(from) else {
            return;
        };
        for dr in -1..=1 {
            for dc in -1..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                if let Some(to) = from.offset(dr, dc) {
                    if self.color_on(to) != Some(king.color) {
                        out.push(to);
                    }
                }
            }
        }

        if king.has_moved || self.is_in_check(king.color) {
            return;
        }
        for kingside in [true, false] {
            if let Some(to) = self.castling_target(from, kingside) {
                out.push(to);
            }
        }
    }

    /// Landing square of a castle from `from`, when the rook is home, the path is
    /// clear and the square the king crosses is not attacked.
    ///
    /// Callers check that the king is unmoved and not in check.
    pub(crate) fn castling_target(&self, from: Square, kingside: bool) -> Option<Square> {
        let color = self.color_on(from)?;
        let (step, rook_col, empty_span): (isize, usize, isize) = if kingside {
            (1, 7, 2)
        } else {
            (-1, 0, 3)
        };
        let path_clear = (1..=empty_span).all(|i| {
            from.offset(0, step * i)
                .is_some_and(|sq| self.is_empty(sq))
        });
        if !path_clear {
            return None;
        }
        let rook_home = self
            .occupant_at(Square(from.0, rook_col))
            .is_some_and(|o| o.is(color, Piece::Rook) && !o.has_moved);
        if !rook_home {
            return None;
        }
        let transit = from.offset(0, step)?;
        if self.is_square_attacked(transit, color.opponent()) {
            return None;
        }
        from.offset(0, 2 * step)
    }
}
