use super::super::attacks::{Direction, DIAGONAL, ORTHOGONAL};
use super::super::{Board, Piece, Square};

impl Board {
    /// Ray-cast along the piece's directions, each ray including its first blocker
    pub(crate) fn slider_candidates(&self, from: Square, piece: Piece, out: &mut Vec<Square>) {
        let diagonal: &[Direction] = if piece.attacks_diagonally() { &DIAGONAL } else { &[] };
        let straight: &[Direction] = if piece.attacks_straight() { &ORTHOGONAL } else { &[] };
        for &direction in diagonal.iter().chain(straight) {
            out.extend(self.ray(from, direction));
        }
    }
}
