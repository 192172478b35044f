//! Piece-square tables.
//!
//! Tables are written from White's side with the eighth rank first, so a
//! White piece on (row, col) reads index `(7 - row) * 8 + col` and a Black piece
//! reads `row * 8 + col`.

use super::{Color, Piece, Square};

#[rustfmt::skip]
const PAWN: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5,  5,  5,  5,  5,-10,
    -10,  0,  5,  0,  0,  5,  0,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_MIDDLE_GAME: [i32; 64] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

const TABLES: [&[i32; 64]; 6] = [&PAWN, &KNIGHT, &BISHOP, &ROOK, &QUEEN, &KING_MIDDLE_GAME];

#[inline]
const fn table_index(color: Color, sq: Square) -> usize {
    match color {
        Color::White => (7 - sq.0) * 8 + sq.1,
        Color::Black => sq.0 * 8 + sq.1,
    }
}

/// Positional bonus for `piece` of `color` standing on `sq`
#[inline]
#[must_use]
pub fn pst_value(piece: Piece, color: Color, sq: Square) -> i32 {
    TABLES[piece.index()][table_index(color, sq)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_mirror_between_colors() {
        for idx in 0..64 {
            let sq = Square::from_index(idx);
            for piece in Piece::ALL {
                assert_eq!(
                    pst_value(piece, Color::White, sq),
                    pst_value(piece, Color::Black, sq.flip_vertical())
                );
            }
        }
    }

    #[test]
    fn test_forward_means_toward_opponent() {
        // a pawn one step from promotion scores 50 for either color
        assert_eq!(pst_value(Piece::Pawn, Color::White, Square(6, 0)), 50);
        assert_eq!(pst_value(Piece::Pawn, Color::Black, Square(1, 0)), 50);
        // castled king on g1 / g8
        assert_eq!(pst_value(Piece::King, Color::White, Square(0, 6)), 30);
        assert_eq!(pst_value(Piece::King, Color::Black, Square(7, 6)), 30);
        assert_eq!(pst_value(Piece::Knight, Color::White, Square(3, 3)), 20);
    }
}
