//! Zobrist hashing for chess positions.
//!
//! Keys come from a fixed-seed generator, so a position hashes to the same
//! value in every run. The hash covers piece placement, side to move, castling
//! availability and the en passant file.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{Board, Color};

pub(crate) struct ZobristKeys {
    // piece_keys[piece_type][color][square_index]
    pub(crate) piece_keys: [[[u64; 64]; 2]; 6],
    pub(crate) black_to_move_key: u64,
    // castling_keys[color][side]: 0=Kingside, 1=Queenside
    pub(crate) castling_keys: [[u64; 2]; 2],
    pub(crate) en_passant_keys: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(1234567890_u64);
        let mut piece_keys = [[[0; 64]; 2]; 6];
        let mut castling_keys = [[0; 2]; 2];
        let mut en_passant_keys = [0; 8];

        for piece in &mut piece_keys {
            for color in piece.iter_mut() {
                for key in color.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let black_to_move_key = rng.gen();

        for color in &mut castling_keys {
            for key in color.iter_mut() {
                *key = rng.gen();
            }
        }

        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            black_to_move_key,
            castling_keys,
            en_passant_keys,
        }
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

impl Board {
    /// 64-bit position fingerprint, computed from scratch
    #[must_use]
    pub fn zobrist_key(&self) -> u64 {
        let keys = &*ZOBRIST;
        let mut hash = 0;

        for (sq, occupant) in self.occupied_squares() {
            hash ^= keys.piece_keys[occupant.piece.index()][occupant.color.index()][sq.as_index()];
        }

        if self.side_to_move() == Color::Black {
            hash ^= keys.black_to_move_key;
        }

        let rights = self.castling_rights();
        for color in Color::BOTH {
            for (side, kingside) in [(0, true), (1, false)] {
                if rights.has(color, kingside) {
                    hash ^= keys.castling_keys[color.index()][side];
                }
            }
        }

        if let Some(file) = self.en_passant_file() {
            hash ^= keys.en_passant_keys[file];
        }

        hash
    }

    /// Structural fingerprint: placement, side to move, castling and en passant file
    #[must_use]
    pub fn position_key(&self) -> String {
        let mut key = String::with_capacity(80);
        for row in 0..8 {
            for col in 0..8 {
                key.push(
                    self.occupant(row, col)
                        .map_or('.', |o| o.to_fen_char()),
                );
            }
        }
        key.push(if self.white_to_move() { 'w' } else { 'b' });
        key.push_str(&self.castling_rights().to_fen_field());
        match self.en_passant_file() {
            Some(file) => key.push((b'a' + file as u8) as char),
            None => key.push('-'),
        }
        key
    }
}

#[cfg(test)]
mod tests {
    use crate::board::{Board, Move, Square};

    #[test]
    fn test_zobrist_is_reproducible() {
        assert_eq!(Board::new().zobrist_key(), Board::new().zobrist_key());
        assert_ne!(Board::new().zobrist_key(), 0);
    }

    #[test]
    fn test_transposition_same_key() {
        let mut a = Board::new();
        for (from, to) in [((0, 6), (2, 5)), ((7, 6), (5, 5)), ((0, 1), (2, 2)), ((7, 1), (5, 2))] {
            a.make_move(Move::new(Square(from.0, from.1), Square(to.0, to.1))).unwrap();
        }
        let mut b = Board::new();
        for (from, to) in [((0, 1), (2, 2)), ((7, 1), (5, 2)), ((0, 6), (2, 5)), ((7, 6), (5, 5))] {
            b.make_move(Move::new(Square(from.0, from.1), Square(to.0, to.1))).unwrap();
        }
        assert_eq!(a.zobrist_key(), b.zobrist_key());
        assert_eq!(a.position_key(), b.position_key());
    }

    #[test]
    fn test_side_and_en_passant_change_key() {
        let start = Board::new();
        let after_e4 = start.after(Move::new(Square(1, 4), Square(3, 4))).unwrap();
        let after_e3 = start.after(Move::new(Square(1, 4), Square(2, 4))).unwrap();
        assert_ne!(start.zobrist_key(), after_e4.zobrist_key());
        assert!(after_e4.position_key().ends_with('e'));
        assert!(after_e3.position_key().ends_with('-'));
        assert_ne!(after_e3.zobrist_key(), after_e4.zobrist_key());
    }
}
