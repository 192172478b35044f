//! Legality by simulate-then-check, legal move lists and game-state derivation.

use super::attacks::{aligns_with_pin, is_blocking_square};
use super::state::GameState;
use super::{Board, Color, Move, MoveError, MoveList, Piece, Square, UnmakeInfo};

impl Board {
    /// Whether `mv` is legal for the color of the piece it moves.
    ///
    /// The move must pass the piece's own rules, and the position after it must
    /// not leave that color's king attacked.
    #[must_use]
    pub fn is_legal(&self, mv: Move) -> bool {
        let Some(mover) = self.occupant_at(mv.from) else {
            return false;
        };
        if !self.can_move_to(mv.from, mv.to) {
            return false;
        }
        match self.after(mv) {
            Ok(next) => !next.is_in_check(mover.color),
            Err(_) => false,
        }
    }

    /// Legal moves for the side to move
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        self.legal_moves_for(self.side_to_move)
    }

    /// Legal moves for `color`, squares scanned row by row from a1, each piece's
    /// destinations in generation order
    #[must_use]
    pub fn legal_moves_for(&self, color: Color) -> MoveList {
        let mut moves = MoveList::new();
        for (from, _) in self.pieces_of(color) {
            for to in self.candidate_squares(from) {
                let mv = Move::new(from, to);
                if self.is_legal(mv) {
                    moves.push(mv);
                }
            }
        }
        moves
    }

    /// Whether `color` has at least one legal move
    #[must_use]
    pub fn has_legal_moves(&self, color: Color) -> bool {
        self.pieces_of(color).any(|(from, _)| {
            self.candidate_squares(from)
                .into_iter()
                .any(|to| self.is_legal(Move::new(from, to)))
        })
    }

    /// Game state for the side to move, from check status and move availability
    #[must_use]
    pub fn compute_game_state(&self) -> GameState {
        let color = self.side_to_move;
        GameState::derive(self.is_in_check(color), self.has_legal_moves(color))
    }

    /// Recompute and store the game state
    pub fn refresh_game_state(&mut self) -> GameState {
        self.game_state = self.compute_game_state();
        self.game_state
    }

    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.compute_game_state() == GameState::Checkmate
    }

    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        self.compute_game_state() == GameState::Stalemate
    }

    /// Validate and play a move for the side to move.
    ///
    /// # Errors
    /// `GameOver` after checkmate or stalemate, `EmptySource`, `WrongSide` or
    /// `Illegal` for rejected requests; nothing is changed in those cases.
    pub fn try_move(&mut self, mv: Move) -> Result<UnmakeInfo, MoveError> {
        if self.game_state.is_terminal() {
            return Err(MoveError::GameOver);
        }
        let Some(mover) = self.occupant_at(mv.from) else {
            return Err(MoveError::EmptySource { square: mv.from });
        };
        if mover.color != self.side_to_move {
            return Err(MoveError::WrongSide {
                square: mv.from,
                to_move: self.side_to_move,
            });
        }
        if !self.is_legal(mv) {
            return Err(MoveError::Illegal { mv: mv.to_string() });
        }
        self.play_move(mv)
    }

    /// Shell-facing move command on raw coordinates; `false` leaves the board unchanged
    pub fn attempt_move(
        &mut self,
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
    ) -> bool {
        match Move::from_coords(from_row, from_col, to_row, to_col) {
            Some(mv) => self.try_move(mv).is_ok(),
            None => false,
        }
    }

    /// Pseudo-legal destinations of the piece on `from` that its own rules accept
    #[must_use]
    pub fn candidate_destinations(&self, from: Square) -> Vec<Square> {
        self.candidate_squares(from)
            .into_iter()
            .filter(|&to| self.can_move_to(from, to))
            .collect()
    }

    /// Legal destinations of the piece on `from`.
    ///
    /// Candidates are narrowed by the check and pin structure around the king
    /// before the full self-check test runs on the survivors.
    #[must_use]
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        let Some(mover) = self.occupant_at(from) else {
            return Vec::new();
        };
        let color = mover.color;
        let mut destinations = self.candidate_destinations(from);

        if mover.piece != Piece::King {
            let checks = self.checks(color);
            match checks.as_slice() {
                [] => {}
                [check] => {
                    let blocking = self.blocking_squares(check, color);
                    destinations.retain(|&to| {
                        is_blocking_square(&blocking, to)
                            || (mover.piece == Piece::Pawn
                                && self.is_en_passant_capture(from, to, color)
                                && Square(from.0, to.1) == check.attacker)
                    });
                }
                _ => return Vec::new(),
            }
            if let Some(pin) = self.pins(color).into_iter().find(|p| p.square == from) {
                destinations.retain(|&to| aligns_with_pin(&pin, from, to));
            }
        }

        destinations.retain(|&to| self.is_legal(Move::new(from, to)));
        destinations
    }

    /// Count leaf nodes of the legal move tree to `depth` plies
    #[must_use]
    pub fn perft(&self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        moves
            .iter()
            .filter_map(|&mv| self.after(mv).ok())
            .map(|next| next.perft(depth - 1))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardBuilder;

    #[test]
    fn test_start_has_twenty_moves() {
        let board = Board::new();
        assert_eq!(board.legal_moves().len(), 20);
        assert_eq!(board.legal_moves_for(Color::Black).len(), 20);
        assert_eq!(board.compute_game_state(), GameState::Active);
    }

    #[test]
    fn test_legal_moves_row_major_order() {
        let moves = Board::new().legal_moves();
        // b1 knight first, in offset order c3 then a3
        assert_eq!(moves[0], Move::new(Square(0, 1), Square(2, 2)));
        assert_eq!(moves[1], Move::new(Square(0, 1), Square(2, 0)));
        assert_eq!(moves[19].from, Square(1, 7));
    }

    #[test]
    fn test_try_move_rejections() {
        let mut board = Board::new();
        assert_eq!(
            board.try_move(Move::new(Square(6, 4), Square(4, 4))).unwrap_err(),
            MoveError::WrongSide {
                square: Square(6, 4),
                to_move: Color::White
            }
        );
        assert!(matches!(
            board.try_move(Move::new(Square(1, 4), Square(4, 4))),
            Err(MoveError::Illegal { .. })
        ));
        assert!(!board.attempt_move(1, 4, 9, 4));
        assert_eq!(board, Board::new());
        assert!(board.attempt_move(1, 4, 3, 4));
    }

    #[test]
    fn test_pinned_piece_moves_along_pin_only() {
        let board = BoardBuilder::new()
            .piece(Square(0, 4), Color::White, Piece::King)
            .piece(Square(2, 4), Color::White, Piece::Rook)
            .piece(Square(6, 4), Color::Black, Piece::Rook)
            .piece(Square(7, 0), Color::Black, Piece::King)
            .build()
            .unwrap();
        let dests = board.legal_destinations(Square(2, 4));
        assert!(dests.iter().all(|sq| sq.1 == 4));
        assert!(dests.contains(&Square(6, 4)));
        assert_eq!(dests.len(), 5);
    }

    #[test]
    fn test_single_check_must_block_or_capture() {
        let board = BoardBuilder::new()
            .piece(Square(0, 4), Color::White, Piece::King)
            .piece(Square(0, 0), Color::White, Piece::Rook)
            .piece(Square(4, 4), Color::Black, Piece::Rook)
            .piece(Square(7, 7), Color::Black, Piece::King)
            .build()
            .unwrap();
        assert_eq!(board.game_state(), GameState::Check);
        let dests = board.legal_destinations(Square(0, 0));
        assert_eq!(dests, Vec::<Square>::new());

        let board = BoardBuilder::new()
            .piece(Square(0, 4), Color::White, Piece::King)
            .piece(Square(2, 0), Color::White, Piece::Rook)
            .piece(Square(4, 4), Color::Black, Piece::Rook)
            .piece(Square(7, 7), Color::Black, Piece::King)
            .build()
            .unwrap();
        assert_eq!(board.legal_destinations(Square(2, 0)), vec![Square(2, 4)]);
    }

    #[test]
    fn test_game_over_rejects_moves() {
        let mut board = BoardBuilder::new()
            .piece(Square(7, 0), Color::Black, Piece::King)
            .piece(Square(5, 1), Color::White, Piece::Queen)
            .piece(Square(5, 2), Color::White, Piece::King)
            .side_to_move(Color::Black)
            .build()
            .unwrap();
        assert_eq!(board.game_state(), GameState::Stalemate);
        assert!(matches!(
            board.try_move(Move::new(Square(7, 0), Square(7, 1))),
            Err(MoveError::GameOver)
        ));
    }

    #[test]
    fn test_perft_start() {
        let board = Board::new();
        assert_eq!(board.perft(1), 20);
        assert_eq!(board.perft(2), 400);
    }
}
