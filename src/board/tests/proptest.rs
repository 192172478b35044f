//! Property-based tests using proptest.

use crate::board::{Board, Color, Move, Piece, UnmakeInfo};
use proptest::prelude::*;

/// Strategy to generate a random legal move sequence length
fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=20usize
}

/// Strategy to generate a random seed for move selection
fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Play up to `num_moves` random legal moves from the start, stopping at a terminal state
fn random_playout(seed: u64, num_moves: usize) -> Vec<Board> {
    use rand::prelude::*;

    let mut board = Board::new();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut positions = vec![board];
    for _ in 0..num_moves {
        let moves = board.legal_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        if board.try_move(mv).is_err() {
            break;
        }
        positions.push(board);
    }
    positions
}

fn king_on_grid(board: &Board, color: Color) -> bool {
    board.piece_at(board.king_square(color)) == Some((color, Piece::King))
}

proptest! {
    /// Property: make_move followed by unmake_move restores board state exactly
    #[test]
    fn prop_make_unmake_restores_state(
        seed in seed_strategy(),
        num_moves in move_count_strategy(),
    ) {
        use rand::prelude::*;

        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let initial = board;
        let initial_fen = board.to_fen();

        let mut history: Vec<(Board, UnmakeInfo)> = Vec::new();

        for _ in 0..num_moves {
            let moves = board.legal_moves();
            if moves.is_empty() {
                break;
            }
            let mv: Move = moves[rng.gen_range(0..moves.len())];
            let before = board;
            let info = board.make_move(mv).unwrap();
            history.push((before, info));
        }

        while let Some((before, info)) = history.pop() {
            board.unmake_move(info);
            prop_assert_eq!(board, before);
        }

        prop_assert_eq!(board, initial);
        prop_assert_eq!(board.to_fen(), initial_fen);
    }

    /// Property: the cached king squares always hold the kings
    #[test]
    fn prop_king_cache_matches_grid(seed in seed_strategy(), num_moves in move_count_strategy()) {
        for board in random_playout(seed, num_moves) {
            prop_assert!(king_on_grid(&board, Color::White));
            prop_assert!(king_on_grid(&board, Color::Black));
            prop_assert_eq!(board.count(Color::White, Piece::King), 1);
            prop_assert_eq!(board.count(Color::Black, Piece::King), 1);
        }
    }

    /// Property: per-piece legal destinations agree with the legal move list
    #[test]
    fn prop_destinations_match_legal_moves(
        seed in seed_strategy(),
        num_moves in move_count_strategy(),
    ) {
        let positions = random_playout(seed, num_moves);
        let board = positions[positions.len() - 1];
        let moves = board.legal_moves();
        for (from, _) in board.pieces_of(board.side_to_move()) {
            let expected: Vec<_> =
                moves.iter().filter(|mv| mv.from == from).map(|mv| mv.to).collect();
            prop_assert_eq!(board.legal_destinations(from), expected);
        }
    }

    /// Property: FEN round-trip preserves position
    #[test]
    fn prop_fen_roundtrip(seed in seed_strategy(), num_moves in move_count_strategy()) {
        for board in random_playout(seed, num_moves) {
            let fen = board.to_fen();
            let parsed = Board::try_from_fen(&fen).unwrap();
            prop_assert_eq!(parsed.to_fen(), fen);
            prop_assert_eq!(parsed.zobrist_key(), board.zobrist_key());
            prop_assert_eq!(parsed.game_state(), board.game_state());
            let parsed_moves = parsed.legal_moves();
            let moves = board.legal_moves();
            prop_assert_eq!(parsed_moves.as_slice(), moves.as_slice());
        }
    }

    /// Property: a legal move never leaves the mover in check
    #[test]
    fn prop_legal_moves_never_self_check(
        seed in seed_strategy(),
        num_moves in move_count_strategy(),
    ) {
        let positions = random_playout(seed, num_moves);
        let board = positions[positions.len() - 1];
        let mover = board.side_to_move();
        for &mv in &board.legal_moves() {
            let next = board.after(mv).unwrap();
            prop_assert!(!next.is_in_check(mover), "{} leaves {:?} in check", mv, mover);
        }
    }
}
