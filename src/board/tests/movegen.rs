//! Candidate generation, per-piece rules and legal move lists.

use crate::board::{Board, BoardBuilder, Color, GameState, Move, Piece, Square};

const OPENING_MOVES: [&str; 20] = [
    "a2a3", "a2a4", "b2b3", "b2b4", "c2c3", "c2c4", "d2d3", "d2d4", "e2e3", "e2e4", "f2f3",
    "f2f4", "g2g3", "g2g4", "h2h3", "h2h4", "b1a3", "b1c3", "g1f3", "g1h3",
];

fn all_squares() -> impl Iterator<Item = Square> {
    (0..64).map(Square::from_index)
}

// ============================================================================
// Starting position
// ============================================================================

#[test]
fn test_attempt_move_accepts_exactly_the_opening_moves() {
    let mut accepted = Vec::new();
    for from in all_squares() {
        for to in all_squares() {
            let mut board = Board::new();
            if board.attempt_move(from.0, from.1, to.0, to.1) {
                accepted.push(Move::new(from, to).to_string());
            } else {
                assert_eq!(board, Board::new(), "rejected {from}{to} changed the board");
            }
        }
    }
    accepted.sort();
    let mut expected: Vec<String> = OPENING_MOVES.iter().map(|s| (*s).to_string()).collect();
    expected.sort();
    assert_eq!(accepted, expected);
}

#[test]
fn test_attempt_move_relocates_piece() {
    for text in OPENING_MOVES {
        let mut board = Board::new();
        let mv: Move = Board::new().parse_move(text).unwrap().unwrap().0;
        let moved = board.occupant_at(mv.from).unwrap();
        assert!(board.attempt_move(mv.from.0, mv.from.1, mv.to.0, mv.to.1));
        assert_eq!(board.occupant_at(mv.from), None, "{text}");
        assert_eq!(board.piece_at(mv.to), Some((moved.color, moved.piece)), "{text}");
        assert_eq!(board.side_to_move(), Color::Black);
    }
}

#[test]
fn test_attempt_move_rejects_off_board_coordinates() {
    let mut board = Board::new();
    assert!(!board.attempt_move(1, 4, 8, 4));
    assert!(!board.attempt_move(9, 0, 0, 0));
    assert_eq!(board, Board::new());
}

// ============================================================================
// Candidate order
// ============================================================================

#[test]
fn test_queen_candidates_diagonals_first() {
    let board = BoardBuilder::new()
        .piece(Square(0, 0), Color::White, Piece::King)
        .piece(Square(7, 6), Color::Black, Piece::King)
        .piece(Square(3, 3), Color::White, Piece::Queen)
        .build()
        .unwrap();
    let candidates = board.candidate_squares(Square(3, 3));
    assert_eq!(candidates.len(), 27);
    assert_eq!(&candidates[..3], &[Square(4, 4), Square(5, 5), Square(6, 6)]);
    // the up-right diagonal runs to the corner
    assert_eq!(candidates[3], Square(7, 7));
    // orthogonal rays follow the four diagonals
    assert!(candidates[..13].iter().all(|sq| sq.0 != 3 && sq.1 != 3));
}

#[test]
fn test_king_candidates_include_castling() {
    let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let candidates = board.candidate_squares(Square(0, 4));
    let n = candidates.len();
    assert_eq!(&candidates[n - 2..], &[Square(0, 6), Square(0, 2)]);
}

#[test]
fn test_pawn_diagonals_emitted_but_rejected_when_empty() {
    let board = Board::new();
    let candidates = board.candidate_squares(Square(1, 4));
    assert_eq!(
        candidates,
        vec![Square(2, 4), Square(3, 4), Square(2, 3), Square(2, 5)]
    );
    assert_eq!(
        board.candidate_destinations(Square(1, 4)),
        vec![Square(2, 4), Square(3, 4)]
    );
}

// ============================================================================
// Legal destinations against legal move lists
// ============================================================================

fn assert_destinations_match_legal_moves(board: &Board) {
    let moves = board.legal_moves();
    for (from, _) in board.pieces_of(board.side_to_move()) {
        let expected: Vec<Square> = moves
            .iter()
            .filter(|mv| mv.from == from)
            .map(|mv| mv.to)
            .collect();
        assert_eq!(
            board.legal_destinations(from),
            expected,
            "destinations of {from} in {}",
            board.to_fen()
        );
    }
}

#[test]
fn test_legal_destinations_match_legal_moves() {
    for fen in [
        crate::board::START_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1",
    ] {
        assert_destinations_match_legal_moves(&Board::from_fen(fen));
    }
}

#[test]
fn test_double_check_only_king_moves() {
    // rook on e8 and bishop on b4 both check the king on e1
    let board = Board::from_fen("4r2k/8/8/8/1b6/8/6N1/R3K3 w Q - 0 1");
    assert_eq!(board.checks(Color::White).len(), 2);
    assert_eq!(board.game_state(), GameState::Check);
    for mv in &board.legal_moves() {
        assert_eq!(mv.from, Square(0, 4), "{mv} is not a king move");
    }
    assert!(board.legal_destinations(Square(1, 6)).is_empty());
    assert!(board.legal_destinations(Square(0, 0)).is_empty());
}

#[test]
fn test_single_check_block_or_capture() {
    // bishop on b4 checks e1; the knight on b1 can block, the rook on a4 can capture
    let board = Board::from_fen("7k/8/8/8/Rb6/8/8/1N2K3 w - - 0 1");
    assert_eq!(board.checks(Color::White).len(), 1);
    assert_eq!(board.legal_destinations(Square(3, 0)), vec![Square(3, 1)]);
    assert_eq!(
        board.legal_destinations(Square(0, 1)),
        vec![Square(1, 3), Square(2, 2)]
    );
}

#[test]
fn test_pinned_piece_moves_along_pin() {
    // rook on e2 pinned by the rook on e8
    let board = Board::from_fen("4r2k/8/8/8/8/8/4R3/4K3 w - - 0 1");
    let pins = board.pins(Color::White);
    assert_eq!(pins.len(), 1);
    assert_eq!(pins[0].square, Square(1, 4));
    let destinations = board.legal_destinations(Square(1, 4));
    assert!(destinations.iter().all(|sq| sq.1 == 4));
    assert_eq!(destinations.len(), 6);
    assert_eq!(*destinations.last().unwrap(), Square(7, 4));
}
