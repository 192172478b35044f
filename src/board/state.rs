#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{CastlingRights, Color, Occupant, Piece, Square};

/// Game-flow state derived after every move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameState {
    #[default]
    Active,
    Check,
    Checkmate,
    Stalemate,
}

impl GameState {
    /// Derive the state from the side to move's check status and move availability
    #[inline]
    #[must_use]
    pub const fn derive(in_check: bool, has_legal_moves: bool) -> Self {
        match (in_check, has_legal_moves) {
            (true, true) => GameState::Check,
            (true, false) => GameState::Checkmate,
            (false, true) => GameState::Active,
            (false, false) => GameState::Stalemate,
        }
    }

    /// Checkmate and stalemate end the game
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameState::Checkmate | GameState::Stalemate)
    }
}

const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

pub(crate) const KING_HOME_COL: usize = 4;

/// A chess position.
///
/// The grid owns every piece by value, so copying a `Board` yields a fully
/// independent position. The king cache always equals the kings' grid squares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    pub(crate) squares: [[Option<Occupant>; 8]; 8],
    pub(crate) side_to_move: Color,
    pub(crate) king_squares: [Square; 2],
    /// Pawn that advanced two squares on the previous ply
    pub(crate) en_passant: Option<Square>,
    pub(crate) game_state: GameState,
    /// Square of a pawn auto-promoted to queen on the previous ply
    pub(crate) pending_promotion: Option<Square>,
}

impl Board {
    /// The standard starting position, White to move
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::empty();
        for (col, piece) in BACK_RANK.iter().enumerate() {
            board.set_occupant(Square(0, col), Occupant::new(Color::White, *piece));
            board.set_occupant(Square(1, col), Occupant::new(Color::White, Piece::Pawn));
            board.set_occupant(Square(6, col), Occupant::new(Color::Black, Piece::Pawn));
            board.set_occupant(Square(7, col), Occupant::new(Color::Black, *piece));
        }
        board
    }

    /// A board with no pieces; callers place both kings before use
    pub(crate) fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
            side_to_move: Color::White,
            king_squares: [
                Square(Color::White.back_rank(), KING_HOME_COL),
                Square(Color::Black.back_rank(), KING_HOME_COL),
            ],
            en_passant: None,
            game_state: GameState::Active,
            pending_promotion: None,
        }
    }

    /// Occupant of a square
    #[inline]
    #[must_use]
    pub fn occupant_at(&self, sq: Square) -> Option<Occupant> {
        self.squares[sq.0][sq.1]
    }

    /// Occupant at raw (row, col); `None` for empty or off-board coordinates
    #[must_use]
    pub fn occupant(&self, row: usize, col: usize) -> Option<Occupant> {
        Square::new(row, col).and_then(|sq| self.occupant_at(sq))
    }

    /// Color and kind of the piece on a square
    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.occupant_at(sq).map(|o| (o.color, o.piece))
    }

    /// Get just the piece type on a square (without color)
    #[must_use]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.occupant_at(sq).map(|o| o.piece)
    }

    /// Get just the color of the piece on a square
    #[must_use]
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.occupant_at(sq).map(|o| o.color)
    }

    #[inline]
    pub(crate) fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.0][sq.1].is_none()
    }

    /// Put an occupant on a square, destroying any previous one
    pub(crate) fn set_occupant(&mut self, sq: Square, occupant: Occupant) {
        self.squares[sq.0][sq.1] = Some(occupant);
        if occupant.piece == Piece::King {
            self.king_squares[occupant.color.index()] = sq;
        }
    }

    pub(crate) fn take_occupant(&mut self, sq: Square) -> Option<Occupant> {
        self.squares[sq.0][sq.1].take()
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn white_to_move(&self) -> bool {
        self.side_to_move == Color::White
    }

    #[inline]
    #[must_use]
    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    /// Cached king square for a color
    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    /// Pawn that may be captured en passant on this ply
    #[inline]
    #[must_use]
    pub fn en_passant_pawn(&self) -> Option<Square> {
        self.en_passant
    }

    /// Column of the en passant pawn
    #[inline]
    #[must_use]
    pub fn en_passant_file(&self) -> Option<usize> {
        self.en_passant.map(Square::col)
    }

    /// Square a capturing pawn lands on, the one the double-stepping pawn skipped
    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant.and_then(|pawn| {
            let mover = self.color_on(pawn)?;
            pawn.offset(-mover.pawn_direction(), 0)
        })
    }

    /// Square of a pawn promoted on the previous ply that may still be swapped
    #[inline]
    #[must_use]
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }

    /// Castling availability read off the king and rook moved flags
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        let mut rights = CastlingRights::none();
        for color in Color::BOTH {
            let rank = color.back_rank();
            let king_home = self
                .occupant_at(Square(rank, KING_HOME_COL))
                .is_some_and(|o| o.is(color, Piece::King) && !o.has_moved);
            if !king_home {
                continue;
            }
            for (rook_col, kingside) in [(7, true), (0, false)] {
                let rook_home = self
                    .occupant_at(Square(rank, rook_col))
                    .is_some_and(|o| o.is(color, Piece::Rook) && !o.has_moved);
                if rook_home {
                    rights.set(color, kingside);
                }
            }
        }
        rights
    }

    /// Occupied squares of one color in row-major order
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Occupant)> + '_ {
        self.occupied_squares()
            .filter(move |(_, occupant)| occupant.color == color)
    }

    /// All occupied squares in row-major order
    pub fn occupied_squares(&self) -> impl Iterator<Item = (Square, Occupant)> + '_ {
        (0..64).filter_map(move |idx| {
            let sq = Square::from_index(idx);
            self.occupant_at(sq).map(|o| (sq, o))
        })
    }

    /// Count pieces of a kind and color
    #[must_use]
    pub fn count(&self, color: Color, piece: Piece) -> usize {
        self.pieces_of(color).filter(|(_, o)| o.piece == piece).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position_layout() {
        let board = Board::new();
        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(board.king_square(Color::White), Square(0, 4));
        assert_eq!(board.king_square(Color::Black), Square(7, 4));
        assert_eq!(board.piece_at(Square(0, 3)), Some((Color::White, Piece::Queen)));
        assert_eq!(board.piece_at(Square(6, 0)), Some((Color::Black, Piece::Pawn)));
        assert_eq!(board.occupied_squares().count(), 32);
        assert_eq!(board.occupant(8, 0), None);
        assert_eq!(board.castling_rights(), CastlingRights::all());
        assert_eq!(board.game_state(), GameState::Active);
    }

    #[test]
    fn test_game_state_table() {
        assert_eq!(GameState::derive(true, true), GameState::Check);
        assert_eq!(GameState::derive(true, false), GameState::Checkmate);
        assert_eq!(GameState::derive(false, true), GameState::Active);
        assert_eq!(GameState::derive(false, false), GameState::Stalemate);
        assert!(GameState::Stalemate.is_terminal());
        assert!(!GameState::Check.is_terminal());
    }

    #[test]
    fn test_copy_is_independent() {
        let original = Board::new();
        let mut copy = original;
        copy.take_occupant(Square(1, 4));
        assert!(copy.is_empty(Square(1, 4)));
        assert!(original.occupant_at(Square(1, 4)).is_some());
    }

    #[test]
    fn test_castling_rights_follow_moved_flags() {
        let mut board = Board::new();
        board.set_occupant(Square(0, 7), Occupant::moved(Color::White, Piece::Rook));
        let rights = board.castling_rights();
        assert!(!rights.has(Color::White, true));
        assert!(rights.has(Color::White, false));
        assert!(rights.has(Color::Black, true));
    }
}
