use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::{
    castle_side, file_to_index, rank_to_index, Board, BoardBuilder, CastlingRights, Color, Move,
    Piece, Square,
};

/// FEN of the standard starting position
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    /// Parse a board position from FEN notation.
    ///
    /// Ranks are listed from 8 down to 1, so the first FEN rank fills row 7.
    /// Moved flags are derived from the castling field and pawn ranks. The
    /// halfmove and fullmove fields are accepted and ignored.
    ///
    /// # Errors
    /// Returns `FenError` for malformed fields or a position without exactly one
    /// king per side.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let mut builder = BoardBuilder::new();

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidRankCount { found: ranks.len() });
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let row = 7 - rank_idx;
            let mut file = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    continue;
                }
                let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                if file >= 8 {
                    return Err(FenError::InvalidFileCount {
                        rank: row + 1,
                        files: file + 1,
                    });
                }
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                builder = builder.piece(Square(row, file), color, piece);
                file += 1;
            }
            if file != 8 {
                return Err(FenError::InvalidFileCount {
                    rank: row + 1,
                    files: file,
                });
            }
        }

        let side = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };
        builder = builder.side_to_move(side);

        let mut rights = CastlingRights::none();
        if parts[2] != "-" {
            for c in parts[2].chars() {
                let (color, kingside) =
                    castle_side(c).ok_or(FenError::InvalidCastling { char: c })?;
                rights.set(color, kingside);
            }
        }
        builder = builder.castling(rights);

        if parts[3] != "-" {
            let invalid = || FenError::InvalidEnPassant {
                found: parts[3].to_string(),
            };
            let target: Square = parts[3].parse().map_err(|_| invalid())?;
            // the double-stepping pawn stands one row beyond the skipped square
            let mover = side.opponent();
            let pawn = target
                .offset(mover.pawn_direction(), 0)
                .filter(|pawn| pawn.0 == side.en_passant_rank())
                .ok_or_else(invalid)?;
            builder = builder.en_passant_pawn(pawn);
        }

        Ok(builder.build()?)
    }

    /// Parse a board position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("Invalid FEN string")
    }

    /// Convert the board position to FEN notation.
    ///
    /// Clocks are not tracked and are always written as `0 1`.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for row in (0..8).rev() {
            let mut rank = String::new();
            let mut empty = 0;
            for col in 0..8 {
                match self.occupant(row, col) {
                    Some(occupant) => {
                        if empty > 0 {
                            rank.push_str(&empty.to_string());
                            empty = 0;
                        }
                        rank.push(occupant.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                rank.push_str(&empty.to_string());
            }
            rows.push(rank);
        }

        let active = if self.white_to_move() { "w" } else { "b" };
        let ep = self
            .en_passant_target()
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} 0 1",
            rows.join("/"),
            active,
            self.castling_rights().to_fen_field(),
            ep
        )
    }

    /// Coordinate notation for `mv` in this position, with a `q` suffix when a
    /// pawn reaches the last rank
    #[must_use]
    pub fn move_to_uci(&self, mv: Move) -> String {
        if self.is_promotion(mv) {
            format!("{mv}q")
        } else {
            mv.to_string()
        }
    }

    /// Whether `mv` takes a pawn to its last rank
    #[must_use]
    pub fn is_promotion(&self, mv: Move) -> bool {
        self.occupant_at(mv.from)
            .is_some_and(|o| o.piece == Piece::Pawn && mv.to.0 == o.color.pawn_promotion_rank())
    }

    /// Parse a move in coordinate notation (e.g., "e2e4", "e7e8n") and return
    /// it only if it is legal here.
    ///
    /// # Errors
    /// `MoveParseError` for malformed text; `Ok(None)` for a well-formed but
    /// illegal move.
    pub fn parse_move(&self, text: &str) -> Result<Option<(Move, Option<Piece>)>, MoveParseError> {
        let (mv, promotion) = parse_coordinate_move(text)?;
        Ok(self.is_legal(mv).then_some((mv, promotion)))
    }
}

/// Parse coordinate notation into a move and optional promotion piece.
///
/// Rank digit `d` maps to row `d - 1` and file letter to column, the inverse of
/// `Move`'s `Display`.
///
/// # Errors
/// Returns `MoveParseError` for wrong length, bad squares, or a promotion letter
/// other than q, r, b, n.
pub fn parse_coordinate_move(text: &str) -> Result<(Move, Option<Piece>), MoveParseError> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() < 4 || chars.len() > 5 {
        return Err(MoveParseError::InvalidLength { len: chars.len() });
    }

    let valid_square =
        |file: char, rank: char| ('a'..='h').contains(&file) && ('1'..='8').contains(&rank);
    if !valid_square(chars[0], chars[1]) || !valid_square(chars[2], chars[3]) {
        return Err(MoveParseError::InvalidSquare {
            notation: text.to_string(),
        });
    }

    let from = Square(rank_to_index(chars[1]), file_to_index(chars[0]));
    let to = Square(rank_to_index(chars[3]), file_to_index(chars[2]));

    let promotion = match chars.get(4) {
        None => None,
        Some(&c) => match Piece::from_char(c) {
            Some(piece @ (Piece::Queen | Piece::Rook | Piece::Bishop | Piece::Knight)) => {
                Some(piece)
            }
            _ => return Err(MoveParseError::InvalidPromotion { char: c }),
        },
    };

    Ok((Move::new(from, to), promotion))
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}
