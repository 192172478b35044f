//! Attack, check and pin detection by ray scanning from a square.

use super::{Board, Color, Piece, Square};

/// A (row, col) step
pub type Direction = (isize, isize);

pub(crate) const ORTHOGONAL: [Direction; 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];
pub(crate) const DIAGONAL: [Direction; 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

pub(crate) const KNIGHT_OFFSETS: [Direction; 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// A piece that cannot leave the line between its king and an enemy slider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pin {
    pub square: Square,
    /// Step from the king toward the pinned piece
    pub direction: Direction,
}

/// An enemy piece giving check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Check {
    pub attacker: Square,
    pub piece: Piece,
    /// Step from the king toward a checking slider; `None` for contact checks
    pub direction: Option<Direction>,
}

/// Whether a piece standing on a ray with the given step attacks along it
fn ray_matches(piece: Piece, direction: Direction) -> bool {
    let diagonal = direction.0 != 0 && direction.1 != 0;
    if diagonal {
        piece.attacks_diagonally()
    } else {
        piece.attacks_straight()
    }
}

/// Squares strictly between `from` and the first occupied square along `direction`,
/// followed by that square if any
pub(crate) struct Ray<'a> {
    board: &'a Board,
    current: Square,
    direction: Direction,
    done: bool,
}

impl Iterator for Ray<'_> {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.done {
            return None;
        }
        let next = self.current.offset(self.direction.0, self.direction.1)?;
        self.current = next;
        if !self.board.is_empty(next) {
            self.done = true;
        }
        Some(next)
    }
}

impl Board {
    pub(crate) fn ray(&self, from: Square, direction: Direction) -> Ray<'_> {
        Ray {
            board: self,
            current: from,
            direction,
            done: false,
        }
    }

    /// First occupied square along a ray
    fn first_blocker(&self, from: Square, direction: Direction) -> Option<Square> {
        self.ray(from, direction).last().filter(|sq| !self.is_empty(*sq))
    }

    /// Whether any piece of `attacker_color` attacks `square`.
    ///
    /// Scans the eight rays for the first blocker, then the knight offsets, then
    /// the two squares an enemy pawn would attack from.
    #[must_use]
    pub fn is_square_attacked(&self, square: Square, attacker_color: Color) -> bool {
        for direction in ORTHOGONAL.into_iter().chain(DIAGONAL) {
            let Some(blocker) = self.first_blocker(square, direction) else {
                continue;
            };
            let Some(occupant) = self.occupant_at(blocker) else {
                continue;
            };
            if occupant.color != attacker_color {
                continue;
            }
            if ray_matches(occupant.piece, direction) {
                return true;
            }
            let adjacent = blocker.0.abs_diff(square.0) <= 1 && blocker.1.abs_diff(square.1) <= 1;
            if occupant.piece == Piece::King && adjacent {
                return true;
            }
        }

        for (dr, dc) in KNIGHT_OFFSETS {
            if let Some(sq) = square.offset(dr, dc) {
                if self.piece_at(sq) == Some((attacker_color, Piece::Knight)) {
                    return true;
                }
            }
        }

        self.pawn_attackers(square, attacker_color).next().is_some()
    }

    /// Squares holding pawns of `attacker_color` that attack `square`
    fn pawn_attackers(
        &self,
        square: Square,
        attacker_color: Color,
    ) -> impl Iterator<Item = Square> + '_ {
        let dr = -attacker_color.pawn_direction();
        [-1, 1].into_iter().filter_map(move |dc| {
            square
                .offset(dr, dc)
                .filter(|sq| self.piece_at(*sq) == Some((attacker_color, Piece::Pawn)))
        })
    }

    /// Whether `color`'s king is attacked
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.is_square_attacked(self.king_square(color), color.opponent())
    }

    /// Pieces of `color` pinned to their king by an enemy slider
    #[must_use]
    pub fn pins(&self, color: Color) -> Vec<Pin> {
        let king = self.king_square(color);
        let mut pins = Vec::new();
        for direction in ORTHOGONAL.into_iter().chain(DIAGONAL) {
            let Some(candidate) = self.first_blocker(king, direction) else {
                continue;
            };
            if self.color_on(candidate) != Some(color) {
                continue;
            }
            let Some(beyond) = self.first_blocker(candidate, direction) else {
                continue;
            };
            let Some(occupant) = self.occupant_at(beyond) else {
                continue;
            };
            if occupant.color != color && ray_matches(occupant.piece, direction) {
                pins.push(Pin {
                    square: candidate,
                    direction,
                });
            }
        }
        pins
    }

    /// Enemy pieces giving check to `color`'s king.
    ///
    /// Two entries mean double check, where only king moves can escape.
    #[must_use]
    pub fn checks(&self, color: Color) -> Vec<Check> {
        let king = self.king_square(color);
        let enemy = color.opponent();
        let mut checks = Vec::new();

        for direction in ORTHOGONAL.into_iter().chain(DIAGONAL) {
            let Some(blocker) = self.first_blocker(king, direction) else {
                continue;
            };
            if let Some(occupant) = self.occupant_at(blocker) {
                if occupant.color == enemy && ray_matches(occupant.piece, direction) {
                    checks.push(Check {
                        attacker: blocker,
                        piece: occupant.piece,
                        direction: Some(direction),
                    });
                }
            }
        }

        for (dr, dc) in KNIGHT_OFFSETS {
            if let Some(sq) = king.offset(dr, dc) {
                if self.piece_at(sq) == Some((enemy, Piece::Knight)) {
                    checks.push(Check {
                        attacker: sq,
                        piece: Piece::Knight,
                        direction: None,
                    });
                }
            }
        }

        for sq in self.pawn_attackers(king, enemy) {
            checks.push(Check {
                attacker: sq,
                piece: Piece::Pawn,
                direction: None,
            });
        }

        checks
    }

    /// Squares a non-king move can land on to resolve a single check: the
    /// attacker itself and, for sliders, the squares between it and the king.
    #[must_use]
    pub fn blocking_squares(&self, check: &Check, color: Color) -> Vec<Square> {
        match check.direction {
            Some(direction) => self.ray(self.king_square(color), direction).collect(),
            None => vec![check.attacker],
        }
    }
}

/// Whether a move from `from` to `to` stays on the pin line
#[must_use]
pub fn aligns_with_pin(pin: &Pin, from: Square, to: Square) -> bool {
    let dr = to.0 as isize - from.0 as isize;
    let dc = to.1 as isize - from.1 as isize;
    if dr == 0 && dc == 0 {
        return false;
    }
    let (pr, pc) = pin.direction;
    // Parallel when the cross product vanishes.
    dr * pc - dc * pr == 0
}

/// Whether `to` is one of the squares that resolves a single check
#[must_use]
pub fn is_blocking_square(blocking: &[Square], to: Square) -> bool {
    blocking.contains(&to)
}
