use std::fmt;

use super::{Board, Color};

impl fmt::Display for Board {
    /// Text grid, rank 8 at the top, followed by turn, en passant file and king squares
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  +---+---+---+---+---+---+---+---+")?;
        for row in (0..8).rev() {
            write!(f, "{} |", row + 1)?;
            for col in 0..8 {
                let ch = self.occupant(row, col).map_or(' ', |o| o.to_fen_char());
                write!(f, " {ch} |")?;
            }
            writeln!(f, "\n  +---+---+---+---+---+---+---+---+")?;
        }
        writeln!(f, "    a   b   c   d   e   f   g   h")?;
        writeln!(f, "Turn: {}", self.side_to_move())?;
        match self.en_passant_file() {
            Some(file) => writeln!(f, "En passant file: {}", (b'a' + file as u8) as char)?,
            None => writeln!(f, "En passant file: -")?,
        }
        write!(
            f,
            "Kings: white {} black {}",
            self.king_square(Color::White),
            self.king_square(Color::Black)
        )
    }
}
