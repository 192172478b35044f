//! Universal Chess Interface (UCI) text protocol.
//!
//! Moves cross this boundary in coordinate notation (`e2e4`, `e7e8n`): file
//! letter `a + col`, rank digit `row + 1`. Positions go out as FEN, whose first
//! rank field is row 7. Exporting a move and reading it back yields the same
//! (fromRow, fromCol, toRow, toCol).

use std::fmt;
use std::io::{self, BufRead, Write};
use std::time::Instant;

use log::{debug, warn};

use crate::board::{
    find_best_move_logged, parse_coordinate_move, Board, FenError, Move, MoveError,
    MoveParseError, Piece, SearchLogger, StdoutLogger,
};

pub mod command;
pub mod options;

use command::{go_depth, parse_uci_command, UciCommand};
use options::{parse_setoption, UciOptions};

/// Error type for UCI position command and engine reply parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciError {
    /// Invalid FEN string
    InvalidFen(FenError),
    /// Malformed move in the move list or a `bestmove` line
    InvalidMove {
        move_str: String,
        error: MoveParseError,
    },
    /// Well-formed move that the position does not allow
    IllegalMove { move_str: String, error: MoveError },
    /// Missing required parts in the command
    MissingParts,
}

impl fmt::Display for UciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UciError::InvalidFen(e) => write!(f, "Invalid FEN: {e}"),
            UciError::InvalidMove { move_str, error } => {
                write!(f, "Invalid move '{move_str}': {error}")
            }
            UciError::IllegalMove { move_str, error } => {
                write!(f, "Illegal move '{move_str}': {error}")
            }
            UciError::MissingParts => write!(f, "Missing required parts in command"),
        }
    }
}

impl std::error::Error for UciError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UciError::InvalidFen(e) => Some(e),
            UciError::InvalidMove { error, .. } => Some(error),
            UciError::IllegalMove { error, .. } => Some(error),
            UciError::MissingParts => None,
        }
    }
}

impl From<FenError> for UciError {
    fn from(e: FenError) -> Self {
        UciError::InvalidFen(e)
    }
}

/// Coordinate notation for `mv` played in `board`
#[must_use]
pub fn format_uci_move(board: &Board, mv: Move) -> String {
    board.move_to_uci(mv)
}

/// `position fen ...` line describing `board`, for an external engine
#[must_use]
pub fn position_command(board: &Board) -> String {
    format!("position fen {}", board.to_fen())
}

/// Read the move out of an engine's `bestmove` reply.
///
/// `bestmove 0000` and `bestmove (none)` mean the engine has no move and give
/// `Ok(None)`. A trailing `ponder ...` is ignored.
///
/// # Errors
/// `MissingParts` if the line is not a `bestmove` reply, `InvalidMove` if the
/// move text is malformed.
pub fn parse_bestmove_line(line: &str) -> Result<Option<(Move, Option<Piece>)>, UciError> {
    let mut parts = line.split_whitespace();
    if parts.next() != Some("bestmove") {
        return Err(UciError::MissingParts);
    }
    let text = parts.next().ok_or(UciError::MissingParts)?;
    if text == "0000" || text == "(none)" {
        return Ok(None);
    }
    parse_coordinate_move(text)
        .map(Some)
        .map_err(|error| UciError::InvalidMove {
            move_str: text.to_string(),
            error,
        })
}

/// Play a coordinate-notation move on `board`, applying any promotion choice.
///
/// # Errors
/// `InvalidMove` for malformed text or a promotion letter on a move that does
/// not promote, `IllegalMove` if the position rejects it.
pub fn apply_uci_move(board: &mut Board, text: &str) -> Result<Move, UciError> {
    let (mv, promotion) = parse_coordinate_move(text).map_err(|error| UciError::InvalidMove {
        move_str: text.to_string(),
        error,
    })?;
    if let (Some(piece), false) = (promotion, board.is_promotion(mv)) {
        return Err(UciError::InvalidMove {
            move_str: text.to_string(),
            error: MoveParseError::InvalidPromotion {
                char: piece.to_char(),
            },
        });
    }
    let illegal = |error| UciError::IllegalMove {
        move_str: text.to_string(),
        error,
    };
    board.try_move(mv).map_err(illegal)?;
    if let Some(piece) = promotion {
        if board.pending_promotion().is_some() {
            board.replace_promoted_piece(piece).map_err(illegal)?;
        }
    }
    Ok(mv)
}

/// Build the position named by a `position` command.
///
/// Supports "position startpos" and "position fen <fen>", optionally followed
/// by "moves <move1> <move2> ...". The FEN may omit its clock fields.
///
/// # Errors
/// Returns `UciError` for a missing position, a bad FEN, or a bad move.
pub fn try_parse_position_command(parts: &[String]) -> Result<Board, UciError> {
    let moves_idx = parts.iter().position(|p| p == "moves").unwrap_or(parts.len());

    let mut board = match parts.get(1).map(String::as_str) {
        Some("startpos") => Board::new(),
        Some("fen") => {
            if moves_idx <= 2 {
                return Err(UciError::MissingParts);
            }
            Board::try_from_fen(&parts[2..moves_idx].join(" "))?
        }
        _ => return Err(UciError::MissingParts),
    };

    for text in parts.iter().skip(moves_idx + 1) {
        apply_uci_move(&mut board, text)?;
    }
    Ok(board)
}

/// One front-end connection: the current position and option values
pub struct UciSession {
    board: Board,
    options: UciOptions,
    logger: Box<dyn SearchLogger>,
}

impl Default for UciSession {
    fn default() -> Self {
        Self::new()
    }
}

impl UciSession {
    /// Session reporting search summaries as `info` lines on stdout
    #[must_use]
    pub fn new() -> Self {
        Self::with_logger(Box::new(StdoutLogger))
    }

    #[must_use]
    pub fn with_logger(logger: Box<dyn SearchLogger>) -> Self {
        UciSession {
            board: Board::new(),
            options: UciOptions::default(),
            logger,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn options(&self) -> &UciOptions {
        &self.options
    }

    /// Handle one input line, writing replies to `out`.
    ///
    /// Returns `Ok(false)` once `quit` is received.
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let Some(cmd) = parse_uci_command(line) else {
            return Ok(true);
        };

        match cmd {
            UciCommand::Uci => self.options.print(out)?,
            UciCommand::IsReady => writeln!(out, "readyok")?,
            UciCommand::UciNewGame => self.board = Board::new(),
            UciCommand::Position(parts) => match try_parse_position_command(&parts) {
                Ok(board) => self.board = board,
                Err(e) => {
                    warn!("position command rejected: {e}");
                    writeln!(out, "info string error {e}")?;
                }
            },
            UciCommand::Go(parts) => {
                let depth = go_depth(&parts).unwrap_or(self.options.search.depth);
                let config = self.options.search.with_depth(depth);
                let result = find_best_move_logged(
                    &self.board,
                    self.board.side_to_move(),
                    &config,
                    self.logger.as_ref(),
                );
                match result.best_move {
                    Some(mv) => writeln!(out, "bestmove {}", format_uci_move(&self.board, mv))?,
                    None => writeln!(out, "bestmove 0000")?,
                }
            }
            UciCommand::Perft(depth) => {
                let start = Instant::now();
                let nodes = self.board.perft(depth);
                writeln!(
                    out,
                    "info string perft depth {depth} nodes {nodes} time_ms {}",
                    start.elapsed().as_millis()
                )?;
            }
            UciCommand::SetOption(parts) => match parse_setoption(&parts) {
                Some((name, value)) => {
                    if self.options.apply_setoption(&name, value.as_deref()) {
                        debug!("option {name} set; search config now {:?}", self.options.search);
                    }
                }
                None => writeln!(out, "info string error {}", UciError::MissingParts)?,
            },
            UciCommand::Display => {
                writeln!(out, "{}", self.board)?;
                writeln!(out, "Fen: {}", self.board.to_fen())?;
            }
            UciCommand::Stop => {}
            UciCommand::Quit => return Ok(false),
            UciCommand::Unknown(text) => debug!("ignoring unknown command: {text}"),
        }

        out.flush()?;
        Ok(true)
    }
}

/// Serve UCI on stdin/stdout until `quit` or end of input
pub fn run_uci_loop() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session = UciSession::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("stdin read failed: {e}");
                break;
            }
        };
        match session.handle_line(&line, &mut stdout) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                warn!("stdout write failed: {e}");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{LogFacadeLogger, Square};

    fn owned(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    fn session() -> UciSession {
        UciSession::with_logger(Box::new(LogFacadeLogger))
    }

    fn run(session: &mut UciSession, line: &str) -> String {
        let mut out = Vec::new();
        session.handle_line(line, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_position_startpos_with_moves() {
        let board =
            try_parse_position_command(&owned("position startpos moves e2e4 e7e5")).unwrap();
        assert_eq!(
            board.to_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 1"
        );
    }

    #[test]
    fn test_position_fen_without_clocks() {
        let board =
            try_parse_position_command(&owned("position fen 4k3/8/8/8/8/8/8/4K3 b - - moves e8d7"))
                .unwrap();
        assert_eq!(board.king_square(crate::board::Color::Black), Square(6, 3));
    }

    #[test]
    fn test_position_errors() {
        assert_eq!(
            try_parse_position_command(&owned("position")),
            Err(UciError::MissingParts)
        );
        assert_eq!(
            try_parse_position_command(&owned("position fen moves e2e4")),
            Err(UciError::MissingParts)
        );
        assert!(matches!(
            try_parse_position_command(&owned("position startpos moves e2e5")),
            Err(UciError::IllegalMove { .. })
        ));
        assert!(matches!(
            try_parse_position_command(&owned("position startpos moves e2")),
            Err(UciError::InvalidMove { .. })
        ));
        assert!(matches!(
            try_parse_position_command(&owned("position fen 8/8/8 w - -")),
            Err(UciError::InvalidFen(_))
        ));
    }

    #[test]
    fn test_promotion_choice_in_move_list() {
        let board =
            try_parse_position_command(&owned("position fen 7k/P7/8/8/8/8/8/K7 w - - moves a7a8n"))
                .unwrap();
        assert_eq!(
            board.piece_at(Square(7, 0)),
            Some((crate::board::Color::White, Piece::Knight))
        );
        assert_eq!(board.pending_promotion(), None);
    }

    #[test]
    fn test_promotion_letter_requires_promotion() {
        let mut board = Board::new();
        let err = apply_uci_move(&mut board, "e2e4q").unwrap_err();
        assert!(matches!(
            err,
            UciError::InvalidMove {
                error: MoveParseError::InvalidPromotion { char: 'q' },
                ..
            }
        ));
        assert_eq!(board, Board::new());

        let err = try_parse_position_command(&owned("position startpos moves g1f3n")).unwrap_err();
        assert!(matches!(err, UciError::InvalidMove { .. }));
    }

    #[test]
    fn test_parse_bestmove_line() {
        let (mv, promo) = parse_bestmove_line("bestmove g1f3 ponder g8f6").unwrap().unwrap();
        assert_eq!(mv.coords(), (0, 6, 2, 5));
        assert_eq!(promo, None);
        assert_eq!(parse_bestmove_line("bestmove 0000"), Ok(None));
        assert_eq!(parse_bestmove_line("bestmove (none)"), Ok(None));
        assert_eq!(parse_bestmove_line("info depth 1"), Err(UciError::MissingParts));
        assert!(matches!(
            parse_bestmove_line("bestmove z9z9"),
            Err(UciError::InvalidMove { .. })
        ));
    }

    #[test]
    fn test_position_command_exports_fen() {
        assert_eq!(
            position_command(&Board::new()),
            "position fen rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
    }

    #[test]
    fn test_session_handshake_and_quit() {
        let mut s = session();
        assert!(run(&mut s, "uci").ends_with("uciok\n"));
        assert_eq!(run(&mut s, "isready"), "readyok\n");
        assert_eq!(run(&mut s, ""), "");
        let mut out = Vec::new();
        assert!(!s.handle_line("quit", &mut out).unwrap());
    }

    #[test]
    fn test_session_go_reports_legal_bestmove() {
        let mut s = session();
        run(&mut s, "setoption name Depth value 1");
        assert_eq!(s.options().search.depth, 1);
        run(&mut s, "position startpos moves e2e4");
        let reply = run(&mut s, "go");
        let (mv, _) = parse_bestmove_line(reply.trim()).unwrap().unwrap();
        assert!(s.board().is_legal(mv));
    }

    #[test]
    fn test_session_go_without_moves() {
        let mut s = session();
        run(&mut s, "position fen k7/8/1QK5/8/8/8/8/8 b - - 0 1");
        assert_eq!(run(&mut s, "go depth 2"), "bestmove 0000\n");
    }

    #[test]
    fn test_session_bad_position_keeps_board() {
        let mut s = session();
        run(&mut s, "position startpos moves e2e4");
        let before = *s.board();
        let reply = run(&mut s, "position startpos moves e2e5");
        assert!(reply.starts_with("info string error Illegal move 'e2e5'"));
        assert_eq!(*s.board(), before);
    }

    #[test]
    fn test_session_display_and_perft() {
        let mut s = session();
        let text = run(&mut s, "d");
        assert!(text.contains("Turn: White"));
        assert!(text.contains("Fen: rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"));
        assert!(run(&mut s, "perft 2").starts_with("info string perft depth 2 nodes 400 "));
    }
}
