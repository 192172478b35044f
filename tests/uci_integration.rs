use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};

use chess_core::board::{Board, Piece};
use chess_core::uci::{
    format_uci_move, parse_bestmove_line, position_command, try_parse_position_command,
};

fn owned(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

fn run_engine(input: &[u8]) -> String {
    let exe = env!("CARGO_BIN_EXE_chess_core");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn engine binary");

    child.stdin.as_mut().unwrap().write_all(input).unwrap();
    let output = child.wait_with_output().expect("failed to read output");
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn assert_bestmove_legal(bestmove: &str, position: &str) {
    let board = try_parse_position_command(&owned(position)).expect("valid position");
    let parsed = parse_bestmove_line(bestmove.trim()).expect("bestmove should parse");
    let (mv, _) = parsed.expect("engine returned null move");
    assert!(board.is_legal(mv), "bestmove not legal in position: {}", bestmove);
}

#[test]
fn uci_smoke_test_returns_legal_move() {
    let exe = env!("CARGO_BIN_EXE_chess_core");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn engine binary");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let mut reader = BufReader::new(stdout);

    stdin
        .write_all(b"uci\nisready\nposition startpos moves e2e4\ngo depth 2\n")
        .unwrap();

    let mut output = String::new();
    let mut bestmove_line = None;
    loop {
        let mut line = String::new();
        let bytes = reader.read_line(&mut line).expect("read failed");
        if bytes == 0 {
            break;
        }
        output.push_str(&line);
        if line.starts_with("bestmove") {
            bestmove_line = Some(line);
            break;
        }
    }

    stdin.write_all(b"quit\n").unwrap();
    let _ = child.wait();

    assert!(output.contains("uciok"));
    assert!(output.contains("readyok"));
    assert!(output.contains("info depth 2"));

    let bestmove = bestmove_line.expect("no bestmove found");
    assert_bestmove_legal(&bestmove, "position startpos moves e2e4");
}

#[test]
fn uci_reports_options_and_handles_setoption() {
    let stdout = run_engine(
        b"uci\nsetoption name Depth value 1\nsetoption name Threads value 4\n\
          setoption name EvalCache value false\nisready\nposition startpos\ngo\nquit\n",
    );

    assert!(stdout.contains("id name chess_core"));
    assert!(stdout.contains("option name Depth"));
    assert!(stdout.contains("option name Threads"));
    assert!(stdout.contains("option name EvalCache"));
    assert!(stdout.contains("readyok"));
    assert!(stdout.contains("info depth 1 "), "Depth option ignored:\n{stdout}");

    let bestmove = stdout
        .lines()
        .find(|l| l.starts_with("bestmove"))
        .expect("no bestmove found");
    assert_bestmove_legal(bestmove, "position startpos");
}

#[test]
fn uci_checkmated_position_returns_null_move() {
    let stdout = run_engine(
        b"position fen rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3\n\
          go depth 2\nquit\n",
    );
    assert!(stdout.contains("bestmove 0000"), "{stdout}");
}

#[test]
fn uci_illegal_move_is_reported_and_ignored() {
    let stdout = run_engine(b"position startpos moves e2e5\nperft 1\nquit\n");
    assert!(stdout.contains("info string error"));
    assert!(stdout.contains("perft depth 1 nodes 20"));
}

#[test]
fn uci_perft_command_outputs_nodes() {
    let stdout = run_engine(b"uci\nisready\nposition startpos\nperft 2\nquit\n");
    assert!(stdout.contains("perft depth 2 nodes 400"), "perft output missing");
}

#[test]
fn exported_moves_parse_back_to_the_same_move() {
    let boards = [
        Board::new(),
        Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"),
        Board::from_fen("7k/1P6/8/8/8/8/8/K7 w - - 0 1"),
    ];
    for board in boards {
        for &mv in &board.legal_moves() {
            let text = format_uci_move(&board, mv);
            let line = format!("bestmove {text}");
            let (parsed, promotion) = parse_bestmove_line(&line).unwrap().unwrap();
            assert_eq!(parsed.coords(), mv.coords(), "{text}");
            if board.piece_on(mv.from) == Some(Piece::Pawn) && (mv.to.0 == 0 || mv.to.0 == 7) {
                assert_eq!(promotion, Some(Piece::Queen), "{text}");
            } else {
                assert_eq!(promotion, None, "{text}");
            }
        }
    }
}

#[test]
fn position_command_round_trips() {
    let mut board = Board::new();
    for text in ["e2e4", "c7c5", "g1f3", "d7d6"] {
        chess_core::uci::apply_uci_move(&mut board, text).unwrap();
    }
    let exported = position_command(&board);
    let imported = try_parse_position_command(&owned(&exported)).unwrap();
    assert_eq!(imported.to_fen(), board.to_fen());
    assert_eq!(imported.legal_moves().len(), board.legal_moves().len());
}
