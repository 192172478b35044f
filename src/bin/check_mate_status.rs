use std::env;
use std::process::ExitCode;

use chess_core::uci::{format_uci_move, try_parse_position_command};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("usage: check_mate_status <move1> <move2> ...");
        return ExitCode::FAILURE;
    }

    let mut parts: Vec<String> = vec!["position".into(), "startpos".into(), "moves".into()];
    parts.extend(args);

    let board = match try_parse_position_command(&parts) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let legal_moves = board.legal_moves();
    println!("side_to_move: {}", board.side_to_move());
    println!("state: {:?}", board.game_state());
    println!("legal_moves: {}", legal_moves.len());
    println!("checkmate: {}", board.is_checkmate());
    println!("stalemate: {}", board.is_stalemate());
    for &mv in &legal_moves {
        println!("{}", format_uci_move(&board, mv));
    }
    ExitCode::SUCCESS
}
