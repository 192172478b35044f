use super::options::MAX_DEPTH;

/// One line of input from a UCI front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    Position(Vec<String>),
    Go(Vec<String>),
    Perft(usize),
    SetOption(Vec<String>),
    /// `d`: print the board
    Display,
    Stop,
    Quit,
    Unknown(String),
}

/// Tokenize a line; `None` for blank input
#[must_use]
pub fn parse_uci_command(line: &str) -> Option<UciCommand> {
    let trimmed = line.trim();
    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    let first = *parts.first()?;

    let owned_parts = || parts.iter().map(|p| (*p).to_string()).collect::<Vec<String>>();

    let cmd = match first {
        "uci" => UciCommand::Uci,
        "isready" => UciCommand::IsReady,
        "ucinewgame" => UciCommand::UciNewGame,
        "position" => UciCommand::Position(owned_parts()),
        "go" => UciCommand::Go(owned_parts()),
        "perft" => {
            let depth = parts.get(1).and_then(|v| v.parse::<usize>().ok()).unwrap_or(1);
            UciCommand::Perft(depth)
        }
        "setoption" => UciCommand::SetOption(owned_parts()),
        "d" => UciCommand::Display,
        "stop" => UciCommand::Stop,
        "quit" => UciCommand::Quit,
        _ => UciCommand::Unknown(trimmed.to_string()),
    };

    Some(cmd)
}

/// Depth requested by `go depth N`, if any, clamped to the `Depth` option range
#[must_use]
pub fn go_depth(parts: &[String]) -> Option<u32> {
    parts
        .iter()
        .position(|p| p == "depth")
        .and_then(|i| parts.get(i + 1))
        .and_then(|v| v.parse::<u32>().ok())
        .map(|depth| depth.clamp(1, MAX_DEPTH))
}
