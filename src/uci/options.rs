use std::io::{self, Write};

use crate::board::SearchConfig;

/// Deepest search a front end may request
pub const MAX_DEPTH: u32 = 8;
/// Most root worker threads a front end may request
pub const MAX_THREADS: usize = 64;

/// Engine options settable through `setoption`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UciOptions {
    pub search: SearchConfig,
}

impl UciOptions {
    #[must_use]
    pub fn new(search: SearchConfig) -> Self {
        UciOptions { search }
    }

    /// Identification and option list answering `uci`
    pub fn print(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "id name chess_core")?;
        writeln!(out, "id author chess_core developers")?;
        writeln!(
            out,
            "option name Depth type spin default {} min 1 max {MAX_DEPTH}",
            self.search.depth
        )?;
        writeln!(
            out,
            "option name Threads type spin default {} min 1 max {MAX_THREADS}",
            self.search.threads
        )?;
        writeln!(
            out,
            "option name EvalCache type check default {}",
            self.search.eval_cache
        )?;
        writeln!(out, "uciok")
    }

    /// Apply one option; unknown names and unparsable values are ignored.
    ///
    /// Returns whether anything changed.
    pub fn apply_setoption(&mut self, name: &str, value: Option<&str>) -> bool {
        let before = self.search;
        let normalized = name.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "depth" => {
                if let Some(v) = value.and_then(|v| v.trim().parse::<u32>().ok()) {
                    self.search.depth = v.clamp(1, MAX_DEPTH);
                }
            }
            "threads" => {
                if let Some(v) = value.and_then(|v| v.trim().parse::<usize>().ok()) {
                    self.search.threads = v.clamp(1, MAX_THREADS);
                }
            }
            "evalcache" => {
                if let Some(v) = value {
                    self.search.eval_cache =
                        matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1");
                }
            }
            _ => {}
        }
        self.search != before
    }
}

/// Split `setoption name <name...> [value <value...>]` into name and value
#[must_use]
pub fn parse_setoption(parts: &[String]) -> Option<(String, Option<String>)> {
    if parts.first().map(String::as_str) != Some("setoption") {
        return None;
    }

    let mut name_parts: Vec<&str> = Vec::new();
    let mut value_parts: Vec<&str> = Vec::new();
    let mut mode = "";

    for part in parts.iter().skip(1) {
        match part.as_str() {
            "name" => mode = "name",
            "value" => mode = "value",
            other => match mode {
                "name" => name_parts.push(other),
                "value" => value_parts.push(other),
                _ => {}
            },
        }
    }

    if name_parts.is_empty() {
        return None;
    }

    let name = name_parts.join(" ");
    let value = if value_parts.is_empty() {
        None
    } else {
        Some(value_parts.join(" "))
    };

    Some((name, value))
}
