use std::fmt;

use crate::board::Move;

use super::SearchResult;

/// Summary of a finished search, in the shape of a UCI `info` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchInfo {
    pub depth: u32,
    pub score: i32,
    pub nodes: u64,
    pub time_ms: u128,
    pub best_move: Option<Move>,
}

impl SearchInfo {
    #[must_use]
    pub fn from_result(result: &SearchResult, time_ms: u128) -> Self {
        SearchInfo {
            depth: result.depth,
            score: result.score,
            nodes: result.nodes,
            time_ms,
            best_move: result.best_move,
        }
    }
}

impl fmt::Display for SearchInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "info depth {} score cp {} nodes {} time {}",
            self.depth, self.score, self.nodes, self.time_ms
        )?;
        if let Some(mv) = self.best_move {
            write!(f, " pv {mv}")?;
        }
        Ok(())
    }
}

pub trait SearchLogger {
    fn info(&self, info: &SearchInfo);
}

pub struct StdoutLogger;

impl SearchLogger for StdoutLogger {
    fn info(&self, info: &SearchInfo) {
        println!("{info}");
    }
}

/// Forwards search summaries to the `log` facade at debug level
pub struct LogFacadeLogger;

impl SearchLogger for LogFacadeLogger {
    fn info(&self, info: &SearchInfo) {
        ::log::debug!("{info}");
    }
}
