//! Fixed-depth minimax search with alpha-beta pruning.
//!
//! - Every node searches an independent copy of its parent position
//! - Root moves are tried in legal-move order and the first maximum wins
//! - Mates score `MATE_SCORE + depth` so faster mates rank higher
//! - Static evaluations can be cached by Zobrist key
//! - Root moves can be split across scoped threads

mod log;
mod params;
mod smp;

use std::time::Instant;

use ::log::{debug, warn};

use crate::tt::EvalCache;

use super::eval::MATE_SCORE;
use super::{Board, Color, Move};
pub use self::log::{LogFacadeLogger, SearchInfo, SearchLogger, StdoutLogger};
pub use params::{SearchConfig, DEFAULT_DEPTH};

/// Result of a search.
///
/// `best_move` is `None` when the side has no legal move, or when the other
/// side is in check so the move cannot pass to `color`; the caller must
/// consult the game state instead of applying anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
    pub nodes: u64,
    pub depth: u32,
}

impl SearchResult {
    /// The move as a (fromRow, fromCol, toRow, toCol) tuple
    #[must_use]
    pub fn coords(&self) -> Option<(usize, usize, usize, usize)> {
        self.best_move.map(Move::coords)
    }

    #[must_use]
    pub fn is_no_move(&self) -> bool {
        self.best_move.is_none()
    }
}

/// Per-thread search state
pub(crate) struct Searcher<'a> {
    ai_color: Color,
    cache: Option<&'a EvalCache>,
    pub(crate) nodes: u64,
}

impl<'a> Searcher<'a> {
    pub(crate) fn new(ai_color: Color, cache: Option<&'a EvalCache>) -> Self {
        Searcher {
            ai_color,
            cache,
            nodes: 0,
        }
    }

    fn evaluate(&self, board: &Board) -> i32 {
        match self.cache {
            Some(cache) => {
                cache.get_or_insert_with(board.zobrist_key(), || board.evaluate(self.ai_color))
            }
            None => board.evaluate(self.ai_color),
        }
    }

    /// Score of the position after `mv`, or 0 with a warning if it cannot be applied
    pub(crate) fn score_move(
        &mut self,
        board: &Board,
        mv: Move,
        depth: u32,
        alpha: i32,
        beta: i32,
        maximizing: bool,
    ) -> i32 {
        match board.after(mv) {
            Ok(next) => self.minimax(&next, depth, alpha, beta, maximizing),
            Err(err) => {
                warn!("search: could not apply {mv}: {err}; scoring subtree as 0");
                0
            }
        }
    }

    /// Alpha-beta minimax; `maximizing` is true when the AI's color is to move
    pub(crate) fn minimax(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes += 1;
        if depth == 0 {
            return self.evaluate(board);
        }

        let to_move = if maximizing {
            self.ai_color
        } else {
            self.ai_color.opponent()
        };
        let moves = board.legal_moves_for(to_move);
        if moves.is_empty() {
            if !board.is_in_check(to_move) {
                return 0;
            }
            let mate = MATE_SCORE + depth as i32;
            return if maximizing { -mate } else { mate };
        }

        if maximizing {
            let mut max_eval = i32::MIN;
            for &mv in &moves {
                let eval = self.score_move(board, mv, depth - 1, alpha, beta, false);
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break;
                }
            }
            max_eval
        } else {
            let mut min_eval = i32::MAX;
            for &mv in &moves {
                let eval = self.score_move(board, mv, depth - 1, alpha, beta, true);
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break;
                }
            }
            min_eval
        }
    }

    /// Try each root move in order, keeping the first with the highest score
    fn minimax_root(&mut self, root: &Board, depth: u32) -> (Option<Move>, i32) {
        let moves = root.legal_moves_for(self.ai_color);
        let mut best: Option<Move> = None;
        let mut max_score = i32::MIN;
        let mut alpha = i32::MIN;
        let beta = i32::MAX;

        for &mv in &moves {
            let score = self.score_move(root, mv, depth - 1, alpha, beta, false);
            if score > max_score {
                max_score = score;
                best = Some(mv.with_score(score));
            }
            alpha = alpha.max(score);
        }
        (best, max_score)
    }
}

/// Position to search from: `board` with `color` on move.
///
/// `None` when handing the move to `color` would leave the opponent's king
/// en prise, as after the opponent has just been checked.
fn search_root(board: &Board, color: Color) -> Option<Board> {
    let mut root = *board;
    if root.side_to_move != color {
        if root.is_in_check(color.opponent()) {
            warn!(
                "search: {} is in check, {color} cannot be given the move",
                color.opponent()
            );
            return None;
        }
        debug!(
            "search: searching for {color} although {} is to move",
            root.side_to_move
        );
        root.side_to_move = color;
        root.en_passant = None;
    }
    Some(root)
}

/// Score when the root side has no legal move
fn terminal_score(root: &Board, color: Color) -> i32 {
    if root.is_in_check(color) {
        -MATE_SCORE
    } else {
        0
    }
}

/// Choose a move for `color` in `board` by fixed-depth alpha-beta search.
///
/// Deterministic: the same position and config always give the same move and
/// score, whatever the thread count.
#[must_use]
pub fn find_best_move(board: &Board, color: Color, config: &SearchConfig) -> SearchResult {
    let start = Instant::now();
    let depth = config.effective_depth();
    let Some(root) = search_root(board, color) else {
        let result = SearchResult {
            best_move: None,
            score: 0,
            nodes: 0,
            depth,
        };
        LogFacadeLogger.info(&SearchInfo::from_result(&result, start.elapsed().as_millis()));
        return result;
    };
    let cache = config.eval_cache.then(EvalCache::default);

    let (best_move, score, nodes) = if config.threads > 1 {
        smp::parallel_root(&root, color, depth, config.threads, cache.as_ref())
    } else {
        let mut searcher = Searcher::new(color, cache.as_ref());
        let (best, score) = searcher.minimax_root(&root, depth);
        (best, score, searcher.nodes)
    };

    let result = match best_move {
        Some(mv) => SearchResult {
            best_move: Some(mv),
            score,
            nodes,
            depth,
        },
        None => SearchResult {
            best_move: None,
            score: terminal_score(&root, color),
            nodes,
            depth,
        },
    };

    LogFacadeLogger.info(&SearchInfo::from_result(&result, start.elapsed().as_millis()));
    if let Some(cache) = &cache {
        let stats = cache.stats();
        debug!("eval cache: {} hits, {} misses", stats.hits, stats.misses);
    }
    result
}

/// `find_best_move` reporting its summary through `logger`
pub fn find_best_move_logged(
    board: &Board,
    color: Color,
    config: &SearchConfig,
    logger: &dyn SearchLogger,
) -> SearchResult {
    let start = Instant::now();
    let result = find_best_move(board, color, config);
    logger.info(&SearchInfo::from_result(&result, start.elapsed().as_millis()));
    result
}
