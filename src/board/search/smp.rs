//! Root-split parallel search.
//!
//! Root moves are dealt round-robin to scoped worker threads. Each worker
//! searches its moves with a full window on its own position copies, so the
//! scores are exact and the first maximum in legal-move order is the same move
//! the sequential root picks. Workers share only the evaluation cache.

use std::thread;

use log::warn;

use crate::board::{Board, Color, Move};
use crate::tt::EvalCache;

use super::Searcher;

/// Search every root move across `threads` workers; returns (best, score, nodes)
pub(crate) fn parallel_root(
    root: &Board,
    color: Color,
    depth: u32,
    threads: usize,
    cache: Option<&EvalCache>,
) -> (Option<Move>, i32, u64) {
    let moves = root.legal_moves_for(color);
    let moves = moves.as_slice();
    let workers = threads.min(moves.len()).max(1);
    let mut scores: Vec<Option<i32>> = vec![None; moves.len()];
    let mut nodes = 0;

    thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                scope.spawn(move || {
                    let mut searcher = Searcher::new(color, cache);
                    let scored: Vec<(usize, i32)> = moves
                        .iter()
                        .enumerate()
                        .skip(worker)
                        .step_by(workers)
                        .map(|(idx, &mv)| {
                            let score =
                                searcher.score_move(root, mv, depth - 1, i32::MIN, i32::MAX, false);
                            (idx, score)
                        })
                        .collect();
                    (scored, searcher.nodes)
                })
            })
            .collect();

        for handle in handles {
            match handle.join() {
                Ok((scored, worker_nodes)) => {
                    nodes += worker_nodes;
                    for (idx, score) in scored {
                        scores[idx] = Some(score);
                    }
                }
                Err(_) => warn!("search worker panicked; its root moves are skipped"),
            }
        }
    });

    let mut best: Option<Move> = None;
    let mut max_score = i32::MIN;
    for (mv, score) in moves.iter().zip(scores) {
        if let Some(score) = score {
            if score > max_score {
                max_score = score;
                best = Some(mv.with_score(score));
            }
        }
    }
    (best, max_score, nodes)
}
