//! Background computation of legal destinations for a selected piece.
//!
//! Selecting a piece publishes its candidate squares at once and starts a
//! worker on a copy of the position. The worker sends the legal squares on the
//! ticket's channel and, if no newer selection has been made, replaces the
//! published list. The published slot only ever holds a complete list.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use log::{debug, warn};
use parking_lot::Mutex;

use crate::board::{Board, Square};

/// What the shell should draw for the current selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Highlight {
    /// Pseudo-legal squares, shown while the legal set is computed
    Candidates { from: Square, squares: Vec<Square> },
    /// The legal destination squares
    Valid { from: Square, squares: Vec<Square> },
}

impl Highlight {
    #[must_use]
    pub fn origin(&self) -> Square {
        match self {
            Highlight::Candidates { from, .. } | Highlight::Valid { from, .. } => *from,
        }
    }

    #[must_use]
    pub fn squares(&self) -> &[Square] {
        match self {
            Highlight::Candidates { squares, .. } | Highlight::Valid { squares, .. } => squares,
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Highlight::Valid { .. })
    }
}

#[derive(Default)]
struct Slot {
    generation: u64,
    highlight: Option<Highlight>,
}

/// Result handle for one selection
pub struct HighlightTicket {
    generation: u64,
    from: Square,
    receiver: Receiver<Vec<Square>>,
    received: Option<Vec<Square>>,
}

impl HighlightTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn origin(&self) -> Square {
        self.from
    }

    /// The legal squares if the worker has finished
    pub fn poll(&mut self) -> Option<&[Square]> {
        if self.received.is_none() {
            match self.receiver.try_recv() {
                Ok(squares) => self.received = Some(squares),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => {}
            }
        }
        self.received.as_deref()
    }

    /// Block until the worker finishes; `None` if it died without a result
    pub fn wait(self) -> Option<Vec<Square>> {
        match self.received {
            Some(squares) => Some(squares),
            None => self.receiver.recv().ok(),
        }
    }
}

/// Publishes destination highlights for the most recent selection
#[derive(Default)]
pub struct Highlighter {
    slot: Arc<Mutex<Slot>>,
    generation: AtomicU64,
}

impl Highlighter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the piece on `from` in `board`.
    ///
    /// Candidates are published before this returns; the legal squares follow
    /// from a worker thread. Earlier selections stop publishing.
    pub fn select(&self, board: &Board, from: Square) -> HighlightTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut slot = self.slot.lock();
            slot.generation = generation;
            slot.highlight = Some(Highlight::Candidates {
                from,
                squares: board.candidate_destinations(from),
            });
        }

        let (sender, receiver) = mpsc::channel();
        let snapshot = *board;
        let slot = Arc::clone(&self.slot);
        let spawned = thread::Builder::new()
            .name("highlight".into())
            .spawn(move || {
                let squares = snapshot.legal_destinations(from);
                {
                    let mut slot = slot.lock();
                    if slot.generation == generation {
                        slot.highlight = Some(Highlight::Valid {
                            from,
                            squares: squares.clone(),
                        });
                    } else {
                        debug!(
                            "highlight for {from} superseded by selection {}",
                            slot.generation
                        );
                    }
                }
                // the ticket may already be dropped
                let _ = sender.send(squares);
            });
        if let Err(e) = spawned {
            warn!("could not start highlight worker for {from}: {e}");
        }

        HighlightTicket {
            generation,
            from,
            receiver,
            received: None,
        }
    }

    /// The published highlight, if any
    #[must_use]
    pub fn current(&self) -> Option<Highlight> {
        self.slot.lock().highlight.clone()
    }

    /// Drop the selection; pending workers no longer publish
    pub fn clear(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let mut slot = self.slot.lock();
        slot.generation = generation;
        slot.highlight = None;
    }
}
