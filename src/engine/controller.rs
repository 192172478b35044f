//! Live game controller for an interactive shell.

use std::io;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use log::{debug, info};

use super::highlight::{Highlight, HighlightTicket, Highlighter};
use crate::board::{
    find_best_move, Board, Color, GameState, Move, MoveError, Piece, SearchConfig, SearchResult,
    Square, UnmakeInfo,
};

/// Search thread stack size (32 MB)
const SEARCH_STACK_SIZE: usize = 32 * 1024 * 1024;

/// A search running on its own thread
pub struct SearchJob {
    receiver: Receiver<SearchResult>,
    handle: Option<JoinHandle<()>>,
    result: Option<SearchResult>,
}

impl SearchJob {
    /// Start searching a copy of `board` for `color`
    ///
    /// # Errors
    /// Returns the OS error if the thread cannot be spawned.
    pub fn spawn(board: &Board, color: Color, config: SearchConfig) -> io::Result<Self> {
        let (sender, receiver) = mpsc::channel();
        let snapshot = *board;
        let handle = thread::Builder::new()
            .name("search".into())
            .stack_size(SEARCH_STACK_SIZE)
            .spawn(move || {
                let result = find_best_move(&snapshot, color, &config);
                let _ = sender.send(result);
            })?;
        Ok(SearchJob {
            receiver,
            handle: Some(handle),
            result: None,
        })
    }

    /// The result if the search has finished
    pub fn poll(&mut self) -> Option<SearchResult> {
        if self.result.is_none() {
            match self.receiver.try_recv() {
                Ok(result) => self.result = Some(result),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => {}
            }
        }
        self.result
    }

    #[must_use]
    pub fn is_finished(&mut self) -> bool {
        self.poll().is_some()
    }

    /// Block until the search finishes; `None` if the thread died
    pub fn wait(mut self) -> Option<SearchResult> {
        let result = self.result.or_else(|| self.receiver.recv().ok());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        result
    }
}

/// What happened when the engine was asked to move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiTurn {
    /// The move was played; `score` is from the engine's side
    Played { mv: Move, score: i32 },
    /// No move exists; the game is over in this state
    Finished(GameState),
}

/// The live board, the engine's color and its search settings
pub struct GameController {
    board: Board,
    ai_color: Color,
    config: SearchConfig,
    highlighter: Highlighter,
    history: Vec<UnmakeInfo>,
}

impl GameController {
    /// New game from the starting position
    #[must_use]
    pub fn new(ai_color: Color, config: SearchConfig) -> Self {
        Self::from_board(Board::new(), ai_color, config)
    }

    #[must_use]
    pub fn from_board(board: Board, ai_color: Color, config: SearchConfig) -> Self {
        GameController {
            board,
            ai_color,
            config,
            highlighter: Highlighter::new(),
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn ai_color(&self) -> Color {
        self.ai_color
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    #[must_use]
    pub fn game_state(&self) -> GameState {
        self.board.game_state()
    }

    #[must_use]
    pub fn is_ai_turn(&self) -> bool {
        self.board.side_to_move() == self.ai_color && !self.game_state().is_terminal()
    }

    /// Reset to the starting position
    pub fn new_game(&mut self) {
        self.highlighter.clear();
        self.board = Board::new();
        self.history.clear();
    }

    /// Validate and play `mv` for the side to move
    ///
    /// # Errors
    /// The board's rejection reason; the position is unchanged.
    pub fn try_move(&mut self, mv: Move) -> Result<GameState, MoveError> {
        let info = self.board.try_move(mv)?;
        self.highlighter.clear();
        self.history.push(info);
        debug!("played {mv}; state {:?}", self.board.game_state());
        Ok(self.board.game_state())
    }

    /// Shell move command on raw coordinates; `false` leaves everything unchanged
    pub fn attempt_move(
        &mut self,
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
    ) -> bool {
        Move::from_coords(from_row, from_col, to_row, to_col)
            .is_some_and(|mv| self.try_move(mv).is_ok())
    }

    /// Choose the piece for the last promotion
    ///
    /// # Errors
    /// See [`Board::replace_promoted_piece`].
    pub fn promote(&mut self, piece: Piece) -> Result<GameState, MoveError> {
        self.board.replace_promoted_piece(piece)?;
        Ok(self.board.game_state())
    }

    /// Take back the last move
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(info) => {
                self.highlighter.clear();
                self.board.unmake_move(info);
                true
            }
            None => false,
        }
    }

    /// Start highlighting the piece on `from` if it belongs to the side to move
    pub fn select(&mut self, from: Square) -> Option<HighlightTicket> {
        let own_piece = self.board.color_on(from) == Some(self.board.side_to_move());
        if self.game_state().is_terminal() || !own_piece {
            self.highlighter.clear();
            return None;
        }
        Some(self.highlighter.select(&self.board, from))
    }

    /// The published highlight for the current selection
    #[must_use]
    pub fn highlight(&self) -> Option<Highlight> {
        self.highlighter.current()
    }

    /// Search the live position in the background
    ///
    /// # Errors
    /// Returns the OS error if the search thread cannot be spawned.
    pub fn start_ai_search(&self) -> io::Result<SearchJob> {
        SearchJob::spawn(&self.board, self.ai_color, self.config)
    }

    /// Apply a finished search, or report the terminal state if it found no move
    ///
    /// # Errors
    /// The board's rejection reason if the move no longer applies.
    pub fn apply_search_result(&mut self, result: &SearchResult) -> Result<AiTurn, MoveError> {
        match result.best_move {
            Some(mv) => {
                self.try_move(mv)?;
                info!("engine plays {mv} (score {})", result.score);
                Ok(AiTurn::Played {
                    mv,
                    score: result.score,
                })
            }
            None => {
                let state = self.board.refresh_game_state();
                info!("engine has no move; game state {state:?}");
                Ok(AiTurn::Finished(state))
            }
        }
    }

    /// Search and play the engine's move on this thread
    ///
    /// # Errors
    /// `WrongSide` when it is not the engine's turn, or the board's rejection
    /// reason for the chosen move.
    pub fn play_ai_move(&mut self) -> Result<AiTurn, MoveError> {
        let state = self.game_state();
        if state.is_terminal() {
            return Ok(AiTurn::Finished(state));
        }
        if self.board.side_to_move() != self.ai_color {
            return Err(MoveError::WrongSide {
                square: self.board.king_square(self.ai_color),
                to_move: self.board.side_to_move(),
            });
        }
        let result = find_best_move(&self.board, self.ai_color, &self.config);
        self.apply_search_result(&result)
    }
}
