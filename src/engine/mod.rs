//! Work done off the shell's thread, and the game controller that drives it.
//!
//! Destination highlighting and engine searches run on worker threads against
//! copies of the live position; results come back over channels.

mod controller;
mod highlight;

pub use controller::{AiTurn, GameController, SearchJob};
pub use highlight::{Highlight, HighlightTicket, Highlighter};
