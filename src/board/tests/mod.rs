//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `movegen.rs` - Candidates, per-piece rules, legal destinations
//! - `special_moves.rs` - Castling, en passant and promotion
//! - `game_state.rs` - Check, checkmate and stalemate
//! - `search.rs` - Best-move search results
//! - `perft.rs` - Node counts for move generation
//! - `proptest.rs` - Property-based tests

mod movegen;
mod proptest;
