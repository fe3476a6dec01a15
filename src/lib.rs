//! # Connect Four search
//!
//! A Connect Four engine whose computer opponent picks moves with minimax and
//! alpha-beta pruning, wrapped in an iterative deepening loop that stops when a
//! wall-clock budget runs out.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player, turn bookkeeping
//! - [`ai`] — Evaluator, alpha-beta searcher, iterative deepening, agents
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;

pub use ai::{choose_move, search, SearchResult};
pub use error::SearchError;
pub use game::{Board, GameOutcome, Player, Rejected};
