//! Core Connect Four game logic: board representation, player types, and game
//! state with immutable transitions.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, GameOutcome, ParseBoardError, Rejected, DEFAULT_COLUMNS, DEFAULT_ROWS};
pub use player::Player;
pub use state::{GameState, MoveError};
