//! Core Connect Four rules: board representation, player types, game state
//! and the engine that applies drops to it.

mod board;
mod engine;
mod player;
mod state;

pub use board::{Board, Cell, MoveError, Position, COLS, ROWS, WIN_LENGTH};
pub use engine::{DropResult, GameEngine, Rejection};
pub use player::Player;
pub use state::{GameState, Outcome};
