use serde::Serialize;
use tracing::{debug, info};

use super::board::{MoveError, COLS};
use super::player::Player;
use super::state::{GameState, Outcome};
use crate::error::EngineError;

/// Why a drop was turned away without touching the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    ColumnFull,
    GameOver,
}

/// Result of [`GameEngine::drop_piece`] for an in-range column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DropResult {
    Accepted {
        row: usize,
        column: usize,
        outcome: Outcome,
    },
    Rejected {
        reason: Rejection,
    },
}

impl DropResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, DropResult::Accepted { .. })
    }
}

/// Owns a single game and applies moves to it one at a time.
///
/// Presentation code reads [`snapshot`](Self::snapshot) after every call and
/// never mutates the board directly.
#[derive(Debug, Clone, Default)]
pub struct GameEngine {
    state: GameState,
}

impl GameEngine {
    pub fn new() -> Self {
        GameEngine {
            state: GameState::initial(),
        }
    }

    /// Drop the current player's piece into `column`.
    ///
    /// An out-of-range column is a caller bug and returns an error. Moves into
    /// a full column or after the game has ended are rejected and leave the
    /// state exactly as it was.
    pub fn drop_piece(&mut self, column: usize) -> Result<DropResult, EngineError> {
        if column >= COLS {
            return Err(EngineError::InvalidColumn { column });
        }

        if self.state.is_terminal() {
            debug!(column, outcome = ?self.state.outcome(), "drop rejected: game over");
            return Ok(DropResult::Rejected {
                reason: Rejection::GameOver,
            });
        }

        let player = self.state.current_player();
        let row = match self.state.apply_move_mut(column) {
            Ok(row) => row,
            Err(MoveError::ColumnFull) => {
                debug!(column, "drop rejected: column full");
                return Ok(DropResult::Rejected {
                    reason: Rejection::ColumnFull,
                });
            }
            Err(MoveError::InvalidColumn) => return Err(EngineError::InvalidColumn { column }),
        };

        let outcome = self.state.outcome();
        debug!(player = player.name(), row, column, "piece dropped");
        match outcome {
            Outcome::Win(winner) => info!(winner = winner.name(), "game won"),
            Outcome::Draw => info!("game drawn"),
            Outcome::InProgress => {}
        }

        Ok(DropResult::Accepted {
            row,
            column,
            outcome,
        })
    }

    /// Throw away the current game and start a fresh one.
    pub fn reset(&mut self) {
        info!(pieces = self.state.board().piece_count(), "game reset");
        self.state = GameState::initial();
    }

    /// Read-only view of the current game
    pub fn snapshot(&self) -> &GameState {
        &self.state
    }

    pub fn current_player(&self) -> Player {
        self.state.current_player()
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome()
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn legal_actions(&self) -> Vec<usize> {
        self.state.legal_actions()
    }

    pub fn is_column_full(&self, column: usize) -> bool {
        self.state.board().is_column_full(column)
    }
}
