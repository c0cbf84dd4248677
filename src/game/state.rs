use serde::Serialize;

use super::board::{Board, MoveError, Position, COLS, WIN_LENGTH};
use super::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    InProgress,
    Win(Player),
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(player),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameState {
    board: Board,
    current_player: Player,
    outcome: Outcome,
    last_move: Option<Position>,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::FIRST,
            outcome: Outcome::InProgress,
            last_move: None,
        }
    }

    /// Get current player. Once the game is won this stays on the winner.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Where the most recent piece landed, if any piece has been played
    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Get list of legal columns (not full)
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..COLS)
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// The pieces forming the winning line, once the game has been won
    pub fn winning_line(&self) -> Option<[Position; WIN_LENGTH]> {
        self.outcome.winner()?;
        self.board.winning_line(self.last_move?)
    }

    /// Place the current player's piece in `column` and settle the outcome.
    ///
    /// Callers must check `is_terminal` first; the board itself rejects
    /// full and out-of-range columns without changing anything.
    pub(crate) fn apply_move_mut(&mut self, column: usize) -> Result<usize, MoveError> {
        debug_assert!(!self.is_terminal(), "move applied to a finished game");

        let row = self.board.drop_piece(column, self.current_player)?;
        let placed = Position::new(row, column);
        self.last_move = Some(placed);

        // Only lines through the new piece can have changed
        if self.board.check_win(placed) {
            self.outcome = Outcome::Win(self.current_player);
        } else if self.board.is_full() {
            self.outcome = Outcome::Draw;
        } else {
            self.current_player = self.current_player.other();
        }

        debug_assert!(self.board.is_settled());
        Ok(row)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
