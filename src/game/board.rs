use std::fmt;

use serde::Serialize;

use super::player::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
/// Pieces in an unbroken line needed to win.
pub const WIN_LENGTH: usize = 4;

/// Row/column steps for horizontal, vertical, diagonal ↘ and diagonal ↙ lines.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Empty,
    Owner(Player),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The player whose piece occupies this cell, if any
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Owner(player) => Some(player),
        }
    }
}

/// A cell coordinate. Row 0 is the top, row `ROWS - 1` the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Move `steps` times along `dir`, or `None` if that leaves the board.
    fn step(self, (dr, dc): (isize, isize), steps: isize) -> Option<Position> {
        let row = self.row as isize + dr * steps;
        let col = self.col as isize + dc * steps;
        if (0..ROWS as isize).contains(&row) && (0..COLS as isize).contains(&col) {
            Some(Position::new(row as usize, col as usize))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    ColumnFull,
    InvalidColumn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    fn cell(&self, pos: Position) -> Cell {
        self.cells[pos.row][pos.col]
    }

    /// Number of pieces stacked in a column
    pub fn column_height(&self, col: usize) -> usize {
        (0..ROWS).filter(|&row| !self.cells[row][col].is_empty()).count()
    }

    /// Row a piece dropped into `col` would land on, if the column has room
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col].is_empty())
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        !self.cells[0][col].is_empty()
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn);
        }

        let row = self.landing_row(col).ok_or(MoveError::ColumnFull)?;
        self.cells[row][col] = player.to_cell();
        Ok(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    /// True when no column has an empty cell below an occupied one.
    pub fn is_settled(&self) -> bool {
        (0..COLS).all(|col| {
            let top = (0..ROWS)
                .find(|&row| !self.cells[row][col].is_empty())
                .unwrap_or(ROWS);
            (top..ROWS).all(|row| !self.cells[row][col].is_empty())
        })
    }

    /// Check if the piece at `at` is part of a winning line
    pub fn check_win(&self, at: Position) -> bool {
        self.winning_line(at).is_some()
    }

    /// Find a line of `WIN_LENGTH` pieces passing through `at`, owned by
    /// whoever occupies `at`.
    ///
    /// Only the window of offsets `-3..=3` around `at` is read in each of the
    /// four directions, so a call costs at most 28 cell reads. Offsets that
    /// fall off the board are skipped; they never break a run.
    pub fn winning_line(&self, at: Position) -> Option<[Position; WIN_LENGTH]> {
        let player = self.cell(at).owner()?;
        let reach = WIN_LENGTH as isize - 1;

        for dir in DIRECTIONS {
            let mut line = [at; WIN_LENGTH];
            let mut run = 0;

            for steps in -reach..=reach {
                let Some(pos) = at.step(dir, steps) else {
                    continue;
                };
                if self.cell(pos) == Cell::Owner(player) {
                    line[run] = pos;
                    run += 1;
                    if run == WIN_LENGTH {
                        return Some(line);
                    }
                } else {
                    run = 0;
                }
            }
        }

        None
    }

    /// Render the grid as text, one line per row, using `glyph` for each cell.
    pub fn render(&self, glyph: impl Fn(Cell) -> char, column_numbers: bool) -> String {
        let mut out = String::with_capacity((ROWS + 1) * (COLS * 2 + 1));
        for row in &self.cells {
            for cell in row {
                out.push(' ');
                out.push(glyph(*cell));
            }
            out.push('\n');
        }
        if column_numbers {
            for col in 0..COLS {
                out.push_str(&format!(" {col}"));
            }
            out.push('\n');
        }
        out
    }
}

fn default_glyph(cell: Cell) -> char {
    match cell {
        Cell::Empty => '.',
        Cell::Owner(player) => player.symbol(),
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(default_glyph, true))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: Player = Player::Red;
    const Y: Player = Player::Yellow;

    fn drop_all(board: &mut Board, moves: &[(usize, Player)]) -> usize {
        let mut last = 0;
        for &(col, player) in moves {
            last = board.drop_piece(col, player).unwrap();
        }
        last
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert_eq!(board.piece_count(), 0);
        assert!(board.is_settled());
    }

    #[test]
    fn test_drop_piece() {
        let mut board = Board::new();

        // Drop first piece in column 3
        let row = board.drop_piece(3, R).unwrap();
        assert_eq!(row, 5); // Should land at bottom
        assert_eq!(board.get(5, 3), Cell::Owner(R));

        // Drop second piece in same column
        let row = board.drop_piece(3, Y).unwrap();
        assert_eq!(row, 4); // Should land on top of first piece
        assert_eq!(board.get(4, 3), Cell::Owner(Y));
        assert_eq!(board.column_height(3), 2);
        assert_eq!(board.landing_row(3), Some(3));
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::new();

        // Fill column 0
        for _ in 0..ROWS {
            board.drop_piece(0, R).unwrap();
        }

        assert!(board.is_column_full(0));
        assert_eq!(board.landing_row(0), None);
        assert_eq!(board.drop_piece(0, Y), Err(MoveError::ColumnFull));
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::new();
        assert_eq!(board.drop_piece(7, R), Err(MoveError::InvalidColumn));
        assert!(board.is_column_full(COLS));
        assert_eq!(board.landing_row(COLS), None);
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new();
        for col in 0..COLS {
            for _ in 0..ROWS {
                board.drop_piece(col, R).unwrap();
            }
        }
        assert!(board.is_full());
        assert_eq!(board.piece_count(), ROWS * COLS);
        assert!(board.is_settled());
    }

    #[test]
    fn test_unsettled_board_detected() {
        let mut board = Board::new();
        board.cells[2][4] = Cell::Owner(R);
        assert!(!board.is_settled());
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::new();
        drop_all(&mut board, &[(0, R), (1, R), (2, R), (3, R)]);
        assert!(board.check_win(Position::new(5, 3)));
        // Any piece of the line anchors the same win
        assert!(board.check_win(Position::new(5, 1)));
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::new();
        let row = drop_all(&mut board, &[(3, Y), (3, Y), (3, Y), (3, Y)]);
        assert_eq!(row, 2);
        assert_eq!(
            board.winning_line(Position::new(row, 3)),
            Some([
                Position::new(2, 3),
                Position::new(3, 3),
                Position::new(4, 3),
                Position::new(5, 3),
            ])
        );
    }

    #[test]
    fn test_diagonal_up_win() {
        let mut board = Board::new();
        // Bottom-left to top-right, /
        let row = drop_all(
            &mut board,
            &[
                (0, R),
                (1, Y),
                (1, R),
                (2, Y),
                (2, Y),
                (2, R),
                (3, Y),
                (3, Y),
                (3, Y),
                (3, R),
            ],
        );
        assert_eq!(row, 2);
        assert!(board.check_win(Position::new(row, 3)));
    }

    #[test]
    fn test_diagonal_down_win() {
        let mut board = Board::new();
        // Top-left to bottom-right, \
        let row = drop_all(
            &mut board,
            &[
                (6, R),
                (5, Y),
                (5, R),
                (4, Y),
                (4, Y),
                (4, R),
                (3, Y),
                (3, Y),
                (3, Y),
                (3, R),
            ],
        );
        assert_eq!(
            board.winning_line(Position::new(row, 3)),
            Some([
                Position::new(2, 3),
                Position::new(3, 4),
                Position::new(4, 5),
                Position::new(5, 6),
            ])
        );
    }

    #[test]
    fn test_gap_filled_in_middle_wins() {
        let mut board = Board::new();
        drop_all(&mut board, &[(1, R), (2, R), (4, R)]);
        assert!(!board.check_win(Position::new(5, 4)));

        let row = board.drop_piece(3, R).unwrap();
        assert_eq!(
            board.winning_line(Position::new(row, 3)),
            Some([
                Position::new(5, 1),
                Position::new(5, 2),
                Position::new(5, 3),
                Position::new(5, 4),
            ])
        );
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = Board::new();
        drop_all(&mut board, &[(0, R), (1, R), (2, R)]);
        assert!(!board.check_win(Position::new(5, 1))); // Only 3 in a row
    }

    #[test]
    fn test_opponent_piece_breaks_run() {
        let mut board = Board::new();
        drop_all(&mut board, &[(0, R), (1, R), (2, Y), (3, R), (4, R), (5, R)]);
        assert!(!board.check_win(Position::new(5, 1)));
        assert!(!board.check_win(Position::new(5, 3)));
        board.drop_piece(6, R).unwrap();
        assert!(board.check_win(Position::new(5, 6)));
    }

    #[test]
    fn test_empty_anchor_never_wins() {
        let board = Board::new();
        assert_eq!(board.winning_line(Position::new(5, 0)), None);
    }

    #[test]
    fn test_corner_win_bottom_right() {
        let mut board = Board::new();
        // Horizontal ending in the bottom-right corner: offsets +1..+3 are off-board
        let row = drop_all(&mut board, &[(3, R), (4, R), (5, R), (6, R)]);
        assert_eq!(row, 5);
        assert!(board.check_win(Position::new(5, 6)));
    }

    #[test]
    fn test_corner_win_bottom_left_diagonal() {
        let mut board = Board::new();
        // Anchor the / diagonal at the bottom-left corner, placed last
        drop_all(
            &mut board,
            &[
                (1, Y),
                (1, R),
                (2, Y),
                (2, Y),
                (2, R),
                (3, Y),
                (3, Y),
                (3, Y),
                (3, R),
            ],
        );
        let row = board.drop_piece(0, R).unwrap();
        assert_eq!(row, 5);
        assert_eq!(
            board.winning_line(Position::new(5, 0)),
            Some([
                Position::new(2, 3),
                Position::new(3, 2),
                Position::new(4, 1),
                Position::new(5, 0),
            ])
        );
    }

    #[test]
    fn test_corner_win_top_left_vertical() {
        let mut board = Board::new();
        drop_all(&mut board, &[(0, Y), (0, Y), (0, R), (0, R), (0, R)]);
        let row = board.drop_piece(0, R).unwrap();
        assert_eq!(row, 0);
        assert!(board.check_win(Position::new(0, 0)));
    }

    #[test]
    fn test_display() {
        let mut board = Board::new();
        drop_all(&mut board, &[(0, R), (6, Y)]);
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), ROWS + 1);
        assert_eq!(lines[0], " . . . . . . .");
        assert_eq!(lines[5], " R . . . . . Y");
        assert_eq!(lines[6], " 0 1 2 3 4 5 6");
    }

    #[test]
    fn test_render_custom_glyphs() {
        let mut board = Board::new();
        board.drop_piece(2, Y).unwrap();
        let text = board.render(
            |cell| match cell.owner() {
                None => '-',
                Some(Player::Red) => 'x',
                Some(Player::Yellow) => 'o',
            },
            false,
        );
        assert_eq!(text.lines().count(), ROWS);
        assert_eq!(text.lines().last(), Some(" - - o - - - -"));
    }
}
