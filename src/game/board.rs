use std::fmt;

use super::player::Player;

pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLUMNS: usize = 7;

/// Length of a winning line.
const CONNECT: usize = 4;

/// Line directions as (row step, column step): horizontal, vertical,
/// down-right and up-right diagonals.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Player),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    InProgress,
    Win(Player),
    Draw,
}

impl GameOutcome {
    pub fn is_terminal(self) -> bool {
        self != GameOutcome::InProgress
    }
}

/// Why a column cannot take another piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejected {
    #[error("column {column} is out of range (board has {columns} columns)")]
    OutOfRange { column: usize, columns: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBoardError {
    #[error("board has no rows")]
    NoRows,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("unexpected cell '{found}' at row {row}, column {column}")]
    UnknownCell {
        row: usize,
        column: usize,
        found: char,
    },
}

/// Row-major grid. Row 0 is the top, row `rows - 1` is the bottom.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: usize, columns: usize) -> Self {
        Board {
            rows,
            columns,
            cells: vec![Cell::Empty; rows * columns],
        }
    }

    /// Build a board from text rows, top row first. `.` is empty, `X` is the
    /// human and `O` the AI; whitespace is ignored.
    ///
    /// No gravity check is made, so fixtures may describe positions that
    /// legal play cannot reach.
    pub fn from_rows(rows: &[&str]) -> Result<Self, ParseBoardError> {
        let parsed: Vec<Vec<char>> = rows
            .iter()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect())
            .collect();
        let columns = parsed.first().map(Vec::len).ok_or(ParseBoardError::NoRows)?;

        let mut board = Board::new(parsed.len(), columns);
        for (row, line) in parsed.iter().enumerate() {
            if line.len() != columns {
                return Err(ParseBoardError::RaggedRow {
                    row,
                    found: line.len(),
                    expected: columns,
                });
            }
            for (column, &ch) in line.iter().enumerate() {
                let cell = match ch {
                    '.' => Cell::Empty,
                    'X' => Cell::Occupied(Player::Human),
                    'O' => Cell::Occupied(Player::Ai),
                    found => return Err(ParseBoardError::UnknownCell { row, column, found }),
                };
                board.cells[row * columns + column] = cell;
            }
        }
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.columns + col]
    }

    fn cell_at(&self, row: isize, col: isize) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.rows || col >= self.columns {
            return None;
        }
        Some(self.get(row, col))
    }

    /// Check if a column is full. Columns outside the board count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.columns || self.rows == 0 {
            return true;
        }
        self.get(0, col) != Cell::Empty
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, Rejected> {
        if col >= self.columns {
            return Err(Rejected::OutOfRange {
                column: col,
                columns: self.columns,
            });
        }

        if self.is_column_full(col) {
            return Err(Rejected::ColumnFull(col));
        }

        for row in (0..self.rows).rev() {
            let idx = row * self.columns + col;
            if self.cells[idx] == Cell::Empty {
                self.cells[idx] = Cell::Occupied(player);
                return Ok(row);
            }
        }

        unreachable!("Column should not be full if is_column_full returned false");
    }

    /// Return a copy of the board with `player`'s piece dropped in `col`.
    /// The receiver is left untouched.
    pub fn apply_move(&self, col: usize, player: Player) -> Result<Board, Rejected> {
        let mut next = self.clone();
        next.drop_piece(col, player)?;
        Ok(next)
    }

    /// Columns that can still take a piece, in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..self.columns)
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// True when no empty cell remains anywhere on the board.
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Classify the position. Human lines are checked before AI lines, so a
    /// board holding a line for both sides reports the human as winner.
    pub fn outcome(&self) -> GameOutcome {
        for player in [Player::Human, Player::Ai] {
            if self.has_line(player) {
                return GameOutcome::Win(player);
            }
        }

        if self.is_full() {
            GameOutcome::Draw
        } else {
            GameOutcome::InProgress
        }
    }

    fn has_line(&self, player: Player) -> bool {
        let target = Cell::Occupied(player);
        DIRECTIONS.iter().any(|&(dr, dc)| {
            (0..self.rows).any(|row| {
                (0..self.columns).any(|col| self.line_from(row, col, dr, dc, target))
            })
        })
    }

    fn line_from(&self, row: usize, col: usize, dr: isize, dc: isize, target: Cell) -> bool {
        (0..CONNECT as isize).all(|i| {
            self.cell_at(row as isize + dr * i, col as isize + dc * i) == Some(target)
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLUMNS)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let line: Vec<String> = (0..self.columns)
                .map(|col| match self.get(row, col) {
                    Cell::Empty => ".".to_string(),
                    Cell::Occupied(player) => player.mark().to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join(" | "))?;
        }
        writeln!(f, "{}", "-".repeat((4 * self.columns).saturating_sub(1)))?;
        let labels: Vec<String> = (0..self.columns).map(|col| col.to_string()).collect();
        write!(f, "{}", labels.join(" | "))
    }
}
