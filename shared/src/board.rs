//! The 3x3 grid and the value types that live on it.

use std::fmt;
use thiserror::Error;

/// Side length of the board
pub const BOARD_SIZE: usize = 3;

/// Total number of cells on the board
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("coordinate ({row}, {col}) is outside the 3x3 board")]
    OutOfRange { row: i64, col: i64 },
    #[error("{0:?} is not a line of the 3x3 board")]
    NoSuchLine(Line),
}

/// State of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    PlayerMark,
    EngineMark,
}

/// One of the two sides. The remote player plays crosses, the engine zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Player,
    Engine,
}

impl Mark {
    pub fn cell(self) -> Cell {
        match self {
            Mark::Player => Cell::PlayerMark,
            Mark::Engine => Cell::EngineMark,
        }
    }

    pub fn opponent(self) -> Mark {
        match self {
            Mark::Player => Mark::Engine,
            Mark::Engine => Mark::Player,
        }
    }
}

/// A validated board coordinate. Outside this crate it can only be built
/// through [`Move::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    row: usize,
    col: usize,
}

impl Move {
    /// Unchecked constructor for coordinates known to be on the board
    pub(crate) const fn at(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Builds a move from untrusted coordinates.
    pub fn new(row: i64, col: i64) -> Result<Self, BoardError> {
        if in_range(row) && in_range(col) {
            Ok(Self {
                row: row as usize,
                col: col as usize,
            })
        } else {
            Err(BoardError::OutOfRange { row, col })
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn is_corner(&self) -> bool {
        let edge = |index: usize| index == 0 || index == BOARD_SIZE - 1;
        edge(self.row) && edge(self.col)
    }
}

/// Reads a human-typed coordinate pair such as `1 2`, `1,2` or `(1, 2)`.
pub fn parse_coordinates(text: &str) -> Option<(i64, i64)> {
    let mut parts = text
        .split(|c: char| c.is_whitespace() || c == ',' || c == '(' || c == ')')
        .filter(|part| !part.is_empty());

    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((row, col))
}

fn in_range(index: i64) -> bool {
    (0..BOARD_SIZE as i64).contains(&index)
}

/// Which of the two diagonals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagonal {
    /// (0,0), (1,1), (2,2)
    Main,
    /// (0,2), (1,1), (2,0)
    Anti,
}

/// Any row, column or diagonal of length three
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Row(usize),
    Col(usize),
    Diagonal(Diagonal),
}

impl Line {
    /// Rows 0..2, then columns 0..2, then the main and anti diagonals.
    pub const ALL: [Line; 8] = [
        Line::Row(0),
        Line::Row(1),
        Line::Row(2),
        Line::Col(0),
        Line::Col(1),
        Line::Col(2),
        Line::Diagonal(Diagonal::Main),
        Line::Diagonal(Diagonal::Anti),
    ];

    /// Fails for a row or column index past the edge of the board.
    pub fn check(self) -> Result<Self, BoardError> {
        match self {
            Line::Row(index) | Line::Col(index) if index >= BOARD_SIZE => {
                Err(BoardError::NoSuchLine(self))
            }
            _ => Ok(self),
        }
    }

    /// Coordinates of the three cells in this line, in index order.
    /// The line must already be known to be valid.
    pub(crate) fn moves(self) -> [Move; BOARD_SIZE] {
        std::array::from_fn(|i| match self {
            Line::Row(row) => Move { row, col: i },
            Line::Col(col) => Move { row: i, col },
            Line::Diagonal(Diagonal::Main) => Move { row: i, col: i },
            Line::Diagonal(Diagonal::Anti) => Move {
                row: i,
                col: BOARD_SIZE - 1 - i,
            },
        })
    }
}

/// The game grid. Owned by exactly one session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Result<Cell, BoardError> {
        self.cells
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .ok_or(BoardError::OutOfRange {
                row: row as i64,
                col: col as i64,
            })
    }

    /// Overwrites a cell without any legality check.
    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), BoardError> {
        let slot = self
            .cells
            .get_mut(row)
            .and_then(|cells| cells.get_mut(col))
            .ok_or(BoardError::OutOfRange {
                row: row as i64,
                col: col as i64,
            })?;
        *slot = cell;
        Ok(())
    }

    pub fn count_empty(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell == Cell::Empty)
            .count()
    }

    /// Cell at a move that is known to be in range
    pub(crate) fn get(&self, mv: Move) -> Cell {
        self.cells[mv.row][mv.col]
    }

    pub(crate) fn put(&mut self, mv: Move, cell: Cell) {
        self.cells[mv.row][mv.col] = cell;
    }

    pub fn row(&self, i: usize) -> Result<[Cell; BOARD_SIZE], BoardError> {
        self.line(Line::Row(i))
    }

    pub fn col(&self, j: usize) -> Result<[Cell; BOARD_SIZE], BoardError> {
        self.line(Line::Col(j))
    }

    pub fn diagonal(&self, which: Diagonal) -> [Cell; BOARD_SIZE] {
        self.cells_on(Line::Diagonal(which))
    }

    /// Copy of the cells along a line
    pub fn line(&self, line: Line) -> Result<[Cell; BOARD_SIZE], BoardError> {
        Ok(self.cells_on(line.check()?))
    }

    pub(crate) fn cells_on(&self, line: Line) -> [Cell; BOARD_SIZE] {
        line.moves().map(|mv| self.get(mv))
    }

    /// All empty cells in row-major order
    pub fn empty_cells(&self) -> Vec<Move> {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| Move::at(row, col)))
            .filter(|mv| self.get(*mv) == Cell::Empty)
            .collect()
    }

    /// Locations of every cell holding the given mark, row-major
    pub fn cells_with(&self, mark: Mark) -> Vec<Move> {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| Move::at(row, col)))
            .filter(|mv| self.get(*mv) == mark.cell())
            .collect()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Cell::Empty => '.',
            Cell::PlayerMark => 'X',
            Cell::EngineMark => 'O',
        };
        write!(f, "{}", symbol)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{} {} {}", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}
