//! Move legality and win/tie adjudication
//!
//! Everything here is a pure function over a [`Board`]. Validation happens
//! once, upstream of [`apply_move`], which trusts its caller.

use crate::board::{Board, Cell, Diagonal, Line, Mark, Move, BOARD_SIZE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result classification of a board state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Outcome {
    Ongoing,
    PlayerWins,
    EngineWins,
    Tie,
}

impl Outcome {
    pub fn is_over(self) -> bool {
        self != Outcome::Ongoing
    }

    /// Wire code: 0 nobody yet, 1 engine, 2 player, 3 tie
    pub fn code(self) -> u8 {
        match self {
            Outcome::Ongoing => 0,
            Outcome::EngineWins => 1,
            Outcome::PlayerWins => 2,
            Outcome::Tie => 3,
        }
    }

    fn winner(mark: Mark) -> Self {
        match mark {
            Mark::Player => Outcome::PlayerWins,
            Mark::Engine => Outcome::EngineWins,
        }
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> u8 {
        outcome.code()
    }
}

impl TryFrom<u8> for Outcome {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Outcome::Ongoing),
            1 => Ok(Outcome::EngineWins),
            2 => Ok(Outcome::PlayerWins),
            3 => Ok(Outcome::Tie),
            other => Err(format!("unknown winner code {}", other)),
        }
    }
}

/// Why a requested move cannot be played
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMove {
    #[error("coordinate ({row}, {col}) is outside the board")]
    OutOfRangeCoordinate { row: i64, col: i64 },
    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },
}

/// Checks untrusted coordinates and returns the move they name if it is playable.
pub fn validate_move(board: &Board, row: i64, col: i64) -> Result<Move, IllegalMove> {
    let mv = Move::new(row, col).map_err(|_| IllegalMove::OutOfRangeCoordinate { row, col })?;

    if board.get(mv) != Cell::Empty {
        return Err(IllegalMove::CellOccupied {
            row: mv.row(),
            col: mv.col(),
        });
    }

    Ok(mv)
}

/// True iff both coordinates are on the board and the cell there is empty.
pub fn is_legal_move(board: &Board, row: i64, col: i64) -> bool {
    validate_move(board, row, col).is_ok()
}

/// Places `mark` at `mv`. Legality must already have been confirmed.
///
/// # Panics
/// If the board has no empty cell left. That means the caller skipped the
/// outcome check after the previous move.
pub fn apply_move(board: &mut Board, mv: Move, mark: Mark) {
    assert!(
        board.count_empty() > 0,
        "apply_move called on a full board"
    );
    board.put(mv, mark.cell());
}

/// Classifies the board. Wins are checked before ties.
pub fn evaluate_outcome(board: &Board) -> Outcome {
    let straight = (0..BOARD_SIZE).flat_map(|i| [Line::Row(i), Line::Col(i)]);
    let diagonals = [
        Line::Diagonal(Diagonal::Main),
        Line::Diagonal(Diagonal::Anti),
    ];

    for line in straight.chain(diagonals) {
        if let Some(mark) = line_owner(board, line) {
            return Outcome::winner(mark);
        }
    }

    if board.count_empty() == 0 {
        Outcome::Tie
    } else {
        Outcome::Ongoing
    }
}

fn line_owner(board: &Board, line: Line) -> Option<Mark> {
    let cells = board.cells_on(line);
    [Mark::Player, Mark::Engine]
        .into_iter()
        .find(|mark| cells.iter().all(|cell| *cell == mark.cell()))
}
