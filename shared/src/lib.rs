//! # Shared Game Core
//!
//! Types and rules used by both the server and the terminal client. Nothing in
//! this crate performs I/O or blocks; every operation is a handful of
//! comparisons over a 3x3 grid.
//!
//! ## Modules
//!
//! ### Board (`board`)
//! The grid itself plus the small value types that live on it: cells, marks,
//! coordinates and lines.
//!
//! ### Rules (`rules`)
//! Legality checks, move application and win/tie adjudication.
//!
//! ### Strategy (`strategy`)
//! The engine's one-ply heuristic: win if possible, block if needed, answer
//! the opening by a fixed rule, otherwise play a random empty cell.
//!
//! ### Protocol (`protocol`)
//! The JSON-per-line wire format spoken between server and client.
//!
//! ## Usage Example
//!
//! ```rust
//! use shared::{apply_move, evaluate_outcome, validate_move, Board, Mark, Outcome, Strategist};
//!
//! let mut board = Board::new();
//! let mut engine = Strategist::seeded(Mark::Engine, 1);
//!
//! let mv = validate_move(&board, 0, 0).unwrap();
//! apply_move(&mut board, mv, Mark::Player);
//! assert_eq!(evaluate_outcome(&board), Outcome::Ongoing);
//!
//! // A corner opening is always answered in the center.
//! let reply = engine.choose_move(&board);
//! assert_eq!((reply.row(), reply.col()), (1, 1));
//! ```

pub mod board;
pub mod protocol;
pub mod rules;
pub mod strategy;

pub use board::{
    parse_coordinates, Board, BoardError, Cell, Diagonal, Line, Mark, Move, BOARD_SIZE, CELL_COUNT,
};
pub use protocol::{
    decode_message, encode_line, parse_request, EngineMove, Message, MoveRequest, MoveResult,
    ProtocolError, GREETING,
};
pub use rules::{apply_move, evaluate_outcome, is_legal_move, validate_move, IllegalMove, Outcome};
pub use strategy::{choose_move, decide, Decision, Rule, Strategist};
