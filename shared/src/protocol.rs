//! Line-oriented JSON wire format
//!
//! Each message is one JSON object terminated by `\n` and always carries all
//! three fields:
//!
//! ```text
//! { "step": [row, col], "winner": 0|1|2|3, "error": false|true }
//! ```
//!
//! `winner` is 0 while the game is running, 1 when the engine won, 2 when the
//! player won and 3 for a tie. Requests from the player only need `step`.

use crate::board::Move;
use crate::rules::Outcome;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// First line the server sends on a new connection
pub const GREETING: &str = "Tic Tac Toe server greeting you! You are Welcome!";

/// Placeholder step for replies to input that could not be parsed
pub const NO_STEP: [i64; 2] = [-1, -1];

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed message {line:?}: {source}")]
    Malformed {
        line: String,
        source: serde_json::Error,
    },
    #[error("failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),
}

/// A move as requested by the remote player, not yet validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub row: i64,
    pub col: i64,
}

/// Result of trying to apply the player's move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub applied: bool,
    pub outcome: Outcome,
}

impl MoveResult {
    pub fn rejected() -> Self {
        Self {
            applied: false,
            outcome: Outcome::Ongoing,
        }
    }
}

/// The engine's reply move and the outcome after it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineMove {
    pub row: usize,
    pub col: usize,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub step: [i64; 2],
    #[serde(default = "ongoing")]
    pub winner: Outcome,
    #[serde(default)]
    pub error: bool,
}

fn ongoing() -> Outcome {
    Outcome::Ongoing
}

impl Message {
    /// A player's move request as the client sends it
    pub fn request(row: i64, col: i64) -> Self {
        Self {
            step: [row, col],
            winner: Outcome::Ongoing,
            error: false,
        }
    }

    /// Server reply to a player move. `request` is `None` when the line could not be parsed.
    pub fn validation(request: Option<MoveRequest>, result: MoveResult) -> Self {
        Self {
            step: request.map_or(NO_STEP, |r| [r.row, r.col]),
            winner: result.outcome,
            error: !result.applied,
        }
    }

    pub fn engine(reply: EngineMove) -> Self {
        Self {
            step: [reply.row as i64, reply.col as i64],
            winner: reply.outcome,
            error: false,
        }
    }

    pub fn move_request(&self) -> MoveRequest {
        MoveRequest {
            row: self.step[0],
            col: self.step[1],
        }
    }

    /// The step as a board coordinate, if it is one
    pub fn step_move(&self) -> Option<Move> {
        Move::new(self.step[0], self.step[1]).ok()
    }
}

/// Serializes a message into a single `\n`-terminated line.
pub fn encode_line(message: &Message) -> Result<String, ProtocolError> {
    let mut line = serde_json::to_string(message).map_err(ProtocolError::Encode)?;
    line.push('\n');
    Ok(line)
}

pub fn decode_message(line: &str) -> Result<Message, ProtocolError> {
    serde_json::from_str(line.trim()).map_err(|source| ProtocolError::Malformed {
        line: line.trim().to_string(),
        source,
    })
}

/// Parses a player line. Anything without a two-integer `step` is malformed.
pub fn parse_request(line: &str) -> Result<MoveRequest, ProtocolError> {
    decode_message(line).map(|message| message.move_request())
}
