//! Where the engine side's moves come from
//!
//! By default the server plays with the heuristic strategist. In manual mode
//! the operator at the server's terminal types the engine's moves instead.

use crate::session::SessionError;
use async_trait::async_trait;
use log::debug;
use shared::{parse_coordinates, validate_move, Board, Move, Strategist};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines, Stdin};

#[async_trait]
pub trait MoveSource: Send {
    /// Produces a legal move for the engine. The board always has an empty cell.
    async fn next_move(&mut self, board: &Board) -> Result<Move, SessionError>;
}

pub struct HeuristicSource {
    strategist: Strategist,
}

impl HeuristicSource {
    pub fn new(strategist: Strategist) -> Self {
        Self { strategist }
    }
}

#[async_trait]
impl MoveSource for HeuristicSource {
    async fn next_move(&mut self, board: &Board) -> Result<Move, SessionError> {
        let decision = self.strategist.decide(board);
        debug!(
            "Engine picks ({}, {}) by {:?}",
            decision.mv.row(), decision.mv.col(), decision.rule
        );
        Ok(decision.mv)
    }
}

/// Reads `row col` lines from the operator until one names a legal move.
pub struct ConsoleSource<R> {
    lines: Lines<BufReader<R>>,
    echo: bool,
}

impl ConsoleSource<Stdin> {
    pub fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            echo: true,
        }
    }
}

impl<R: AsyncRead + Unpin> ConsoleSource<R> {
    /// Console source over any reader, without printing prompts
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
            echo: false,
        }
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> MoveSource for ConsoleSource<R> {
    async fn next_move(&mut self, board: &Board) -> Result<Move, SessionError> {
        if self.echo {
            println!("\n{}\nYour turn (row col):", board);
        }

        loop {
            let line = self
                .lines
                .next_line()
                .await?
                .ok_or_else(|| SessionError::SourceClosed("operator input closed".to_string()))?;

            let Some((row, col)) = parse_coordinates(&line) else {
                if self.echo {
                    println!("Type two numbers from 0 to 2, e.g. `1 2`");
                }
                continue;
            };

            match validate_move(board, row, col) {
                Ok(mv) => return Ok(mv),
                Err(e) => {
                    if self.echo {
                        println!("{}, try again", e);
                    }
                }
            }
        }
    }
}
