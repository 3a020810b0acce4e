//! Terminal input: turns typed `row col` lines into move requests

use shared::{parse_coordinates, MoveRequest};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

/// What the player typed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(MoveRequest),
    Quit,
}

pub struct InputManager<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin> InputManager<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// Reads lines until one is a command. End of input counts as quitting.
    ///
    /// Coordinates are not range-checked here; the server is the judge.
    pub async fn next_command(&mut self) -> std::io::Result<Command> {
        while let Some(line) = self.lines.next_line().await? {
            if let Some(command) = parse_command(&line) {
                return Ok(command);
            }
            println!("Type a row and a column, e.g. `1 2`, or `q` to quit");
        }
        Ok(Command::Quit)
    }
}

pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
        return Some(Command::Quit);
    }

    parse_coordinates(line).map(|(row, col)| Command::Play(MoveRequest { row, col }))
}
