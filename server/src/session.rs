//! One game over one connection
//!
//! A session owns the connection and a fresh board. It reads one request line
//! at a time, adjudicates it, answers, and lets the engine reply while the game
//! is still running. Once an outcome other than `Ongoing` is reached the
//! session is over and the connection is closed by dropping it.

use crate::source::MoveSource;
use log::{debug, info, warn};
use shared::{
    apply_move, encode_line, evaluate_outcome, parse_request, validate_move, Board, EngineMove,
    Mark, Message, MoveRequest, MoveResult, Outcome, ProtocolError, GREETING,
};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Longest request line accepted, newline included
pub const MAX_LINE_BYTES: u64 = 1024;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("connection error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error("engine move source is unavailable: {0}")]
    SourceClosed(String),
}

/// Where a game stands from the controller's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingPlayerMove,
    GameOver(Outcome),
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Finished(Outcome),
    Disconnected,
}

enum LineRead {
    Line,
    TooLong,
    Eof,
}

pub struct Session<'a, S> {
    id: u32,
    stream: BufReader<S>,
    board: Board,
    state: SessionState,
    moves_played: usize,
    source: &'a mut dyn MoveSource,
}

impl<'a, S> Session<'a, S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(id: u32, stream: S, source: &'a mut dyn MoveSource) -> Self {
        Self {
            id,
            stream: BufReader::new(stream),
            board: Board::new(),
            state: SessionState::AwaitingPlayerMove,
            moves_played: 0,
            source,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Greets the player and plays until the game ends or the player leaves.
    pub async fn run(mut self) -> Result<SessionEnd, SessionError> {
        self.send_text(GREETING).await?;

        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            let read = match self.read_line_capped(&mut buffer).await {
                Ok(read) => read,
                Err(e) => {
                    warn!("Game {}: read failed, dropping player: {}", self.id, e);
                    return Ok(SessionEnd::Disconnected);
                }
            };

            match read {
                LineRead::Eof => {
                    info!("Game {}: player disconnected", self.id);
                    return Ok(SessionEnd::Disconnected);
                }
                LineRead::TooLong => {
                    warn!(
                        "Game {}: request longer than {} bytes",
                        self.id, MAX_LINE_BYTES
                    );
                    self.send(&Message::validation(None, MoveResult::rejected()))
                        .await?;
                    continue;
                }
                LineRead::Line => {}
            }

            let line = String::from_utf8_lossy(&buffer);
            if line.trim().is_empty() {
                continue;
            }

            if let SessionState::GameOver(outcome) = self.play_turn(&line).await? {
                info!(
                    "Game {} over after {} moves: {:?}",
                    self.id, self.moves_played, outcome
                );
                return Ok(SessionEnd::Finished(outcome));
            }
        }
    }

    /// Reads one line of at most [`MAX_LINE_BYTES`]. The rest of an over-long
    /// line is read and thrown away.
    async fn read_line_capped(&mut self, buffer: &mut Vec<u8>) -> std::io::Result<LineRead> {
        let read = (&mut self.stream)
            .take(MAX_LINE_BYTES)
            .read_until(b'\n', buffer)
            .await?;

        if read == 0 {
            return Ok(LineRead::Eof);
        }
        if buffer.ends_with(b"\n") || (read as u64) < MAX_LINE_BYTES {
            return Ok(LineRead::Line);
        }

        let mut scratch = Vec::new();
        loop {
            scratch.clear();
            let skipped = (&mut self.stream)
                .take(MAX_LINE_BYTES)
                .read_until(b'\n', &mut scratch)
                .await?;
            if skipped == 0 || scratch.ends_with(b"\n") {
                return Ok(LineRead::TooLong);
            }
        }
    }

    /// Handles one player line: validation reply, then the engine's reply if
    /// the game goes on.
    async fn play_turn(&mut self, line: &str) -> Result<SessionState, SessionError> {
        let (request, result) = self.apply_player_line(line);
        self.send(&Message::validation(request, result)).await?;

        if !result.applied || self.state != SessionState::AwaitingPlayerMove {
            return Ok(self.state);
        }

        let reply = self.engine_turn().await?;
        self.send(&Message::engine(reply)).await?;
        Ok(self.state)
    }

    /// Parses, validates and applies the player's move. Never fails: bad input
    /// is an ordinary rejected move.
    pub fn apply_player_line(&mut self, line: &str) -> (Option<MoveRequest>, MoveResult) {
        let request = match parse_request(line) {
            Ok(request) => request,
            Err(e) => {
                warn!("Game {}: {}", self.id, e);
                return (None, MoveResult::rejected());
            }
        };

        (Some(request), self.apply_request(request))
    }

    pub fn apply_request(&mut self, request: MoveRequest) -> MoveResult {
        if self.state != SessionState::AwaitingPlayerMove {
            return MoveResult::rejected();
        }

        let mv = match validate_move(&self.board, request.row, request.col) {
            Ok(mv) => mv,
            Err(e) => {
                warn!("Game {}: illegal move: {}", self.id, e);
                return MoveResult::rejected();
            }
        };

        apply_move(&mut self.board, mv, Mark::Player);
        let outcome = self.record_move(Mark::Player);
        debug!("Game {}: player played ({}, {})", self.id, mv.row(), mv.col());

        MoveResult {
            applied: true,
            outcome,
        }
    }

    async fn engine_turn(&mut self) -> Result<EngineMove, SessionError> {
        let mv = self.source.next_move(&self.board).await?;
        apply_move(&mut self.board, mv, Mark::Engine);
        let outcome = self.record_move(Mark::Engine);
        debug!("Game {}: engine played ({}, {})", self.id, mv.row(), mv.col());

        Ok(EngineMove {
            row: mv.row(),
            col: mv.col(),
            outcome,
        })
    }

    fn record_move(&mut self, mark: Mark) -> Outcome {
        self.moves_played += 1;
        let outcome = evaluate_outcome(&self.board);
        if outcome.is_over() {
            self.state = SessionState::GameOver(outcome);
        }
        debug!("Game {} after {:?} move:\n{}", self.id, mark, self.board);
        outcome
    }

    async fn send(&mut self, message: &Message) -> Result<(), SessionError> {
        let line = encode_line(message)?;
        debug!("Game {}: sending {}", self.id, line.trim_end());
        self.stream.get_mut().write_all(line.as_bytes()).await?;
        Ok(())
    }

    async fn send_text(&mut self, text: &str) -> Result<(), SessionError> {
        let line = format!("{}\n", text);
        self.stream.get_mut().write_all(line.as_bytes()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::HeuristicSource;
    use shared::{Cell, Strategist};
    use tokio::io::{duplex, AsyncBufReadExt, AsyncWriteExt, BufReader};

    fn engine() -> HeuristicSource {
        HeuristicSource::new(Strategist::seeded(Mark::Engine, 3))
    }

    fn reply(step: [i64; 2], winner: u8, error: bool) -> String {
        format!(
            "{{\"step\":[{},{}],\"winner\":{},\"error\":{}}}\n",
            step[0], step[1], winner, error
        )
    }

    #[test]
    fn test_apply_request_legal_and_illegal() {
        let mut source = engine();
        let mut session = Session::new(1, duplex(64).0, &mut source);

        let result = session.apply_request(MoveRequest { row: 1, col: 1 });
        assert!(result.applied);
        assert_eq!(result.outcome, Outcome::Ongoing);
        assert_eq!(session.board().cell_at(1, 1), Ok(Cell::PlayerMark));

        let again = session.apply_request(MoveRequest { row: 1, col: 1 });
        assert_eq!(again, MoveResult::rejected());

        let outside = session.apply_request(MoveRequest { row: 3, col: -1 });
        assert!(!outside.applied);
        assert_eq!(session.board().count_empty(), 8);
    }

    #[test]
    fn test_malformed_line_is_rejected_move() {
        let mut source = engine();
        let mut session = Session::new(1, duplex(64).0, &mut source);

        let (request, result) = session.apply_player_line("not json at all");
        assert_eq!(request, None);
        assert!(!result.applied);
        assert_eq!(session.state(), SessionState::AwaitingPlayerMove);
    }

    #[tokio::test]
    async fn test_scripted_game_engine_wins() {
        // Opening reply, two blocks, then the engine completes row 1.
        let mock = tokio_test::io::Builder::new()
            .write(format!("{}\n", GREETING).as_bytes())
            .read(b"{\"step\":[0,0]}\n")
            .write(reply([0, 0], 0, false).as_bytes())
            .write(reply([1, 1], 0, false).as_bytes())
            .read(b"{\"step\":[0,1]}\n")
            .write(reply([0, 1], 0, false).as_bytes())
            .write(reply([0, 2], 0, false).as_bytes())
            .read(b"{\"step\":[2,0]}\n")
            .write(reply([2, 0], 0, false).as_bytes())
            .write(reply([1, 0], 0, false).as_bytes())
            .read(b"{\"step\":[2,2]}\n")
            .write(reply([2, 2], 0, false).as_bytes())
            .write(reply([1, 2], 1, false).as_bytes())
            .build();

        let mut source = engine();
        let end = Session::new(7, mock, &mut source).run().await.unwrap();
        assert_eq!(end, SessionEnd::Finished(Outcome::EngineWins));
    }

    #[tokio::test]
    async fn test_illegal_moves_then_disconnect() {
        let mock = tokio_test::io::Builder::new()
            .write(format!("{}\n", GREETING).as_bytes())
            .read(b"garbage\n")
            .write(reply([-1, -1], 0, true).as_bytes())
            .read(b"{\"step\":[5,0]}\n")
            .write(reply([5, 0], 0, true).as_bytes())
            .read(b"\n")
            .build();

        let mut source = engine();
        let end = Session::new(2, mock, &mut source).run().await.unwrap();
        assert_eq!(end, SessionEnd::Disconnected);
    }

    #[tokio::test]
    async fn test_overlong_line_is_rejected_then_play_continues() {
        let flood = vec![b'x'; MAX_LINE_BYTES as usize + 500];
        let mock = tokio_test::io::Builder::new()
            .write(format!("{}\n", GREETING).as_bytes())
            .read(&flood)
            .read(b"\n{\"step\":[1,1]}\n")
            .write(reply([-1, -1], 0, true).as_bytes())
            .write(reply([1, 1], 0, false).as_bytes())
            .write(reply([0, 0], 0, false).as_bytes())
            .build();

        let mut source = engine();
        let end = Session::new(4, mock, &mut source).run().await.unwrap();
        assert_eq!(end, SessionEnd::Disconnected);
    }

    #[tokio::test]
    async fn test_occupied_cell_rejected_over_duplex() {
        let (client, server) = duplex(1024);
        let mut source = engine();

        let server_task = async move { Session::new(3, server, &mut source).run().await };

        let client_task = async move {
            let mut client = BufReader::new(client);
            let mut line = String::new();

            client.read_line(&mut line).await.unwrap();
            assert_eq!(line.trim_end(), GREETING);

            client.write_all(b"{\"step\":[2,2]}\n").await.unwrap();
            line.clear();
            client.read_line(&mut line).await.unwrap();
            assert_eq!(line, reply([2, 2], 0, false));
            line.clear();
            client.read_line(&mut line).await.unwrap();
            assert_eq!(line, reply([1, 1], 0, false));

            // The engine's own cell is taken too.
            client.write_all(b"{\"step\":[1,1]}\n").await.unwrap();
            line.clear();
            client.read_line(&mut line).await.unwrap();
            assert_eq!(line, reply([1, 1], 0, true));
        };

        let (end, ()) = tokio::join!(server_task, client_task);
        assert_eq!(end.unwrap(), SessionEnd::Disconnected);
    }
}
