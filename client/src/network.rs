use crate::game::{ClientGameState, Verdict};
use crate::input::{Command, InputManager};
use crate::rendering::{outcome_banner, render_board};
use log::{debug, info, warn};
use shared::{decode_message, encode_line, Message, MoveRequest, Outcome};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

pub type ClientError = Box<dyn std::error::Error + Send + Sync>;

pub struct Client<S> {
    stream: BufReader<S>,
    game_state: ClientGameState,
}

impl Client<TcpStream> {
    pub async fn connect(server_addr: &str) -> Result<Self, ClientError> {
        info!("Connecting to server...");
        let stream = TcpStream::connect(server_addr).await?;
        stream.set_nodelay(true)?;
        Ok(Client::new(stream))
    }
}

impl<S: AsyncRead + AsyncWrite + Unpin> Client<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream: BufReader::new(stream),
            game_state: ClientGameState::new(),
        }
    }

    pub fn game_state(&self) -> &ClientGameState {
        &self.game_state
    }

    async fn read_line(&mut self) -> Result<String, ClientError> {
        let mut line = String::new();
        if self.stream.read_line(&mut line).await? == 0 {
            return Err("server closed the connection".into());
        }
        Ok(line)
    }

    async fn read_message(&mut self) -> Result<Message, ClientError> {
        loop {
            let line = self.read_line().await?;
            if line.trim().is_empty() {
                continue;
            }
            debug!("Received {}", line.trim_end());
            return Ok(decode_message(&line)?);
        }
    }

    async fn send_request(&mut self, request: MoveRequest) -> Result<(), ClientError> {
        self.game_state.submit(request);
        let line = encode_line(&Message::request(request.row, request.col))?;
        self.stream.get_mut().write_all(line.as_bytes()).await?;
        Ok(())
    }

    /// Plays one game. Returns `None` if the player quit before the end.
    pub async fn run<R>(
        &mut self,
        input: &mut InputManager<R>,
    ) -> Result<Option<Outcome>, ClientError>
    where
        R: AsyncBufRead + Unpin,
    {
        let greeting = self.read_line().await?;
        println!("{}", greeting.trim_end());

        loop {
            println!(
                "\n{}\nYour move (row col):",
                render_board(self.game_state.board())
            );

            let request = match input.next_command().await? {
                Command::Play(request) => request,
                Command::Quit => {
                    info!("Leaving the game");
                    return Ok(None);
                }
            };

            self.send_request(request).await?;
            let validation = self.read_message().await?;
            let outcome = match self.game_state.apply_validation(&validation)? {
                Verdict::Rejected => {
                    warn!("Move ({}, {}) rejected", request.row, request.col);
                    println!("Illegal move, try again");
                    continue;
                }
                Verdict::Accepted(outcome) => outcome,
            };

            if let Some(outcome) = self.finish_if_over(outcome) {
                return Ok(Some(outcome));
            }

            let reply = self.read_message().await?;
            let outcome = self.game_state.apply_engine(&reply)?;
            println!("Server played ({}, {})", reply.step[0], reply.step[1]);

            if let Some(outcome) = self.finish_if_over(outcome) {
                return Ok(Some(outcome));
            }
        }
    }

    fn finish_if_over(&self, outcome: Outcome) -> Option<Outcome> {
        let banner = outcome_banner(outcome)?;
        println!("\n{}\n{}", render_board(self.game_state.board()), banner);
        Some(outcome)
    }
}
