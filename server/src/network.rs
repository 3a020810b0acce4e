//! Server network layer: TCP accept loop, one game at a time

use crate::session::{Session, SessionEnd, SessionError};
use crate::source::MoveSource;
use log::{error, info, warn};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

pub type ServerError = Box<dyn std::error::Error + Send + Sync>;

/// Accepts players and runs their games sequentially
pub struct Server {
    listener: TcpListener,
    games_started: u32,
}

impl Server {
    pub async fn new(addr: &str) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr).await?;
        info!("Server listening on {}", listener.local_addr()?);

        Ok(Server {
            listener,
            games_started: 0,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Waits for the next player and plays one full game with them.
    pub async fn serve_one(
        &mut self,
        source: &mut dyn MoveSource,
    ) -> Result<SessionEnd, ServerError> {
        info!("Waiting for a player...");
        let (stream, addr) = self.listener.accept().await?;

        self.games_started += 1;
        let game_id = self.games_started;
        info!("Game {}: new player from {}", game_id, addr);

        if let Err(e) = stream.set_nodelay(true) {
            warn!("Game {}: could not disable Nagle: {}", game_id, e);
        }

        let end = Session::new(game_id, stream, source).run().await?;
        Ok(end)
    }

    /// Main server loop. Session failures end that game only, except a closed
    /// engine move source, which stops the server.
    pub async fn run(&mut self, source: &mut dyn MoveSource) -> Result<(), ServerError> {
        info!("Server started successfully");

        loop {
            match self.serve_one(source).await {
                Ok(SessionEnd::Finished(outcome)) => {
                    info!("Game {} finished: {:?}", self.games_started, outcome);
                }
                Ok(SessionEnd::Disconnected) => {
                    info!("Game {} abandoned", self.games_started);
                }
                Err(e) if matches!(
                    e.downcast_ref::<SessionError>(),
                    Some(SessionError::SourceClosed(_))
                ) =>
                {
                    error!("Game {} aborted, no more engine moves: {}", self.games_started, e);
                    return Err(e);
                }
                Err(e) => {
                    error!("Game {} failed: {}", self.games_started, e);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                }
            }
        }
    }
}
