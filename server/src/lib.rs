//! # Game Server Library
//!
//! This library provides the authoritative Tic-Tac-Toe server. A remote
//! player connects over TCP and plays crosses; the server plays zeros,
//! adjudicates every move and announces wins and ties.
//!
//! ## Core Responsibilities
//!
//! ### Authoritative Adjudication
//! The server holds the only real board. Every requested move is checked for
//! range and occupancy before it is applied, and the outcome is recomputed
//! after each move.
//!
//! ### Engine Play
//! After each accepted player move that leaves the game running, the engine
//! answers through a [`source::MoveSource`]: the one-ply heuristic by default,
//! or the operator at the server terminal in manual mode.
//!
//! ### Session Lifecycle
//! One connection is one game. The session greets the player, loops on
//! request lines, and closes the connection once the game is over. Bad input
//! is never fatal; it is answered with `error: true` and the player may try
//! again.
//!
//! ## Architecture Design
//!
//! ### One Game At A Time
//! The accept loop serves players sequentially. A game never shares its board
//! with another task, so no locking is needed anywhere.
//!
//! ### Line Protocol
//! Messages are single-line JSON objects (see [`shared::protocol`]). Every
//! player line produces a validation reply, followed by the engine's move
//! when the game continues.
//!
//! ## Module Organization
//!
//! ### Network Module (`network`)
//! TCP listener and the sequential accept loop.
//!
//! ### Session Module (`session`)
//! Per-connection game state machine: `AwaitingPlayerMove -> GameOver`.
//!
//! ### Source Module (`source`)
//! Engine move providers: heuristic strategist and operator console.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::network::Server;
//! use server::source::HeuristicSource;
//! use shared::{Mark, Strategist};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let mut server = Server::new("127.0.0.1:8080").await?;
//!     let mut engine = HeuristicSource::new(Strategist::from_entropy(Mark::Engine));
//!
//!     // Serves players one after another until the task is dropped.
//!     server.run(&mut engine).await?;
//!     Ok(())
//! }
//! ```

pub mod network;
pub mod session;
pub mod source;
