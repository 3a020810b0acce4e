//! # Game Client Library
//!
//! Terminal client for the Tic-Tac-Toe server. It connects over TCP, reads
//! moves typed as `row col`, and keeps a local copy of the board in step with
//! the server's replies.
//!
//! ## Architecture Overview
//!
//! The server is authoritative. The client never decides whether a move is
//! legal; it sends the request, waits for the verdict, and only then places
//! the mark locally. Every server reply is re-checked against the local board
//! so a desynchronised game is reported instead of silently drawn wrong.
//!
//! ## Module Organization
//!
//! ### Game Module (`game`)
//! Local mirror of the board and the pending move awaiting its verdict.
//!
//! ### Input Module (`input`)
//! Reads commands from the terminal.
//!
//! ### Network Module (`network`)
//! Connection handling and the request/response game loop.
//!
//! ### Rendering Module (`rendering`)
//! Text drawing of the board and the final result.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use client::input::InputManager;
//! use client::network::Client;
//! use tokio::io::BufReader;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let mut client = Client::connect("127.0.0.1:8080").await?;
//!     let mut input = InputManager::new(BufReader::new(tokio::io::stdin()));
//!
//!     if let Some(outcome) = client.run(&mut input).await? {
//!         println!("Final result: {:?}", outcome);
//!     }
//!     Ok(())
//! }
//! ```

pub mod game;
pub mod input;
pub mod network;
pub mod rendering;
