//! # Fear Bingo Session Server Library
//!
//! This library provides the authoritative server for a live fear-bingo round.
//! It owns the canonical session state, applies player and admin commands, and
//! broadcasts a fresh snapshot to every connected viewer after each change.
//!
//! ## Core Responsibilities
//!
//! ### Authoritative Session
//! Every decision is made here: who may join, which tickets are sealed, which
//! fear is revealed next and whether a bingo claim stands. Clients only render
//! snapshots and send commands.
//!
//! ### Viewer Management
//! Handles the lifecycle of viewer connections:
//! - Connection establishment with an immediate snapshot
//! - Heartbeat-based liveness and timeouts
//! - Capacity limits
//!
//! Viewers are not players. Losing a viewer never removes a player record.
//!
//! ### Snapshot Broadcasting
//! Each state-changing command is followed by a complete snapshot sent to all
//! viewers, so a client can always redraw from the latest packet alone.
//!
//! ## Architecture Design
//!
//! ### Serial Event Loop
//! Commands are applied one at a time by the loop that owns the
//! [`session::SessionStore`]. Receiving, sending and timeout checks run in
//! their own tasks and talk to the loop over channels.
//!
//! ### Transport-Independent Core
//! [`commands::dispatch`] turns a typed command into a private reply plus a
//! "changed" flag. The session modules never see a socket, which keeps every
//! rule testable with a seeded random source.
//!
//! ## Module Organization
//!
//! - `session`: the store tying phases, players and the deck together
//! - `phase`: the `betting → selection → playing → finished` machine
//! - `registry`: player registration, tickets, marks and the prize pool
//! - `deck`: the fear catalog and random reveals
//! - `validator`: bingo claim review and the strike ladder
//! - `commands`: packet to command mapping and dispatch
//! - `error`: command failures
//! - `client_manager`: connected viewers
//! - `network`: UDP tasks and the event loop
//! - `config`: command-line configuration
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::config::ServerConfig;
//! use server::network::Server;
//! use clap::Parser;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let config = ServerConfig::parse();
//!     let mut server = Server::new(&config).await?;
//!     server.run().await
//! }
//! ```

pub mod client_manager;
pub mod commands;
pub mod config;
pub mod deck;
pub mod error;
pub mod network;
pub mod phase;
pub mod registry;
pub mod session;
pub mod validator;
