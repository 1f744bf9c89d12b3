//! # Fear Bingo Terminal Client Library
//!
//! This library provides a thin terminal viewer for a fear-bingo session. The
//! server owns every rule; the client only turns typed commands into packets
//! and redraws the latest snapshot it received.
//!
//! ## Module Organization
//!
//! ### Input Module (`input`)
//! Parses prompt lines into typed actions:
//! - `register <name> <bet>`, `seal <id>...`, `mark <id>`, `claim`
//! - Admin transitions `select`, `play`, `draw`, `reset`
//! - Local commands `show`, `help`, `quit`
//!
//! ### Network Module (`network`)
//! Manages all client-server communication:
//! - UDP socket management and connection handling
//! - Packet serialization and deserialization
//! - Periodic heartbeats to keep the viewer alive
//! - Binding the player token handed out at registration
//!
//! ### Rendering Module (`rendering`)
//! Formats a snapshot as text: phase, prize pool, the latest reveal, the local
//! ticket with marks and the standings.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use client::network::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = Client::new("127.0.0.1:8080", None).await?;
//!     client.run().await
//! }
//! ```
//!
//! ## Identity
//!
//! The player token is the only identity the server knows. A client that
//! restarts can resume its seat by passing the token back with `--player-id`;
//! the viewer connection itself carries no identity.

pub mod input;
pub mod network;
pub mod rendering;
