//! # Chat Server Library
//!
//! Line-protocol chat server: a central event loop multiplexes many
//! client connections over newline-delimited UTF-8 text, routing public
//! broadcasts, private messages, server commands and turn-based
//! mini-games.
//!
//! ## Architecture
//!
//! All chat and game state — the connection registry, per-connection
//! solo game sessions and the shared quiz round — is owned by a single
//! event loop. Per-connection reader tasks and the quiz deadline timer
//! never touch that state; they post [`server::ServerEvent`]s over one
//! unbounded channel that the loop drains with `tokio::select!`. That
//! keeps every mutation serialized without any locks, and gives each
//! connection strict in-order processing of its own lines.
//!
//! Writes go the other way: every connection has an unbounded outbox
//! drained by its own writer task, so delivery is fire-and-forget and a
//! dead peer is only noticed on its next read.
//!
//! ## Protocol
//!
//! Newly accepted connections are greeted and asked for a display name;
//! names are unique and `"server"` is reserved. After registration a
//! plain line is a public broadcast, `"[name] text"` is a private
//! message and `"[server] <command>"` reaches command dispatch (`help`,
//! `participants`, `participants-count`, `rock-paper-scissors`, `21`,
//! `quiz`).
//!
//! ## Module Organization
//!
//! - [`registry`] — connection table, name bookkeeping and the fan-out
//!   primitives (send-to-one, broadcast-except, private message).
//! - [`server`] — listener setup, reader/writer tasks and the event
//!   loop itself.
//! - [`router`] — per-line routing priority and server command
//!   dispatch.
//! - [`games`] — the mini-game state machines: two solo games and the
//!   shared quiz with its one-shot deadline.
//! - [`bridge`] — seam for external messaging bridges mirroring public
//!   chat to other platforms.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::server::{ChatServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut server = ChatServer::bind("0.0.0.0:8888", ServerConfig::default()).await?;
//!     // Accepts connections and serves chat until the process stops.
//!     server.run().await
//! }
//! ```

pub mod bridge;
pub mod games;
pub mod registry;
pub mod router;
pub mod server;
