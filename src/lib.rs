//! # HyperQ - A Minimal In-Memory Message Queue Broker
//!
//! HyperQ keeps named FIFO queues of text payloads in memory and serves them
//! over a line-based TCP protocol. Clients push with `Q`, pull with `DQ` and
//! empty a queue with `CLR`. Nothing is persisted and nothing is pushed to
//! clients; every read is an explicit, non-blocking dequeue.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              HyperQ                                     │
//! │                                                                         │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐                  │
//! │  │ TCP Server  │───>│ Connection  │───>│  Command    │                  │
//! │  │ (Acceptor)  │    │  Handler    │    │  Handler    │                  │
//! │  └─────────────┘    └──────┬──────┘    └──────┬──────┘                  │
//! │                            │                  │                         │
//! │                            ▼                  ▼                         │
//! │                     ┌─────────────┐    ┌──────────────────────────────┐ │
//! │                     │    Line     │    │         QueueStore           │ │
//! │                     │   Parser    │    │  Mutex<HashMap<name, deque>> │ │
//! │                     └─────────────┘    └──────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use hyperq::server::{accept_loop, bind};
//! use hyperq::storage::QueueStore;
//! use hyperq::connection::ConnectionStats;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let store = Arc::new(QueueStore::new());
//!     let stats = Arc::new(ConnectionStats::new());
//!
//!     let listener = bind(("0.0.0.0", 5000), 5).await?;
//!     accept_loop(listener, store, stats).await;
//!     Ok(())
//! }
//! ```
//!
//! ## Supported Commands
//!
//! - `Q queue payload...` - Enqueue; replies `OK`
//! - `DQ queue` - Dequeue; replies with the payload or `ERR QueueEmpty`
//! - `CLR queue` - Clear; replies `OK`
//!
//! Unknown names get `ERR UnknownCommand`, too few arguments get
//! `ERR ArgumentMismatch`.
//!
//! ## Module Overview
//!
//! - [`protocol`]: Line parser and reply types
//! - [`storage`]: Shared queue store
//! - [`commands`]: Static command registry and dispatcher
//! - [`connection`]: Per-client read/dispatch/reply loop
//! - [`server`]: Listener setup and accept loop
//! - [`client`]: Async client library
//! - [`config`]: Command-line options for the server binary

pub mod client;
pub mod commands;
pub mod config;
pub mod connection;
pub mod protocol;
pub mod server;
pub mod storage;

// Re-export commonly used types for convenience
pub use client::{Client, ClientError, Queue};
pub use commands::CommandHandler;
pub use config::Config;
pub use connection::{handle_connection, ConnectionStats};
pub use protocol::{Command, LineParser, ParseError, Reply, ReplyError};
pub use storage::QueueStore;

/// The default port HyperQ listens on
pub const DEFAULT_PORT: u16 = 5000;

/// The default host HyperQ binds to (all interfaces)
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen backlog
pub const DEFAULT_BACKLOG: u32 = 5;

/// Version of HyperQ
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
