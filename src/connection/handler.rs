//! Connection Handler Module
//!
//! This module handles individual client connections to HyperQ.
//! Each client gets its own handler task that runs in a loop,
//! reading commands and sending replies.
//!
//! ## Connection Lifecycle
//!
//! ```text
//! 1. Client connects (TCP handshake)
//!        │
//!        ▼
//! 2. ConnectionHandler spawned
//!        │
//!        ▼
//! 3. ┌──────────────────────────────┐
//!    │      Main Loop               │
//!    │                              │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Reading: append bytes   │ │
//!    │  │ until CRLF is buffered  │ │
//!    │  └───────────┬─────────────┘ │
//!    │              │               │
//!    │              ▼               │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Dispatching: split off  │ │
//!    │  │ one line, execute it    │ │
//!    │  └───────────┬─────────────┘ │
//!    │              │               │
//!    │              ▼               │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Write one reply line    │ │
//!    │  └───────────┬─────────────┘ │
//!    │              │               │
//!    │              ▼               │
//!    │         [Loop back]          │
//!    └──────────────────────────────┘
//!        │
//!        ▼
//! 4. Client disconnects / error
//!        │
//!        ▼
//! 5. Closed: handler task ends
//! ```
//!
//! ## Buffer Management
//!
//! A `BytesMut` buffer accumulates incoming data. TCP is a stream protocol, so
//! a read may carry half a command or several pipelined ones. Bytes after the
//! first terminator stay in the buffer for the next cycle.

use crate::commands::CommandHandler;
use crate::protocol::{Command, LineParser, ParseError, Reply};
use bytes::BytesMut;
use std::any::Any;
use std::net::SocketAddr;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufWriter};
use tracing::{debug, error, info, trace, warn};

/// Initial buffer capacity
const INITIAL_BUFFER_SIZE: usize = 4096;

/// Statistics for connection handling
#[derive(Debug, Default)]
pub struct ConnectionStats {
    /// Total number of connections accepted
    pub connections_accepted: AtomicU64,
    /// Currently active connections
    pub active_connections: AtomicU64,
    /// Total commands processed
    pub commands_processed: AtomicU64,
    /// Total bytes read
    pub bytes_read: AtomicU64,
    /// Total bytes written
    pub bytes_written: AtomicU64,
}

impl ConnectionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection_opened(&self) {
        self.connections_accepted.fetch_add(1, Ordering::Relaxed);
        self.active_connections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn connection_closed(&self) {
        self.active_connections.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn command_processed(&self) {
        self.commands_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn bytes_read(&self, count: usize) {
        self.bytes_read.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn bytes_written(&self, count: usize) {
        self.bytes_written
            .fetch_add(count as u64, Ordering::Relaxed);
    }
}

/// Handles a single client connection.
///
/// This struct owns the read buffer and the stream for one connected client.
/// It is generic over the stream so it can run on a `TcpStream` or on any
/// other duplex byte stream.
pub struct ConnectionHandler<S> {
    /// The client stream, with buffered writes
    stream: BufWriter<S>,

    /// Client's address (for logging)
    addr: SocketAddr,

    /// Accumulator for incoming bytes
    buffer: BytesMut,

    /// The command handler (shared store behind it)
    command_handler: CommandHandler,

    /// Line parser
    parser: LineParser,

    /// Connection statistics (shared)
    stats: Arc<ConnectionStats>,
}

impl<S> ConnectionHandler<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Creates a new connection handler.
    ///
    /// # Arguments
    ///
    /// * `stream` - The byte stream for this connection
    /// * `addr` - The client's socket address
    /// * `command_handler` - The command handler for executing commands
    /// * `stats` - Shared connection statistics
    pub fn new(
        stream: S,
        addr: SocketAddr,
        command_handler: CommandHandler,
        stats: Arc<ConnectionStats>,
    ) -> Self {
        stats.connection_opened();

        Self {
            stream: BufWriter::new(stream),
            addr,
            buffer: BytesMut::with_capacity(INITIAL_BUFFER_SIZE),
            command_handler,
            parser: LineParser::new(),
            stats,
        }
    }

    /// Runs the main connection loop.
    ///
    /// This method reads commands from the client, executes them,
    /// and sends back replies until the client disconnects or an error occurs.
    /// Returns `Ok` when the client closes the connection between commands.
    pub async fn run(mut self) -> Result<(), ConnectionError> {
        info!(client = %self.addr, "Client connected");

        let result = self.main_loop().await;

        match &result {
            Ok(()) => info!(client = %self.addr, "Client disconnected gracefully"),
            Err(e) => match e {
                ConnectionError::IoError(io_err)
                    if io_err.kind() == std::io::ErrorKind::ConnectionReset =>
                {
                    debug!(client = %self.addr, "Connection reset by client")
                }
                ConnectionError::CommandPanicked { .. } => {
                    error!(client = %self.addr, error = %e, "Closing connection")
                }
                _ => warn!(client = %self.addr, error = %e, "Connection error"),
            },
        }

        self.stats.connection_closed();
        result
    }

    /// The main read-execute-respond loop.
    async fn main_loop(&mut self) -> Result<(), ConnectionError> {
        loop {
            // Dispatch every complete line already buffered
            while let Some(command) = self.try_parse_command()? {
                let reply = self.dispatch(&command)?;
                self.stats.command_processed();

                self.send_reply(&reply).await?;
            }

            // Need more data - read from the socket
            if !self.read_more_data().await? {
                return Ok(());
            }
        }
    }

    /// Attempts to split one command off the front of the buffer.
    fn try_parse_command(&mut self) -> Result<Option<Command>, ConnectionError> {
        if self.buffer.is_empty() {
            return Ok(None);
        }

        match self.parser.parse(&self.buffer) {
            Ok(Some((command, consumed))) => {
                let _ = self.buffer.split_to(consumed);
                trace!(
                    client = %self.addr,
                    consumed = consumed,
                    remaining = self.buffer.len(),
                    "Parsed command"
                );
                Ok(Some(command))
            }
            Ok(None) => {
                trace!(
                    client = %self.addr,
                    buffered = self.buffer.len(),
                    "Incomplete command, need more data"
                );
                Ok(None)
            }
            Err(e) => Err(ConnectionError::ParseError(e)),
        }
    }

    /// Executes a command, turning a panic into a connection error.
    ///
    /// The store recovers from a poisoned lock, so only this connection is
    /// affected.
    fn dispatch(&self, command: &Command) -> Result<Reply, ConnectionError> {
        debug!(client = %self.addr, command = %command, "Received command");

        let handler = &self.command_handler;
        run_guarded(&command.name, || handler.execute(command))
    }

    /// Reads more data from the stream into the buffer.
    ///
    /// Returns `false` on a clean EOF, i.e. nothing left unparsed.
    async fn read_more_data(&mut self) -> Result<bool, ConnectionError> {
        // Ensure we have some capacity
        if self.buffer.capacity() - self.buffer.len() < 1024 {
            self.buffer.reserve(INITIAL_BUFFER_SIZE);
        }

        let n = self.stream.get_mut().read_buf(&mut self.buffer).await?;

        if n == 0 {
            // Connection closed by client
            if self.buffer.is_empty() {
                return Ok(false);
            } else {
                // Partial command in buffer
                return Err(ConnectionError::UnexpectedEof);
            }
        }

        self.stats.bytes_read(n);
        trace!(client = %self.addr, bytes = n, "Read data");

        Ok(true)
    }

    /// Sends exactly one reply line to the client.
    async fn send_reply(&mut self, reply: &Reply) -> Result<(), ConnectionError> {
        let bytes = reply.serialize();
        self.stream.write_all(&bytes).await?;
        self.stream.flush().await?;
        self.stats.bytes_written(bytes.len());
        debug!(client = %self.addr, reply = %reply, "Sent reply");
        Ok(())
    }
}

/// Runs one command, catching a panic as `CommandPanicked`.
fn run_guarded<F>(command: &str, execute: F) -> Result<Reply, ConnectionError>
where
    F: FnOnce() -> Reply,
{
    panic::catch_unwind(AssertUnwindSafe(execute)).map_err(|payload| {
        ConnectionError::CommandPanicked {
            command: command.to_string(),
            reason: panic_message(payload.as_ref()),
        }
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Errors that can occur while handling a connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// I/O error (network issue)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The request line could not be parsed
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),

    /// Unexpected end of stream (partial command)
    #[error("Unexpected end of stream")]
    UnexpectedEof,

    /// Executing a command panicked
    #[error("Command '{command}' failed: {reason}")]
    CommandPanicked { command: String, reason: String },
}

/// Handles a client connection.
///
/// This is a convenience function that creates a ConnectionHandler
/// and runs it to completion.
///
/// # Arguments
///
/// * `stream` - The byte stream for this connection
/// * `addr` - The client's socket address
/// * `command_handler` - The command handler for executing commands
/// * `stats` - Shared connection statistics
pub async fn handle_connection<S>(
    stream: S,
    addr: SocketAddr,
    command_handler: CommandHandler,
    stats: Arc<ConnectionStats>,
) where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let handler = ConnectionHandler::new(stream, addr, command_handler, stats);
    if let Err(e) = handler.run().await {
        match e {
            ConnectionError::IoError(ref io_err)
                if io_err.kind() == std::io::ErrorKind::ConnectionReset => {}
            _ => {
                debug!(client = %addr, error = %e, "Connection ended with error");
            }
        }
    }
}
