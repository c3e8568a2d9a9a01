//! HyperQ Client
//!
//! A thin async client for the HyperQ line protocol. It composes request lines,
//! sends them and interprets the reply; all queue logic lives on the server.
//!
//! ## Example
//!
//! ```ignore
//! use hyperq::client::Client;
//!
//! let client = Client::connect("127.0.0.1", 5000).await?;
//! let jobs = client.queue("jobs")?;
//! let urgent = jobs.sub_queue("urgent")?; // "jobs:urgent"
//!
//! urgent.enqueue("rebuild index").await?;
//!
//! while let Some(job) = urgent.try_dequeue().await? {
//!     println!("got {}", job);
//! }
//! ```
//!
//! Queue handles are cheap to clone. All handles from one [`Client`] share its
//! connection, and each request waits for its reply before the next is sent.

use crate::protocol::{command, Reply, ReplyError, CRLF};
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tracing::trace;

/// Separator used when deriving a sub-queue name
pub const SUB_QUEUE_SEPARATOR: char = ':';

/// Errors returned by the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Port outside 1-65535
    #[error("invalid port: {0}")]
    InvalidPort(u16),

    /// Queue names must be non-empty and free of spaces and line breaks
    #[error("invalid queue name: {0:?}")]
    InvalidName(String),

    /// Payloads cannot contain line breaks
    #[error("payload contains CR or LF")]
    InvalidPayload,

    /// I/O error talking to the server
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The server answered with `ERR <Symbol>`
    #[error("server error: {0}")]
    Server(#[from] ReplyError),

    /// The server closed the connection
    #[error("connection closed by server")]
    ConnectionClosed,

    /// A reply that does not fit the request
    #[error("unexpected reply: {0:?}")]
    UnexpectedReply(String),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// The request/reply channel shared by every handle of one client.
#[derive(Debug)]
struct Connection {
    stream: BufReader<TcpStream>,
}

impl Connection {
    /// Sends one request line and decodes its reply.
    async fn request(&mut self, line: &str) -> ClientResult<Reply> {
        let reply = self.request_raw(line).await?;
        Ok(Reply::from_line(&reply))
    }

    /// Sends one request line and returns the reply line without its terminator.
    async fn request_raw(&mut self, line: &str) -> ClientResult<String> {
        let mut out = Vec::with_capacity(line.len() + CRLF.len());
        out.extend_from_slice(line.as_bytes());
        out.extend_from_slice(CRLF);

        trace!(request = %line, "Sending");
        self.stream.get_mut().write_all(&out).await?;
        self.stream.get_mut().flush().await?;

        let mut reply = String::new();
        if self.stream.read_line(&mut reply).await? == 0 {
            return Err(ClientError::ConnectionClosed);
        }

        if !reply.ends_with("\r\n") {
            return Err(ClientError::UnexpectedReply(reply));
        }
        reply.truncate(reply.len() - CRLF.len());
        trace!(reply = %reply, "Received");

        Ok(reply)
    }
}

/// A connection to a HyperQ server.
#[derive(Debug, Clone)]
pub struct Client {
    conn: Arc<Mutex<Connection>>,
}

impl Client {
    /// Connects to a server.
    ///
    /// Port 0 is rejected before any connection attempt.
    pub async fn connect(host: &str, port: u16) -> ClientResult<Self> {
        if port == 0 {
            return Err(ClientError::InvalidPort(port));
        }

        let stream = TcpStream::connect((host, port)).await?;
        stream.set_nodelay(true)?;

        Ok(Self::from_stream(stream))
    }

    /// Wraps an already connected stream.
    pub fn from_stream(stream: TcpStream) -> Self {
        Self {
            conn: Arc::new(Mutex::new(Connection {
                stream: BufReader::new(stream),
            })),
        }
    }

    /// Returns a handle to the named queue.
    ///
    /// Nothing is sent; the server creates queues on first use.
    pub fn queue(&self, name: &str) -> ClientResult<Queue> {
        validate_name(name)?;
        Ok(Queue {
            name: name.to_string(),
            conn: Arc::clone(&self.conn),
        })
    }
}

/// A handle to one named queue on the server.
#[derive(Debug, Clone)]
pub struct Queue {
    name: String,
    conn: Arc<Mutex<Connection>>,
}

impl Queue {
    /// The full queue name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a handle named `<parent>:<child>`.
    ///
    /// Only a naming convention: the server has no notion of hierarchy.
    pub fn sub_queue(&self, child: &str) -> ClientResult<Queue> {
        validate_name(child)?;
        Ok(Queue {
            name: format!("{}{}{}", self.name, SUB_QUEUE_SEPARATOR, child),
            conn: Arc::clone(&self.conn),
        })
    }

    /// Enqueues a payload and waits for the server's `OK`.
    ///
    /// The server splits on spaces and re-joins with single spaces, so runs of
    /// spaces inside the payload collapse.
    pub async fn enqueue(&self, payload: &str) -> ClientResult<()> {
        if payload.contains(['\r', '\n']) {
            return Err(ClientError::InvalidPayload);
        }

        let line = format!("{} {} {}", command::ENQUEUE, self.name, payload);
        self.expect_ok(&line).await
    }

    /// Attempts to dequeue one payload.
    ///
    /// Returns `Ok(None)` when the queue is empty. Never waits for an item to
    /// arrive.
    ///
    /// A `DQ` for a valid name is answered either with `ERR QueueEmpty` or with
    /// the raw payload, so any other line is returned as is, even one reading
    /// `OK` or `ERR UnknownCommand`.
    pub async fn try_dequeue(&self) -> ClientResult<Option<String>> {
        let line = format!("{} {}", command::DEQUEUE, self.name);
        let reply = self.conn.lock().await.request_raw(&line).await?;

        if reply == Reply::error(ReplyError::QueueEmpty).to_string() {
            Ok(None)
        } else {
            Ok(Some(reply))
        }
    }

    /// Empties the queue on the server.
    pub async fn clear(&self) -> ClientResult<()> {
        let line = format!("{} {}", command::CLEAR, self.name);
        self.expect_ok(&line).await
    }

    async fn expect_ok(&self, line: &str) -> ClientResult<()> {
        match self.conn.lock().await.request(line).await? {
            Reply::Ok => Ok(()),
            Reply::Error(e) => Err(ClientError::Server(e)),
            Reply::Payload(other) => Err(ClientError::UnexpectedReply(other)),
        }
    }
}

fn validate_name(name: &str) -> ClientResult<()> {
    // The server splits on ' ' only, so other whitespace is part of the name
    if name.is_empty() || name.contains([' ', '\r', '\n']) {
        return Err(ClientError::InvalidName(name.to_string()));
    }
    Ok(())
}
