//! HyperQ Protocol Data Types
//!
//! This module defines the values exchanged over the wire.
//! The protocol is line based: every request and every reply is a single line
//! of text terminated with CRLF (`\r\n`).
//!
//! ## Protocol Format
//!
//! Requests are a command name followed by space separated arguments:
//! `<COMMAND> <arg1> <arg2> ... <argN>\r\n`
//!
//! Replies are one of:
//! - `OK\r\n` for a successful `Q` or `CLR`
//! - `<payload>\r\n` for a successful `DQ`, with no prefix
//! - `ERR <Symbol>\r\n` where the symbol is one of `UnknownCommand`,
//!   `ArgumentMismatch` or `QueueEmpty`
//!
//! ## Examples
//!
//! ```text
//! C: Q orders item1\r\n
//! S: OK\r\n
//! C: DQ orders\r\n
//! S: item1\r\n
//! C: DQ orders\r\n
//! S: ERR QueueEmpty\r\n
//! ```

use std::fmt;
use std::str::FromStr;

/// The CRLF terminator that ends every protocol line
pub const CRLF: &[u8] = b"\r\n";

/// Command names understood by the server
pub mod command {
    pub const ENQUEUE: &str = "Q";
    pub const DEQUEUE: &str = "DQ";
    pub const CLEAR: &str = "CLR";
}

/// Prefix that marks an error reply
pub const ERROR_PREFIX: &str = "ERR ";

/// One parsed request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// The command name, exactly as sent (case-sensitive)
    pub name: String,
    /// The arguments following the name, with empty tokens dropped
    pub args: Vec<String>,
}

impl Command {
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Error symbols sent back to the client as `ERR <Symbol>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReplyError {
    /// No command with that name exists
    #[error("UnknownCommand")]
    UnknownCommand,

    /// Fewer arguments than the command requires
    #[error("ArgumentMismatch")]
    ArgumentMismatch,

    /// The queue had nothing to dequeue
    #[error("QueueEmpty")]
    QueueEmpty,
}

impl ReplyError {
    /// The symbol as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyError::UnknownCommand => "UnknownCommand",
            ReplyError::ArgumentMismatch => "ArgumentMismatch",
            ReplyError::QueueEmpty => "QueueEmpty",
        }
    }
}

impl FromStr for ReplyError {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UnknownCommand" => Ok(ReplyError::UnknownCommand),
            "ArgumentMismatch" => Ok(ReplyError::ArgumentMismatch),
            "QueueEmpty" => Ok(ReplyError::QueueEmpty),
            _ => Err(()),
        }
    }
}

/// A reply line sent from the server to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `OK`
    Ok,

    /// A dequeued payload, sent verbatim
    Payload(String),

    /// `ERR <Symbol>`
    Error(ReplyError),
}

impl Reply {
    /// Common response for successful operations
    pub fn ok() -> Self {
        Reply::Ok
    }

    pub fn payload(s: impl Into<String>) -> Self {
        Reply::Payload(s.into())
    }

    pub fn error(e: ReplyError) -> Self {
        Reply::Error(e)
    }

    /// Serializes the reply to bytes, terminator included.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.serialize_into(&mut buf);
        buf
    }

    /// Serializes the reply into an existing buffer.
    pub fn serialize_into(&self, buf: &mut Vec<u8>) {
        match self {
            Reply::Ok => buf.extend_from_slice(b"OK"),
            Reply::Payload(s) => buf.extend_from_slice(s.as_bytes()),
            Reply::Error(e) => {
                buf.extend_from_slice(ERROR_PREFIX.as_bytes());
                buf.extend_from_slice(e.as_str().as_bytes());
            }
        }
        buf.extend_from_slice(CRLF);
    }

    /// Interprets a reply line received by a client (terminator already removed).
    ///
    /// A payload that happens to read `OK` or `ERR <Symbol>` is indistinguishable
    /// from the real reply; the protocol has no escaping.
    pub fn from_line(line: &str) -> Self {
        if line == "OK" {
            return Reply::Ok;
        }

        if let Some(symbol) = line.strip_prefix(ERROR_PREFIX) {
            if let Ok(e) = symbol.parse() {
                return Reply::Error(e);
            }
        }

        Reply::Payload(line.to_string())
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ok => f.write_str("OK"),
            Reply::Payload(s) => f.write_str(s),
            Reply::Error(e) => write!(f, "{}{}", ERROR_PREFIX, e),
        }
    }
}
