//! HyperQ Protocol Implementation
//!
//! This module implements the line-oriented text protocol spoken between
//! HyperQ clients and the server.
//!
//! ## Overview
//!
//! Each request is one line: a command name followed by space separated
//! arguments. Each request gets exactly one reply line. Lines end with CRLF.
//!
//! ## Modules
//!
//! - `types`: `Command`, `Reply` and `ReplyError` plus serialization
//! - `parser`: Incremental parser that extracts lines from a byte buffer
//!
//! ## Example
//!
//! ```
//! use hyperq::protocol::{parse_line, Reply, ReplyError};
//!
//! // Parsing incoming data
//! let data = b"DQ orders\r\n";
//! let (command, consumed) = parse_line(data).unwrap().unwrap();
//! assert_eq!(command.name, "DQ");
//! assert_eq!(consumed, data.len());
//!
//! // Creating replies
//! let reply = Reply::error(ReplyError::QueueEmpty);
//! assert_eq!(reply.serialize(), b"ERR QueueEmpty\r\n");
//! ```

pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use parser::{parse_line, LineParser, ParseError, ParseResult};
pub use types::{command, Command, Reply, ReplyError, CRLF};
