//! Line Protocol Parser
//!
//! This module turns the bytes accumulated from a connection into [`Command`]s.
//!
//! ## How the Parser Works
//!
//! The parser reads from a buffer and returns either:
//! - `Ok(Some((command, consumed)))` - A full line was found, `consumed` bytes were used
//! - `Ok(None)` - No terminator yet, the line is incomplete
//! - `Err(ParseError)` - The line cannot be turned into a command
//!
//! This design allows the caller to:
//! 1. Append incoming network data to a buffer
//! 2. Call `parse()` to attempt parsing
//! 3. If successful, advance the buffer by `consumed` bytes and keep the rest
//!    for the next command (pipelining)
//! 4. If incomplete, wait for more data
//! 5. If error, disconnect the client
//!
//! ## Tokenization
//!
//! The line is split on single spaces. The first token is the command name,
//! even when it is empty. Empty tokens among the arguments are dropped, so
//! `Q  orders   a  b` yields the name `Q` and the arguments `orders`, `a`, `b`.

use crate::protocol::types::{Command, CRLF};
use thiserror::Error;

/// Errors that can occur while parsing a request line.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// The line is not valid UTF-8
    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(String),

    /// No terminator within the allowed line length
    #[error("line too long: {size} bytes (max: {max})")]
    LineTooLong { size: usize, max: usize },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Maximum length of a single request line (1 MB)
pub const MAX_LINE_LENGTH: usize = 1024 * 1024;

/// Incremental parser for CRLF terminated request lines.
///
/// # Example
///
/// ```
/// use hyperq::protocol::LineParser;
///
/// let parser = LineParser::new();
/// let buffer = b"Q orders item1\r\nDQ ord";
///
/// let (command, consumed) = parser.parse(buffer).unwrap().unwrap();
/// assert_eq!(command.name, "Q");
/// assert_eq!(command.args, vec!["orders", "item1"]);
///
/// // The partial second command stays in the buffer
/// assert!(parser.parse(&buffer[consumed..]).unwrap().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct LineParser {
    /// Longest line accepted before giving up on the client
    max_line_length: usize,
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser {
    /// Creates a parser with the default line length limit.
    pub fn new() -> Self {
        Self::with_max_line_length(MAX_LINE_LENGTH)
    }

    pub fn with_max_line_length(max_line_length: usize) -> Self {
        Self { max_line_length }
    }

    /// Attempts to parse the first complete line in the buffer.
    ///
    /// # Returns
    ///
    /// - `Ok(Some((command, consumed)))` - A command and the bytes it used,
    ///   terminator included
    /// - `Ok(None)` - Incomplete data, need more bytes
    /// - `Err(e)` - Parse error
    pub fn parse(&self, buf: &[u8]) -> ParseResult<Option<(Command, usize)>> {
        let line_end = match find_crlf(buf) {
            Some(pos) => pos,
            None if buf.len() > self.max_line_length => {
                return Err(ParseError::LineTooLong {
                    size: buf.len(),
                    max: self.max_line_length,
                });
            }
            None => return Ok(None),
        };

        if line_end > self.max_line_length {
            return Err(ParseError::LineTooLong {
                size: line_end,
                max: self.max_line_length,
            });
        }

        let line = std::str::from_utf8(&buf[..line_end])
            .map_err(|e| ParseError::InvalidUtf8(e.to_string()))?;

        Ok(Some((tokenize(line), line_end + CRLF.len())))
    }
}

/// Splits a request line into a command name and its non-empty arguments.
pub fn tokenize(line: &str) -> Command {
    let mut parts = line.split(' ');
    let name = parts.next().unwrap_or_default();
    let args = parts
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect();

    Command::new(name, args)
}

/// Finds the position of CRLF in the buffer.
///
/// Returns the position of `\r` if found, or None if CRLF is not present.
#[inline]
fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(CRLF.len()).position(|window| window == CRLF)
}

/// Helper function to parse a single line with the default limits.
pub fn parse_line(buf: &[u8]) -> ParseResult<Option<(Command, usize)>> {
    LineParser::new().parse(buf)
}
