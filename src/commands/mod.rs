//! Command Handler Module
//!
//! This module implements the command processing layer for HyperQ.
//! It receives parsed commands, executes them against the queue store,
//! and returns the reply line.
//!
//! ## Architecture
//!
//! ```text
//! Client Request
//!       │
//!       ▼
//! ┌─────────────────┐
//! │  Line Parser    │  (protocol module)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ CommandHandler  │  (this module)
//! │                 │
//! │  - Lookup       │
//! │  - Validate     │
//! │  - Execute      │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  QueueStore     │  (storage module)
//! └─────────────────┘
//! ```
//!
//! ## Supported Commands
//!
//! - `Q`, `DQ`, `CLR`

pub mod handler;

pub use handler::{lookup, CommandHandler, CommandSpec, COMMANDS};
