//! Command Handler Module
//!
//! This module implements the HyperQ commands. It receives parsed
//! [`Command`]s, validates them against a fixed registry, runs them against the
//! queue store and returns the [`Reply`] to send back.
//!
//! ## Supported Commands
//!
//! - `Q queue payload...` - Enqueue the payload tokens joined with single spaces
//! - `DQ queue` - Dequeue the oldest payload, or `ERR QueueEmpty`
//! - `CLR queue` - Drop every payload in the queue
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CommandHandler                          │
//! │                                                             │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐     │
//! │  │  lookup()   │───>│ validate    │───>│  handler    │     │
//! │  │  COMMANDS   │    │ min_args    │    │  fn         │     │
//! │  └─────────────┘    └─────────────┘    └─────────────┘     │
//! │                                               │             │
//! │                                               ▼             │
//! │                                          QueueStore         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The registry is a `const` table. Only names listed in it can ever be
//! executed, whatever a client sends.

use crate::protocol::{command, Command, Reply, ReplyError};
use crate::storage::QueueStore;
use std::sync::Arc;
use tracing::trace;

/// Signature shared by every command implementation.
type CommandFn = fn(&QueueStore, &[String]) -> Reply;

/// One entry of the command registry.
#[derive(Clone, Copy)]
pub struct CommandSpec {
    /// Name as sent on the wire (case-sensitive)
    pub name: &'static str,
    /// Fewer arguments than this yields `ERR ArgumentMismatch`
    pub min_args: usize,
    handler: CommandFn,
}

impl std::fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("min_args", &self.min_args)
            .finish()
    }
}

/// Every command the server understands.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: command::ENQUEUE,
        min_args: 2,
        handler: cmd_enqueue,
    },
    CommandSpec {
        name: command::DEQUEUE,
        min_args: 1,
        handler: cmd_dequeue,
    },
    CommandSpec {
        name: command::CLEAR,
        min_args: 1,
        handler: cmd_clear,
    },
];

/// Finds the registry entry for a command name.
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

/// Executes HyperQ commands against the shared queue store.
#[derive(Debug, Clone)]
pub struct CommandHandler {
    /// The queue store (shared across connections)
    store: Arc<QueueStore>,
}

impl CommandHandler {
    /// Creates a new command handler backed by the given store.
    pub fn new(store: Arc<QueueStore>) -> Self {
        Self { store }
    }

    /// Executes a command and returns the reply.
    ///
    /// Unknown names and missing arguments are answered with an error reply and
    /// never reach the store.
    pub fn execute(&self, command: &Command) -> Reply {
        let spec = match lookup(&command.name) {
            Some(spec) => spec,
            None => {
                trace!(command = %command.name, "Unknown command");
                return Reply::error(ReplyError::UnknownCommand);
            }
        };

        if command.args.len() < spec.min_args {
            trace!(
                command = spec.name,
                got = command.args.len(),
                min = spec.min_args,
                "Argument mismatch"
            );
            return Reply::error(ReplyError::ArgumentMismatch);
        }

        (spec.handler)(&self.store, &command.args)
    }

    /// Returns the store this handler operates on.
    pub fn store(&self) -> &Arc<QueueStore> {
        &self.store
    }
}

// ============================================================================
// Queue Commands
// ============================================================================

/// Q queue payload [payload ...]
fn cmd_enqueue(store: &QueueStore, args: &[String]) -> Reply {
    let Some((queue, payload)) = args.split_first() else {
        return Reply::error(ReplyError::ArgumentMismatch);
    };
    store.enqueue(queue, payload.join(" "));
    Reply::ok()
}

/// DQ queue
fn cmd_dequeue(store: &QueueStore, args: &[String]) -> Reply {
    match store.dequeue(&args[0]) {
        Some(value) => Reply::payload(value),
        None => Reply::error(ReplyError::QueueEmpty),
    }
}

/// CLR queue
fn cmd_clear(store: &QueueStore, args: &[String]) -> Reply {
    store.clear(&args[0]);
    Reply::ok()
}
