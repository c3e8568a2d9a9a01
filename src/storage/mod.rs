//! Queue Storage Module
//!
//! This module provides the shared, thread-safe store of named FIFO queues.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       QueueStore                            │
//! │            one Mutex around every named queue               │
//! └─────────────────────────────────────────────────────────────┘
//!        ▲                  ▲                   ▲
//!        │                  │                   │
//!   connection 1       connection 2   ...  connection N
//! ```
//!
//! ## Features
//!
//! - **Strict FIFO**: Dequeue always returns the oldest payload
//! - **Lazy Creation**: Queues spring into existence on first reference
//! - **Atomic Operations**: Enqueue, dequeue and clear never interleave
//! - **Non-blocking**: Dequeue on an empty queue returns `None` immediately
//!
//! ## Example
//!
//! ```
//! use hyperq::storage::QueueStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(QueueStore::new());
//!
//! store.enqueue("jobs", "build".to_string());
//! assert_eq!(store.dequeue("jobs"), Some("build".to_string()));
//! assert_eq!(store.dequeue("jobs"), None);
//! ```

pub mod store;

pub use store::{QueueStore, StoreStats};
