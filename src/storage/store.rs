//! Thread-Safe Queue Store
//!
//! This module implements the shared store that backs every named queue.
//!
//! ## Design Decisions
//!
//! 1. **One Lock**: A single `Mutex` guards the whole map. Every enqueue, dequeue
//!    and clear is serialized regardless of the queue name, so each operation is
//!    atomic with respect to all others.
//! 2. **Lazy Creation**: A queue is created the first time any operation names it
//!    and is never removed afterwards.
//! 3. **VecDeque**: O(1) push to the tail and pop from the head.
//!
//! ## Concurrency Model
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       QueueStore                            │
//! │                 Mutex<HashMap<String, _>>                   │
//! │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐       │
//! │  │ "orders" │ │ "jobs"   │ │"jobs:low"│ │   ...    │       │
//! │  │ VecDeque │ │ VecDeque │ │ VecDeque │ │          │       │
//! │  └──────────┘ └──────────┘ └──────────┘ └──────────┘       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The lock is a blocking `std::sync::Mutex`. Every critical section is a single
//! in-memory deque operation and no caller ever awaits while holding it.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace};

/// The shared store of named FIFO queues.
///
/// Wrap it in an `Arc` and hand a clone to every connection.
///
/// # Example
///
/// ```
/// use hyperq::storage::QueueStore;
///
/// let store = QueueStore::new();
///
/// store.enqueue("orders", "item1".to_string());
/// store.enqueue("orders", "item2".to_string());
///
/// assert_eq!(store.dequeue("orders"), Some("item1".to_string()));
/// assert_eq!(store.dequeue("orders"), Some("item2".to_string()));
/// assert_eq!(store.dequeue("orders"), None);
/// ```
pub struct QueueStore {
    /// All queues, keyed by their exact name
    queues: Mutex<HashMap<String, VecDeque<String>>>,

    /// Statistics: payloads appended
    enqueue_count: AtomicU64,

    /// Statistics: payloads handed out
    dequeue_count: AtomicU64,

    /// Statistics: dequeues that found the queue empty
    empty_dequeue_count: AtomicU64,

    /// Statistics: clear operations
    clear_count: AtomicU64,
}

/// A snapshot of the store counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub queues: usize,
    pub enqueued: u64,
    pub dequeued: u64,
    pub empty_dequeues: u64,
    pub clears: u64,
}

impl std::fmt::Debug for QueueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueStore")
            .field("queues", &self.queue_count())
            .field("enqueued", &self.enqueue_count.load(Ordering::Relaxed))
            .field("dequeued", &self.dequeue_count.load(Ordering::Relaxed))
            .finish()
    }
}

impl Default for QueueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl QueueStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            queues: Mutex::new(HashMap::new()),
            enqueue_count: AtomicU64::new(0),
            dequeue_count: AtomicU64::new(0),
            empty_dequeue_count: AtomicU64::new(0),
            clear_count: AtomicU64::new(0),
        }
    }

    /// Takes the store-wide lock.
    ///
    /// A panic elsewhere cannot leave a deque half-mutated, so a poisoned lock
    /// is still safe to use.
    #[inline]
    fn lock(&self) -> MutexGuard<'_, HashMap<String, VecDeque<String>>> {
        self.queues.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the named queue, creating it if it has never been referenced.
    fn queue_mut<'a>(
        queues: &'a mut HashMap<String, VecDeque<String>>,
        name: &str,
    ) -> &'a mut VecDeque<String> {
        queues.entry(name.to_string()).or_insert_with(|| {
            debug!(queue = %name, "Creating queue");
            VecDeque::new()
        })
    }

    /// Appends a payload to the tail of the named queue.
    pub fn enqueue(&self, name: &str, value: String) {
        let mut queues = self.lock();
        let queue = Self::queue_mut(&mut queues, name);

        trace!(queue = %name, len = queue.len() + 1, "Enqueue");
        queue.push_back(value);

        self.enqueue_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Removes and returns the head of the named queue.
    ///
    /// Returns `None` when the queue is empty. A queue that was never referenced
    /// is created and reported as empty.
    pub fn dequeue(&self, name: &str) -> Option<String> {
        let mut queues = self.lock();
        let value = Self::queue_mut(&mut queues, name).pop_front();

        match value {
            Some(_) => {
                trace!(queue = %name, "Dequeue");
                self.dequeue_count.fetch_add(1, Ordering::Relaxed);
            }
            None => {
                trace!(queue = %name, "Dequeue on empty queue");
                self.empty_dequeue_count.fetch_add(1, Ordering::Relaxed);
            }
        }

        value
    }

    /// Removes every payload from the named queue.
    pub fn clear(&self, name: &str) {
        let mut queues = self.lock();
        let queue = Self::queue_mut(&mut queues, name);

        trace!(queue = %name, dropped = queue.len(), "Clear");
        queue.clear();

        self.clear_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of payloads waiting in the named queue. Does not create it.
    pub fn len(&self, name: &str) -> usize {
        self.lock().get(name).map_or(0, VecDeque::len)
    }

    /// Returns true if the named queue has ever been referenced.
    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }

    /// Number of queues created so far.
    pub fn queue_count(&self) -> usize {
        self.lock().len()
    }

    /// Returns the store counters.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            queues: self.queue_count(),
            enqueued: self.enqueue_count.load(Ordering::Relaxed),
            dequeued: self.dequeue_count.load(Ordering::Relaxed),
            empty_dequeues: self.empty_dequeue_count.load(Ordering::Relaxed),
            clears: self.clear_count.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_fifo_order() {
        let store = QueueStore::new();

        for i in 0..10 {
            store.enqueue("q", format!("item{}", i));
        }

        for i in 0..10 {
            assert_eq!(store.dequeue("q"), Some(format!("item{}", i)));
        }
        assert_eq!(store.dequeue("q"), None);
    }

    #[test]
    fn test_queues_are_isolated() {
        let store = QueueStore::new();

        store.enqueue("a", "for-a".to_string());
        store.enqueue("b", "for-b".to_string());
        store.clear("b");

        assert_eq!(store.len("a"), 1);
        assert_eq!(store.dequeue("b"), None);
        assert_eq!(store.dequeue("a"), Some("for-a".to_string()));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let store = QueueStore::new();

        store.enqueue("Orders", "x".to_string());

        assert_eq!(store.dequeue("orders"), None);
        assert_eq!(store.dequeue("Orders"), Some("x".to_string()));
    }

    #[test]
    fn test_lazy_creation() {
        let store = QueueStore::new();
        assert!(!store.contains("fresh"));

        // Dequeue on a never-used name creates it and reports empty
        assert_eq!(store.dequeue("fresh"), None);
        assert!(store.contains("fresh"));
        assert_eq!(store.queue_count(), 1);

        store.enqueue("fresh", "now".to_string());
        assert_eq!(store.dequeue("fresh"), Some("now".to_string()));

        // Queues persist once created, even when empty
        assert!(store.contains("fresh"));
    }

    #[test]
    fn test_len_does_not_create() {
        let store = QueueStore::new();
        assert_eq!(store.len("ghost"), 0);
        assert!(!store.contains("ghost"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = QueueStore::new();

        store.enqueue("q", "a".to_string());
        store.enqueue("q", "b".to_string());

        store.clear("q");
        assert_eq!(store.len("q"), 0);

        store.clear("q");
        assert_eq!(store.len("q"), 0);
        assert!(store.contains("q"));
        assert_eq!(store.dequeue("q"), None);
    }

    #[test]
    fn test_clear_creates_queue() {
        let store = QueueStore::new();
        store.clear("never-used");
        assert!(store.contains("never-used"));
    }

    #[test]
    fn test_stats() {
        let store = QueueStore::new();

        store.enqueue("a", "1".to_string());
        store.enqueue("a", "2".to_string());
        store.dequeue("a");
        store.dequeue("b");
        store.clear("a");

        let stats = store.stats();
        assert_eq!(stats.queues, 2);
        assert_eq!(stats.enqueued, 2);
        assert_eq!(stats.dequeued, 1);
        assert_eq!(stats.empty_dequeues, 1);
        assert_eq!(stats.clears, 1);
    }

    #[test]
    fn test_concurrent_enqueue_no_loss() {
        let store = Arc::new(QueueStore::new());
        let mut handles = vec![];

        // 10 producers, 100 distinct items each, all into the same queue
        for i in 0..10 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for j in 0..100 {
                    store.enqueue("shared", format!("{}-{}", i, j));
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len("shared"), 1000);

        let mut seen = HashSet::new();
        while let Some(item) = store.dequeue("shared") {
            assert!(seen.insert(item), "duplicate item");
        }
        assert_eq!(seen.len(), 1000);
    }

    #[test]
    fn test_concurrent_producers_keep_per_producer_order() {
        let store = Arc::new(QueueStore::new());
        let mut handles = vec![];

        for i in 0..4 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for j in 0..250 {
                    store.enqueue("ordered", format!("{}:{}", i, j));
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        // Items from one producer must come out in the order it pushed them
        let mut last = [None::<usize>; 4];
        while let Some(item) = store.dequeue("ordered") {
            let (producer, seq) = item.split_once(':').unwrap();
            let producer: usize = producer.parse().unwrap();
            let seq: usize = seq.parse().unwrap();
            if let Some(prev) = last[producer] {
                assert!(seq > prev);
            }
            last[producer] = Some(seq);
        }
        assert_eq!(last, [Some(249); 4]);
    }

    #[test]
    fn test_concurrent_consumers_no_duplicates() {
        let store = Arc::new(QueueStore::new());
        for i in 0..1000 {
            store.enqueue("work", i.to_string());
        }

        let mut handles = vec![];
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                let mut taken = vec![];
                while let Some(item) = store.dequeue("work") {
                    taken.push(item);
                }
                taken
            }));
        }

        let mut all = HashSet::new();
        for handle in handles {
            for item in handle.join().unwrap() {
                assert!(all.insert(item));
            }
        }
        assert_eq!(all.len(), 1000);
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let store = Arc::new(QueueStore::new());
        store.enqueue("jobs", "a".to_string());

        let poisoner = Arc::clone(&store);
        let result = thread::spawn(move || {
            let _guard = poisoner.lock();
            panic!("panic while holding the store lock");
        })
        .join();
        assert!(result.is_err());
        assert!(store.queues.is_poisoned());

        store.enqueue("jobs", "b".to_string());
        assert_eq!(store.dequeue("jobs"), Some("a".to_string()));
        assert_eq!(store.dequeue("jobs"), Some("b".to_string()));
        assert_eq!(store.dequeue("jobs"), None);

        store.clear("other");
        assert!(store.contains("other"));
        assert_eq!(store.queue_count(), 2);
    }
}
