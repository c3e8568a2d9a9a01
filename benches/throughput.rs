//! Throughput Benchmark for HyperQ
//!
//! This benchmark measures the queue store and the dispatcher under a few
//! workloads. Every store operation takes the same global lock, so the
//! concurrent groups show the cost of that contention.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use hyperq::commands::CommandHandler;
use hyperq::protocol::parse_line;
use hyperq::storage::QueueStore;
use std::sync::Arc;
use std::time::Duration;

/// Benchmark enqueue operations
fn bench_enqueue(c: &mut Criterion) {
    let store = Arc::new(QueueStore::new());

    let mut group = c.benchmark_group("enqueue");
    group.throughput(Throughput::Elements(1));

    group.bench_function("enqueue_small", |b| {
        b.iter(|| {
            store.enqueue("small", "small_value".to_string());
        });
    });

    group.bench_function("enqueue_medium", |b| {
        let value = "x".repeat(1024); // 1KB payload
        b.iter(|| {
            store.enqueue("medium", value.clone());
        });
    });

    group.bench_function("enqueue_many_queues", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let name = format!("queue:{}", i % 1000);
            store.enqueue(&name, "value".to_string());
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark dequeue operations
fn bench_dequeue(c: &mut Criterion) {
    let store = Arc::new(QueueStore::new());

    let mut group = c.benchmark_group("dequeue");
    group.throughput(Throughput::Elements(1));

    group.bench_function("enqueue_then_dequeue", |b| {
        b.iter(|| {
            store.enqueue("pair", "value".to_string());
            black_box(store.dequeue("pair"));
        });
    });

    group.bench_function("dequeue_empty", |b| {
        b.iter(|| {
            black_box(store.dequeue("empty"));
        });
    });

    group.finish();
}

/// Benchmark the parse + dispatch path without the network
fn bench_dispatch(c: &mut Criterion) {
    let handler = CommandHandler::new(Arc::new(QueueStore::new()));

    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(2));

    group.bench_function("q_then_dq", |b| {
        b.iter(|| {
            let (q, _) = parse_line(b"Q orders hello world\r\n").unwrap().unwrap();
            black_box(handler.execute(&q));
            let (dq, _) = parse_line(b"DQ orders\r\n").unwrap().unwrap();
            black_box(handler.execute(&dq));
        });
    });

    group.finish();
}

/// Benchmark concurrent access
fn bench_concurrent(c: &mut Criterion) {
    use std::thread;

    let mut group = c.benchmark_group("concurrent");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("4_threads_same_queue", |b| {
        b.iter(|| {
            let store = Arc::new(QueueStore::new());
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let store = Arc::clone(&store);
                    thread::spawn(move || {
                        for i in 0..10_000 {
                            store.enqueue("shared", i.to_string());
                            store.dequeue("shared");
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }

            black_box(store.len("shared"));
        });
    });

    group.bench_function("4_threads_own_queue", |b| {
        b.iter(|| {
            let store = Arc::new(QueueStore::new());
            let handles: Vec<_> = (0..4)
                .map(|t| {
                    let store = Arc::clone(&store);
                    thread::spawn(move || {
                        let name = format!("queue:{}", t);
                        for i in 0..10_000 {
                            store.enqueue(&name, i.to_string());
                            store.dequeue(&name);
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }

            black_box(store.queue_count());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_enqueue,
    bench_dequeue,
    bench_dispatch,
    bench_concurrent,
);

criterion_main!(benches);
