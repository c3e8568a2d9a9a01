//! HyperQ - A Minimal In-Memory Message Queue Broker
//!
//! This is the main entry point for the HyperQ server.
//! It parses options, sets up logging, binds the listener and accepts
//! connections until the process is stopped.

use clap::Parser;
use hyperq::config::Config;
use hyperq::connection::ConnectionStats;
use hyperq::server::{accept_loop, bind};
use hyperq::storage::QueueStore;
use std::sync::Arc;
use tokio::signal;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn print_banner(config: &Config) {
    println!(
        r#"
HyperQ v{} - In-Memory Message Queue Broker
──────────────────────────────────────────────────────────────
Listening on {}:{}
Commands: Q <queue> <payload> | DQ <queue> | CLR <queue>

Use Ctrl+C to stop.
"#,
        hyperq::VERSION,
        config.host,
        config.port
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments; an invalid port exits here
    let config = Config::parse();

    // Set up logging, RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(config.verbose)
        .init();

    info!(version = hyperq::VERSION, "HyperQ starting");
    debug!(?config, "Configuration");

    // Create the queue store (shared across all connections)
    let store = Arc::new(QueueStore::new());

    // Create connection statistics
    let stats = Arc::new(ConnectionStats::new());

    // Bind the TCP listener
    let listener = bind(config.bind_address(), config.backlog).await?;

    print_banner(&config);

    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received, stopping server...");
    };

    // Main accept loop
    tokio::select! {
        _ = accept_loop(listener, Arc::clone(&store), stats) => {}
        _ = shutdown => {}
    }

    info!(queues = store.queue_count(), "Goodbye!");
    Ok(())
}
