//! Connection Acceptor
//!
//! Binds the listening socket and hands every accepted connection to its own
//! Tokio task. The accept loop never waits on a connection handler, so a slow
//! or misbehaving client cannot hold up new connections.

use crate::commands::CommandHandler;
use crate::connection::{handle_connection, ConnectionStats};
use crate::storage::QueueStore;
use std::io;
use std::sync::Arc;
use tokio::net::{lookup_host, TcpListener, TcpSocket, ToSocketAddrs};
use tracing::{debug, error, info};

/// Binds a listener with an explicit connection backlog.
///
/// Connections beyond the backlog are left to the operating system.
pub async fn bind(addr: impl ToSocketAddrs, backlog: u32) -> io::Result<TcpListener> {
    let addr = lookup_host(addr).await?.next().ok_or_else(|| {
        io::Error::new(io::ErrorKind::AddrNotAvailable, "address resolved to nothing")
    })?;

    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;
    socket.bind(addr)?;

    let listener = socket.listen(backlog)?;
    info!(addr = %listener.local_addr()?, backlog, "Listening");

    Ok(listener)
}

/// Main loop that accepts incoming connections.
///
/// Runs until the surrounding task is dropped. Accept errors are logged and
/// the loop carries on.
pub async fn accept_loop(
    listener: TcpListener,
    store: Arc<QueueStore>,
    stats: Arc<ConnectionStats>,
) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                debug!(client = %addr, "Accepted connection");

                // Create a command handler for this connection
                let handler = CommandHandler::new(Arc::clone(&store));
                let stats = Arc::clone(&stats);

                // Spawn a task to handle this connection
                tokio::spawn(async move {
                    handle_connection(stream, addr, handler, stats).await;
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}
