// Accept loop module
// Startup sequence and per-connection serving with hyper.

use crate::browser;
use crate::config::{AppState, Config};
use crate::handler;
use crate::logger;
use crate::server::{listener, signal};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;

/// Start the server and serve until interrupted.
///
/// Startup order matters: the root directory and listener are resolved
/// before anything is printed, so a bind failure surfaces to `main` without
/// a half-printed banner. The browser launch comes after the banner and is
/// best-effort.
pub async fn run(cfg: Config) -> io::Result<()> {
    let root = cfg.resolve_root()?;

    // Relative lookups (e.g. a config file next to the site) resolve
    // against the served directory.
    std::env::set_current_dir(&root)?;

    let addr = cfg.socket_addr()?;
    let tcp_listener = listener::bind_listener(addr)?;

    let base_url = cfg.base_url();
    let state = Arc::new(AppState::new(cfg, root));

    logger::log_server_start(&state.root, &base_url);
    browser::open_at(&base_url);

    let shutdown = signal::start_shutdown_handler();
    accept_loop(tcp_listener, state, shutdown).await
}

/// Accept connections until the shutdown signal fires.
async fn accept_loop(
    tcp_listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> io::Result<()> {
    loop {
        tokio::select! {
            accept_result = tcp_listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        handle_connection(stream, peer_addr, Arc::clone(&state));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = shutdown.notified() => {
                // Dropping the listener releases the port.
                return Ok(());
            }
        }
    }
}

/// Serve a single connection in a spawned task.
fn handle_connection(stream: TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().keep_alive(true).serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&state);
                async move { handler::handle_request(req, state, peer_addr).await }
            }),
        );

        if let Err(e) = conn.await {
            logger::log_connection_error(&e);
        }
    });
}
