// Signal handling module
//
// Supported signals:
// - SIGTERM: shutdown
// - SIGINT:  shutdown (Ctrl+C)
//
// Windows only gets Ctrl+C.

use std::sync::Arc;
use tokio::sync::Notify;

/// Start the shutdown signal listener.
///
/// Returns a `Notify` that fires once when the user asks the server to stop.
/// A stop request is not an error: the accept loop returns `Ok` and the
/// process exits 0.
#[cfg(unix)]
pub fn start_shutdown_handler() -> Arc<Notify> {
    use tokio::signal::unix::{signal, SignalKind};

    let notify = Arc::new(Notify::new());
    let shutdown = Arc::clone(&notify);

    tokio::spawn(async move {
        let mut sigterm =
            signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");
        let mut sigint =
            signal(SignalKind::interrupt()).expect("Failed to register SIGINT handler");

        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }

        // notify_one stores a permit, so the signal is not lost even if the
        // accept loop is not parked on notified() at this instant.
        shutdown.notify_one();
    });

    notify
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_shutdown_handler() -> Arc<Notify> {
    let notify = Arc::new(Notify::new());
    let shutdown = Arc::clone(&notify);

    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            shutdown.notify_one();
        }
    });

    notify
}
