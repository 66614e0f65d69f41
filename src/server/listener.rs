// Listener module
// Binds the TCP listener and classifies bind failures.

use std::io;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Bind a `TcpListener` on `addr`.
///
/// Binds through `std` first and converts, so the bind error surfaces
/// synchronously before the accept loop starts. No address reuse options are
/// set: a second instance on the same port must fail to bind.
pub fn bind_listener(addr: SocketAddr) -> io::Result<TcpListener> {
    let std_listener = std::net::TcpListener::bind(addr)?;

    // Required for conversion into a tokio listener
    std_listener.set_nonblocking(true)?;

    TcpListener::from_std(std_listener)
}

/// Whether `err` means the port is already held by another process.
///
/// Detected via the portable `ErrorKind` rather than a raw OS errno.
pub fn is_addr_in_use(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::AddrInUse
}
