//! Logger module
//!
//! Console logging for the development server: startup banner, access log
//! lines, warnings and errors. Access lines go to stdout, errors to stderr.

mod format;

pub use format::AccessLogEntry;

use std::path::Path;

pub const SERVER_NAME: &str = "devserve";

pub fn log_server_start(root: &Path, base_url: &str) {
    println!("Starting {SERVER_NAME} static file server...");
    println!("Serving files from: {}", root.display());
    println!("Server running at: {base_url}");
    println!("Main page: {base_url}/index.html");
    println!("Services page: {base_url}/services.html");
    println!("Press Ctrl+C to stop the server");
    println!("{}", "-".repeat(50));
}

pub fn log_browser_opened(url: &str) {
    println!("Opened browser at {url}");
}

pub fn log_browser_failed(err: &dyn std::fmt::Display) {
    println!("Could not open browser automatically: {err}");
}

pub fn log_access(entry: &AccessLogEntry) {
    println!("{}", entry.format());
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

pub fn log_port_in_use(port: u16) {
    eprintln!("[ERROR] Port {port} is already in use");
    eprintln!("        Stop the other server or pick a different port (DEVSERVE_SERVER__PORT)");
}

pub fn log_shutdown() {
    println!("\nServer stopped by user");
}
