//! Best-effort browser launch.
//!
//! Opening the browser is a convenience, not a requirement: the attempt is
//! made once at startup and any failure is logged and discarded. The server
//! keeps running either way.

use crate::logger;

/// Attempt to open the default system browser at `url`.
pub fn open_at(url: &str) {
    match open::that(url) {
        Ok(()) => logger::log_browser_opened(url),
        Err(e) => logger::log_browser_failed(&e),
    }
}
