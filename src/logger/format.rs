//! Access log format module
//!
//! One line per request in Common Log Format (CLF), timestamped with the
//! local time zone.

use chrono::Local;

/// Access log entry containing the request/response information
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client IP address
    pub remote_addr: String,
    /// Request timestamp
    pub time: chrono::DateTime<Local>,
    /// HTTP method (GET, HEAD, ...)
    pub method: String,
    /// Request URI path as received, before any rewrite
    pub path: String,
    /// Response status code
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: u64,
}

impl AccessLogEntry {
    /// Create a new access log entry with current timestamp
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            status: 200,
            body_bytes: 0,
        }
    }

    /// Common Log Format (CLF)
    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    pub fn format(&self) -> String {
        format!(
            "{} - - [{}] \"{} {} HTTP/1.1\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.path,
            self.status,
            self.body_bytes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_common() {
        let mut entry = AccessLogEntry::new(
            "127.0.0.1".to_string(),
            "GET".to_string(),
            "/index.html".to_string(),
        );
        entry.status = 200;
        entry.body_bytes = 1234;

        let line = entry.format();
        assert!(line.starts_with("127.0.0.1 - - ["));
        assert!(line.contains("\"GET /index.html HTTP/1.1\""));
        assert!(line.ends_with("200 1234"));
    }

    #[test]
    fn test_format_records_original_path() {
        let entry = AccessLogEntry::new(
            "127.0.0.1".to_string(),
            "HEAD".to_string(),
            "/".to_string(),
        );
        assert!(entry.format().contains("\"HEAD / HTTP/1.1\""));
    }
}
