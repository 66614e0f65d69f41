use serde::Deserialize;
use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub serve: ServeConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServeConfig {
    /// Directory to serve. Defaults to the directory containing the binary.
    pub root: Option<String>,
    /// File served in place of `/`.
    pub index_file: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("devserve").required(false))
            .add_source(config::Environment::with_prefix("DEVSERVE").separator("__"))
            .set_default("server.host", "localhost")?
            .set_default("server.port", 3000)?
            .set_default("serve.index_file", "index.html")?
            .set_default("logging.access_log", true)?
            .build()?;

        settings.try_deserialize()
    }

    /// Resolve `host:port` to a socket address.
    ///
    /// Goes through `ToSocketAddrs` rather than `SocketAddr::parse` so that
    /// hostnames like the default `localhost` work.
    pub fn socket_addr(&self) -> io::Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("host '{}' did not resolve to any address", self.server.host),
                )
            })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.server.host, self.server.port)
    }

    /// Resolve the root directory served by this process.
    ///
    /// Uses `serve.root` when configured, otherwise the directory containing
    /// the running executable. Canonicalization doubles as the existence and
    /// readability check.
    pub fn resolve_root(&self) -> io::Result<PathBuf> {
        let root = match &self.serve.root {
            Some(dir) => PathBuf::from(dir),
            None => {
                let exe = std::env::current_exe()?;
                exe.parent().map(PathBuf::from).ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::NotFound,
                        "executable path has no parent directory",
                    )
                })?
            }
        };
        root.canonicalize()
    }
}

/// Immutable state shared by all request handlers.
///
/// Constructed once at startup and never mutated afterwards.
pub struct AppState {
    pub config: Config,
    pub root: PathBuf,
}

impl AppState {
    pub const fn new(config: Config, root: PathBuf) -> Self {
        Self { config, root }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(host: &str, port: u16) -> Config {
        Config {
            server: ServerConfig {
                host: host.to_string(),
                port,
                workers: None,
            },
            serve: ServeConfig {
                root: None,
                index_file: "index.html".to_string(),
            },
            logging: LoggingConfig { access_log: false },
        }
    }

    #[test]
    fn test_socket_addr_resolves_localhost() {
        let cfg = test_config("localhost", 3000);
        let addr = cfg.socket_addr().expect("localhost should resolve");
        assert_eq!(addr.port(), 3000);
        assert!(addr.ip().is_loopback());
    }

    #[test]
    fn test_socket_addr_literal_ip() {
        let cfg = test_config("127.0.0.1", 8080);
        let addr = cfg.socket_addr().expect("literal IP should resolve");
        assert_eq!(addr.to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_base_url() {
        let cfg = test_config("localhost", 3000);
        assert_eq!(cfg.base_url(), "http://localhost:3000");
    }

    #[test]
    fn test_resolve_root_explicit_dir() {
        let mut cfg = test_config("localhost", 3000);
        let dir = std::env::temp_dir();
        cfg.serve.root = Some(dir.to_string_lossy().into_owned());
        let root = cfg.resolve_root().expect("temp dir should resolve");
        assert!(root.is_dir());
    }

    #[test]
    fn test_resolve_root_missing_dir() {
        let mut cfg = test_config("localhost", 3000);
        cfg.serve.root = Some("/nonexistent/devserve-test-root".to_string());
        assert!(cfg.resolve_root().is_err());
    }
}
