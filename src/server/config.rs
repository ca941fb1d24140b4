//! Server configuration.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::server::error::Error;

/// Pages served in place of the requested resource for error statuses.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ErrorPages {
    /// Body of 400 responses.
    pub bad_request: PathBuf,
    /// Body of 404 responses.
    pub not_found: PathBuf,
    /// Body of 503 responses sent when every worker slot is busy.
    pub service_unavailable: PathBuf,
}

impl Default for ErrorPages {
    fn default() -> Self {
        Self {
            bad_request: PathBuf::from("./default_responses/400.html"),
            not_found: PathBuf::from("./default_responses/404.html"),
            service_unavailable: PathBuf::from("./default_responses/503.html"),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// The directory tree that is served.
    pub served_root: PathBuf,
    /// The number of requests served concurrently; further connections get 503.
    pub pool_size: usize,
    /// The file served when a request names a directory.
    pub default_document: String,
    /// Fallback pages for error responses.
    pub error_pages: ErrorPages,
    /// How long a connection may stay silent before the request head is complete.
    pub read_timeout_ms: u64,
    /// The read buffer size.
    pub read_buffer_size: usize,
    /// The largest request head accepted before answering 400.
    pub max_header_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            served_root: PathBuf::from("./server_root"),
            pool_size: 3,
            default_document: "index.html".to_string(),
            error_pages: ErrorPages::default(),
            read_timeout_ms: 3000,
            read_buffer_size: 4096,
            max_header_size: 16 * 1024,
        }
    }
}

impl ServerConfig {
    /// Load a configuration from a JSON file.
    ///
    /// Missing fields keep their default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read(path.as_ref())?;
        let config = serde_json::from_slice(&contents)?;
        Ok(config)
    }

    /// Override fields from `STATICHTTP_ADDR`, `STATICHTTP_ROOT` and `STATICHTTP_POOL_SIZE`.
    pub fn apply_env(mut self) -> Result<Self, Error> {
        if let Ok(addr) = std::env::var("STATICHTTP_ADDR") {
            self.addr = addr
                .parse()
                .map_err(|_| Error::ConfigError(format!("invalid STATICHTTP_ADDR: {addr}")))?;
        }
        if let Ok(root) = std::env::var("STATICHTTP_ROOT") {
            self.served_root = PathBuf::from(root);
        }
        if let Ok(size) = std::env::var("STATICHTTP_POOL_SIZE") {
            self.pool_size = size
                .parse()
                .map_err(|_| Error::ConfigError(format!("invalid STATICHTTP_POOL_SIZE: {size}")))?;
        }
        Ok(self)
    }

    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> Result<(), Error> {
        if self.pool_size == 0 {
            return Err(Error::ConfigError("pool_size must be at least 1".to_string()));
        }
        if self.read_buffer_size == 0 {
            return Err(Error::ConfigError("read_buffer_size must be at least 1".to_string()));
        }
        if self.read_timeout_ms == 0 {
            return Err(Error::ConfigError("read_timeout_ms must be at least 1".to_string()));
        }
        if self.default_document.is_empty() || self.default_document.contains('/') {
            return Err(Error::ConfigError(format!(
                "default_document must be a plain file name: {:?}",
                self.default_document
            )));
        }
        Ok(())
    }

    /// The idle read timeout.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}
