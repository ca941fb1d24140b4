//! Error types for the HTTP server.

use std::path::PathBuf;

use thiserror::Error;

use crate::parser::Error as ParserError;
use crate::resolver::ResolveError;

/// Errors that can occur during HTTP server operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Error parsing an HTTP request.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParserError),

    /// The request target could not be resolved.
    #[error("Resolve error: {0}")]
    ResolveError(#[from] ResolveError),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A response was serialized before a status code was set.
    #[error("Response has no status code")]
    StatusNotSet,

    /// A second body was attached to a response.
    #[error("Response already has a body")]
    BodyAlreadySet,

    /// A file body could not be read and no fallback was allowed.
    #[error("File body unavailable: {}", .0.display())]
    FileBodyUnavailable(PathBuf),

    /// A status code outside the supported table.
    #[error("Unknown status code: {0}")]
    UnknownStatusCode(u16),

    /// The peer closed the connection before sending anything.
    #[error("Connection closed by peer")]
    ConnectionClosed,

    /// Invalid server configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON deserialization error in a configuration file.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
