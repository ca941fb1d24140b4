//! Error types for request target resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while mapping a request target onto the served root.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The target does not start with `/`.
    #[error("Request target must start with '/': {0}")]
    MalformedTarget(String),

    /// A `%` is not followed by two hex digits.
    #[error("Invalid percent-escape in request target: {0}")]
    InvalidEscape(String),

    /// The resolved path lies outside the served root.
    #[error("Request target escapes the served root: {0}")]
    PathTraversal(String),

    /// The served root itself could not be canonicalized.
    #[error("Served root {path} is unavailable: {source}")]
    RootUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
