//! Error types for the HTTP parser.

use thiserror::Error;

/// Errors that can occur during HTTP request parsing.
#[derive(Debug, Error)]
pub enum Error {
    /// The request head is empty.
    #[error("Empty request")]
    EmptyRequest,

    /// The request head is not valid UTF-8.
    #[error("Request head is not valid UTF-8")]
    InvalidEncoding,

    /// The request line is malformed (a delimiter or one of the three tokens is missing).
    #[error("Malformed request line: {0}")]
    MalformedRequestLine(String),

    /// A header line lacks the `: ` separator or its CRLF terminator.
    #[error("Malformed header line: {0}")]
    MalformedHeaderLine(String),
}
