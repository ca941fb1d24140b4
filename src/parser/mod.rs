//! HTTP request head parser.
//!
//! This module turns the bytes read from a connection, up to and including the
//! blank line that ends the header section, into an [`HttpRequest`].

mod cursor;
mod request;
mod method;
mod error;
mod tests;

// Re-export public items
pub use cursor::HeaderCursor;
pub use request::HttpRequest;
pub use method::Method;
pub use error::Error;

// Re-export the parse_request function
pub use request::parse_request;
