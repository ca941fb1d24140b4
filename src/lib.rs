//! A minimal HTTP/1.0 static file server.
//!
//! This library accepts TCP connections, parses the request head, maps the
//! request target onto a served root directory and answers with the file or a
//! canned error page.
//!
//! # Features
//!
//! - `GET` and `HEAD` for files under a single served root
//! - Percent-decoding and path normalization that never leaves the root
//! - Fallback pages for 400, 404 and 503 responses
//! - A fixed number of worker slots; connections beyond that get 503 instead of waiting
//! - An idle read timeout answered with 400
//!
//! # Examples
//!
//! ## Parsing a request head
//!
//! ```
//! use statichttp_rs::{parse_request, Method};
//!
//! let request = parse_request(b"GET /index.html?lang=en HTTP/1.0\r\nHost: example.com\r\n\r\n").unwrap();
//! assert_eq!(request.method, Method::GET);
//! assert_eq!(request.path(), "/index.html");
//! assert_eq!(request.get_header("host"), Some("example.com"));
//! ```
//!
//! ## Building a response
//!
//! ```
//! use statichttp_rs::{HttpResponse, StatusCode};
//!
//! let response = HttpResponse::new()
//!     .with_status(StatusCode::Ok)
//!     .with_header("Content-Type", "text/plain")
//!     .with_body_bytes("hi")
//!     .unwrap();
//!
//! let bytes = response.to_bytes().unwrap();
//! assert!(bytes.starts_with(b"HTTP/1.0 200 OK\r\n"));
//! assert!(bytes.ends_with(b"\r\n\r\nhi"));
//! ```
//!
//! ## Running a server
//!
//! ```no_run
//! use statichttp_rs::{HttpServer, ServerConfig};
//!
//! # async fn run() -> Result<(), statichttp_rs::ServerError> {
//! let config = ServerConfig {
//!     served_root: "./public".into(),
//!     pool_size: 8,
//!     ..ServerConfig::default()
//! };
//! HttpServer::new(config)?.start().await
//! # }
//! ```

// Export the parser module
pub mod parser;

// Export the resolver module
pub mod resolver;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use parser::{Error as ParserError, HttpRequest, Method, parse_request};
pub use resolver::{PathResolver, ResolveError};
pub use server::{Error as ServerError, HttpResponse, HttpServer, ServerConfig, StatusCode};
