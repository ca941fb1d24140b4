//! Static file HTTP server.
//!
//! Accepted connections are dispatched to a fixed number of worker slots. Each
//! slot reads one request, answers it from the served root and closes the
//! connection. When every slot is busy, new connections get 503 straight away.

mod response;
mod config;
mod error;
mod handler;
mod http_server;
mod mime;
mod pool;

// Re-export public items
pub use response::{HttpResponse, StatusCode, HTTP_VERSION, SERVER_NAME};
pub use config::{ErrorPages, ServerConfig};
pub use error::Error;
pub use handler::RequestHandler;
pub use http_server::HttpServer;
pub use mime::{mime_type_for, mime_type_for_path, DEFAULT_MIME_TYPE};
pub use pool::{WorkerPool, WorkerSlot};
