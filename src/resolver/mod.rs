//! Request target resolution.
//!
//! Maps the target of a request line onto a file inside the served root,
//! rejecting anything that would escape it.

mod decode;
mod error;
mod path;

// Re-export public items
pub use decode::decode_escapes;
pub use error::ResolveError;
pub use path::PathResolver;
