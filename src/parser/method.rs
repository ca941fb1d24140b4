//! HTTP request methods.

use std::fmt;
use std::str::FromStr;

use crate::parser::error::Error;

/// Request methods as far as this server cares about them.
///
/// Only `GET` and `HEAD` are served. Every other token, including lowercase
/// spellings of the supported ones, is kept verbatim in [`Method::Other`] so the
/// handler can answer it with 501 instead of treating it as a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET method: Requests a representation of the specified resource.
    GET,
    /// HEAD method: Same as GET but only transfers the status line and header section.
    HEAD,
    /// Any other method token.
    Other(String),
}

impl Method {
    /// Whether this server can serve the method.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Method::Other(_))
    }
}

// Method tokens are case-sensitive.
impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err(Error::MalformedRequestLine("empty method".to_string())),
            "GET" => Ok(Method::GET),
            "HEAD" => Ok(Method::HEAD),
            other => Ok(Method::Other(other.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::GET => write!(f, "GET"),
            Method::HEAD => write!(f, "HEAD"),
            Method::Other(token) => write!(f, "{token}"),
        }
    }
}
