//! HTTP request parsing and representation.

use std::str::FromStr;

use crate::parser::cursor::HeaderCursor;
use crate::parser::error::Error;
use crate::parser::method::Method;

const CRLF: &str = "\r\n";

/// Represents an HTTP request head.
///
/// Built once per connection from the bytes read before the blank line and
/// never modified afterwards. The body, if the client sent one, is not part of it.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// The HTTP method (GET, HEAD, or anything else)
    pub method: Method,
    /// The raw request target, including any query and percent-escapes
    pub target: String,
    /// The protocol version token, e.g. `HTTP/1.0`
    pub version: String,
    /// The header lines in arrival order, names as sent by the client
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Create a new HTTP request.
    ///
    /// # Arguments
    ///
    /// * `method` - The HTTP method
    /// * `target` - The raw request target
    /// * `version` - The protocol version token
    /// * `headers` - The header lines in arrival order
    pub fn new(method: Method, target: String, version: String, headers: Vec<(String, String)>) -> Self {
        Self {
            method,
            target,
            version,
            headers,
        }
    }

    /// Get the first value of a header (case-insensitive).
    ///
    /// # Arguments
    ///
    /// * `name` - The header name
    ///
    /// # Returns
    ///
    /// The header value, if it exists
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Get every value of a header in arrival order (case-insensitive).
    pub fn get_headers<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Check if a header exists (case-insensitive).
    pub fn has_header(&self, name: &str) -> bool {
        self.get_header(name).is_some()
    }

    /// The declared body length, if the client sent a numeric Content-Length.
    ///
    /// The body itself is never read.
    pub fn content_length(&self) -> Option<u64> {
        self.get_header("Content-Length")
            .and_then(|v| v.trim().parse().ok())
    }

    /// The request target without its query component.
    pub fn path(&self) -> &str {
        self.target
            .split_once('?')
            .map_or(self.target.as_str(), |(path, _)| path)
    }

    /// The query component of the target, without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.target.split_once('?').map(|(_, query)| query)
    }
}

/// Parse an HTTP request head from a byte slice.
///
/// The input must hold the request line and the header lines, each terminated
/// by CRLF. A trailing blank line ends the header section; anything after it is
/// ignored.
///
/// # Arguments
///
/// * `input` - A byte slice containing the request head
///
/// # Returns
///
/// The parsed HTTP request, or an error if the head is malformed
pub fn parse_request(input: &[u8]) -> Result<HttpRequest, Error> {
    if input.is_empty() {
        return Err(Error::EmptyRequest);
    }

    let input_str = std::str::from_utf8(input).map_err(|_| Error::InvalidEncoding)?;
    let mut cursor = HeaderCursor::new(input_str);

    // Request-Line: `METHOD Request-URI HTTP-Version CRLF`
    let request_line = cursor
        .next_by(CRLF)
        .ok_or_else(|| Error::MalformedRequestLine(input_str.to_string()))?;
    let (method, target, version) = parse_request_line(request_line)?;

    let mut headers = Vec::new();
    loop {
        match cursor.next_by(CRLF) {
            // Empty line indicates the end of headers
            Some("") => break,
            Some(line) => headers.push(parse_header_line(line)?),
            None if !cursor.has_remaining() => break,
            None => return Err(Error::MalformedHeaderLine(cursor.remaining().to_string())),
        }
    }

    Ok(HttpRequest::new(method, target, version, headers))
}

fn parse_request_line(line: &str) -> Result<(Method, String, String), Error> {
    let malformed = || Error::MalformedRequestLine(line.to_string());
    let mut tokens = HeaderCursor::new(line);

    let method = tokens.next_by(" ").ok_or_else(malformed)?;
    let target = tokens.next_by(" ").ok_or_else(malformed)?;
    let version = tokens.remaining();

    if target.is_empty() || version.is_empty() || version.contains(' ') {
        return Err(malformed());
    }

    let method = Method::from_str(method).map_err(|_| malformed())?;
    Ok((method, target.to_string(), version.to_string()))
}

fn parse_header_line(line: &str) -> Result<(String, String), Error> {
    let (name, value) = line
        .split_once(": ")
        .ok_or_else(|| Error::MalformedHeaderLine(line.to_string()))?;
    Ok((name.to_string(), value.to_string()))
}
