//! HTTP response types and utilities.

use std::path::Path;

use log::debug;
use tokio::io::AsyncReadExt;

use crate::server::error::Error;
use crate::server::mime::mime_type_for_path;

/// Protocol version written in every status line.
pub const HTTP_VERSION: &str = "HTTP/1.0";

/// Value of the `Server` header every response starts with.
pub const SERVER_NAME: &str = concat!("statichttp-rs/", env!("CARGO_PKG_VERSION"));

/// HTTP status codes with their standard reason phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok = 200,
    Created = 201,
    Accepted = 202,
    NoContent = 204,
    MovedPermanently = 301,
    MovedTemporarily = 302,
    NotModified = 304,
    BadRequest = 400,
    Unauthorized = 401,
    Forbidden = 403,
    NotFound = 404,
    InternalServerError = 500,
    NotImplemented = 501,
    BadGateway = 502,
    ServiceUnavailable = 503,
}

impl StatusCode {
    /// Get the reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::Accepted => "Accepted",
            StatusCode::NoContent => "No Content",
            StatusCode::MovedPermanently => "Moved Permanently",
            StatusCode::MovedTemporarily => "Moved Temporarily",
            StatusCode::NotModified => "Not Modified",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Unauthorized => "Unauthorized",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::NotImplemented => "Not Implemented",
            StatusCode::BadGateway => "Bad Gateway",
            StatusCode::ServiceUnavailable => "Service Unavailable",
        }
    }

    /// The numeric code.
    pub fn code(&self) -> u16 {
        *self as u16
    }
}

impl TryFrom<u16> for StatusCode {
    type Error = Error;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        let status = match code {
            200 => StatusCode::Ok,
            201 => StatusCode::Created,
            202 => StatusCode::Accepted,
            204 => StatusCode::NoContent,
            301 => StatusCode::MovedPermanently,
            302 => StatusCode::MovedTemporarily,
            304 => StatusCode::NotModified,
            400 => StatusCode::BadRequest,
            401 => StatusCode::Unauthorized,
            403 => StatusCode::Forbidden,
            404 => StatusCode::NotFound,
            500 => StatusCode::InternalServerError,
            501 => StatusCode::NotImplemented,
            502 => StatusCode::BadGateway,
            503 => StatusCode::ServiceUnavailable,
            other => return Err(Error::UnknownStatusCode(other)),
        };
        Ok(status)
    }
}

/// The body attached to a response.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Body {
    /// Content to be written after the header section.
    Bytes(Vec<u8>),
    /// A file body of the given length that was never read because the
    /// response is head-only.
    Elided(u64),
}

/// An HTTP response under construction.
///
/// Every response starts with a `Server` header and no status. Headers are
/// written in insertion order and may repeat. At most one body can be attached.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: Option<StatusCode>,
    headers: Vec<(String, String)>,
    body: Option<Body>,
    head_only: bool,
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpResponse {
    /// Create a new HTTP response without a status code.
    pub fn new() -> Self {
        Self {
            status: None,
            headers: vec![("Server".to_string(), SERVER_NAME.to_string())],
            body: None,
            head_only: false,
        }
    }

    /// Set the status code.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Append a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Mark the response as the answer to a HEAD request.
    ///
    /// Body headers are still written but the body itself is not. Call this
    /// before attaching a file body so the file is never read.
    pub fn head_only(mut self) -> Self {
        self.head_only = true;
        self
    }

    /// Attach a body and its Content-Length header.
    ///
    /// Fails with [`Error::BodyAlreadySet`] if the response already has a body.
    pub fn with_body_bytes(mut self, body: impl Into<Vec<u8>>) -> Result<Self, Error> {
        if self.body.is_some() {
            return Err(Error::BodyAlreadySet);
        }
        let body = body.into();
        let content_length = body.len().to_string();
        self.body = Some(Body::Bytes(body));
        Ok(self.with_header("Content-Length", content_length))
    }

    /// Attach the contents of a file, with Content-Length and Content-Type headers.
    ///
    /// If the file cannot be read and `not_found_page` is given, the status is
    /// set to 404 and that page is attached instead. If the page cannot be read
    /// either, or no page was given, this fails with [`Error::FileBodyUnavailable`].
    pub async fn with_file_body(
        self,
        path: impl AsRef<Path>,
        not_found_page: Option<&Path>,
    ) -> Result<Self, Error> {
        if self.body.is_some() {
            return Err(Error::BodyAlreadySet);
        }

        let path = path.as_ref();
        match self.load_file(path).await {
            Ok(body) => Ok(self.attach_file(path, body)),
            Err(e) => {
                debug!("Could not read {}: {e}", path.display());
                let Some(page) = not_found_page else {
                    return Err(Error::FileBodyUnavailable(path.to_path_buf()));
                };
                let response = self.with_status(StatusCode::NotFound);
                match response.load_file(page).await {
                    Ok(body) => Ok(response.attach_file(page, body)),
                    Err(_) => Err(Error::FileBodyUnavailable(page.to_path_buf())),
                }
            }
        }
    }

    async fn load_file(&self, path: &Path) -> std::io::Result<Body> {
        let mut file = tokio::fs::File::open(path).await?;
        let metadata = file.metadata().await?;
        if !metadata.is_file() {
            return Err(std::io::Error::other("not a regular file"));
        }
        if self.head_only {
            return Ok(Body::Elided(metadata.len()));
        }

        let mut contents = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or(0));
        file.read_to_end(&mut contents).await?;
        Ok(Body::Bytes(contents))
    }

    fn attach_file(mut self, path: &Path, body: Body) -> Self {
        let content_length = match &body {
            Body::Bytes(bytes) => bytes.len() as u64,
            Body::Elided(len) => *len,
        };
        self.body = Some(body);
        self.with_header("Content-Length", content_length.to_string())
            .with_header("Content-Type", mime_type_for_path(path))
    }

    /// The status code, if one was set.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// The headers in wire order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Get the first value of a header (case-insensitive).
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Whether a body has been attached.
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Whether the body is suppressed on the wire.
    pub fn is_head_only(&self) -> bool {
        self.head_only
    }

    /// Convert the response to bytes.
    ///
    /// Fails with [`Error::StatusNotSet`] if no status code was set.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let status = self.status.ok_or(Error::StatusNotSet)?;
        let mut bytes = Vec::new();

        // Add the status line
        let status_line = format!("{HTTP_VERSION} {} {}\r\n", status.code(), status.reason_phrase());
        bytes.extend_from_slice(status_line.as_bytes());

        // Add the headers
        for (name, value) in &self.headers {
            let header_line = format!("{name}: {value}\r\n");
            bytes.extend_from_slice(header_line.as_bytes());
        }

        // Add the empty line that separates headers from body
        bytes.extend_from_slice(b"\r\n");

        // Add the body
        if let (false, Some(Body::Bytes(body))) = (self.head_only, &self.body) {
            bytes.extend_from_slice(body);
        }

        Ok(bytes)
    }
}
