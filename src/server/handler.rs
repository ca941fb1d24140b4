//! Per-connection request handling.
//!
//! A connection goes through read, parse, resolve, respond and write, stopping
//! at the first step that produces a response or a fatal error. Whatever
//! happens, its send side is shut down exactly once before the handler returns.

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::parser::{Method, parse_request};
use crate::resolver::PathResolver;
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::response::{HttpResponse, StatusCode};

const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

/// What reading the request head produced.
#[derive(Debug, PartialEq, Eq)]
enum RequestHead {
    /// The bytes up to and including the blank line.
    Complete(Vec<u8>),
    /// The connection went idle for longer than the read timeout.
    TimedOut,
    /// The head grew past the configured limit without ending.
    TooLarge,
    /// The peer closed the connection mid-head.
    Truncated,
    /// The peer closed the connection without sending anything.
    Closed,
}

/// Serves requests for files under the configured root.
#[derive(Debug)]
pub struct RequestHandler {
    config: Arc<ServerConfig>,
    resolver: PathResolver,
}

impl RequestHandler {
    /// Create a handler for the given configuration.
    ///
    /// Fails if the served root does not exist.
    pub fn new(config: Arc<ServerConfig>) -> Result<Self, Error> {
        let resolver = PathResolver::new(&config.served_root, config.default_document.clone())?;
        Ok(Self { config, resolver })
    }

    /// The configuration this handler serves with.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The resolver for request targets.
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Serve one request on `socket` and shut down its send side.
    ///
    /// Returns the status that was written. Errors mean no complete response
    /// was written: the connection was closed early, a read or write failed, or
    /// a fallback page could not be read.
    pub async fn handle_connection<S>(&self, socket: &mut S) -> Result<StatusCode, Error>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let result = self.serve(socket).await;
        shutdown(socket).await;
        result
    }

    /// Answer a connection that could not get a worker slot with 503 and shut it down.
    pub async fn reject_connection<S>(&self, socket: &mut S) -> Result<StatusCode, Error>
    where
        S: AsyncWrite + Unpin,
    {
        let page = &self.config.error_pages.service_unavailable;
        let result = self.send_error_page(socket, StatusCode::ServiceUnavailable, page).await;
        shutdown(socket).await;
        result
    }

    async fn serve<S>(&self, socket: &mut S) -> Result<StatusCode, Error>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let pages = &self.config.error_pages;

        let head = match self.read_request_head(socket).await? {
            RequestHead::Complete(head) => head,
            RequestHead::Closed => return Err(Error::ConnectionClosed),
            incomplete => {
                warn!("Did not receive a complete request head: {incomplete:?}");
                return self.send_error_page(socket, StatusCode::BadRequest, &pages.bad_request).await;
            }
        };

        let request = match parse_request(&head) {
            Ok(request) => request,
            Err(e) => {
                warn!("Error parsing request: {e}");
                return self.send_error_page(socket, StatusCode::BadRequest, &pages.bad_request).await;
            }
        };
        debug!("Method: {}, target: {}, version: {}", request.method, request.target, request.version);

        if !request.method.is_supported() {
            debug!("Method {} is not implemented", request.method);
            let response = HttpResponse::new().with_status(StatusCode::NotImplemented);
            return send(socket, response).await;
        }

        if let Some(length) = request.content_length() {
            debug!("Request declares a {length} byte body, which is not read");
        }

        let path = match self.resolver.resolve(&request.target).await {
            Ok(path) => path,
            Err(e) => {
                warn!("Rejecting target {}: {e}", request.target);
                return self.send_error_page(socket, StatusCode::BadRequest, &pages.bad_request).await;
            }
        };

        let mut response = HttpResponse::new().with_status(StatusCode::Ok);
        if request.method == Method::HEAD {
            response = response.head_only();
        }
        let response = response.with_file_body(&path, Some(&pages.not_found)).await?;
        send(socket, response).await
    }

    /// Accumulate bytes until the blank line ending the header section.
    async fn read_request_head<S>(&self, socket: &mut S) -> Result<RequestHead, Error>
    where
        S: AsyncRead + Unpin,
    {
        let timeout = self.config.read_timeout();
        let mut head = Vec::new();
        let mut buf = vec![0; self.config.read_buffer_size];

        loop {
            let n = match read_with_timeout(socket, &mut buf, timeout).await {
                Ok(Some(n)) => n,
                Ok(None) => return Ok(RequestHead::TimedOut),
                Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => {
                    return Ok(RequestHead::TimedOut);
                }
                Err(e) => return Err(Error::IoError(e)),
            };

            if n == 0 {
                return Ok(if head.is_empty() {
                    RequestHead::Closed
                } else {
                    RequestHead::Truncated
                });
            }

            // The terminator may straddle two reads.
            let search_from = head.len().saturating_sub(HEAD_TERMINATOR.len() - 1);
            head.extend_from_slice(&buf[..n]);
            if let Some(pos) = find_terminator(&head[search_from..]) {
                head.truncate(search_from + pos + HEAD_TERMINATOR.len());
                return Ok(RequestHead::Complete(head));
            }

            if head.len() > self.config.max_header_size {
                return Ok(RequestHead::TooLarge);
            }
        }
    }

    async fn send_error_page<S>(&self, socket: &mut S, status: StatusCode, page: &Path) -> Result<StatusCode, Error>
    where
        S: AsyncWrite + Unpin,
    {
        let response = HttpResponse::new()
            .with_status(status)
            .with_file_body(page, None)
            .await?;
        send(socket, response).await
    }
}

async fn read_with_timeout<S>(socket: &mut S, buf: &mut [u8], timeout: Duration) -> std::io::Result<Option<usize>>
where
    S: AsyncRead + Unpin,
{
    match tokio::time::timeout(timeout, socket.read(buf)).await {
        Ok(result) => result.map(Some),
        Err(_) => Ok(None),
    }
}

fn find_terminator(haystack: &[u8]) -> Option<usize> {
    haystack
        .windows(HEAD_TERMINATOR.len())
        .position(|window| window == HEAD_TERMINATOR)
}

async fn send<S>(socket: &mut S, response: HttpResponse) -> Result<StatusCode, Error>
where
    S: AsyncWrite + Unpin,
{
    let bytes = response.to_bytes()?;
    let status = response.status().ok_or(Error::StatusNotSet)?;
    socket.write_all(&bytes).await?;
    socket.flush().await?;
    Ok(status)
}

async fn shutdown<S>(socket: &mut S)
where
    S: AsyncWrite + Unpin,
{
    if let Err(e) = socket.shutdown().await {
        debug!("Error shutting down connection: {e}");
    }
}
