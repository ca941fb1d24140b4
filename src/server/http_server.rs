//! HTTP server implementation.

use std::net::SocketAddr;
use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::net::{TcpListener, TcpStream};
use tokio::signal;

use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::handler::RequestHandler;
use crate::server::pool::WorkerPool;

/// A static file server.
pub struct HttpServer {
    /// The server configuration.
    pub config: Arc<ServerConfig>,
    handler: Arc<RequestHandler>,
    pool: WorkerPool,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails if the configuration is invalid or the served root does not exist.
    pub fn new(config: ServerConfig) -> Result<Self, Error> {
        config.validate()?;
        let config = Arc::new(config);
        let handler = Arc::new(RequestHandler::new(config.clone())?);
        let pool = WorkerPool::new(config.pool_size);

        Ok(Self {
            config,
            handler,
            pool,
        })
    }

    /// The worker slots connections are dispatched to.
    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Log what is being served.
    fn display_server_info(&self, addr: SocketAddr) {
        info!("Server listening on http://{addr}");
        info!("Serving {}", self.handler.resolver().root().display());
        info!("Worker slots: {}", self.pool.capacity());
    }

    /// Set up the TCP listener.
    async fn setup_listener(&self) -> Result<TcpListener, Error> {
        let listener = TcpListener::bind(&self.config.addr).await?;
        Ok(listener)
    }

    /// Hand an accepted connection to an idle slot, or answer it with 503.
    async fn handle_new_connection(&self, mut socket: TcpStream, addr: SocketAddr) {
        let Some(slot) = self.pool.try_acquire() else {
            warn!("All {} worker slots busy, rejecting connection from {addr}", self.pool.capacity());
            if let Err(e) = self.handler.reject_connection(&mut socket).await {
                error!("Error rejecting connection from {addr}: {e}");
            }
            return;
        };

        let handler = self.handler.clone();
        tokio::spawn(async move {
            debug!("Slot {} serving {addr}", slot.index());
            match handler.handle_connection(&mut socket).await {
                Ok(status) => info!("{addr} {} {}", status.code(), status.reason_phrase()),
                Err(Error::ConnectionClosed) => debug!("{addr} closed the connection without a request"),
                Err(e) => error!("Error handling connection from {addr}: {e}"),
            }
            // The socket closes before the slot is marked idle.
            drop(socket);
            drop(slot);
        });
    }

    /// Handle connection errors.
    async fn handle_connection_error(e: std::io::Error) {
        error!("Error accepting connection: {e}");

        // Wait a bit before retrying
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    }

    /// Bind the configured address and serve until Ctrl+C.
    pub async fn start(&self) -> Result<(), Error> {
        let listener = self.setup_listener().await?;
        self.serve(listener).await
    }

    /// Serve connections from an already bound listener until Ctrl+C.
    ///
    /// Connections still being served when the loop stops are not waited for.
    pub async fn serve(&self, listener: TcpListener) -> Result<(), Error> {
        self.display_server_info(listener.local_addr()?);

        let ctrl_c = signal::ctrl_c();
        tokio::pin!(ctrl_c);
        let mut watch_ctrl_c = true;

        loop {
            tokio::select! {
                result = &mut ctrl_c, if watch_ctrl_c => {
                    match result {
                        Ok(()) => {
                            info!("Received Ctrl+C, shutting down");
                            break;
                        }
                        Err(e) => {
                            error!("Error setting up Ctrl+C handler: {e}");
                            watch_ctrl_c = false;
                        }
                    }
                }

                // Accept new connections
                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((socket, addr)) => self.handle_new_connection(socket, addr).await,
                        Err(e) => Self::handle_connection_error(e).await,
                    }
                }
            }
        }

        info!("Server stopped with {} connections in flight", self.pool.busy());
        Ok(())
    }
}
