//! Command line entry point.
//!
//! Usage: `statichttp [CONFIG.json]`. Settings not in the file keep their
//! defaults; `STATICHTTP_ADDR`, `STATICHTTP_ROOT` and `STATICHTTP_POOL_SIZE`
//! override both.

use log::error;

use statichttp_rs::{HttpServer, ServerConfig, ServerError};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => ServerConfig::from_json_file(path)?,
        None => ServerConfig::default(),
    };
    let config = config.apply_env()?;

    HttpServer::new(config)?.start().await
}
