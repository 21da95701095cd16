//! Filedock - Entry Point
//!
//! An HTTP file server confined to a single storage root directory.

use env_logger;
use log::{error, info};

mod api;
mod config;
mod error;
mod server;
mod storage;
mod sysinfo;

use config::ServerConfig;
use server::Server;

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Launching filedock server...");

    let server = Server::new(config).await;
    server.start().await;
}
