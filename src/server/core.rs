use axum::Router;
use axum::routing::{get, post};
use log::{error, info};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::api::handlers;
use crate::config::ServerConfig;
use crate::storage::PathResolver;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<PathResolver>,
}

pub struct Server {
    listener: TcpListener,
    router: Router,
}

impl Server {
    /// Binds the listener, prepares the storage root, and builds the
    /// router. Panics on a bind or root failure; there is nothing to
    /// serve without either.
    pub async fn new(config: ServerConfig) -> Self {
        let socket = config.listen_socket();

        let listener = match TcpListener::bind(&socket).await {
            Ok(listener) => {
                info!("Server bound to {}", socket);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", socket, e);
                panic!("Server startup failed on socket {}: {}", socket, e);
            }
        };

        let resolver = match PathResolver::new(&config.storage_root_path()) {
            Ok(resolver) => {
                info!("Storage root: {}", resolver.root().display());
                resolver
            }
            Err(e) => {
                error!(
                    "Failed to prepare storage root {}: {}",
                    config.storage_root, e
                );
                panic!(
                    "Server startup failed on storage root {}: {}",
                    config.storage_root, e
                );
            }
        };

        let state = AppState {
            resolver: Arc::new(resolver),
        };

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let router = Router::new()
            .route(
                "/api/files/*path",
                get(handlers::download_file)
                    .put(handlers::upload_file)
                    .delete(handlers::delete_file),
            )
            .route("/api/rename", post(handlers::rename_file))
            .route("/api/system", get(handlers::system_info))
            .layer(cors)
            .with_state(state);

        Self { listener, router }
    }

    /// Serves requests until the process exits.
    pub async fn start(self) {
        info!("Starting filedock server");

        if let Err(e) = axum::serve(self.listener, self.router).await {
            error!("Server terminated: {}", e);
        }
    }
}
