//! VisKom HTTP API
//!
//! Exposes the ID3 and Naive Bayes learners of `viskom-ml-core` as JSON
//! endpoints for the teaching frontend, optionally serving the built
//! frontend bundle from the same listener.

pub mod config;
pub mod errors;
pub mod routes;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use config::ServerConfig;
pub use errors::{ApiError, ApiJson};

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    fn frontend_root(&self) -> Option<PathBuf> {
        self.config
            .frontend_dist
            .clone()
            .filter(|path| path.is_dir())
    }
}

pub type SharedState = Arc<AppState>;

pub async fn start_server(state: AppState) -> Result<()> {
    let addr = state.config.bind_addr();
    let app = build_router(Arc::new(state));
    let listener = bind_listener(&addr).await?;
    info!("VisKom API listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated unexpectedly")
}

async fn bind_listener(addr: &str) -> Result<tokio::net::TcpListener> {
    if let Ok(socket_addr) = addr.parse::<SocketAddr>() {
        tokio::net::TcpListener::bind(socket_addr)
            .await
            .with_context(|| format!("failed to bind listener on {socket_addr}"))
    } else {
        tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind listener on {addr}"))
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {}", err);
    }
    info!("shutting down");
}

pub fn build_router(state: SharedState) -> Router {
    let mut router = Router::new()
        .route("/api/health", get(routes::handle_health))
        .route(
            "/decision-tree/train-golf",
            post(routes::decision_tree::handle_train_golf),
        )
        .route(
            "/decision-tree/train",
            post(routes::decision_tree::handle_train),
        )
        .route(
            "/decision-tree/predict",
            post(routes::decision_tree::handle_predict),
        )
        .route(
            "/api/naive-bayes/train-predict",
            post(routes::naive_bayes::handle_train_predict),
        )
        .route(
            "/api/naive-bayes/default-dataset",
            get(routes::naive_bayes::handle_default_dataset),
        );

    match (&state.config.frontend_dist, state.frontend_root()) {
        (_, Some(root)) => {
            info!("Serving frontend assets from {:?}", root);
            router = router.fallback(serve_frontend);
        }
        (Some(missing), None) => {
            warn!(
                "Frontend build not found at {:?}; serving the API only",
                missing
            );
        }
        (None, None) => {}
    }

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn serve_frontend(State(state): State<SharedState>, req: Request<Body>) -> Response {
    let Some(root) = state.frontend_root() else {
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    };

    let index_path = root.join("index.html");
    let service = ServeDir::new(root)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(index_path));

    match service.oneshot(req).await {
        Ok(response) => response.into_response(),
        Err(err) => {
            warn!("Static asset error: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to serve static asset: {err}"),
            )
                .into_response()
        }
    }
}
