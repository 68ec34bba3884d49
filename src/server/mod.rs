//! HTTP API over the issue store.
//!
//! Routes:
//!
//! | Method | Path           | Handler                      |
//! |--------|----------------|------------------------------|
//! | GET    | `/health`      | [`handlers::health`]         |
//! | GET    | `/issues`      | [`handlers::list_issues`]    |
//! | POST   | `/issues`      | [`handlers::create_issue`]   |
//! | GET    | `/issues/{id}` | [`handlers::get_issue`]      |
//! | PUT    | `/issues/{id}` | [`handlers::update_issue`]   |

pub mod error;
pub mod handlers;
pub mod wire;

pub use error::ApiError;
pub use wire::{Health, IssueList, ListParams};

use crate::config::ServerConfig;
use crate::storage::{IssueStore, seed_sample_data};
use anyhow::Context;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<IssueStore>,
    pub max_page_size: i64,
}

impl AppState {
    #[must_use]
    pub const fn new(store: Arc<IssueStore>, max_page_size: i64) -> Self {
        Self {
            store,
            max_page_size,
        }
    }
}

/// Build the state for `config`, seeding sample issues when enabled.
#[must_use]
pub fn bootstrap(config: &ServerConfig) -> AppState {
    let store = Arc::new(IssueStore::new());
    if config.seed {
        seed_sample_data(&store);
    }
    AppState::new(store, config.max_page_size)
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/issues",
            get(handlers::list_issues).post(handlers::create_issue),
        )
        .route(
            "/issues/{id}",
            get(handlers::get_issue).put(handlers::update_issue),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Bind to the configured address and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(config: &ServerConfig, state: AppState) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    let local = listener
        .local_addr()
        .context("Failed to read listener address")?;

    tracing::info!(address = %local, "Issue tracker listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
