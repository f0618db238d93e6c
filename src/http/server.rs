//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, app-key gate)
//! - Serve until the shutdown signal
//!
//! Handlers depend only on the platform client (through the facades in
//! state), never on the startup provisioning pass, which has already
//! completed by the time the listener binds.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::schema::ListenerConfig;
use crate::http::{auth, token, wallet};
use crate::platform::types::CollectionId;
use crate::tokens::TokenOps;
use crate::wallet::WalletManager;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenOps>,
    pub wallets: Arc<WalletManager>,
    /// Key the app-key gate checks `Authorization: Bearer` against.
    pub app_key: String,
    /// Collection bootstrapped at startup; read-only from here on.
    pub collection: CollectionId,
}

/// HTTP server for the service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server with all routes and middleware wired.
    pub fn new(state: AppState, config: &ListenerConfig) -> Self {
        let authenticated = Router::new()
            .route("/api/token/mint", post(token::mint))
            .route("/api/token/burn", post(token::burn))
            .route("/api/token/transfer", post(token::transfer))
            .route("/api/wallet/get", post(wallet::get))
            .route("/api/wallet/create", post(wallet::create))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                auth::require_app_key,
            ));

        let router = Router::new()
            .route("/health", get(health))
            .merge(authenticated)
            .with_state(state)
            .layer(TimeoutLayer::new(config.request_timeout()))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http());

        Self { router }
    }

    /// Serve connections on the given listener until shutdown.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "operational",
            "collection_id": state.collection.to_string(),
        })),
    )
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
