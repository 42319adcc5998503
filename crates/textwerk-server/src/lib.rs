// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// textwerk-server — HTTP surface for the Textwerk document processor.
//
// One endpoint: POST /api/process takes a multipart upload (the file plus a
// declared type string) and returns the outline document as JSON. Errors
// come back as {"detail": "<message>"} with 400 for caller faults and 500
// for extraction failures.

pub mod error;
pub mod handlers;
pub mod upload;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use textwerk_core::config::AppConfig;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/process", post(handlers::process_document))
        .route("/health", get(handlers::health_check))
        // Scanned PDFs routinely exceed the default 2 MB body limit.
        .layer(DefaultBodyLimit::max(64 * 1024 * 1024))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until shutdown.
pub async fn start_server(addr: &str, state: AppState) -> Result<(), Box<dyn std::error::Error>> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Textwerk server listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
