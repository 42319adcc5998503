// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Textwerk — document-to-outline extraction service.
//
// Entry point. Initialises logging, builds the shared state, and serves the
// HTTP API.

use textwerk_core::config::AppConfig;
use textwerk_server::{AppState, start_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Textwerk starting");

    let config = AppConfig::default();
    let addr = std::env::var("TEXTWERK_ADDR")
        .unwrap_or_else(|_| format!("0.0.0.0:{}", config.server_port));

    start_server(&addr, AppState::new(config)).await
}
