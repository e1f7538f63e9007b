// SPDX-FileCopyrightText: 2026 reviewdeck contributors
//
// SPDX-License-Identifier: AGPL-3.0-only

//! The dashboard HTTP server: one embedded page, a small JSON API, and a
//! single outbound inference call per submission.

pub mod api;
pub mod error;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::response::Html;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::services::llm::{self, InferenceProvider};

const DASHBOARD_HTML: &str = include_str!("../../assets/index.html");

/// Read-only state shared across requests.
pub struct AppState {
    pub config: Config,
    pub provider: Box<dyn InferenceProvider>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let provider = llm::create_provider(&config);
        Self { config, provider }
    }
}

/// Run the server until the shutdown future resolves.
pub async fn run_with_shutdown<F>(config: Config, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .map_err(|_| Error::Config(format!("invalid listen address '{}'", config.listen_addr)))?;

    let state = Arc::new(AppState::new(config));
    let app = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "dashboard listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/api/health", get(api::health))
        .route("/api/review", post(api::submit_review))
        .route("/api/ask", post(api::ask_question))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}
