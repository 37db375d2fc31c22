//! Web form for generating hunts.
//!
//! Routes:
//! - `GET /` - the form (museum name, number of items)
//! - `POST /generate` - urlencoded form submission, returns Markdown
//! - `GET /health` - health check (returns 200 OK)

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::core::{generate_hunt, HuntReport, Orchestrator, TracingProgress};
use crate::domain::{HuntRequest, DEFAULT_ITEM_COUNT};

const INDEX_HTML: &str = include_str!("server/index.html");

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

/// Form fields posted by the index page
#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    pub museum_name: String,
    #[serde(default = "default_item_count")]
    pub num_items: u32,
}

fn default_item_count() -> u32 {
    DEFAULT_ITEM_COUNT
}

/// Build the application router
pub fn router(orchestrator: Arc<Orchestrator>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/generate", post(generate_handler))
        .route("/health", get(health_handler))
        .with_state(AppState { orchestrator })
}

/// Bind to `address` and serve until the process is stopped
pub async fn serve(address: &str, orchestrator: Arc<Orchestrator>) -> Result<()> {
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind server to {}", address))?;

    info!(address = %listener.local_addr()?, "Serving scavenger hunt form");

    axum::serve(listener, router(orchestrator))
        .await
        .context("Server error")
}

/// Handler for `/`.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Handler for `/generate`.
pub async fn generate_handler(
    State(state): State<AppState>,
    Form(form): Form<GenerateForm>,
) -> Response {
    let request = match HuntRequest::from_form(form.museum_name, form.num_items) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Rejected form submission");
            let body = HuntReport::Failed(e.to_string()).to_string();
            return (StatusCode::UNPROCESSABLE_ENTITY, markdown(body)).into_response();
        }
    };

    let mut sink = TracingProgress;
    let report = generate_hunt(state.orchestrator, request, &mut sink).await;

    markdown(report.to_string()).into_response()
}

/// Handler for `/health`.
pub async fn health_handler() -> &'static str {
    "ok\n"
}

fn markdown(body: String) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/markdown; charset=utf-8")], body)
}
