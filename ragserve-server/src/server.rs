//! HTTP surface: one retrieval endpoint plus the static frontend.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use ragserve_core::{QueryInput, RetrievalOutput, Retriever};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::settings::ServerConfig;

/// Shared per-process state: the retriever (read-only, constructed once at
/// startup) and the static assets directory.
#[derive(Clone)]
pub struct AppState {
    pub retriever: Arc<Retriever>,
    pub static_dir: PathBuf,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").field("static_dir", &self.static_dir).finish_non_exhaustive()
    }
}

/// Build the application router with fully-open CORS.
pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = state.static_dir.clone();

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/retrieve", post(retrieve))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until the process is stopped.
pub async fn run_server(config: ServerConfig, state: AppState) -> anyhow::Result<()> {
    let app = app_router(state);
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| "invalid host/port for ragserve-server")?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("ragserve listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Serve the frontend entry page if present, else a JSON error naming the
/// missing path.
async fn index(State(state): State<AppState>) -> Response {
    let path = state.static_dir.join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Html(html).into_response(),
        Err(_) => {
            Json(json!({ "error": format!("index.html not found at {}", path.display()) }))
                .into_response()
        }
    }
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": "ragserve" }))
}

/// The retrieval endpoint.
///
/// Rejects empty or whitespace-only queries with 400 before the embedding
/// and search path runs. Retrieval failures map to 500 with the error
/// message as detail — failures are transport-level, never encoded in a
/// success-shaped payload.
async fn retrieve(
    State(state): State<AppState>,
    Json(input): Json<QueryInput>,
) -> Result<Json<RetrievalOutput>, (StatusCode, Json<serde_json::Value>)> {
    let query = input.query_text.trim();

    if query.is_empty() {
        warn!("rejected empty query");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Query text cannot be empty." })),
        ));
    }

    info!(query_len = query.len(), "received query");
    match state.retriever.retrieve(query).await {
        Ok(output) => {
            info!(num_results = output.num_results, "query answered");
            Ok(Json(output))
        }
        Err(e) => {
            error!(error = %e, "retrieval failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "detail": e.to_string() }))))
        }
    }
}
