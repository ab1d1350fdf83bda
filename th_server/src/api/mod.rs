//! HTTP API for the tournaments mock server.
//!
//! # Endpoints
//!
//! ```text
//! GET    /health              - Health check
//! GET    /tournaments[?q=..]  - List or search tournaments
//! POST   /tournaments         - Create a tournament from {"name": ...}
//! PUT    /tournaments/{id}    - Replace a tournament
//! DELETE /tournaments/{id}    - Delete a tournament
//! ```
//!
//! # CORS
//!
//! CORS is configured permissively so browser front ends can use the server
//! during development.

pub mod request_id;
pub mod tournaments;

use crate::repository::TournamentRepository;
use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Json},
    routing::{get, put},
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<TournamentRepository>,
}

/// Create the complete API router with all endpoints and middleware.
///
/// # Example
///
/// ```rust,no_run
/// # use th_server::api::{create_router, AppState};
/// # use th_server::repository::TournamentRepository;
/// # use std::sync::Arc;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let state = AppState {
///     repository: Arc::new(TournamentRepository::seeded(12)),
/// };
/// let app = create_router(state);
/// let listener = tokio::net::TcpListener::bind("127.0.0.1:4000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/tournaments",
            get(tournaments::list_tournaments).post(tournaments::create_tournament),
        )
        .route(
            "/tournaments/{id}",
            put(tournaments::update_tournament).delete(tournaments::delete_tournament),
        )
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring.
///
/// ```bash
/// curl http://localhost:4000/health
/// # {"status":"healthy","tournaments":12,"timestamp":"2025-11-22T10:30:00Z"}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "tournaments": state.repository.len().await,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
