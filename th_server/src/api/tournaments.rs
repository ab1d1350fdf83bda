//! Tournament API handlers.
//!
//! # Examples
//!
//! Search tournaments:
//! ```bash
//! curl 'http://localhost:4000/tournaments?q=cup'
//! ```
//!
//! Create a tournament:
//! ```bash
//! curl -X POST http://localhost:4000/tournaments \
//!   -H "Content-Type: application/json" \
//!   -d '{"name": "Spring Cup"}'
//! ```

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tournament_hub::Tournament;

use super::AppState;
use crate::logging::{TournamentEvent, log_tournament_event};
use crate::repository::RepositoryError;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTournamentRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(e: RepositoryError) -> ApiError {
    let status = match e {
        RepositoryError::NotFound(_) => StatusCode::NOT_FOUND,
        RepositoryError::IdMismatch { .. } | RepositoryError::EmptyName => StatusCode::BAD_REQUEST,
    };
    tracing::debug!(%status, error = %e, "Rejecting request");
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

/// List tournaments, filtered by `q` on name, organizer and game.
///
/// Returns `200 OK` with an array of tournaments ordered by id.
pub async fn list_tournaments(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Json<Vec<Tournament>> {
    let query = params.q.as_deref().filter(|q| !q.trim().is_empty());
    Json(state.repository.list(query).await)
}

/// Create a tournament from a name.
///
/// Returns `201 Created` with the full record, or `400 Bad Request` for a
/// blank name.
pub async fn create_tournament(
    State(state): State<AppState>,
    Json(request): Json<CreateTournamentRequest>,
) -> Result<(StatusCode, Json<Tournament>), ApiError> {
    let tournament = state
        .repository
        .create(&request.name)
        .await
        .map_err(error_response)?;

    log_tournament_event(TournamentEvent::Created, &tournament);
    Ok((StatusCode::CREATED, Json(tournament)))
}

/// Replace a tournament.
///
/// Returns `404 Not Found` for an unknown id and `400 Bad Request` when the
/// body id differs from the path.
pub async fn update_tournament(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(tournament): Json<Tournament>,
) -> Result<Json<Tournament>, ApiError> {
    let saved = state
        .repository
        .update(&id, tournament)
        .await
        .map_err(error_response)?;

    log_tournament_event(TournamentEvent::Updated, &saved);
    Ok(Json(saved))
}

/// Delete a tournament.
///
/// Returns `200 OK` with `{}`, or `404 Not Found` for an unknown id.
pub async fn delete_tournament(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let removed = state
        .repository
        .delete(&id)
        .await
        .map_err(error_response)?;

    log_tournament_event(TournamentEvent::Deleted, &removed);
    Ok(Json(json!({})))
}
