//! Remote data service for the tournaments API.
//!
//! The store never talks HTTP directly. Orchestration goes through the
//! [`TournamentService`] trait so tests can swap in scripted services.
//!
//! Contract, relative to the configured base URL:
//!
//! ```text
//! GET    {base}[?q={query}]   - list or search tournaments
//! POST   {base}               - create, body {"name": ...}
//! PUT    {base}/{id}          - replace a tournament
//! DELETE {base}/{id}          - delete a tournament
//! ```

pub mod errors;
pub mod http;

use crate::domain::Tournament;
use async_trait::async_trait;

pub use errors::{ServiceError, ServiceResult};
pub use http::HttpTournamentService;

/// Operations offered by the tournaments API
#[async_trait]
pub trait TournamentService: Send + Sync {
    /// List tournaments, filtered by `query` when it is non-empty
    async fn list(&self, query: Option<&str>) -> ServiceResult<Vec<Tournament>>;

    /// Create a tournament; the server fills every field but the name
    async fn create(&self, name: &str) -> ServiceResult<Tournament>;

    /// Replace a tournament with `tournament`
    async fn update(&self, tournament: &Tournament) -> ServiceResult<Tournament>;

    /// Delete the tournament with `id`
    async fn delete(&self, id: &str) -> ServiceResult<()>;
}
