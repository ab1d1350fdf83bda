//! In-memory tournament storage.

use crate::seed::{format_start_date, seed_tournaments};
use chrono::{Duration, Utc};
use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering},
};
use thiserror::Error;
use tokio::sync::RwLock;
use tournament_hub::{Participants, Tournament, TournamentId};

/// Defaults for fields a create request does not carry
const NEW_ORGANIZER: &str = "Community";
const NEW_GAME: &str = "Unannounced";
const NEW_MAX_PARTICIPANTS: u32 = 16;
/// New tournaments start this many days after creation
const NEW_START_DELAY_DAYS: i64 = 7;

/// Repository errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Tournament {0} not found")]
    NotFound(TournamentId),

    #[error("Body id {body} does not match path id {path}")]
    IdMismatch { path: TournamentId, body: TournamentId },

    #[error("Tournament name must not be empty")]
    EmptyName,
}

/// Tournaments keyed by id, plus the id counter for new records
#[derive(Debug)]
pub struct TournamentRepository {
    tournaments: RwLock<HashMap<TournamentId, Tournament>>,
    next_id: AtomicU64,
}

impl TournamentRepository {
    pub fn new() -> Self {
        Self::with_tournaments(Vec::new())
    }

    /// Repository holding `count` generated tournaments
    pub fn seeded(count: usize) -> Self {
        Self::with_tournaments(seed_tournaments(count))
    }

    pub fn with_tournaments(tournaments: Vec<Tournament>) -> Self {
        // New ids continue after the largest numeric id
        let max_id = tournaments
            .iter()
            .filter_map(|t| t.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        Self {
            tournaments: RwLock::new(tournaments.into_iter().map(|t| (t.id.clone(), t)).collect()),
            next_id: AtomicU64::new(max_id + 1),
        }
    }

    pub async fn len(&self) -> usize {
        self.tournaments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tournaments.read().await.is_empty()
    }

    /// Tournaments matching `query`, numeric ids in numeric order
    pub async fn list(&self, query: Option<&str>) -> Vec<Tournament> {
        let tournaments = self.tournaments.read().await;
        let mut matching: Vec<Tournament> = tournaments
            .values()
            .filter(|t| query.is_none_or(|q| t.matches_query(q)))
            .cloned()
            .collect();
        matching.sort_by(|a, b| (a.id.len(), &a.id).cmp(&(b.id.len(), &b.id)));
        matching
    }

    pub async fn get(&self, id: &str) -> Option<Tournament> {
        self.tournaments.read().await.get(id).cloned()
    }

    /// Create a tournament named `name`, filling the remaining fields
    pub async fn create(&self, name: &str) -> Result<Tournament, RepositoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RepositoryError::EmptyName);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        let tournament = Tournament {
            id: id.clone(),
            name: name.to_string(),
            organizer: NEW_ORGANIZER.to_string(),
            game: NEW_GAME.to_string(),
            participants: Participants::new(0, NEW_MAX_PARTICIPANTS),
            start_date: format_start_date(Utc::now() + Duration::days(NEW_START_DELAY_DAYS)),
        };

        self.tournaments
            .write()
            .await
            .insert(id, tournament.clone());
        Ok(tournament)
    }

    /// Replace the tournament at `id`
    pub async fn update(
        &self,
        id: &str,
        tournament: Tournament,
    ) -> Result<Tournament, RepositoryError> {
        if tournament.id != id {
            return Err(RepositoryError::IdMismatch {
                path: id.to_string(),
                body: tournament.id,
            });
        }

        let mut tournaments = self.tournaments.write().await;
        let slot = tournaments
            .get_mut(id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        *slot = tournament.clone();
        Ok(tournament)
    }

    pub async fn delete(&self, id: &str) -> Result<Tournament, RepositoryError> {
        self.tournaments
            .write()
            .await
            .remove(id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }
}

impl Default for TournamentRepository {
    fn default() -> Self {
        Self::new()
    }
}
