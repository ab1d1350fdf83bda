//! Application state held by the store.

use crate::domain::{Tournament, TournamentId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Normalized tournament collection
pub type TournamentsById = HashMap<TournamentId, Tournament>;

/// Status of the most recent list fetch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Fetch in flight
    Loading,
    /// Last fetch succeeded
    Success,
    /// Last fetch failed
    Error,
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            FetchStatus::Idle => "idle",
            FetchStatus::Loading => "loading",
            FetchStatus::Success => "success",
            FetchStatus::Error => "error",
        };
        f.write_str(repr)
    }
}

/// Tournaments slice of the application state.
///
/// The collection sits behind an `Arc` whose identity changes on every
/// mutation, so consumers can detect changes with [`Arc::ptr_eq`].
#[derive(Debug, Clone, Default)]
pub struct TournamentsState {
    pub status: FetchStatus,
    pub tournaments_by_id: Arc<TournamentsById>,
}

impl TournamentsState {
    /// Look up a single tournament
    pub fn get(&self, id: &str) -> Option<&Tournament> {
        self.tournaments_by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.tournaments_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tournaments_by_id.is_empty()
    }
}

/// Root state: `{ status: idle, tournaments_by_id: {} }` at start-up
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub tournaments: TournamentsState,
}
