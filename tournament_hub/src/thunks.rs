//! Asynchronous orchestration: service calls that end in dispatched actions.

use crate::{
    domain::Tournament,
    service::TournamentService,
    store::{Dispatch, TournamentsAction},
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicU64, Ordering},
};

/// Sequence numbers for list fetches.
///
/// A response is applied only if its number is higher than every response
/// applied before it, so a slow early search cannot overwrite a later one.
/// The comparison and the dispatch of the response happen under one lock.
#[derive(Debug, Default)]
pub struct FetchSequence {
    issued: AtomicU64,
    applied: Mutex<u64>,
}

impl FetchSequence {
    /// Reserve the next sequence number
    pub fn next(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Run `apply` for `seq` unless a newer response already was.
    ///
    /// `apply` runs while the sequence is locked and must not block.
    pub fn apply_latest<F: FnOnce()>(&self, seq: u64, apply: F) -> bool {
        let mut applied = self
            .applied
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if *applied >= seq {
            return false;
        }
        *applied = seq;
        apply();
        true
    }
}

/// Intent dispatchers bound to a service and a store.
///
/// Cloning is cheap; clones share the fetch sequence.
#[derive(Clone)]
pub struct TournamentThunks {
    service: Arc<dyn TournamentService>,
    dispatcher: Arc<dyn Dispatch>,
    fetch_sequence: Arc<FetchSequence>,
    persist_mutations: bool,
}

impl TournamentThunks {
    pub fn new(service: Arc<dyn TournamentService>, dispatcher: Arc<dyn Dispatch>) -> Self {
        Self {
            service,
            dispatcher,
            fetch_sequence: Arc::new(FetchSequence::default()),
            persist_mutations: false,
        }
    }

    /// Also send renames and removals to the API
    pub fn with_persisted_mutations(mut self, persist: bool) -> Self {
        self.persist_mutations = persist;
        self
    }

    pub fn persists_mutations(&self) -> bool {
        self.persist_mutations
    }

    /// Fetch tournaments, tracking the request in the fetch status.
    ///
    /// Dispatches `FetchRequest`, then `FetchSuccess` or `FetchFailure` unless
    /// a newer fetch has already been applied.
    pub async fn fetch_tournaments(&self, query: Option<&str>) {
        let seq = self.fetch_sequence.next();
        self.dispatcher.dispatch(TournamentsAction::FetchRequest);

        let result = self.service.list(query).await;

        let dispatcher = &self.dispatcher;
        let applied = self.fetch_sequence.apply_latest(seq, || match result {
            Ok(tournaments) => {
                tracing::debug!(seq, count = tournaments.len(), "Tournaments fetched");
                dispatcher.dispatch(TournamentsAction::FetchSuccess(tournaments));
            }
            Err(e) => {
                tracing::warn!(seq, error = %e, "Failed to fetch tournaments");
                dispatcher.dispatch(TournamentsAction::FetchFailure);
            }
        });
        if !applied {
            tracing::debug!(seq, query = ?query, "Dropping stale tournaments response");
        }
    }

    /// Create a tournament and merge the server's record into the store.
    ///
    /// Failures leave the state untouched.
    pub async fn create_new_tournament(&self, name: &str) {
        match self.service.create(name).await {
            Ok(tournament) => {
                tracing::info!(id = %tournament.id, name, "Tournament created");
                self.dispatcher.dispatch(TournamentsAction::Add(tournament));
            }
            Err(e) => {
                tracing::warn!(name, error = %e, "Failed to create tournament");
            }
        }
    }

    /// Rename locally
    pub fn edit_tournament_name(&self, tournament_id: &str, name: &str) {
        self.dispatcher
            .dispatch(TournamentsAction::edit_name(tournament_id, name));
    }

    /// Remove locally
    pub fn remove_tournament(&self, tournament_id: &str) {
        self.dispatcher
            .dispatch(TournamentsAction::remove(tournament_id));
    }

    /// Rename locally, then PUT the updated record when mutations persist.
    ///
    /// The server's answer replaces the local record.
    pub async fn rename_tournament(&self, tournament: &Tournament, name: &str) {
        self.edit_tournament_name(&tournament.id, name);
        if !self.persist_mutations {
            return;
        }

        let updated = Tournament {
            name: name.to_string(),
            ..tournament.clone()
        };
        match self.service.update(&updated).await {
            Ok(saved) => self.dispatcher.dispatch(TournamentsAction::Add(saved)),
            Err(e) => {
                tracing::warn!(id = %tournament.id, error = %e, "Failed to save tournament name");
            }
        }
    }

    /// Remove locally, then DELETE when mutations persist
    pub async fn delete_tournament(&self, tournament_id: &str) {
        self.remove_tournament(tournament_id);
        if !self.persist_mutations {
            return;
        }

        if let Err(e) = self.service.delete(tournament_id).await {
            tracing::warn!(id = tournament_id, error = %e, "Failed to delete tournament");
        }
    }
}
