//! Derived views over [`AppState`].

use super::state::{AppState, FetchStatus, TournamentsById};
use crate::domain::Tournament;
use std::sync::{Arc, Mutex};

/// Fetch status projection
pub fn select_status(state: &AppState) -> FetchStatus {
    state.tournaments.status
}

/// Raw collection projection
pub fn select_tournaments_by_id(state: &AppState) -> &Arc<TournamentsById> {
    &state.tournaments.tournaments_by_id
}

/// What the status region should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TournamentsView {
    /// No fetch issued yet
    Idle,
    /// `Loading tournaments ...`
    Loading,
    /// `Something went wrong.` plus a retry affordance
    Error,
    /// `No tournaments found.`
    Empty,
    /// Card grid
    Grid(Arc<[Tournament]>),
}

/// Memoized list selector.
///
/// Building the list walks the whole map, so the result is cached against
/// the identity of the collection `Arc`. An unchanged collection returns the
/// very same list instance; any mutation yields a new one.
#[derive(Debug, Default)]
pub struct TournamentsSelector {
    cache: Mutex<Option<(Arc<TournamentsById>, Arc<[Tournament]>)>>,
}

impl TournamentsSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// List of every tournament in the collection.
    ///
    /// Sorted by id, shorter ids first so numeric ids read naturally.
    pub fn select_tournaments(&self, state: &AppState) -> Arc<[Tournament]> {
        let by_id = select_tournaments_by_id(state);
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());

        if let Some((input, output)) = cache.as_ref()
            && Arc::ptr_eq(input, by_id)
        {
            return Arc::clone(output);
        }

        let mut list: Vec<Tournament> = by_id.values().cloned().collect();
        list.sort_by(|a, b| (a.id.len(), &a.id).cmp(&(b.id.len(), &b.id)));
        let list: Arc<[Tournament]> = list.into();

        *cache = Some((Arc::clone(by_id), Arc::clone(&list)));
        list
    }

    /// Status-driven view combining both projections
    pub fn select_view(&self, state: &AppState) -> TournamentsView {
        match select_status(state) {
            FetchStatus::Idle => TournamentsView::Idle,
            FetchStatus::Loading => TournamentsView::Loading,
            FetchStatus::Error => TournamentsView::Error,
            FetchStatus::Success => {
                let list = self.select_tournaments(state);
                if list.is_empty() {
                    TournamentsView::Empty
                } else {
                    TournamentsView::Grid(list)
                }
            }
        }
    }
}
