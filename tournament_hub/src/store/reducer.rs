//! Pure reducer over [`TournamentsAction`].
//!
//! | Action          | Effect                                              |
//! |-----------------|-----------------------------------------------------|
//! | `FetchRequest`  | status → loading, collection untouched              |
//! | `FetchSuccess`  | status → success, collection rebuilt from the list  |
//! | `FetchFailure`  | status → error, collection cleared                  |
//! | `EditName`      | name of one entry replaced                          |
//! | `Remove`        | entry deleted if present                            |
//! | `Add`           | entry inserted or overwritten                       |

use super::{
    actions::TournamentsAction,
    state::{AppState, FetchStatus, TournamentsById, TournamentsState},
};
use crate::domain::Tournament;
use std::sync::Arc;

/// Root reducer
pub fn reduce(state: &AppState, action: TournamentsAction) -> AppState {
    AppState {
        tournaments: tournaments(&state.tournaments, action),
    }
}

/// Tournaments slice reducer. Total: every action yields a state.
pub fn tournaments(state: &TournamentsState, action: TournamentsAction) -> TournamentsState {
    match action {
        TournamentsAction::FetchRequest => TournamentsState {
            status: FetchStatus::Loading,
            tournaments_by_id: Arc::clone(&state.tournaments_by_id),
        },
        TournamentsAction::FetchSuccess(list) => {
            // Later duplicates overwrite earlier ones
            let by_id: TournamentsById = list
                .into_iter()
                .map(|tournament| (tournament.id.clone(), tournament))
                .collect();

            TournamentsState {
                status: FetchStatus::Success,
                tournaments_by_id: Arc::new(by_id),
            }
        }
        TournamentsAction::FetchFailure => TournamentsState {
            status: FetchStatus::Error,
            tournaments_by_id: Arc::new(TournamentsById::new()),
        },
        TournamentsAction::EditName {
            tournament_id,
            name,
        } => {
            let mut by_id = (*state.tournaments_by_id).clone();
            match by_id.get_mut(&tournament_id) {
                Some(tournament) => tournament.name = name,
                None => {
                    let placeholder = Tournament::name_only(tournament_id.clone(), name);
                    by_id.insert(tournament_id, placeholder);
                }
            }

            with_collection(state, by_id)
        }
        TournamentsAction::Remove(tournament_id) => {
            if !state.tournaments_by_id.contains_key(&tournament_id) {
                return state.clone();
            }

            let mut by_id = (*state.tournaments_by_id).clone();
            by_id.remove(&tournament_id);
            with_collection(state, by_id)
        }
        TournamentsAction::Add(tournament) => {
            let mut by_id = (*state.tournaments_by_id).clone();
            by_id.insert(tournament.id.clone(), tournament);
            with_collection(state, by_id)
        }
    }
}

fn with_collection(state: &TournamentsState, by_id: TournamentsById) -> TournamentsState {
    TournamentsState {
        status: state.status,
        tournaments_by_id: Arc::new(by_id),
    }
}
