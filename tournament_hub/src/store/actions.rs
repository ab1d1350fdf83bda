//! Intents understood by the tournaments reducer.

use crate::domain::{Tournament, TournamentId};

/// State transitions applied by [`crate::store::reducer::reduce`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TournamentsAction {
    /// A list fetch started
    FetchRequest,
    /// A list fetch returned these tournaments
    FetchSuccess(Vec<Tournament>),
    /// A list fetch failed; no detail is kept
    FetchFailure,
    /// Replace the name of one tournament
    EditName {
        tournament_id: TournamentId,
        name: String,
    },
    /// Remove one tournament
    Remove(TournamentId),
    /// Insert or overwrite one tournament
    Add(Tournament),
}

impl TournamentsAction {
    pub fn edit_name(tournament_id: impl Into<TournamentId>, name: impl Into<String>) -> Self {
        TournamentsAction::EditName {
            tournament_id: tournament_id.into(),
            name: name.into(),
        }
    }

    pub fn remove(tournament_id: impl Into<TournamentId>) -> Self {
        TournamentsAction::Remove(tournament_id.into())
    }

    /// Stable action type name, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            TournamentsAction::FetchRequest => "tournaments.fetch-request",
            TournamentsAction::FetchSuccess(_) => "tournaments.fetch-success",
            TournamentsAction::FetchFailure => "tournaments.fetch-failure",
            TournamentsAction::EditName { .. } => "tournaments.edit-name",
            TournamentsAction::Remove(_) => "tournaments.remove",
            TournamentsAction::Add(_) => "tournaments.add",
        }
    }
}

/// Injected dispatch function.
///
/// Implemented by [`crate::store::StoreHandle`]; orchestration code only ever
/// sees this trait.
pub trait Dispatch: Send + Sync {
    fn dispatch(&self, action: TournamentsAction);
}

impl<D: Dispatch + ?Sized> Dispatch for std::sync::Arc<D> {
    fn dispatch(&self, action: TournamentsAction) {
        (**self).dispatch(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_kinds() {
        assert_eq!(
            TournamentsAction::FetchRequest.kind(),
            "tournaments.fetch-request"
        );
        assert_eq!(
            TournamentsAction::edit_name("1", "Cup").kind(),
            "tournaments.edit-name"
        );
        assert_eq!(TournamentsAction::remove("1").kind(), "tournaments.remove");
    }

    #[test]
    fn test_edit_name_constructor() {
        assert_eq!(
            TournamentsAction::edit_name("1", "New Cup"),
            TournamentsAction::EditName {
                tournament_id: "1".to_string(),
                name: "New Cup".to_string(),
            }
        );
    }
}
