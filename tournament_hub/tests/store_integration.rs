//! Integration tests for the tournaments store.
//!
//! These walk the reducer and selectors through the same sequences the
//! front ends produce.

use std::sync::Arc;
use tournament_hub::{
    AppState, Dispatch, FetchStatus, Participants, StoreActor, Tournament, TournamentsAction,
    TournamentsSelector, TournamentsView,
    store::{reduce, select_status},
};

fn cup() -> Tournament {
    Tournament {
        id: "1".to_string(),
        name: "Cup".to_string(),
        organizer: "Org".to_string(),
        game: "CS".to_string(),
        participants: Participants::new(2, 16),
        start_date: "2024-01-01T00:00:00Z".to_string(),
    }
}

fn league() -> Tournament {
    Tournament {
        id: "2".to_string(),
        name: "League".to_string(),
        organizer: "Other Org".to_string(),
        game: "Dota 2".to_string(),
        participants: Participants::new(8, 8),
        start_date: "2024-02-01T12:00:00Z".to_string(),
    }
}

fn after_fetch() -> AppState {
    let state = reduce(&AppState::default(), TournamentsAction::FetchRequest);
    reduce(&state, TournamentsAction::FetchSuccess(vec![cup()]))
}

#[test]
fn test_fetch_scenario() {
    let state = after_fetch();

    assert_eq!(select_status(&state), FetchStatus::Success);
    assert_eq!(state.tournaments.get("1").unwrap().name, "Cup");
}

#[test]
fn test_edit_name_scenario() {
    let state = reduce(&after_fetch(), TournamentsAction::edit_name("1", "New Cup"));

    let entry = state.tournaments.get("1").unwrap();
    assert_eq!(entry.name, "New Cup");
    assert_eq!(entry.organizer, "Org");
}

#[test]
fn test_remove_scenario() {
    let state = reduce(&after_fetch(), TournamentsAction::remove("1"));
    assert!(!state.tournaments.tournaments_by_id.contains_key("1"));
}

#[test]
fn test_failed_fetch_clears_regardless_of_prior_state() {
    let populated = reduce(
        &after_fetch(),
        TournamentsAction::Add(league()),
    );
    let priors = [
        AppState::default(),
        populated.clone(),
        reduce(&populated, TournamentsAction::FetchRequest),
    ];

    for prior in priors {
        let state = reduce(&prior, TournamentsAction::FetchFailure);
        assert_eq!(state.tournaments.status, FetchStatus::Error);
        assert!(state.tournaments.is_empty());
    }
}

#[test]
fn test_edit_then_view_leaves_others_identical() {
    let selector = TournamentsSelector::new();
    let state = reduce(
        &AppState::default(),
        TournamentsAction::FetchSuccess(vec![cup(), league()]),
    );
    let state = reduce(&state, TournamentsAction::edit_name("1", "New Cup"));

    let list = selector.select_tournaments(&state);
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].name, "New Cup");
    assert_eq!(list[1], league());
}

#[test]
fn test_remove_then_view_never_contains_id() {
    let selector = TournamentsSelector::new();
    let state = reduce(
        &AppState::default(),
        TournamentsAction::FetchSuccess(vec![cup(), league()]),
    );

    let removed = reduce(&state, TournamentsAction::remove("1"));
    assert!(selector.select_tournaments(&removed).iter().all(|t| t.id != "1"));

    let again = reduce(&removed, TournamentsAction::remove("1"));
    assert_eq!(
        *again.tournaments.tournaments_by_id,
        *removed.tournaments.tournaments_by_id
    );
}

#[test]
fn test_add_is_idempotent() {
    let once = reduce(&after_fetch(), TournamentsAction::Add(league()));
    let twice = reduce(&once, TournamentsAction::Add(league()));

    assert_eq!(
        *once.tournaments.tournaments_by_id,
        *twice.tournaments.tournaments_by_id
    );
}

#[test]
fn test_selector_memoization_across_actions() {
    let selector = TournamentsSelector::new();
    let state = after_fetch();

    let first = selector.select_tournaments(&state);
    assert!(Arc::ptr_eq(&first, &selector.select_tournaments(&state)));

    let actions = [
        TournamentsAction::edit_name("1", "Renamed"),
        TournamentsAction::Add(league()),
        TournamentsAction::remove("1"),
        TournamentsAction::FetchSuccess(vec![cup()]),
        TournamentsAction::FetchFailure,
    ];

    let mut previous = first;
    let mut state = state;
    for action in actions {
        state = reduce(&state, action);
        let current = selector.select_tournaments(&state);
        assert!(!Arc::ptr_eq(&previous, &current));
        previous = current;
    }
}

#[test]
fn test_view_after_failure_and_retry() {
    let selector = TournamentsSelector::new();
    let failed = reduce(&after_fetch(), TournamentsAction::FetchFailure);
    assert_eq!(selector.select_view(&failed), TournamentsView::Error);

    let retrying = reduce(&failed, TournamentsAction::FetchRequest);
    assert_eq!(selector.select_view(&retrying), TournamentsView::Loading);

    let recovered = reduce(&retrying, TournamentsAction::FetchSuccess(vec![]));
    assert_eq!(selector.select_view(&recovered), TournamentsView::Empty);
}

#[tokio::test]
async fn test_store_actor_runs_scenarios() {
    let store = StoreActor::spawn();

    store.dispatch(TournamentsAction::FetchRequest);
    store.dispatch(TournamentsAction::FetchSuccess(vec![cup()]));
    store.flush().await.unwrap();
    assert_eq!(store.state().tournaments.status, FetchStatus::Success);

    store.dispatch(TournamentsAction::edit_name("1", "New Cup"));
    store.flush().await.unwrap();
    assert_eq!(store.state().tournaments.get("1").unwrap().name, "New Cup");

    store.dispatch(TournamentsAction::remove("1"));
    store.flush().await.unwrap();
    assert!(store.state().tournaments.get("1").is_none());
}
