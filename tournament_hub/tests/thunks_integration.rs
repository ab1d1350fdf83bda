//! Integration tests for the orchestration routines and interaction flows.

mod common;

use common::{
    GatedService, RecordingDispatcher, ScriptedPrompt, ScriptedService, server_error, tournament,
};
use std::sync::Arc;
use std::time::Duration;
use tournament_hub::{
    Dispatch, FetchStatus, StoreActor, TournamentThunks, TournamentsAction,
    interaction::{self, CREATE_PROMPT, REMOVE_CONFIRMATION, RENAME_PROMPT},
};

fn thunks_with(service: ScriptedService) -> (TournamentThunks, Arc<ScriptedService>, Arc<RecordingDispatcher>) {
    let service = Arc::new(service);
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let thunks = TournamentThunks::new(service.clone(), dispatcher.clone());
    (thunks, service, dispatcher)
}

// ============================================================================
// fetch_tournaments
// ============================================================================

#[tokio::test]
async fn test_fetch_success_dispatches_request_then_success() {
    let (thunks, service, dispatcher) = thunks_with(ScriptedService {
        tournaments: vec![tournament("1", "Cup"), tournament("2", "League")],
        ..Default::default()
    });

    thunks.fetch_tournaments(None).await;

    assert_eq!(
        dispatcher.actions(),
        vec![
            TournamentsAction::FetchRequest,
            TournamentsAction::FetchSuccess(vec![tournament("1", "Cup"), tournament("2", "League")]),
        ]
    );
    assert_eq!(service.calls(), vec!["list "]);
}

#[tokio::test]
async fn test_fetch_passes_query() {
    let (thunks, service, dispatcher) = thunks_with(ScriptedService {
        tournaments: vec![tournament("1", "Cup"), tournament("2", "League")],
        ..Default::default()
    });

    thunks.fetch_tournaments(Some("league")).await;

    assert_eq!(service.calls(), vec!["list league"]);
    assert_eq!(
        dispatcher.actions().last(),
        Some(&TournamentsAction::FetchSuccess(vec![tournament("2", "League")]))
    );
}

#[tokio::test]
async fn test_fetch_failure_dispatches_failure() {
    let (thunks, _service, dispatcher) = thunks_with(ScriptedService {
        fail_list: true,
        ..Default::default()
    });

    thunks.fetch_tournaments(None).await;

    assert_eq!(
        dispatcher.actions(),
        vec![TournamentsAction::FetchRequest, TournamentsAction::FetchFailure]
    );
}

#[tokio::test]
async fn test_stale_fetch_response_dropped() {
    let service = Arc::new(GatedService::default());
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let thunks = TournamentThunks::new(service.clone(), dispatcher.clone());

    let release_slow = service.gate("c");
    let release_fast = service.gate("cup");

    let slow = tokio::spawn({
        let thunks = thunks.clone();
        async move { thunks.fetch_tournaments(Some("c")).await }
    });
    while service.calls() < 1 {
        tokio::task::yield_now().await;
    }

    let fast = tokio::spawn({
        let thunks = thunks.clone();
        async move { thunks.fetch_tournaments(Some("cup")).await }
    });
    while service.calls() < 2 {
        tokio::task::yield_now().await;
    }

    // Later search resolves first, the earlier one afterwards
    release_fast.send(Ok(vec![tournament("1", "Cup")])).unwrap();
    fast.await.unwrap();
    release_slow
        .send(Ok(vec![tournament("1", "Cup"), tournament("2", "Cascade")]))
        .unwrap();
    slow.await.unwrap();

    assert_eq!(
        dispatcher.actions(),
        vec![
            TournamentsAction::FetchRequest,
            TournamentsAction::FetchRequest,
            TournamentsAction::FetchSuccess(vec![tournament("1", "Cup")]),
        ]
    );
}

#[tokio::test]
async fn test_stale_failure_also_dropped() {
    let service = Arc::new(GatedService::default());
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let thunks = TournamentThunks::new(service.clone(), dispatcher.clone());

    let release_first = service.gate("a");
    let release_second = service.gate("b");

    let first = tokio::spawn({
        let thunks = thunks.clone();
        async move { thunks.fetch_tournaments(Some("a")).await }
    });
    while service.calls() < 1 {
        tokio::task::yield_now().await;
    }
    let second = tokio::spawn({
        let thunks = thunks.clone();
        async move { thunks.fetch_tournaments(Some("b")).await }
    });
    while service.calls() < 2 {
        tokio::task::yield_now().await;
    }

    release_second.send(Ok(vec![])).unwrap();
    second.await.unwrap();
    release_first.send(Err(server_error())).unwrap();
    first.await.unwrap();

    assert!(
        !dispatcher
            .actions()
            .contains(&TournamentsAction::FetchFailure)
    );
}

#[tokio::test]
async fn test_in_order_responses_all_applied() {
    let service = Arc::new(GatedService::default());
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let thunks = TournamentThunks::new(service.clone(), dispatcher.clone());

    let release_first = service.gate("a");
    let release_second = service.gate("b");

    let first = tokio::spawn({
        let thunks = thunks.clone();
        async move { thunks.fetch_tournaments(Some("a")).await }
    });
    while service.calls() < 1 {
        tokio::task::yield_now().await;
    }
    let second = tokio::spawn({
        let thunks = thunks.clone();
        async move { thunks.fetch_tournaments(Some("b")).await }
    });
    while service.calls() < 2 {
        tokio::task::yield_now().await;
    }

    release_first.send(Ok(vec![tournament("1", "A")])).unwrap();
    first.await.unwrap();
    release_second.send(Ok(vec![tournament("2", "B")])).unwrap();
    second.await.unwrap();

    let successes = dispatcher
        .actions()
        .into_iter()
        .filter(|a| matches!(a, TournamentsAction::FetchSuccess(_)))
        .count();
    assert_eq!(successes, 2);
}

/// Stalls while dispatching a success that contains `stall_on`, as if the
/// worker thread were descheduled in the middle of applying the response
struct StallingDispatcher {
    stall_on: &'static str,
    inner: RecordingDispatcher,
}

impl Dispatch for StallingDispatcher {
    fn dispatch(&self, action: TournamentsAction) {
        if let TournamentsAction::FetchSuccess(list) = &action
            && list.iter().any(|t| t.name == self.stall_on)
        {
            std::thread::sleep(Duration::from_millis(100));
        }
        self.inner.dispatch(action);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_newer_response_applied_last_across_threads() {
    let service = Arc::new(GatedService::default());
    let dispatcher = Arc::new(StallingDispatcher {
        stall_on: "Old",
        inner: RecordingDispatcher::default(),
    });
    let thunks = TournamentThunks::new(service.clone(), dispatcher.clone());

    let release_old = service.gate("old");
    let release_new = service.gate("new");

    let old = tokio::spawn({
        let thunks = thunks.clone();
        async move { thunks.fetch_tournaments(Some("old")).await }
    });
    while service.calls() < 1 {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    let new = tokio::spawn({
        let thunks = thunks.clone();
        async move { thunks.fetch_tournaments(Some("new")).await }
    });
    while service.calls() < 2 {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    // The older response starts applying first and stalls mid-dispatch
    release_old.send(Ok(vec![tournament("1", "Old")])).unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    release_new.send(Ok(vec![tournament("2", "New")])).unwrap();
    old.await.unwrap();
    new.await.unwrap();

    let last_success = dispatcher
        .inner
        .actions()
        .into_iter()
        .rev()
        .find(|a| matches!(a, TournamentsAction::FetchSuccess(_)));
    assert_eq!(
        last_success,
        Some(TournamentsAction::FetchSuccess(vec![tournament("2", "New")]))
    );
}

// ============================================================================
// create_new_tournament
// ============================================================================

#[tokio::test]
async fn test_create_adds_server_record() {
    let (thunks, service, dispatcher) = thunks_with(ScriptedService::default());

    thunks.create_new_tournament("Spring Cup").await;

    assert_eq!(service.calls(), vec!["create Spring Cup"]);
    assert_eq!(
        dispatcher.actions(),
        vec![TournamentsAction::Add(tournament("new", "Spring Cup"))]
    );
}

#[tokio::test]
async fn test_create_failure_is_silent() {
    let (thunks, _service, dispatcher) = thunks_with(ScriptedService {
        fail_create: true,
        ..Default::default()
    });

    thunks.create_new_tournament("Spring Cup").await;

    assert!(dispatcher.actions().is_empty());
}

// ============================================================================
// rename / delete
// ============================================================================

#[tokio::test]
async fn test_rename_local_only_by_default() {
    let (thunks, service, dispatcher) = thunks_with(ScriptedService::default());

    thunks.rename_tournament(&tournament("1", "Cup"), "New Cup").await;

    assert!(service.calls().is_empty());
    assert_eq!(
        dispatcher.actions(),
        vec![TournamentsAction::edit_name("1", "New Cup")]
    );
}

#[tokio::test]
async fn test_rename_persisted() {
    let (thunks, service, dispatcher) = thunks_with(ScriptedService::default());
    let thunks = thunks.with_persisted_mutations(true);

    thunks.rename_tournament(&tournament("1", "Cup"), "New Cup").await;

    assert_eq!(service.calls(), vec!["update 1 New Cup"]);
    assert_eq!(
        dispatcher.actions(),
        vec![
            TournamentsAction::edit_name("1", "New Cup"),
            TournamentsAction::Add(tournament("1", "New Cup")),
        ]
    );
}

#[tokio::test]
async fn test_rename_persist_failure_keeps_local_edit() {
    let (thunks, _service, dispatcher) = thunks_with(ScriptedService {
        fail_update: true,
        ..Default::default()
    });
    let thunks = thunks.with_persisted_mutations(true);

    thunks.rename_tournament(&tournament("1", "Cup"), "New Cup").await;

    assert_eq!(
        dispatcher.actions(),
        vec![TournamentsAction::edit_name("1", "New Cup")]
    );
}

#[tokio::test]
async fn test_delete_persisted() {
    let (thunks, service, dispatcher) = thunks_with(ScriptedService {
        fail_delete: true,
        ..Default::default()
    });
    let thunks = thunks.with_persisted_mutations(true);

    thunks.delete_tournament("1").await;

    assert_eq!(service.calls(), vec!["delete 1"]);
    assert_eq!(dispatcher.actions(), vec![TournamentsAction::remove("1")]);
}

// ============================================================================
// Interaction flows
// ============================================================================

#[tokio::test]
async fn test_create_flow_rejects_blank_and_cancelled() {
    for answer in [None, Some(""), Some("   ")] {
        let (thunks, service, dispatcher) = thunks_with(ScriptedService::default());
        let prompt = ScriptedPrompt::answering_text(answer);

        assert!(!interaction::create_tournament(&prompt, &thunks).await);
        assert_eq!(prompt.asked(), vec![CREATE_PROMPT]);
        assert!(service.calls().is_empty());
        assert!(dispatcher.actions().is_empty());
    }
}

#[tokio::test]
async fn test_create_flow() {
    let (thunks, service, _dispatcher) = thunks_with(ScriptedService::default());
    let prompt = ScriptedPrompt::answering_text(Some(" Spring Cup "));

    assert!(interaction::create_tournament(&prompt, &thunks).await);
    assert_eq!(service.calls(), vec!["create Spring Cup"]);
}

#[tokio::test]
async fn test_edit_flow() {
    let (thunks, _service, dispatcher) = thunks_with(ScriptedService::default());

    let cancelled = ScriptedPrompt::answering_text(None);
    assert!(!interaction::edit_tournament(&cancelled, &thunks, &tournament("1", "Cup")).await);
    assert!(dispatcher.actions().is_empty());

    let prompt = ScriptedPrompt::answering_text(Some("New Cup"));
    assert!(interaction::edit_tournament(&prompt, &thunks, &tournament("1", "Cup")).await);
    assert_eq!(prompt.asked(), vec![RENAME_PROMPT]);
    assert_eq!(
        dispatcher.actions(),
        vec![TournamentsAction::edit_name("1", "New Cup")]
    );
}

#[tokio::test]
async fn test_remove_flow_requires_confirmation() {
    let (thunks, _service, dispatcher) = thunks_with(ScriptedService::default());

    let declined = ScriptedPrompt::answering_confirm(false);
    assert!(!interaction::remove_tournament(&declined, &thunks, "1").await);
    assert_eq!(declined.asked(), vec![REMOVE_CONFIRMATION]);
    assert!(dispatcher.actions().is_empty());

    let confirmed = ScriptedPrompt::answering_confirm(true);
    assert!(interaction::remove_tournament(&confirmed, &thunks, "1").await);
    assert_eq!(dispatcher.actions(), vec![TournamentsAction::remove("1")]);
}

// ============================================================================
// End to end through the store actor
// ============================================================================

#[tokio::test]
async fn test_thunks_drive_store() {
    let store = StoreActor::spawn();
    let service = Arc::new(ScriptedService {
        tournaments: vec![tournament("1", "Cup")],
        ..Default::default()
    });
    let thunks = TournamentThunks::new(service, Arc::new(store.clone()));

    thunks.fetch_tournaments(None).await;
    thunks.create_new_tournament("Spring Cup").await;
    thunks.edit_tournament_name("1", "New Cup");
    store.flush().await.unwrap();

    let state = store.state();
    assert_eq!(state.tournaments.status, FetchStatus::Success);
    assert_eq!(state.tournaments.len(), 2);
    assert_eq!(state.tournaments.get("1").unwrap().name, "New Cup");
    assert_eq!(state.tournaments.get("new").unwrap().name, "Spring Cup");

    // A re-fetch silently drops the local edit
    thunks.fetch_tournaments(None).await;
    store.flush().await.unwrap();
    let state = store.state();
    assert_eq!(state.tournaments.get("1").unwrap().name, "Cup");
    assert!(state.tournaments.get("new").is_none());
}
