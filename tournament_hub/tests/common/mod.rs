//! Shared test doubles for orchestration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tokio::sync::oneshot;
use tournament_hub::{
    Dispatch, Participants, Prompt, ServiceError, ServiceResult, Tournament, TournamentService,
    TournamentsAction,
};

pub fn tournament(id: &str, name: &str) -> Tournament {
    Tournament {
        id: id.to_string(),
        name: name.to_string(),
        organizer: "Org".to_string(),
        game: "CS".to_string(),
        participants: Participants::new(2, 16),
        start_date: "2024-01-01T00:00:00Z".to_string(),
    }
}

pub fn server_error() -> ServiceError {
    ServiceError::Status {
        status: 500,
        body: "boom".to_string(),
    }
}

/// Records every dispatched action
#[derive(Default)]
pub struct RecordingDispatcher {
    actions: Mutex<Vec<TournamentsAction>>,
}

impl RecordingDispatcher {
    pub fn actions(&self) -> Vec<TournamentsAction> {
        self.actions.lock().unwrap().clone()
    }
}

impl Dispatch for RecordingDispatcher {
    fn dispatch(&self, action: TournamentsAction) {
        self.actions.lock().unwrap().push(action);
    }
}

/// Service answering from fixed data, recording calls
#[derive(Default)]
pub struct ScriptedService {
    pub tournaments: Vec<Tournament>,
    pub fail_list: bool,
    pub fail_create: bool,
    pub fail_update: bool,
    pub fail_delete: bool,
    pub calls: Mutex<Vec<String>>,
}

impl ScriptedService {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl TournamentService for ScriptedService {
    async fn list(&self, query: Option<&str>) -> ServiceResult<Vec<Tournament>> {
        self.record(format!("list {}", query.unwrap_or("")));
        if self.fail_list {
            return Err(server_error());
        }

        Ok(self
            .tournaments
            .iter()
            .filter(|t| query.is_none_or(|q| t.matches_query(q)))
            .cloned()
            .collect())
    }

    async fn create(&self, name: &str) -> ServiceResult<Tournament> {
        self.record(format!("create {name}"));
        if self.fail_create {
            return Err(server_error());
        }
        Ok(tournament("new", name))
    }

    async fn update(&self, tournament: &Tournament) -> ServiceResult<Tournament> {
        self.record(format!("update {} {}", tournament.id, tournament.name));
        if self.fail_update {
            return Err(server_error());
        }
        Ok(tournament.clone())
    }

    async fn delete(&self, id: &str) -> ServiceResult<()> {
        self.record(format!("delete {id}"));
        if self.fail_delete {
            return Err(server_error());
        }
        Ok(())
    }
}

type ListGate = oneshot::Receiver<ServiceResult<Vec<Tournament>>>;

/// Service whose list calls block until the test releases them
#[derive(Default)]
pub struct GatedService {
    gates: Mutex<HashMap<String, ListGate>>,
    calls: Mutex<usize>,
}

impl GatedService {
    /// Register a gate for `query`; send on the returned sender to release it
    pub fn gate(&self, query: &str) -> oneshot::Sender<ServiceResult<Vec<Tournament>>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(query.to_string(), rx);
        tx
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl TournamentService for GatedService {
    async fn list(&self, query: Option<&str>) -> ServiceResult<Vec<Tournament>> {
        let gate = self
            .gates
            .lock()
            .unwrap()
            .remove(query.unwrap_or(""))
            .expect("no gate registered for query");
        *self.calls.lock().unwrap() += 1;
        gate.await.expect("gate dropped")
    }

    async fn create(&self, _name: &str) -> ServiceResult<Tournament> {
        Err(server_error())
    }

    async fn update(&self, _tournament: &Tournament) -> ServiceResult<Tournament> {
        Err(server_error())
    }

    async fn delete(&self, _id: &str) -> ServiceResult<()> {
        Err(server_error())
    }
}

/// Prompt answering from queues
#[derive(Default)]
pub struct ScriptedPrompt {
    texts: Mutex<VecDeque<Option<String>>>,
    confirmations: Mutex<VecDeque<bool>>,
    pub asked: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn answering_text(answer: Option<&str>) -> Self {
        let prompt = Self::default();
        prompt
            .texts
            .lock()
            .unwrap()
            .push_back(answer.map(str::to_string));
        prompt
    }

    pub fn answering_confirm(answer: bool) -> Self {
        let prompt = Self::default();
        prompt.confirmations.lock().unwrap().push_back(answer);
        prompt
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl Prompt for ScriptedPrompt {
    async fn ask_text(&self, message: &str) -> Option<String> {
        self.asked.lock().unwrap().push(message.to_string());
        self.texts.lock().unwrap().pop_front().flatten()
    }

    async fn confirm(&self, message: &str) -> bool {
        self.asked.lock().unwrap().push(message.to_string());
        self.confirmations.lock().unwrap().pop_front().unwrap_or(false)
    }
}
