//! Store actor: the single owner of [`AppState`].
//!
//! Actions reach the actor through an unbounded inbox and are reduced one at
//! a time, so they are applied strictly in dispatch order. Every new state is
//! published on a watch channel for renderers.

use super::{
    actions::{Dispatch, TournamentsAction},
    reducer::reduce,
    state::AppState,
};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};

/// Store errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The actor task has stopped
    #[error("Store is closed")]
    Closed,
}

/// Messages accepted by the store actor
#[derive(Debug)]
pub enum StoreMessage {
    /// Reduce an action
    Dispatch(TournamentsAction),

    /// Reply once every message queued before this one has been applied
    Flush { response: oneshot::Sender<()> },
}

/// Handle for dispatching actions and reading state
#[derive(Clone, Debug)]
pub struct StoreHandle {
    sender: mpsc::UnboundedSender<StoreMessage>,
    state: watch::Receiver<AppState>,
}

impl StoreHandle {
    /// Dispatch an action, failing if the store is gone
    pub fn try_dispatch(&self, action: TournamentsAction) -> Result<(), StoreError> {
        self.sender
            .send(StoreMessage::Dispatch(action))
            .map_err(|_| StoreError::Closed)
    }

    /// Snapshot of the latest state
    pub fn state(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.clone()
    }

    /// Wait until every action dispatched so far has been applied
    pub async fn flush(&self) -> Result<(), StoreError> {
        let (response, done) = oneshot::channel();
        self.sender
            .send(StoreMessage::Flush { response })
            .map_err(|_| StoreError::Closed)?;
        done.await.map_err(|_| StoreError::Closed)
    }
}

impl Dispatch for StoreHandle {
    fn dispatch(&self, action: TournamentsAction) {
        let kind = action.kind();
        if self.try_dispatch(action).is_err() {
            tracing::warn!(action = kind, "Dropping action, store is closed");
        }
    }
}

/// Actor owning the application state
pub struct StoreActor {
    state: AppState,
    inbox: mpsc::UnboundedReceiver<StoreMessage>,
    publisher: watch::Sender<AppState>,
}

impl StoreActor {
    /// Create a new store actor and its handle
    pub fn new(initial: AppState) -> (Self, StoreHandle) {
        let (sender, inbox) = mpsc::unbounded_channel();
        let (publisher, state) = watch::channel(initial.clone());

        let actor = Self {
            state: initial,
            inbox,
            publisher,
        };

        (actor, StoreHandle { sender, state })
    }

    /// Spawn an actor with the default state on the current runtime
    pub fn spawn() -> StoreHandle {
        Self::spawn_with(AppState::default())
    }

    /// Spawn an actor with `initial` state on the current runtime
    pub fn spawn_with(initial: AppState) -> StoreHandle {
        let (actor, handle) = Self::new(initial);
        tokio::spawn(actor.run());
        handle
    }

    /// Run until every handle has been dropped
    pub async fn run(mut self) {
        while let Some(message) = self.inbox.recv().await {
            match message {
                StoreMessage::Dispatch(action) => self.apply(action),
                StoreMessage::Flush { response } => {
                    let _ = response.send(());
                }
            }
        }

        tracing::debug!("Store actor stopped");
    }

    fn apply(&mut self, action: TournamentsAction) {
        let kind = action.kind();
        self.state = reduce(&self.state, action);
        tracing::trace!(
            action = kind,
            status = %self.state.tournaments.status,
            count = self.state.tournaments.len(),
            "Action applied"
        );
        self.publisher.send_replace(self.state.clone());
    }
}
