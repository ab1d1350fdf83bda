//! # Tournament Hub
//!
//! Client-side state management for a tournaments API: list and search,
//! create, rename and remove tournaments.
//!
//! ## Architecture
//!
//! Data flows one way:
//!
//! ```text
//! front end -> thunk -> TournamentService -> action -> StoreActor (reduce) -> selectors -> render
//! ```
//!
//! - [`domain`]: the `Tournament` record
//! - [`service`]: HTTP client for the tournaments API
//! - [`store`]: state, actions, pure reducer, memoized selectors, store actor
//! - [`thunks`]: fetch-with-status-tracking and create-then-merge routines
//! - [`interaction`]: prompt abstraction and create/edit/remove flows
//! - [`debounce`]: search input debouncing
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tournament_hub::{HttpTournamentService, StoreActor, TournamentThunks};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = StoreActor::spawn();
//!     let service = Arc::new(HttpTournamentService::new("http://localhost:4000/tournaments"));
//!     let thunks = TournamentThunks::new(service, Arc::new(store.clone()));
//!
//!     thunks.fetch_tournaments(None).await;
//!     store.flush().await.ok();
//!     println!("status: {}", store.state().tournaments.status);
//! }
//! ```

pub mod debounce;
pub mod domain;
pub mod interaction;
pub mod service;
pub mod store;
pub mod thunks;

pub use debounce::{Debouncer, SEARCH_DEBOUNCE_DELAY};
pub use domain::{Participants, Tournament, TournamentId};
pub use interaction::Prompt;
pub use service::{HttpTournamentService, ServiceError, ServiceResult, TournamentService};
pub use store::{
    AppState, Dispatch, FetchStatus, StoreActor, StoreError, StoreHandle, TournamentsAction,
    TournamentsSelector, TournamentsView,
};
pub use thunks::TournamentThunks;
