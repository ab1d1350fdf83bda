//! State store for tournaments.
//!
//! - [`actions`]: intents and the [`Dispatch`] trait
//! - [`reducer`]: pure `(state, action) -> state`
//! - [`selectors`]: status, memoized list and view projections
//! - [`actor`]: task owning the state, reached through [`StoreHandle`]

pub mod actions;
pub mod actor;
pub mod reducer;
pub mod selectors;
pub mod state;

pub use actions::{Dispatch, TournamentsAction};
pub use actor::{StoreActor, StoreError, StoreHandle};
pub use reducer::reduce;
pub use selectors::{TournamentsSelector, TournamentsView, select_status};
pub use state::{AppState, FetchStatus, TournamentsById, TournamentsState};
