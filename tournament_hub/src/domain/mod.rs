//! Tournament domain model shared by the store, the API client and the
//! mock server.

pub mod models;

pub use models::{Participants, Tournament, TournamentId};
