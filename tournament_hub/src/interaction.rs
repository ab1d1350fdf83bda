//! User interaction flows behind a prompt abstraction.
//!
//! Front ends implement [`Prompt`]; the flows here decide what to do with the
//! answers, so the rules (empty names are rejected, removal needs
//! confirmation) are the same in every front end.

use crate::{domain::Tournament, thunks::TournamentThunks};
use async_trait::async_trait;

pub const CREATE_PROMPT: &str = "Tournament Name:";
pub const RENAME_PROMPT: &str = "New Tournament Name:";
pub const REMOVE_CONFIRMATION: &str = "Do you really want to delete this tournament?";

/// Input-request/response interface
#[async_trait]
pub trait Prompt: Send + Sync {
    /// Ask for a line of text; `None` when cancelled
    async fn ask_text(&self, message: &str) -> Option<String>;

    /// Ask a yes/no question
    async fn confirm(&self, message: &str) -> bool;
}

/// Trimmed name, or `None` for cancelled or blank input
pub fn accept_name(input: Option<String>) -> Option<String> {
    input
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Ask for a name and create a tournament with it.
///
/// Returns whether a create call was issued.
pub async fn create_tournament(prompt: &dyn Prompt, thunks: &TournamentThunks) -> bool {
    match accept_name(prompt.ask_text(CREATE_PROMPT).await) {
        Some(name) => {
            thunks.create_new_tournament(&name).await;
            true
        }
        None => false,
    }
}

/// Ask for a new name and rename `tournament`.
///
/// Returns whether the rename was dispatched.
pub async fn edit_tournament(
    prompt: &dyn Prompt,
    thunks: &TournamentThunks,
    tournament: &Tournament,
) -> bool {
    match accept_name(prompt.ask_text(RENAME_PROMPT).await) {
        Some(name) => {
            thunks.rename_tournament(tournament, &name).await;
            true
        }
        None => false,
    }
}

/// Ask for confirmation and remove the tournament with `tournament_id`.
///
/// Returns whether the removal was dispatched.
pub async fn remove_tournament(
    prompt: &dyn Prompt,
    thunks: &TournamentThunks,
    tournament_id: &str,
) -> bool {
    if !prompt.confirm(REMOVE_CONFIRMATION).await {
        return false;
    }

    thunks.delete_tournament(tournament_id).await;
    true
}
