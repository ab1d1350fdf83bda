//! Texts shared by the TUI and CLI renderings of the tournaments page.

use tournament_hub::{Tournament, TournamentsView};

pub const LOADING_TEXT: &str = "Loading tournaments ...";
pub const ERROR_TEXT: &str = "Something went wrong.";
pub const EMPTY_TEXT: &str = "No tournaments found.";

/// Status line for views without cards
pub fn status_text(view: &TournamentsView) -> Option<&'static str> {
    match view {
        TournamentsView::Idle | TournamentsView::Grid(_) => None,
        TournamentsView::Loading => Some(LOADING_TEXT),
        TournamentsView::Error => Some(ERROR_TEXT),
        TournamentsView::Empty => Some(EMPTY_TEXT),
    }
}

/// Detail lines of a card, below the name
pub fn card_details(tournament: &Tournament) -> [String; 4] {
    [
        format!("Organizer: {}", tournament.organizer),
        format!("Game: {}", tournament.game),
        format!("Participants: {}", tournament.participants),
        format!("Start: {}", tournament.formatted_start_date()),
    ]
}

/// Card as plain text, `number` is the 1-based list position
pub fn card_text(number: usize, tournament: &Tournament) -> String {
    let mut text = format!("#{number} {} (id {})", tournament.name, tournament.id);
    for line in card_details(tournament) {
        text.push_str("\n    ");
        text.push_str(&line);
    }
    text
}
