//! Tournament data models as exchanged with the tournaments API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tournament ID type, assigned by the server
pub type TournamentId = String;

/// Display format used for start dates on cards
const START_DATE_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Seat occupancy of a tournament.
///
/// `current <= max` is expected but never enforced here; the server is trusted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participants {
    /// Registered participants
    pub current: u32,
    /// Maximum participants
    pub max: u32,
}

impl Participants {
    pub fn new(current: u32, max: u32) -> Self {
        Self { current, max }
    }
}

impl fmt::Display for Participants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}

/// A tournament record.
///
/// Records are replaced whole; the only field edited locally is `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub organizer: String,
    pub game: String,
    /// Older API deployments spell this field `partecipants`
    #[serde(alias = "partecipants")]
    pub participants: Participants,
    /// Raw date-time string as sent by the server
    pub start_date: String,
}

impl Tournament {
    /// Record holding nothing but an id and a name.
    ///
    /// This is what renaming an unknown id produces.
    pub fn name_only(id: impl Into<TournamentId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse the start date.
    ///
    /// Accepts RFC 3339 date-times and plain `YYYY-MM-DD` dates (midnight UTC).
    pub fn start_date_utc(&self) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&self.start_date) {
            return Some(parsed.with_timezone(&Utc));
        }

        NaiveDate::parse_from_str(&self.start_date, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    /// Start date formatted for display, `Invalid Date` when unparseable.
    pub fn formatted_start_date(&self) -> String {
        self.start_date_utc()
            .map(|date| date.format(START_DATE_FORMAT).to_string())
            .unwrap_or_else(|| "Invalid Date".to_string())
    }

    /// Case-insensitive match against name, organizer and game.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        [&self.name, &self.organizer, &self.game]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}
