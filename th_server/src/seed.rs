//! Generated tournaments for a fresh server.
//!
//! Records are derived from their index so every start-up serves the same data.

use chrono::{DateTime, Duration, SecondsFormat, TimeZone, Utc};
use tournament_hub::{Participants, Tournament};

const NAMES: [&str; 8] = [
    "Spring Cup",
    "Summer Clash",
    "Autumn Open",
    "Winter Masters",
    "City League",
    "Night Brawl",
    "Rookie Series",
    "Grand Finals",
];
const ORGANIZERS: [&str; 5] = ["Org", "Arena Club", "Pixel Hall", "Northside", "LAN Crew"];
const GAMES: [&str; 6] = [
    "Counter-Strike",
    "Rocket League",
    "Street Fighter",
    "Chess",
    "League of Legends",
    "Tetris",
];
const SEAT_LIMITS: [u32; 4] = [8, 16, 32, 64];

/// Start date of the first seeded tournament
fn first_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 18, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Start date as sent over the wire
pub fn format_start_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Tournament number `n` (1-based), with id `n`
pub fn seed_tournament(n: usize) -> Tournament {
    let idx = n.saturating_sub(1);
    let max = SEAT_LIMITS[idx % SEAT_LIMITS.len()];
    let round = idx / NAMES.len();
    let name = match round {
        0 => NAMES[idx % NAMES.len()].to_string(),
        _ => format!("{} {}", NAMES[idx % NAMES.len()], round + 1),
    };

    Tournament {
        id: n.to_string(),
        name,
        organizer: ORGANIZERS[idx % ORGANIZERS.len()].to_string(),
        game: GAMES[idx % GAMES.len()].to_string(),
        participants: Participants::new((idx as u32 * 7) % (max + 1), max),
        start_date: format_start_date(first_start() + Duration::days(idx as i64 * 3)),
    }
}

/// The first `count` seeded tournaments
pub fn seed_tournaments(count: usize) -> Vec<Tournament> {
    (1..=count).map(seed_tournament).collect()
}
