use std::str::FromStr;

use chrono::DateTime;

use crate::error::AppError;
use crate::history::identity::PlayerIdentity;
use crate::riot::types::Match;

/// How a win/loss is labelled in the rendered history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutcomeStyle {
    /// "Victory" / "Defeat"
    #[default]
    Word,
    /// "W" / "L"
    Letter,
}

impl OutcomeStyle {
    pub fn label(&self, won: bool) -> &'static str {
        match (self, won) {
            (Self::Word, true) => "Victory",
            (Self::Word, false) => "Defeat",
            (Self::Letter, true) => "W",
            (Self::Letter, false) => "L",
        }
    }
}

impl FromStr for OutcomeStyle {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "word" => Ok(Self::Word),
            "letter" => Ok(Self::Letter),
            other => Err(AppError::Config(format!("unknown outcome style: {other}"))),
        }
    }
}

/// One display line of the match history, already normalized: every field is
/// ready to print as-is by any renderer (table, embed, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub outcome: String,
    pub queue: String,
    pub champion: String,
    pub kda: String,
    pub damage: String,
    pub duration: String,
    pub penta_kills: u16,
    pub date: Option<String>,
}

/// Final pipeline output: ordered rows plus the health of the aggregation.
/// `requested == succeeded + failed` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySummary {
    pub player: String,
    pub rows: Vec<HistoryRow>,
    pub requested: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Turn the fetched records into display rows, keeping the input order.
///
/// A `None` record (failed fetch) and a record missing the player's stats
/// line are treated the same way: no row, one more count in `failed`.
pub fn summarize(
    records: Vec<Option<Match>>,
    identity: &PlayerIdentity,
    style: OutcomeStyle,
) -> HistorySummary {
    let requested = records.len();
    let mut rows = Vec::with_capacity(requested);

    for record in records.into_iter().flatten() {
        let Some(stat) = record.participant(&identity.puuid) else {
            continue;
        };
        rows.push(HistoryRow {
            outcome: style.label(stat.win).to_string(),
            queue: record.queue_name().to_string(),
            champion: stat.champion_name.clone(),
            kda: format!("{}/{}/{}", stat.kills, stat.deaths, stat.assists),
            damage: format_thousands(stat.damage_dealt),
            duration: format_duration(record.game_duration),
            penta_kills: stat.penta_kills,
            date: format_date(record.game_creation),
        });
    }

    let succeeded = rows.len();
    HistorySummary {
        player: identity.display_name.clone(),
        rows,
        requested,
        succeeded,
        failed: requested - succeeded,
    }
}

/// `m:ss` with unpadded minutes: 65 -> "1:05", 600 -> "10:00".
pub fn format_duration(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Group an integer with comma thousands separators (12345 -> "12,345").
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn format_date(epoch_ms: i64) -> Option<String> {
    if epoch_ms <= 0 {
        return None;
    }
    DateTime::from_timestamp_millis(epoch_ms).map(|dt| dt.format("%Y-%m-%d").to_string())
}
