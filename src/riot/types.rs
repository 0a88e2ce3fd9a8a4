use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Failure taxonomy for calls against the Riot API.
///
/// `NotFound` and `InvalidCredential` are terminal and surface immediately;
/// the transient kinds are only returned once the client has exhausted its
/// retry budget.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("resource does not exist upstream")]
    NotFound,

    #[error("API credential rejected upstream (HTTP {0})")]
    InvalidCredential(StatusCode),

    #[error("still rate limited after {attempts} attempts")]
    RateLimitExceeded { attempts: u32 },

    #[error("upstream unavailable (HTTP {status}) after {attempts} attempts")]
    UpstreamUnavailable { status: StatusCode, attempts: u32 },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected HTTP status: {0}")]
    UnexpectedStatus(StatusCode),
}

/// A call to the Riot API either yields the success type or an [`ApiError`].
pub type ApiResponse<T> = Result<T, ApiError>;

// ============================================================================
// Account-v1
// ============================================================================

/// Representation of the account data response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    pub game_name: Option<String>,
    pub tag_line: Option<String>,
}

// ============================================================================
// Match-v5
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDto {
    pub metadata: MetadataDto,
    pub info: InfoDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDto {
    pub match_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoDto {
    pub queue_id: u16,
    pub game_duration: u64,
    pub game_creation: i64,
    pub participants: Vec<ParticipantDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub puuid: String,
    pub champion_name: String,
    pub win: bool,
    pub kills: u16,
    pub deaths: u16,
    pub assists: u16,
    pub total_damage_dealt_to_champions: u64,
    #[serde(default)]
    pub penta_kills: u16,
}

// ============================================================================
// Domain records
// ============================================================================

/// A fetched match, immutable once decoded.
#[derive(Debug, Clone)]
pub struct Match {
    pub match_id: String,
    pub queue_id: u16,
    pub game_duration: u64,
    pub game_creation: i64,
    pub participants: Vec<MatchParticipant>,
}

impl Match {
    /// Locate the stats line of one player inside this match. `None` means
    /// the player was not part of it (stale or malformed record).
    pub fn participant(&self, puuid: &str) -> Option<&MatchParticipant> {
        self.participants.iter().find(|p| p.puuid == puuid)
    }

    /// Queue IDs we display: Normal (400, 430, 490), Ranked (420, 440), ARAM (450)
    pub fn queue_name(&self) -> &'static str {
        match self.queue_id {
            400 => "Normal Draft",
            420 => "Ranked Solo/Duo",
            430 => "Normal Blind",
            440 => "Ranked Flex",
            450 => "ARAM",
            490 => "Quickplay",
            _ => "Other",
        }
    }
}

impl From<MatchDto> for Match {
    fn from(value: MatchDto) -> Self {
        Self {
            match_id: value.metadata.match_id,
            queue_id: value.info.queue_id,
            game_duration: value.info.game_duration,
            game_creation: value.info.game_creation,
            participants: value
                .info
                .participants
                .into_iter()
                .map(|participant| participant.into())
                .collect(),
        }
    }
}

/// One player's stats line within a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchParticipant {
    pub puuid: String,
    pub champion_name: String,
    pub win: bool,
    pub kills: u16,
    pub deaths: u16,
    pub assists: u16,
    pub damage_dealt: u64,
    pub penta_kills: u16,
}

impl From<ParticipantDto> for MatchParticipant {
    fn from(value: ParticipantDto) -> Self {
        Self {
            puuid: value.puuid,
            champion_name: value.champion_name,
            win: value.win,
            kills: value.kills,
            deaths: value.deaths,
            assists: value.assists,
            damage_dealt: value.total_damage_dealt_to_champions,
            penta_kills: value.penta_kills,
        }
    }
}
