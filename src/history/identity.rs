use tracing::debug;

use crate::riot::types::ApiResponse;
use crate::riot::{AccountApi, Region};

/// A player reference as entered by the user or carried by a pre-registered
/// mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerLookup {
    /// Service key already known, no lookup round-trip needed.
    Puuid { puuid: String, display_name: String },
    /// Free-text riot id, resolved through Account-V1.
    RiotId { game_name: String, tag_line: String },
}

impl PlayerLookup {
    /// Interpret raw user input: `Name#Tag` is a riot id, anything else is
    /// taken as an already-known PUUID.
    pub fn from_input(input: &str) -> Self {
        match input.split_once('#') {
            Some((name, tag)) => Self::RiotId {
                game_name: name.trim().to_string(),
                tag_line: tag.trim().to_string(),
            },
            None => Self::Puuid {
                puuid: input.trim().to_string(),
                display_name: input.trim().to_string(),
            },
        }
    }
}

/// A resolved player: the user-facing name plus the stable service key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdentity {
    pub display_name: String,
    pub puuid: String,
}

/// Resolve a lookup into a [`PlayerIdentity`].
///
/// Pure read, no upstream state is touched; the riot-id form costs exactly
/// one API call and all of its failure kinds propagate unchanged.
pub async fn resolve<A>(api: &A, region: Region, lookup: PlayerLookup) -> ApiResponse<PlayerIdentity>
where
    A: AccountApi + ?Sized,
{
    match lookup {
        PlayerLookup::Puuid {
            puuid,
            display_name,
        } => Ok(PlayerIdentity {
            display_name,
            puuid,
        }),
        PlayerLookup::RiotId {
            game_name,
            tag_line,
        } => {
            let account = api
                .get_account_by_riot_id(region, &game_name, &tag_line)
                .await?;
            let display_name = format!(
                "{}#{}",
                account.game_name.as_deref().unwrap_or(&game_name),
                account.tag_line.as_deref().unwrap_or(&tag_line)
            );
            debug!("resolved {} to puuid {}", display_name, account.puuid);
            Ok(PlayerIdentity {
                display_name,
                puuid: account.puuid,
            })
        }
    }
}
