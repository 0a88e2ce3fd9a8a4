//! Typed client for the Riot REST API.
//!
//! [`RiotClient`] owns the process-wide rate budget and retry behavior; the
//! endpoint traits below are the seams the rest of the crate (and its tests)
//! program against.

use async_trait::async_trait;

pub mod client;
pub mod metrics;
pub mod region;
pub mod types;

mod endpoints;

pub use client::{ClientConfig, RetryPolicy, RiotClient};
pub use region::Region;

use types::{AccountDto, ApiResponse, Match};

/// Riot Account-V1 API surface used by the bot.
#[async_trait]
pub trait AccountApi: Send + Sync {
    async fn get_account_by_riot_id(
        &self,
        region: Region,
        game_name: &str,
        tag_line: &str,
    ) -> ApiResponse<AccountDto>;
}

/// Riot Match-V5 API surface used by the bot.
#[async_trait]
pub trait MatchApi: Send + Sync {
    /// List the ids of the player's most recent matches, newest first. The
    /// upstream ordering is authoritative and passed through untouched.
    async fn get_match_ids(
        &self,
        region: Region,
        puuid: &str,
        count: u8,
    ) -> ApiResponse<Vec<String>>;

    async fn get_match(&self, region: Region, match_id: &str) -> ApiResponse<Match>;
}

/// Everything the history pipeline needs from the upstream API.
pub trait LolApi: AccountApi + MatchApi {}

impl<T: AccountApi + MatchApi> LolApi for T {}
