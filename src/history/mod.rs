//! The match-history aggregation pipeline.
//!
//! One inbound operation: resolve a player, list their recent match ids,
//! fan out the detail lookups through the rate-limited client, extract the
//! player's stats line from each record, and hand back an ordered summary.
//! Identity failures abort the whole request; per-match failures only
//! degrade the summary and are reported through its counters.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::riot::types::ApiResponse;
use crate::riot::{LolApi, Region};

pub mod fetcher;
pub mod format;
pub mod identity;

pub use format::{HistoryRow, HistorySummary, OutcomeStyle};
pub use identity::{PlayerIdentity, PlayerLookup};

/// Hard bound on how many matches one request may ask for.
pub const MAX_HISTORY_COUNT: u8 = 20;

pub struct HistoryService<Api> {
    api: Arc<Api>,
    concurrency: usize,
    deadline: Option<Duration>,
    style: OutcomeStyle,
}

impl<Api: LolApi> HistoryService<Api> {
    pub fn new(
        api: Arc<Api>,
        concurrency: usize,
        deadline: Option<Duration>,
        style: OutcomeStyle,
    ) -> Self {
        Self {
            api,
            concurrency,
            deadline,
            style,
        }
    }

    /// Aggregate the player's recent matches into an ordered summary.
    pub async fn get_match_history(
        &self,
        lookup: PlayerLookup,
        region: Region,
        count: u8,
    ) -> ApiResponse<HistorySummary> {
        let count = count.clamp(1, MAX_HISTORY_COUNT);

        let player = identity::resolve(self.api.as_ref(), region, lookup).await?;
        debug!("fetching up to {} match ids for {}", count, player.display_name);

        let ids = self.api.get_match_ids(region, &player.puuid, count).await?;
        // Upstream order is most-recent-first and stays authoritative from
        // here on.
        let records = fetcher::fetch_all(
            self.api.as_ref(),
            region,
            &ids,
            self.concurrency,
            self.deadline,
        )
        .await;

        let summary = format::summarize(records, &player, self.style);
        info!(
            "📜 {}: {} of {} matches aggregated",
            summary.player, summary.succeeded, summary.requested
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::riot::types::{AccountDto, ApiError, Match, MatchParticipant};
    use crate::riot::{AccountApi, MatchApi};

    const PUUID: &str = "puuid-known";

    struct FakeLolApi {
        ids: Vec<String>,
        failing: Vec<String>,
        account_calls: AtomicU32,
        index_calls: AtomicU32,
        detail_calls: AtomicU32,
        last_count: AtomicU32,
    }

    impl FakeLolApi {
        fn with_ids(ids: &[&str]) -> Self {
            Self {
                ids: ids.iter().map(|s| s.to_string()).collect(),
                failing: Vec::new(),
                account_calls: AtomicU32::new(0),
                index_calls: AtomicU32::new(0),
                detail_calls: AtomicU32::new(0),
                last_count: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl AccountApi for FakeLolApi {
        async fn get_account_by_riot_id(
            &self,
            _region: Region,
            game_name: &str,
            tag_line: &str,
        ) -> ApiResponse<AccountDto> {
            self.account_calls.fetch_add(1, Ordering::SeqCst);
            if game_name == "Known" {
                Ok(AccountDto {
                    puuid: PUUID.to_string(),
                    game_name: Some(game_name.to_string()),
                    tag_line: Some(tag_line.to_string()),
                })
            } else {
                Err(ApiError::NotFound)
            }
        }
    }

    #[async_trait]
    impl MatchApi for FakeLolApi {
        async fn get_match_ids(
            &self,
            _region: Region,
            _puuid: &str,
            count: u8,
        ) -> ApiResponse<Vec<String>> {
            self.index_calls.fetch_add(1, Ordering::SeqCst);
            self.last_count.store(count as u32, Ordering::SeqCst);
            Ok(self.ids.iter().take(count as usize).cloned().collect())
        }

        async fn get_match(&self, _region: Region, match_id: &str) -> ApiResponse<Match> {
            self.detail_calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.iter().any(|id| id == match_id) {
                return Err(ApiError::UpstreamUnavailable {
                    status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                    attempts: 3,
                });
            }
            Ok(Match {
                match_id: match_id.to_string(),
                queue_id: 450,
                game_duration: 900,
                game_creation: 1_700_000_000_000,
                participants: vec![MatchParticipant {
                    puuid: PUUID.to_string(),
                    // Champion doubles as a marker so tests can check order.
                    champion_name: match_id.to_string(),
                    win: true,
                    kills: 1,
                    deaths: 2,
                    assists: 3,
                    damage_dealt: 1000,
                    penta_kills: 0,
                }],
            })
        }
    }

    fn service(api: Arc<FakeLolApi>) -> HistoryService<FakeLolApi> {
        HistoryService::new(api, 4, None, OutcomeStyle::Word)
    }

    #[tokio::test]
    async fn unknown_identity_fails_fast_without_fanout() {
        let api = Arc::new(FakeLolApi::with_ids(&["m0", "m1"]));
        let svc = service(api.clone());

        let res = svc
            .get_match_history(
                PlayerLookup::from_input("Stranger#EUW"),
                Region::Americas,
                10,
            )
            .await;

        assert!(matches!(res, Err(ApiError::NotFound)));
        assert_eq!(api.index_calls.load(Ordering::SeqCst), 0);
        assert_eq!(api.detail_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn requested_matches_the_listed_references() {
        let api = Arc::new(FakeLolApi::with_ids(&["m0", "m1", "m2", "m3", "m4"]));
        let svc = service(api.clone());

        let summary = svc
            .get_match_history(PlayerLookup::from_input("Known#NA1"), Region::Americas, 5)
            .await
            .unwrap();

        assert_eq!(summary.requested, 5);
        assert_eq!(summary.succeeded, 5);
        assert_eq!(summary.failed, 0);

        let order: Vec<_> = summary.rows.iter().map(|r| r.champion.as_str()).collect();
        assert_eq!(order, ["m0", "m1", "m2", "m3", "m4"]);
    }

    #[tokio::test]
    async fn one_failing_detail_degrades_but_does_not_abort() {
        let mut api = FakeLolApi::with_ids(&["m0", "m1", "m2", "m3"]);
        api.failing = vec!["m1".to_string()];
        let api = Arc::new(api);
        let svc = service(api.clone());

        let summary = svc
            .get_match_history(PlayerLookup::from_input("Known#NA1"), Region::Americas, 4)
            .await
            .unwrap();

        assert_eq!(summary.requested, 4);
        assert_eq!(summary.succeeded, 3);
        assert_eq!(summary.failed, 1);

        let order: Vec<_> = summary.rows.iter().map(|r| r.champion.as_str()).collect();
        assert_eq!(order, ["m0", "m2", "m3"]);
    }

    #[tokio::test]
    async fn direct_puuid_skips_the_account_lookup() {
        let api = Arc::new(FakeLolApi::with_ids(&["m0"]));
        let svc = service(api.clone());

        let summary = svc
            .get_match_history(
                PlayerLookup::Puuid {
                    puuid: PUUID.to_string(),
                    display_name: "Registered".to_string(),
                },
                Region::Americas,
                1,
            )
            .await
            .unwrap();

        assert_eq!(summary.player, "Registered");
        assert_eq!(api.account_calls.load(Ordering::SeqCst), 0);
        assert_eq!(api.index_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn count_is_clamped_to_the_hard_bound() {
        let api = Arc::new(FakeLolApi::with_ids(&["m0"]));
        let svc = service(api.clone());

        svc.get_match_history(PlayerLookup::from_input("Known#NA1"), Region::Americas, 200)
            .await
            .unwrap();

        assert_eq!(api.last_count.load(Ordering::SeqCst), MAX_HISTORY_COUNT as u32);
    }
}
