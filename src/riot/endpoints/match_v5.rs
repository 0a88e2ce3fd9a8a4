use async_trait::async_trait;

use crate::riot::MatchApi;
use crate::riot::client::RiotClient;
use crate::riot::region::Region;
use crate::riot::types::{ApiResponse, Match, MatchDto};

#[async_trait]
impl MatchApi for RiotClient {
    /// Get list of recent match IDs by PUUID, most recent first
    async fn get_match_ids(
        &self,
        region: Region,
        puuid: &str,
        count: u8,
    ) -> ApiResponse<Vec<String>> {
        tracing::trace!("[RIOT] get_match_ids for {} in {}", puuid, region);

        let url = format!(
            "{}/lol/match/v5/matches/by-puuid/{}/ids?start=0&count={}",
            region.base_url(),
            puuid,
            count
        );

        self.request(url).await
    }

    /// Get match details by match ID
    async fn get_match(&self, region: Region, match_id: &str) -> ApiResponse<Match> {
        tracing::trace!("[RIOT] get_match {} in {}", match_id, region);

        let url = format!("{}/lol/match/v5/matches/{}", region.base_url(), match_id);

        let dto: MatchDto = self.request(url).await?;
        Ok(dto.into())
    }
}
