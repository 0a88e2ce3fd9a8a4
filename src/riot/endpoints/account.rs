use async_trait::async_trait;

use crate::riot::AccountApi;
use crate::riot::client::RiotClient;
use crate::riot::region::Region;
use crate::riot::types::{AccountDto, ApiResponse};

#[async_trait]
impl AccountApi for RiotClient {
    /// Get account by Riot ID (game name + tag line)
    async fn get_account_by_riot_id(
        &self,
        region: Region,
        game_name: &str,
        tag_line: &str,
    ) -> ApiResponse<AccountDto> {
        tracing::trace!("[RIOT] get_account_by_riot_id {}#{}", game_name, tag_line);

        let url = format!(
            "{}/riot/account/v1/accounts/by-riot-id/{}/{}",
            region.base_url(),
            urlencoding::encode(game_name),
            urlencoding::encode(tag_line)
        );

        self.request(url).await
    }
}
