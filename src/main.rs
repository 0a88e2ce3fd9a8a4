use std::sync::Arc;

use poise::serenity_prelude as serenity;
use tracing::{error, info};

use crate::config::Config;
use crate::discord::Data;
use crate::history::HistoryService;
use crate::riot::{ClientConfig, RetryPolicy, RiotClient};

mod config;
mod discord;
mod error;
mod history;
mod logging;
mod riot;

#[tokio::main]
async fn main() {
    logging::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ invalid configuration: {e}");
            return;
        }
    };

    info!("🚀 starting matchrecap");

    let riot = Arc::new(RiotClient::new(
        config.riot_api_key,
        ClientConfig {
            rate_limit_per_second: config.rate_limit_per_second,
            max_in_flight: config.max_concurrent_fetches,
            retry: RetryPolicy {
                max_attempts: config.retry_max_attempts,
                ..RetryPolicy::default()
            },
            ..ClientConfig::default()
        },
    ));

    // Periodic request-rate logging for the shared client.
    let metrics = riot.metrics.clone();
    tokio::spawn(async move { metrics.log_loop().await });

    let history = HistoryService::new(
        riot,
        config.max_concurrent_fetches,
        config.fetch_deadline,
        config.outcome_style,
    );

    let data = Data {
        history,
        default_region: config.default_region,
        default_history_count: config.default_history_count,
    };

    let framework = discord::create_framework(data);
    let intents = serenity::GatewayIntents::non_privileged();

    info!("🤖 connecting to the Discord gateway");
    match serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await
    {
        Ok(mut client) => {
            if let Err(e) = client.start().await {
                error!("❌ Discord connection failed: {e:?}");
            }
        }
        Err(e) => error!("❌ Discord client creation failed: {e:?}"),
    }
}
