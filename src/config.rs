use std::env;
use std::num::NonZeroU32;
use std::time::Duration;

use crate::error::AppError;
use crate::history::OutcomeStyle;
use crate::riot::Region;

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub riot_api_key: String,
    pub default_region: Region,
    pub rate_limit_per_second: NonZeroU32,
    pub max_concurrent_fetches: usize,
    pub retry_max_attempts: u32,
    /// Overall time budget for one history request. `None` disables it.
    pub fetch_deadline: Option<Duration>,
    pub default_history_count: u8,
    pub outcome_style: OutcomeStyle,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        const DEFAULT_RATE_LIMIT_PER_SECOND: u32 = 20;
        const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 4;
        const DEFAULT_RETRY_MAX_ATTEMPTS: u32 = 3;
        const DEFAULT_FETCH_DEADLINE_SECS: u64 = 30;
        const DEFAULT_HISTORY_COUNT: u8 = 10;

        let discord_token = env::var("DISCORD_TOKEN")
            .map_err(|_| AppError::Config("DISCORD_TOKEN must be set".into()))?;

        let riot_api_key = env::var("RIOT_API_KEY")
            .map_err(|_| AppError::Config("RIOT_API_KEY must be set".into()))?;

        let default_region = match env::var("RIOT_REGION") {
            Ok(v) => v.parse()?,
            Err(_) => Region::Americas,
        };

        let rate_limit_per_second = env::var("RIOT_RATE_LIMIT_PER_SECOND")
            .ok()
            .and_then(|v| v.parse().ok())
            .and_then(NonZeroU32::new)
            .unwrap_or_else(|| {
                NonZeroU32::new(DEFAULT_RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN)
            });

        let max_concurrent_fetches = env::var("MAX_CONCURRENT_FETCHES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_CONCURRENT_FETCHES);

        let retry_max_attempts = env::var("RETRY_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_RETRY_MAX_ATTEMPTS);

        // FETCH_DEADLINE_SECS=0 turns the deadline off entirely.
        let fetch_deadline = match env::var("FETCH_DEADLINE_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_FETCH_DEADLINE_SECS)
        {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        let default_history_count = env::var("HISTORY_COUNT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_HISTORY_COUNT);

        let outcome_style = match env::var("OUTCOME_STYLE") {
            Ok(v) => v.parse()?,
            Err(_) => OutcomeStyle::default(),
        };

        Ok(Self {
            discord_token,
            riot_api_key,
            default_region,
            rate_limit_per_second,
            max_concurrent_fetches,
            retry_max_attempts,
            fetch_deadline,
            default_history_count,
            outcome_style,
        })
    }
}
