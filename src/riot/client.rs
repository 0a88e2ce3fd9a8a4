use std::{num::NonZeroU32, sync::Arc, time::Duration};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use nonzero_ext::nonzero;
use rand::Rng;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;

use super::metrics::RequestMetrics;
use super::types::{ApiError, ApiResponse};

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Length of the long Riot rate-limit window.
const LONG_WINDOW: Duration = Duration::from_secs(120);

/// Tunables for [`RiotClient`]. The defaults follow the development API key
/// limits (20 requests per second, 100 per 120 seconds).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub rate_limit_per_second: NonZeroU32,
    /// Requests allowed over the rolling 120 second window.
    pub rate_limit_per_window: NonZeroU32,
    /// Upper bound on concurrently in-flight requests.
    pub max_in_flight: usize,
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rate_limit_per_second: nonzero!(20_u32),
            rate_limit_per_window: nonzero!(100_u32),
            max_in_flight: 4,
            retry: RetryPolicy::default(),
        }
    }
}

/// Retry ceilings and backoff delays, kept apart from the request loop so
/// they can be exercised without a network.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
        }
    }
}

impl RetryPolicy {
    /// Exponential delay for the given attempt (1-based), capped at
    /// `max_delay` and jittered into the upper half of the capped value.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(16);
        let capped = self
            .base_delay
            .saturating_mul(1 << shift)
            .min(self.max_delay);
        let half = capped / 2;
        let jitter = rand::rng().random_range(0..=half.as_millis() as u64);
        half + Duration::from_millis(jitter)
    }
}

/// Outcome of a single request attempt.
enum Attempt {
    Fatal(ApiError),
    Retry(Duration),
}

/// HTTP client for the Riot API enforcing the shared request budget.
///
/// Both rate windows and the in-flight bound are owned here, so every call
/// site queues against the same budget. Transient upstream failures are
/// retried internally per [`RetryPolicy`]; only terminal outcomes reach the
/// caller.
pub struct RiotClient {
    http: reqwest::Client,
    per_second: DirectLimiter,
    per_window: DirectLimiter,
    in_flight: Arc<Semaphore>,
    retry: RetryPolicy,
    /// Riot API Key
    key: String,
    pub metrics: Arc<RequestMetrics>,
}

impl RiotClient {
    pub fn new(key: String, config: ClientConfig) -> Self {
        let per_second = RateLimiter::direct(Quota::per_second(config.rate_limit_per_second));
        // The long window is modelled as one token per (window / limit) with
        // the whole window available as burst.
        let period = LONG_WINDOW / config.rate_limit_per_window.get();
        let per_window = RateLimiter::direct(
            Quota::with_period(period)
                .expect("window period is non-zero")
                .allow_burst(config.rate_limit_per_window),
        );

        Self {
            http: reqwest::Client::new(),
            per_second,
            per_window,
            in_flight: Arc::new(Semaphore::new(config.max_in_flight.max(1))),
            retry: config.retry,
            key,
            metrics: RequestMetrics::new(),
        }
    }

    /// Perform a GET request against the given URL with the credential
    /// header attached, waiting on the rate budget before every attempt.
    pub async fn request<T: DeserializeOwned>(&self, url: String) -> ApiResponse<T> {
        // A request keeps its in-flight slot through its own retries.
        let _permit = self
            .in_flight
            .acquire()
            .await
            .expect("in-flight semaphore is never closed");

        let mut attempt = 0;
        loop {
            attempt += 1;
            self.per_second.until_ready().await;
            self.per_window.until_ready().await;
            self.metrics.inc();

            let sent = self
                .http
                .get(&url)
                .header("X-Riot-Token", &self.key)
                .send()
                .await;

            let outcome = match sent {
                Ok(res) if res.status() == StatusCode::OK => {
                    return res.json().await.map_err(ApiError::Network);
                }
                Ok(res) => self.classify_status(&res, attempt),
                Err(e) => self.classify_transport(e, attempt),
            };

            match outcome {
                Attempt::Fatal(err) => return Err(err),
                Attempt::Retry(delay) => tokio::time::sleep(delay).await,
            }
        }
    }

    fn classify_status(&self, res: &reqwest::Response, attempt: u32) -> Attempt {
        let status = res.status();
        match status {
            StatusCode::NOT_FOUND => Attempt::Fatal(ApiError::NotFound),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Attempt::Fatal(ApiError::InvalidCredential(status))
            }
            StatusCode::TOO_MANY_REQUESTS => {
                if attempt >= self.retry.max_attempts {
                    Attempt::Fatal(ApiError::RateLimitExceeded { attempts: attempt })
                } else {
                    let delay = retry_after_hint(res).unwrap_or(self.retry.base_delay);
                    tracing::warn!(
                        "⏳ rate limited upstream, retrying in {:?} (attempt {})",
                        delay,
                        attempt
                    );
                    Attempt::Retry(delay)
                }
            }
            s if s.is_server_error() => {
                if attempt >= self.retry.max_attempts {
                    Attempt::Fatal(ApiError::UpstreamUnavailable {
                        status,
                        attempts: attempt,
                    })
                } else {
                    let delay = self.retry.backoff_delay(attempt);
                    tracing::warn!(
                        "⏳ HTTP {} upstream, backing off {:?} (attempt {})",
                        status,
                        delay,
                        attempt
                    );
                    Attempt::Retry(delay)
                }
            }
            other => Attempt::Fatal(ApiError::UnexpectedStatus(other)),
        }
    }

    /// DNS, connect and timeout failures get a single retry before surfacing.
    fn classify_transport(&self, err: reqwest::Error, attempt: u32) -> Attempt {
        if attempt >= 2 {
            Attempt::Fatal(ApiError::Network(err))
        } else {
            let delay = self.retry.backoff_delay(attempt);
            tracing::warn!("⏳ network error ({}), retrying in {:?}", err, delay);
            Attempt::Retry(delay)
        }
    }
}

fn retry_after_hint(res: &reqwest::Response) -> Option<Duration> {
    res.headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
