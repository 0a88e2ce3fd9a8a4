use std::time::Duration;

use futures::{StreamExt, stream};
use tracing::{debug, warn};

use crate::riot::types::Match;
use crate::riot::{MatchApi, Region};

/// Fetch details for every referenced match, preserving the reference order
/// in the output regardless of completion order.
///
/// Slot `i` of the result always corresponds to `ids[i]`: results land in a
/// pre-sized buffer keyed by index, never appended as they complete. A
/// failed lookup leaves `None` in its slot and does not disturb the other
/// in-flight fetches. When a deadline is given and expires, still-pending
/// fetches are abandoned (their slots stay `None`) and whatever completed is
/// returned.
pub async fn fetch_all<A>(
    api: &A,
    region: Region,
    ids: &[String],
    concurrency: usize,
    deadline: Option<Duration>,
) -> Vec<Option<Match>>
where
    A: MatchApi + ?Sized,
{
    let mut results: Vec<Option<Match>> = vec![None; ids.len()];

    let mut fetches = stream::iter(ids.iter().cloned().enumerate())
        .map(|(index, id)| async move {
            let outcome = api.get_match(region, &id).await;
            (index, id, outcome)
        })
        .buffer_unordered(concurrency.max(1));

    let expiry = async {
        match deadline {
            Some(limit) => tokio::time::sleep(limit).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(expiry);

    loop {
        tokio::select! {
            next = fetches.next() => match next {
                Some((index, _, Ok(found))) => {
                    debug!("fetched match {}", found.match_id);
                    results[index] = Some(found);
                }
                Some((_, id, Err(e))) => warn!("💥 match {} dropped: {}", id, e),
                None => break,
            },
            _ = &mut expiry => {
                warn!("⏰ deadline reached, abandoning pending match fetches");
                break;
            }
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::riot::types::{ApiError, ApiResponse};

    #[derive(Default)]
    struct ScriptedMatches {
        latencies: HashMap<String, Duration>,
        failing: Vec<String>,
        detail_calls: AtomicU32,
    }

    fn quick_match(id: &str) -> Match {
        Match {
            match_id: id.to_string(),
            queue_id: 420,
            game_duration: 1800,
            game_creation: 1_700_000_000_000,
            participants: Vec::new(),
        }
    }

    #[async_trait]
    impl MatchApi for ScriptedMatches {
        async fn get_match_ids(
            &self,
            _region: Region,
            _puuid: &str,
            _count: u8,
        ) -> ApiResponse<Vec<String>> {
            unimplemented!("index listing is not exercised here")
        }

        async fn get_match(&self, _region: Region, match_id: &str) -> ApiResponse<Match> {
            self.detail_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.latencies.get(match_id) {
                tokio::time::sleep(*delay).await;
            }
            if self.failing.iter().any(|id| id == match_id) {
                return Err(ApiError::RateLimitExceeded { attempts: 3 });
            }
            Ok(quick_match(match_id))
        }
    }

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn completion_order_does_not_leak_into_results() {
        // The newest match is the slowest to answer.
        let api = ScriptedMatches {
            latencies: HashMap::from([
                ("m0".to_string(), Duration::from_secs(4)),
                ("m1".to_string(), Duration::from_secs(3)),
                ("m2".to_string(), Duration::from_secs(2)),
                ("m3".to_string(), Duration::from_secs(1)),
            ]),
            ..Default::default()
        };
        let refs = ids(&["m0", "m1", "m2", "m3"]);

        let results = fetch_all(&api, Region::Americas, &refs, 4, None).await;

        let got: Vec<_> = results
            .iter()
            .map(|r| r.as_ref().expect("all fetches succeed").match_id.clone())
            .collect();
        assert_eq!(got, refs);
    }

    #[tokio::test(start_paused = true)]
    async fn one_failure_leaves_a_hole_without_aborting() {
        let api = ScriptedMatches {
            failing: vec!["m2".to_string()],
            ..Default::default()
        };
        let refs = ids(&["m0", "m1", "m2", "m3", "m4"]);

        let results = fetch_all(&api, Region::Americas, &refs, 2, None).await;

        assert!(results[2].is_none());
        for (i, slot) in results.iter().enumerate() {
            if i != 2 {
                assert_eq!(slot.as_ref().unwrap().match_id, refs[i]);
            }
        }
        assert_eq!(api.detail_calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_keeps_the_completed_slots() {
        let api = ScriptedMatches {
            latencies: HashMap::from([
                ("fast".to_string(), Duration::from_millis(10)),
                ("slow".to_string(), Duration::from_secs(60)),
            ]),
            ..Default::default()
        };
        let refs = ids(&["fast", "slow"]);

        let results = fetch_all(
            &api,
            Region::Americas,
            &refs,
            2,
            Some(Duration::from_secs(1)),
        )
        .await;

        assert_eq!(results[0].as_ref().unwrap().match_id, "fast");
        assert!(results[1].is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_reference_list_is_a_noop() {
        let api = ScriptedMatches::default();

        let results = fetch_all(&api, Region::Americas, &[], 4, None).await;

        assert!(results.is_empty());
        assert_eq!(api.detail_calls.load(Ordering::SeqCst), 0);
    }
}
