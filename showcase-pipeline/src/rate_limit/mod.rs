//! Rate limiting utilities for the GitHub listing API.
//!
//! Discovery pages through every repository of an organization; large
//! organizations can take many requests, so the core rate limit is checked
//! before each further page and the scan pauses until reset when it runs low.

mod info;

pub use info::RateLimitInfo;

use octocrab::Octocrab;
use std::time::Duration;
use tracing::{info, warn};

/// Maximum time to wait for rate limit reset (1 hour).
const MAX_WAIT_SECS: u64 = 3600;

/// Minimum remaining requests before proactively waiting.
const MIN_REMAINING_THRESHOLD: u32 = 5;

/// Checks the current rate limit status for the core API.
///
/// # Errors
///
/// Returns an error if the rate limit API call fails.
pub async fn check_core_rate_limit(octocrab: &Octocrab) -> Result<RateLimitInfo, octocrab::Error> {
    let rate_limit = octocrab.ratelimit().get().await?;
    let core = &rate_limit.resources.core;

    Ok(RateLimitInfo {
        remaining: core.remaining as u32,
        reset: core.reset,
        limit: core.limit as u32,
    })
}

/// Returns how long to pause before the next request, if at all.
#[must_use]
pub fn required_wait(info: &RateLimitInfo) -> Option<Duration> {
    if info.remaining >= MIN_REMAINING_THRESHOLD {
        return None;
    }

    let wait_secs = info.secs_until_reset()?;
    if wait_secs > MAX_WAIT_SECS {
        warn!(
            wait_secs,
            max_wait = MAX_WAIT_SECS,
            "Rate limit reset too far in future, capping wait time"
        );
    }

    Some(Duration::from_secs(wait_secs.min(MAX_WAIT_SECS)))
}

/// Waits if the rate limit is low, returning true if we waited.
pub async fn wait_if_needed(info: &RateLimitInfo) -> bool {
    let Some(wait) = required_wait(info) else {
        return false;
    };

    info!(
        remaining = info.remaining,
        wait_secs = wait.as_secs(),
        "Rate limit low, waiting for reset"
    );
    tokio::time::sleep(wait).await;
    true
}

/// Ensures sufficient rate limit before making core API calls.
///
/// # Errors
///
/// Returns an error if the rate limit check fails.
pub async fn ensure_core_rate_limit(octocrab: &Octocrab) -> Result<(), octocrab::Error> {
    let info = check_core_rate_limit(octocrab).await?;
    wait_if_needed(&info).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    #[tokio::test]
    async fn no_wait_with_plenty_remaining() {
        let info = RateLimitInfo {
            remaining: 100,
            reset: now() + 600,
            limit: 5000,
        };

        assert!(!wait_if_needed(&info).await);
    }

    #[tokio::test]
    async fn no_wait_when_reset_passed() {
        let info = RateLimitInfo {
            remaining: 1,
            reset: 0,
            limit: 5000,
        };

        assert!(!wait_if_needed(&info).await);
    }

    #[test]
    fn wait_is_capped_at_one_hour() {
        let info = RateLimitInfo {
            remaining: 0,
            reset: now() + 10 * MAX_WAIT_SECS,
            limit: 5000,
        };

        assert_eq!(required_wait(&info), Some(Duration::from_secs(MAX_WAIT_SECS)));
    }
}
