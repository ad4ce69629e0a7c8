//! Rate limit information.

use std::time::{SystemTime, UNIX_EPOCH};

/// Rate limit information for the core GitHub API.
#[derive(Debug, Clone)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,

    /// Unix timestamp when the rate limit resets.
    pub reset: u64,

    /// Total requests allowed per window.
    pub limit: u32,
}

impl RateLimitInfo {
    /// Seconds until the window resets, or `None` if it already has.
    #[must_use]
    pub fn secs_until_reset(&self) -> Option<u64> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        self.reset.checked_sub(now).filter(|secs| *secs > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_in_the_past_has_no_wait() {
        let info = RateLimitInfo {
            remaining: 0,
            reset: 1234567890,
            limit: 5000,
        };

        assert_eq!(info.secs_until_reset(), None);
    }

    #[test]
    fn reset_in_the_future_reports_remaining_secs() {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let info = RateLimitInfo {
            remaining: 0,
            reset: now + 120,
            limit: 5000,
        };

        let secs = info.secs_until_reset().unwrap();
        assert!(secs > 100 && secs <= 120);
    }
}
