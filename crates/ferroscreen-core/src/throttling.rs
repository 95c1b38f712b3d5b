use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::{Clock, DefaultClock};
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Client-side request pacer shared by clones of a transport.
#[derive(Clone)]
pub struct RequestPacer {
    limiter: Arc<DirectRateLimiter>,
    clock: DefaultClock,
}

impl RequestPacer {
    pub fn per_minute(requests_per_minute: u32) -> Self {
        let limit = NonZeroU32::new(requests_per_minute).unwrap_or(NonZeroU32::MIN);
        let clock = DefaultClock::default();
        Self {
            limiter: Arc::new(RateLimiter::direct_with_clock(
                Quota::per_minute(limit),
                &clock,
            )),
            clock,
        }
    }

    /// Takes one unit of budget, or returns how long until one is available.
    pub fn try_acquire(&self) -> Result<(), Duration> {
        self.limiter
            .check()
            .map_err(|not_until| not_until.wait_time_from(self.clock.now()))
    }

    pub async fn acquire(&self) {
        while let Err(wait) = self.try_acquire() {
            tracing::debug!(wait_ms = wait.as_millis() as u64, "request pacer saturated");
            tokio::time::sleep(wait).await;
        }
    }
}

impl std::fmt::Debug for RequestPacer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestPacer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_is_bounded_by_quota() {
        let pacer = RequestPacer::per_minute(2);

        assert!(pacer.try_acquire().is_ok());
        assert!(pacer.try_acquire().is_ok());

        let wait = pacer.try_acquire().expect_err("third request should wait");
        assert!(wait > Duration::ZERO);
        assert!(wait <= Duration::from_secs(30));
    }

    #[test]
    fn zero_quota_still_allows_one_request() {
        let pacer = RequestPacer::per_minute(0);
        assert!(pacer.try_acquire().is_ok());
    }
}
