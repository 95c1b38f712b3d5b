//! Retry logic with exponential backoff and jitter.

use std::time::Duration;

use crate::error::TransportError;

/// Backoff strategy for retrying failed requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    Fixed {
        delay: Duration,
    },
    /// `base * factor^attempt`, capped at `max`, optionally jittered by +/- 50%.
    /// A factor that yields a negative or undefined delay waits `max`.
    Exponential {
        base: Duration,
        factor: f64,
        max: Duration,
        jitter: bool,
    },
}

impl Default for Backoff {
    fn default() -> Self {
        Self::Exponential {
            base: Duration::from_millis(250),
            factor: 2.0,
            max: Duration::from_secs(4),
            jitter: true,
        }
    }
}

impl Backoff {
    /// Delay before retry number `attempt` (0-based).
    pub fn delay(self, attempt: u32) -> Duration {
        match self {
            Self::Fixed { delay } => delay,
            Self::Exponential {
                base,
                factor,
                max,
                jitter,
            } => {
                let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
                let seconds = base.as_secs_f64() * factor.powi(exponent);
                // Negative or NaN products (bad factor) fall back to the cap.
                let capped =
                    Duration::try_from_secs_f64(seconds.min(max.as_secs_f64())).unwrap_or(max);

                if !jitter {
                    return capped;
                }
                let millis = u64::try_from(capped.as_millis()).unwrap_or(u64::MAX);
                let spread = millis / 2;
                let offset = fastrand::u64(0..=spread.saturating_mul(2));
                Duration::from_millis((millis - spread).saturating_add(offset))
            }
        }
    }
}

/// Retry policy of the HTTP transport. Total attempts = `max_retries + 1`.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub backoff: Backoff,
    pub retry_on_status: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff: Backoff::default(),
            retry_on_status: vec![408, 429, 500, 502, 503, 504],
        }
    }
}

impl RetryConfig {
    pub fn exponential(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    pub fn fixed(delay: Duration, max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff: Backoff::Fixed { delay },
            ..Self::default()
        }
    }

    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    pub fn should_retry_status(&self, status: u16) -> bool {
        self.retry_on_status.contains(&status)
    }

    /// Whether a failed attempt may be repeated.
    pub fn should_retry(&self, error: &TransportError, attempt: u32) -> bool {
        if attempt >= self.max_retries {
            return false;
        }
        match error.status() {
            Some(status) => self.should_retry_status(status),
            None => error.retryable(),
        }
    }

    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.backoff.delay(attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_backoff_is_constant() {
        let backoff = Backoff::Fixed {
            delay: Duration::from_millis(100),
        };

        assert_eq!(backoff.delay(0), Duration::from_millis(100));
        assert_eq!(backoff.delay(10), Duration::from_millis(100));
    }

    #[test]
    fn exponential_backoff_is_capped() {
        let backoff = Backoff::Exponential {
            base: Duration::from_millis(100),
            factor: 2.0,
            max: Duration::from_secs(1),
            jitter: false,
        };

        assert_eq!(backoff.delay(0), Duration::from_millis(100));
        assert_eq!(backoff.delay(1), Duration::from_millis(200));
        assert_eq!(backoff.delay(3), Duration::from_millis(800));
        assert_eq!(backoff.delay(4), Duration::from_secs(1));
    }

    #[test]
    fn malformed_factor_falls_back_to_cap() {
        for factor in [-2.0, f64::NAN, f64::NEG_INFINITY] {
            let backoff = Backoff::Exponential {
                base: Duration::from_millis(100),
                factor,
                max: Duration::from_secs(1),
                jitter: false,
            };

            assert_eq!(backoff.delay(1), Duration::from_secs(1), "factor={factor}");
        }
    }

    #[test]
    fn jitter_stays_within_half_either_side() {
        let backoff = Backoff::Exponential {
            base: Duration::from_millis(100),
            factor: 2.0,
            max: Duration::from_secs(1),
            jitter: true,
        };

        for attempt in 0..5 {
            let expected = (100.0 * 2_f64.powi(attempt as i32)).min(1000.0);
            let actual = backoff.delay(attempt).as_millis() as f64;
            assert!(actual >= expected * 0.49, "attempt={attempt}, delay={actual}");
            assert!(actual <= expected * 1.51, "attempt={attempt}, delay={actual}");
        }
    }

    #[test]
    fn throttling_and_server_errors_are_retried() {
        let config = RetryConfig::default();

        let throttled = TransportError::non_retryable("throttled").with_status(429);
        assert!(config.should_retry(&throttled, 0));
        let bad_request = TransportError::non_retryable("bad request").with_status(400);
        assert!(!config.should_retry(&bad_request, 0));
        assert!(config.should_retry(&TransportError::new("connection reset"), 2));
        assert!(!config.should_retry(&TransportError::new("connection reset"), 3));
    }

    #[test]
    fn no_retry_never_repeats() {
        let config = RetryConfig::no_retry();
        assert!(!config.should_retry(&TransportError::new("timeout"), 0));
    }
}
