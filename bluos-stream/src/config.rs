//! Shared policy configuration for facet poll loops

use std::time::Duration;

use rand::Rng;

/// Policy shared by every facet loop of one player
///
/// All facets run independent loops but share one copy of this
/// configuration; a single retry budget and backoff curve applies to each
/// of them separately.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Server-side hold time requested per long-poll
    /// Default: 100 seconds (the longest hold BluOS players honor)
    pub poll_timeout: Duration,

    /// Consecutive failures tolerated before a facet goes terminal
    /// Default: 5
    pub max_failures: u32,

    /// Backoff after the first failure; doubles per consecutive failure
    /// Default: 500 milliseconds
    pub initial_backoff: Duration,

    /// Cap on the backoff delay
    /// Default: 30 seconds
    pub max_backoff: Duration,

    /// Random fraction added on top of the capped delay
    /// Default: 0.25
    pub backoff_jitter: f64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_secs(100),
            max_failures: 5,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
            backoff_jitter: 0.25,
        }
    }
}

impl StreamConfig {
    /// Delay before retry number `consecutive_failures`
    ///
    /// Exponential in the failure count, capped at `max_backoff`, with a
    /// random jitter fraction so players recovering from an outage are not
    /// re-polled in lockstep.
    pub fn backoff_delay(&self, consecutive_failures: u32) -> Duration {
        let exponent = consecutive_failures.saturating_sub(1).min(16);
        let scaled = self
            .initial_backoff
            .saturating_mul(2u32.saturating_pow(exponent));
        let capped = scaled.min(self.max_backoff);
        let jitter = capped.mul_f64(rand::thread_rng().gen_range(0.0..=self.backoff_jitter));
        capped + jitter
    }
}
