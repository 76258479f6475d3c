//! Politeness delays between successive fetches.
//!
//! The pause length is drawn uniformly from `[min, max]` on every call. The
//! policy is a plain value injected into each fetcher; there is no shared
//! random state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayPolicy {
    min_ms: u64,
    max_ms: u64,
}

impl DelayPolicy {
    /// Bounds are reordered if given inverted.
    #[must_use]
    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: max_ms.max(min_ms),
        }
    }

    #[must_use]
    pub fn none() -> Self {
        Self::from_millis(0, 0)
    }

    #[must_use]
    pub fn min(&self) -> Duration {
        Duration::from_millis(self.min_ms)
    }

    #[must_use]
    pub fn max(&self) -> Duration {
        Duration::from_millis(self.max_ms)
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        self.max_ms == 0
    }

    /// Draws one pause length.
    #[must_use]
    pub fn sample(&self) -> Duration {
        if self.min_ms == self.max_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rand::rng().random_range(self.min_ms..=self.max_ms))
    }

    pub async fn pause(&self) {
        if self.is_none() {
            return;
        }
        let delay = self.sample();
        tracing::debug!(delay_ms = delay.as_millis(), "politeness pause");
        tokio::time::sleep(delay).await;
    }
}

impl Default for DelayPolicy {
    /// Two to three seconds.
    fn default() -> Self {
        Self::from_millis(2_000, 3_000)
    }
}

/// Applies a [`DelayPolicy`] between fetches, skipping the very first one.
#[derive(Debug)]
pub struct PolitenessGate {
    policy: DelayPolicy,
    primed: AtomicBool,
}

impl PolitenessGate {
    #[must_use]
    pub fn new(policy: DelayPolicy) -> Self {
        Self {
            policy,
            primed: AtomicBool::new(false),
        }
    }

    /// Returns immediately on the first call, then pauses on every later call.
    pub async fn wait_turn(&self) {
        if self.primed.swap(true, Ordering::SeqCst) {
            self.policy.pause().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_millis_reorders_inverted_bounds() {
        let policy = DelayPolicy::from_millis(3_000, 1_000);
        assert_eq!(policy.min(), Duration::from_millis(1_000));
        assert_eq!(policy.max(), Duration::from_millis(3_000));
    }

    #[test]
    fn sample_stays_within_bounds() {
        let policy = DelayPolicy::from_millis(10, 20);
        for _ in 0..200 {
            let d = policy.sample();
            assert!(d >= Duration::from_millis(10) && d <= Duration::from_millis(20));
        }
    }

    #[test]
    fn fixed_policy_always_returns_same_delay() {
        let policy = DelayPolicy::from_millis(5, 5);
        assert_eq!(policy.sample(), Duration::from_millis(5));
    }

    #[test]
    fn default_is_two_to_three_seconds() {
        let policy = DelayPolicy::default();
        assert_eq!(policy.min(), Duration::from_secs(2));
        assert_eq!(policy.max(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn gate_skips_first_pause_only() {
        let gate = PolitenessGate::new(DelayPolicy::from_millis(1_000, 1_000));

        let start = tokio::time::Instant::now();
        gate.wait_turn().await;
        assert_eq!(start.elapsed(), Duration::ZERO);

        gate.wait_turn().await;
        assert!(start.elapsed() >= Duration::from_millis(1_000));
    }

    #[tokio::test]
    async fn none_policy_never_sleeps() {
        let gate = PolitenessGate::new(DelayPolicy::none());
        let start = std::time::Instant::now();
        gate.wait_turn().await;
        gate.wait_turn().await;
        assert!(start.elapsed() < Duration::from_millis(500));
    }
}
