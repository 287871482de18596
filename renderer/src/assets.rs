//! Join barrier over fire-and-forget asset loads.
//!
//! Decorative sprite assets (ship icons and the like) load asynchronously
//! with a completion callback each. A shared counter tracks how many of
//! the expected assets have resolved — success and failure count the same,
//! so a failed load can never hang bootstrap. There is no retry and no
//! timeout; until the barrier reports ready, sprite-dependent draws fall
//! back to the direct-drawing path.

/// Tracks completion of a known number of asynchronous asset loads.
#[derive(Clone, Copy, Debug)]
pub struct AssetBarrier {
    expected: usize,
    completed: usize,
    failures: usize,
}

impl AssetBarrier {
    /// Creates a barrier expecting the provided number of assets.
    ///
    /// A zero-asset barrier is immediately ready.
    #[must_use]
    pub const fn new(expected: usize) -> Self {
        Self {
            expected,
            completed: 0,
            failures: 0,
        }
    }

    /// Records one successful asset load.
    pub fn complete_success(&mut self) {
        self.completed = self.completed.saturating_add(1);
    }

    /// Records one failed asset load; logged, still counted as done.
    pub fn complete_failure(&mut self, asset: &str) {
        log::warn!("asset load failed, continuing without it: {asset}");
        self.failures = self.failures.saturating_add(1);
        self.completed = self.completed.saturating_add(1);
    }

    /// Whether every expected asset has resolved (success or failure).
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.completed >= self.expected
    }

    /// Number of assets that resolved with a failure.
    #[must_use]
    pub const fn failures(&self) -> usize {
        self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barrier_flips_ready_only_after_all_assets_resolve() {
        let mut barrier = AssetBarrier::new(3);
        assert!(!barrier.is_ready());

        barrier.complete_success();
        barrier.complete_success();
        assert!(!barrier.is_ready());

        barrier.complete_success();
        assert!(barrier.is_ready());
    }

    #[test]
    fn failures_count_toward_completion() {
        let mut barrier = AssetBarrier::new(2);
        barrier.complete_success();
        barrier.complete_failure("ships/frigate.png");
        assert!(barrier.is_ready(), "failed loads must not hang bootstrap");
        assert_eq!(barrier.failures(), 1);
    }

    #[test]
    fn zero_asset_barrier_is_immediately_ready() {
        assert!(AssetBarrier::new(0).is_ready());
    }
}
