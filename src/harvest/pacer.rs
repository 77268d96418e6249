//! Randomized politeness delays
//!
//! Every network request is followed by a wait drawn uniformly from a
//! kind-specific window. Fixed intervals are easy for rate limiters to spot,
//! so the windows are the anti-blocking strategy, not a tuning knob.

use crate::config::{PacingConfig, MAX_DELAY_SECS};
use async_trait::async_trait;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Which kind of request the delay follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaceKind {
    /// After a listing query (default window 10-30s)
    Listing,
    /// After a detail page (default window 5-15s)
    Detail,
}

/// A source of post-request delays
#[async_trait]
pub trait Pacer: Send {
    /// Waits before the next request may be issued
    async fn delay(&mut self, kind: PaceKind);
}

/// Pacer drawing uniform random delays from the configured windows
#[derive(Debug, Clone)]
pub struct RandomPacer {
    rng: fastrand::Rng,
    config: PacingConfig,
}

impl RandomPacer {
    /// Creates a pacer seeded from the wall clock
    pub fn new(config: PacingConfig) -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::with_seed(config, seed)
    }

    pub fn with_seed(config: PacingConfig, seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            config,
        }
    }

    /// Draws the next delay for `kind` without sleeping
    ///
    /// Windows that skipped validation are clamped to `[0, MAX_DELAY_SECS]`.
    pub fn next_delay(&mut self, kind: PaceKind) -> Duration {
        let (min, max) = match kind {
            PaceKind::Listing => (self.config.listing_min_secs, self.config.listing_max_secs),
            PaceKind::Detail => (self.config.detail_min_secs, self.config.detail_max_secs),
        };
        let secs = (min + self.rng.f64() * (max - min)).clamp(0.0, MAX_DELAY_SECS);
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO)
    }
}

#[async_trait]
impl Pacer for RandomPacer {
    async fn delay(&mut self, kind: PaceKind) {
        let wait = self.next_delay(kind);
        tracing::debug!("Sleeping {:.1}s after {:?} request", wait.as_secs_f64(), kind);
        tokio::time::sleep(wait).await;
    }
}
