//! # Music-delay source.
//!
//! How long the music plays each round is supplied by an external
//! collaborator so games can be driven by real randomness in production and
//! by fixed durations in tests. The controller samples one delay per round
//! and sleeps for it before stopping the music.

use std::time::Duration;

use rand::Rng;

/// Source of the per-round "music playing" duration.
pub trait DelaySource: Send + Sync + 'static {
    /// Samples the next music duration.
    fn next_delay(&self) -> Duration;
}

/// Uniformly random delay in `[min, max]`.
///
/// The default range is 1 to 3 seconds.
#[derive(Clone, Copy, Debug)]
pub struct UniformDelay {
    /// Shortest music duration.
    pub min: Duration,
    /// Longest music duration.
    pub max: Duration,
}

impl Default for UniformDelay {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(1000),
            max: Duration::from_millis(3000),
        }
    }
}

impl DelaySource for UniformDelay {
    fn next_delay(&self) -> Duration {
        let lo = self.min.as_millis() as u64;
        let hi = self.max.as_millis() as u64;
        if hi <= lo {
            return self.min;
        }
        Duration::from_millis(rand::rng().random_range(lo..=hi))
    }
}

/// Fixed delay for deterministic tests and demos.
#[derive(Clone, Copy, Debug)]
pub struct FixedDelay(pub Duration);

impl DelaySource for FixedDelay {
    fn next_delay(&self) -> Duration {
        self.0
    }
}
