//! # Game configuration.
//!
//! [`GameConfig`] defines the controller's behavior: how many players start
//! the game, how a round's claims are settled, and the event bus capacity.
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use chairvisor::{GameConfig, SettlePolicy};
//!
//! let mut cfg = GameConfig::default();
//! cfg.players = 6;
//! cfg.settle = SettlePolicy::Window(Duration::from_secs(1));
//!
//! assert_eq!(cfg.players, 6);
//! ```

use std::time::Duration;

/// How the controller decides that a round's claims have settled after the
/// music stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettlePolicy {
    /// Block until every player that was active at the stop has reported
    /// its claim outcome. Deterministic: no player is ever skipped and the
    /// game terminates for any starting count.
    Barrier,

    /// Wait at most the given duration for claim reports. Players that do
    /// not get scheduled within the window are silently skipped for the
    /// round, surfaced as a `SettleLagged` event. This reproduces the
    /// classic fixed settling delay and inherits its race.
    Window(Duration),
}

impl Default for SettlePolicy {
    /// Returns [`SettlePolicy::Barrier`].
    fn default() -> Self {
        SettlePolicy::Barrier
    }
}

/// Global configuration for a game of musical chairs.
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Number of players at startup (must be at least 2).
    pub players: usize,
    /// How claims are settled after each stop.
    pub settle: SettlePolicy,
    /// Capacity of the event bus channel.
    pub bus_capacity: usize,
}

impl Default for GameConfig {
    /// Provides a default configuration:
    /// - `players = 4`
    /// - `settle = SettlePolicy::Barrier`
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            players: 4,
            settle: SettlePolicy::default(),
            bus_capacity: 1024,
        }
    }
}
