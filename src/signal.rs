//! # Re-armable broadcast gate for round transitions.
//!
//! [`RoundSignal`] is the "music" of the game. The controller owns the
//! sending side; every player holds a [`RoundWatcher`]. While the music
//! plays, watchers block in [`RoundWatcher::wait_for_stop`]; when the
//! controller calls [`RoundSignal::stop_music`], every watcher wakes at
//! once.
//!
//! ```text
//!   Controller                      Players
//!   ──────────                      ───────
//!   arm()        ──────────►  (watchers block)
//!   stop_music() ──────────►  wait_for_stop() resolves for all
//!   ...outcome consumed...
//!   arm()        ──────────►  (watchers block again)
//! ```
//!
//! The gate is built on [`tokio::sync::watch`] carrying a round phase
//! (generation counter plus a stopped flag) rather than a bare boolean:
//!
//! - **No missed wakeup**: `watch::Receiver::wait_for` inspects the current
//!   value before sleeping, so a stop that fired before the wait resolves
//!   immediately.
//! - **No double wake**: each watcher remembers the last round it delivered
//!   and only resolves for a newer one, so a player that raced through its
//!   claim cannot spin on a still-stopped gate while waiting for the next
//!   arming.

use tokio::sync::watch;

/// Value broadcast through the gate: which round we are in and whether its
/// music has stopped.
#[derive(Debug, Clone, Copy)]
struct RoundPhase {
    round: u64,
    stopped: bool,
}

/// Controller-owned side of the gate.
pub struct RoundSignal {
    tx: watch::Sender<RoundPhase>,
}

impl RoundSignal {
    /// Creates a signal armed for round 1 (music playing).
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(RoundPhase {
            round: 1,
            stopped: false,
        });
        Self { tx }
    }

    /// Re-arms the gate for the next round.
    ///
    /// Must only be called once the previous round's outcome has been fully
    /// consumed (claims settled, attempted flags cleared); a watcher released
    /// by the new arming runs with fresh round state.
    pub fn arm(&self) {
        self.tx.send_modify(|phase| {
            phase.round += 1;
            phase.stopped = false;
        });
    }

    /// Stops the music for the current round, waking every waiting watcher.
    ///
    /// Broadcast semantics: no waiting watcher is missed, and each watcher
    /// wakes at most once per arming.
    pub fn stop_music(&self) {
        self.tx.send_modify(|phase| phase.stopped = true);
    }

    /// Current round number.
    pub fn round(&self) -> u64 {
        self.tx.borrow().round
    }

    /// Creates a watcher for one player.
    pub fn watcher(&self) -> RoundWatcher {
        RoundWatcher {
            rx: self.tx.subscribe(),
            delivered: 0,
        }
    }
}

impl Default for RoundSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Player-held side of the gate.
pub struct RoundWatcher {
    rx: watch::Receiver<RoundPhase>,
    /// Last round this watcher resolved for.
    delivered: u64,
}

impl RoundWatcher {
    /// Waits until the music of a round this watcher has not yet seen is
    /// stopped, and returns that round's number.
    ///
    /// Resolves immediately if the stop already happened. Errors only when
    /// the [`RoundSignal`] has been dropped.
    pub async fn wait_for_stop(&mut self) -> Result<u64, watch::error::RecvError> {
        let delivered = self.delivered;
        let round = self
            .rx
            .wait_for(|phase| phase.stopped && phase.round > delivered)
            .await?
            .round;
        self.delivered = round;
        Ok(round)
    }
}
