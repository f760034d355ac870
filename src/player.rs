use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::{select, sync::mpsc, task};
use tokio_util::sync::CancellationToken;

use crate::{
    bus::Bus,
    chairs::ChairPool,
    event::{Event, EventKind},
    signal::RoundWatcher,
};

/// Stable player identifier, assigned sequentially from 1 at startup.
pub type PlayerId = u32;

/// Per-player flags shared between the player's actor and the controller.
///
/// `active` transitions true to false exactly once, when the player loses a
/// claim race; nothing ever sets it back. The attempted flag limits a player
/// to one claim per round and is cleared by the controller between rounds.
pub struct PlayerState {
    id: PlayerId,
    active: AtomicBool,
    attempted: AtomicBool,
}

impl PlayerState {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            active: AtomicBool::new(true),
            attempted: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// True until this player loses a claim race.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Marks the round attempt as begun. Returns true only for the first
    /// call since the last [`reset_round`](Self::reset_round), so at most
    /// one claim per round survives any number of wakeups.
    pub(crate) fn begin_attempt(&self) -> bool {
        !self.attempted.swap(true, Ordering::SeqCst)
    }

    /// Permanently removes the player from the game.
    pub(crate) fn eliminate(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    /// Clears the attempted flag for the next round. Controller only.
    pub(crate) fn reset_round(&self) {
        self.attempted.store(false, Ordering::SeqCst);
    }
}

/// Round outcome report sent to the controller's settle phase.
///
/// Tagged with the round it belongs to so reports from a lagged round are
/// discarded instead of being counted against a later one.
pub(crate) struct ClaimReport {
    pub round: u64,
}

/// The per-player actor.
///
/// Its loop is the player state machine: block for the stop signal
/// (WAITING), attempt one claim (ACTING), then either keep playing (SEATED)
/// or exit permanently (ELIMINATED). A wake for a round the player already
/// acted in is spurious and ignored.
pub(crate) struct PlayerActor {
    pub state: Arc<PlayerState>,
    pub chairs: Arc<ChairPool>,
    pub watcher: RoundWatcher,
    pub reports: mpsc::Sender<ClaimReport>,
    pub bus: Bus,
}

impl PlayerActor {
    pub async fn run(mut self, runtime_token: CancellationToken) {
        loop {
            let round = select! {
                _ = runtime_token.cancelled() => break,
                res = self.watcher.wait_for_stop() => match res {
                    Ok(round) => round,
                    // Controller gone; nothing left to play for.
                    Err(_) => break,
                },
            };

            if !self.state.is_active() || !self.state.begin_attempt() {
                continue;
            }

            // try_send keeps the claim path non-blocking. The channel holds
            // one report per player and the controller drains it every
            // settle, so a full queue only occurs when the settle window
            // already gave up on this round; dropping the report then is the
            // same as being skipped.
            match self.chairs.try_claim() {
                Some(seat) => {
                    self.bus.publish(
                        Event::now(EventKind::SeatClaimed)
                            .with_round(round)
                            .with_player(self.state.id())
                            .with_seat(seat),
                    );
                    let _ = self.reports.try_send(ClaimReport { round });
                }
                None => {
                    self.state.eliminate();
                    self.bus.publish(
                        Event::now(EventKind::PlayerEliminated)
                            .with_round(round)
                            .with_player(self.state.id()),
                    );
                    let _ = self.reports.try_send(ClaimReport { round });
                    task::yield_now().await;
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_begins_at_most_once_per_round() {
        let state = PlayerState::new(1);
        assert!(state.begin_attempt());
        assert!(!state.begin_attempt());
        assert!(!state.begin_attempt());

        state.reset_round();
        assert!(state.begin_attempt());
        assert!(!state.begin_attempt());
    }

    #[test]
    fn test_elimination_is_permanent() {
        let state = PlayerState::new(2);
        assert!(state.is_active());

        state.eliminate();
        assert!(!state.is_active());

        // A new round must not revive the player.
        state.reset_round();
        assert!(!state.is_active());
    }
}
