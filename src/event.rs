use std::time::SystemTime;

use crate::player::PlayerId;

/// Classification of game events published on the [`Bus`](crate::Bus).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A round began and the music is playing.
    ///
    /// Sets: `round`, `active`, `chairs`.
    RoundStarted,

    /// The controller stopped the music; players race for chairs.
    ///
    /// Sets: `round`.
    MusicStopped,

    /// A player claimed a chair.
    ///
    /// Sets: `round`, `player`, `seat`.
    SeatClaimed,

    /// A player found no chair and is out of the game.
    ///
    /// Sets: `round`, `player`.
    PlayerEliminated,

    /// The settle window expired before every active player acted
    /// (window mode only).
    ///
    /// Sets: `round`, `missing`.
    SettleLagged,

    /// Exactly one player remains.
    ///
    /// Sets: `player`.
    WinnerDeclared,
}

/// A game event with optional metadata, built with the `with_*` methods.
#[derive(Debug, Clone)]
pub struct Event {
    pub round: Option<u64>,
    pub player: Option<PlayerId>,
    pub seat: Option<u32>,
    pub active: Option<usize>,
    pub chairs: Option<u32>,
    pub missing: Option<usize>,
    pub kind: EventKind,
    pub at: SystemTime,
}

impl Event {
    pub fn now(kind: EventKind) -> Self {
        Self {
            kind,
            at: SystemTime::now(),
            round: None,
            player: None,
            seat: None,
            active: None,
            chairs: None,
            missing: None,
        }
    }

    pub fn with_round(mut self, round: u64) -> Self {
        self.round = Some(round);
        self
    }

    pub fn with_player(mut self, player: PlayerId) -> Self {
        self.player = Some(player);
        self
    }

    pub fn with_seat(mut self, seat: u32) -> Self {
        self.seat = Some(seat);
        self
    }

    pub fn with_active(mut self, active: usize) -> Self {
        self.active = Some(active);
        self
    }

    pub fn with_chairs(mut self, chairs: u32) -> Self {
        self.chairs = Some(chairs);
        self
    }

    pub fn with_missing(mut self, missing: usize) -> Self {
        self.missing = Some(missing);
        self
    }
}
