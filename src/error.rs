//! Error types used by the game controller.
//!
//! Musical chairs has no external I/O that can fail and chair exhaustion is
//! the elimination signal rather than an error, so [`GameError`] only covers
//! setup validation and the defensive case of the player actors vanishing
//! mid-round.

use thiserror::Error;

/// # Errors produced by the game controller.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum GameError {
    /// The configured player count cannot produce a game.
    #[error("need at least two players, got {players}")]
    TooFewPlayers {
        /// The configured player count.
        players: usize,
    },

    /// Every player actor disappeared while the controller still expected
    /// round outcomes. Cannot happen in a correct run.
    #[error("no active players remained in round {round}")]
    PlayersGone {
        /// The round being settled when the players vanished.
        round: u64,
    },
}

impl GameError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use chairvisor::GameError;
    ///
    /// let err = GameError::TooFewPlayers { players: 1 };
    /// assert_eq!(err.as_label(), "too_few_players");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            GameError::TooFewPlayers { .. } => "too_few_players",
            GameError::PlayersGone { .. } => "players_gone",
        }
    }
}
