use crate::event::{Event, EventKind};
use async_trait::async_trait;

/// Consumer of game events, driven by the controller's bus listener.
#[async_trait]
pub trait Observer {
    async fn on_event(&self, event: &Event);
}

/// Base observer that narrates the game to stdout.
///
/// This is the pass-through narration collaborator: round transitions,
/// claims, eliminations, and the winner announcement.
pub struct LogWriter;

#[async_trait]
impl Observer for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::RoundStarted => {
                if let (Some(round), Some(active), Some(chairs)) = (e.round, e.active, e.chairs) {
                    println!("[round] round={round} players={active} chairs={chairs} music playing");
                }
            }
            EventKind::MusicStopped => {
                println!("[music-stopped] round={:?} players racing for chairs", e.round);
            }
            EventKind::SeatClaimed => {
                if let (Some(seat), Some(player)) = (e.seat, e.player) {
                    println!("[seated] chair={seat} player={player}");
                }
            }
            EventKind::PlayerEliminated => {
                println!("[eliminated] player={:?} round={:?}", e.player, e.round);
            }
            EventKind::SettleLagged => {
                println!("[settle-lagged] round={:?} missing={:?}", e.round, e.missing);
            }
            EventKind::WinnerDeclared => {
                if let Some(player) = e.player {
                    println!("[winner] player={player}");
                }
            }
        }
    }
}
