use std::sync::Arc;

use tokio::{
    sync::mpsc,
    task::JoinSet,
    time::{self, Instant},
};
use tokio_util::sync::CancellationToken;

use crate::{
    bus::Bus,
    chairs::ChairPool,
    config::{GameConfig, SettlePolicy},
    delay::DelaySource,
    error::GameError,
    event::{Event, EventKind},
    observer::Observer,
    player::{ClaimReport, PlayerActor, PlayerId, PlayerState},
    signal::RoundSignal,
};

/// Orchestrates the game: spawns one actor per player and drives the round
/// loop until a single player remains.
///
/// Per round the controller lets the music play for a sampled delay, stops
/// it, settles the claims per [`SettlePolicy`], rescans the roster, shrinks
/// the chair pool to one less than the remaining players, clears the
/// attempted flags, and re-arms the signal. The re-arm is ordered strictly
/// after the flag clears so a fast player can never enter the next round
/// carrying stale state.
pub struct Controller<O: Observer + Send + Sync + 'static> {
    pub cfg: GameConfig,
    pub obs: Arc<O>,
    pub delays: Arc<dyn DelaySource>,
    pub bus: Bus,
}

impl<Obs: Observer + Send + Sync + 'static> Controller<Obs> {
    pub fn new(cfg: GameConfig, observer: Obs, delays: Arc<dyn DelaySource>) -> Self {
        Self {
            bus: Bus::new(cfg.bus_capacity),
            obs: Arc::new(observer),
            delays,
            cfg,
        }
    }

    /// Runs the game to completion and returns the winner's id.
    pub async fn run(&self) -> Result<PlayerId, GameError> {
        let players = self.cfg.players;
        if players < 2 {
            return Err(GameError::TooFewPlayers { players });
        }

        self.observer_listener();

        let chairs = Arc::new(ChairPool::new(players as u32 - 1));
        let signal = RoundSignal::new();
        let roster: Vec<Arc<PlayerState>> = (1..=players as PlayerId)
            .map(|id| Arc::new(PlayerState::new(id)))
            .collect();

        let (report_tx, mut report_rx) = mpsc::channel(players);
        let token = CancellationToken::new();

        let mut set = JoinSet::new();
        self.player_actors(&mut set, &token, &chairs, &signal, &roster, &report_tx);
        drop(report_tx);

        let outcome = self
            .round_loop(&chairs, &signal, &roster, &mut report_rx)
            .await;

        if let Ok(winner) = &outcome {
            self.bus
                .publish(Event::now(EventKind::WinnerDeclared).with_player(*winner));
        }

        // Release the survivor's actor, which is parked waiting for a round
        // that will never come.
        token.cancel();
        while set.join_next().await.is_some() {}

        outcome
    }

    fn observer_listener(&self) {
        let mut rx = self.bus.subscribe();
        let obs = self.obs.clone();

        tokio::spawn(async move {
            while let Ok(ev) = rx.recv().await {
                obs.on_event(&ev).await;
            }
        });
    }

    fn player_actors(
        &self,
        set: &mut JoinSet<()>,
        runtime_token: &CancellationToken,
        chairs: &Arc<ChairPool>,
        signal: &RoundSignal,
        roster: &[Arc<PlayerState>],
        reports: &mpsc::Sender<ClaimReport>,
    ) {
        for state in roster {
            let actor = PlayerActor {
                state: state.clone(),
                chairs: chairs.clone(),
                watcher: signal.watcher(),
                reports: reports.clone(),
                bus: self.bus.clone(),
            };
            let child = runtime_token.child_token();
            set.spawn(actor.run(child));
        }
    }

    async fn round_loop(
        &self,
        chairs: &Arc<ChairPool>,
        signal: &RoundSignal,
        roster: &[Arc<PlayerState>],
        reports: &mut mpsc::Receiver<ClaimReport>,
    ) -> Result<PlayerId, GameError> {
        let mut active = roster.len();

        loop {
            self.bus.publish(
                Event::now(EventKind::RoundStarted)
                    .with_round(signal.round())
                    .with_active(active)
                    .with_chairs(chairs.capacity()),
            );

            time::sleep(self.delays.next_delay()).await;

            let round = signal.round();
            signal.stop_music();
            self.bus
                .publish(Event::now(EventKind::MusicStopped).with_round(round));

            self.settle(reports, active, round).await?;

            active = roster.iter().filter(|p| p.is_active()).count();
            if active == 1 {
                break;
            }

            chairs.reset(active as u32 - 1);
            for p in roster.iter().filter(|p| p.is_active()) {
                p.reset_round();
            }
            signal.arm();
        }

        roster
            .iter()
            .find(|p| p.is_active())
            .map(|p| p.id())
            .ok_or(GameError::PlayersGone {
                round: signal.round(),
            })
    }

    /// Waits for the round's claims to resolve.
    ///
    /// `expected` is the number of players that were active when the music
    /// stopped; each of them owes one report. Reports tagged with an older
    /// round are leftovers from a lagged player and are dropped.
    async fn settle(
        &self,
        reports: &mut mpsc::Receiver<ClaimReport>,
        expected: usize,
        round: u64,
    ) -> Result<(), GameError> {
        match self.cfg.settle {
            SettlePolicy::Barrier => {
                let mut seen = 0;
                while seen < expected {
                    match reports.recv().await {
                        Some(rep) if rep.round == round => seen += 1,
                        Some(_) => {}
                        None => return Err(GameError::PlayersGone { round }),
                    }
                }
            }
            SettlePolicy::Window(window) => {
                let deadline = Instant::now() + window;
                let mut seen = 0;
                while seen < expected {
                    match time::timeout_at(deadline, reports.recv()).await {
                        Ok(Some(rep)) if rep.round == round => seen += 1,
                        Ok(Some(_)) => {}
                        Ok(None) => return Err(GameError::PlayersGone { round }),
                        Err(_elapsed) => {
                            self.bus.publish(
                                Event::now(EventKind::SettleLagged)
                                    .with_round(round)
                                    .with_missing(expected - seen),
                            );
                            break;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delay::FixedDelay;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Observer that records every event for later inspection.
    #[derive(Clone, Default)]
    struct Recorder {
        log: Arc<Mutex<Vec<Event>>>,
    }

    #[async_trait]
    impl Observer for Recorder {
        async fn on_event(&self, event: &Event) {
            self.log.lock().unwrap().push(event.clone());
        }
    }

    fn controller(cfg: GameConfig, recorder: &Recorder) -> Controller<Recorder> {
        Controller::new(
            cfg,
            recorder.clone(),
            Arc::new(FixedDelay(Duration::from_millis(1))),
        )
    }

    /// The forwarding listener runs concurrently with the game; give it a
    /// moment to drain the bus before asserting on the recorded stream.
    async fn drained(recorder: &Recorder) -> Vec<Event> {
        tokio::time::sleep(Duration::from_millis(100)).await;
        recorder.log.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn test_rejects_single_player_game() {
        let recorder = Recorder::default();
        let cfg = GameConfig {
            players: 1,
            ..GameConfig::default()
        };

        let err = controller(cfg, &recorder).run().await.unwrap_err();
        assert!(matches!(err, GameError::TooFewPlayers { players: 1 }));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_two_players_settle_in_one_round() {
        let recorder = Recorder::default();
        let cfg = GameConfig {
            players: 2,
            ..GameConfig::default()
        };

        let winner = controller(cfg, &recorder).run().await.expect("game runs");
        assert!((1..=2).contains(&winner));

        let events = drained(&recorder).await;
        let eliminated: Vec<_> = events
            .iter()
            .filter(|e| e.kind == EventKind::PlayerEliminated)
            .filter_map(|e| e.player)
            .collect();
        assert_eq!(eliminated.len(), 1);
        assert_ne!(eliminated[0], winner);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_four_players_chairs_shrink_to_one() {
        let recorder = Recorder::default();
        let cfg = GameConfig {
            players: 4,
            ..GameConfig::default()
        };

        let winner = controller(cfg, &recorder).run().await.expect("game runs");
        assert!((1..=4).contains(&winner));

        let events = drained(&recorder).await;

        let chairs: Vec<_> = events
            .iter()
            .filter(|e| e.kind == EventKind::RoundStarted)
            .filter_map(|e| e.chairs)
            .collect();
        assert_eq!(chairs, vec![3, 2, 1], "one chair less each round");

        let eliminated: Vec<_> = events
            .iter()
            .filter(|e| e.kind == EventKind::PlayerEliminated)
            .filter_map(|e| e.player)
            .collect();
        assert_eq!(eliminated.len(), 3, "one elimination per round");

        let distinct: HashSet<_> = eliminated.iter().copied().collect();
        assert_eq!(distinct.len(), 3, "no player is eliminated twice");
        assert!(!distinct.contains(&winner));

        // Per round, seated players never exceed that round's chairs.
        for (round, capacity) in chairs.iter().enumerate().map(|(i, c)| (i as u64 + 1, c)) {
            let seated = events
                .iter()
                .filter(|e| e.kind == EventKind::SeatClaimed && e.round == Some(round))
                .count();
            assert!(
                seated <= *capacity as usize,
                "round {round}: {seated} seated with {capacity} chairs"
            );
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_barrier_game_terminates_for_larger_field() {
        let recorder = Recorder::default();
        let cfg = GameConfig {
            players: 8,
            ..GameConfig::default()
        };

        let winner = controller(cfg, &recorder).run().await.expect("game runs");
        assert!((1..=8).contains(&winner));

        let events = drained(&recorder).await;
        let eliminated = events
            .iter()
            .filter(|e| e.kind == EventKind::PlayerEliminated)
            .count();
        assert_eq!(eliminated, 7);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_window_mode_with_generous_window() {
        let recorder = Recorder::default();
        let cfg = GameConfig {
            players: 3,
            settle: SettlePolicy::Window(Duration::from_secs(2)),
            ..GameConfig::default()
        };

        let winner = controller(cfg, &recorder).run().await.expect("game runs");
        assert!((1..=3).contains(&winner));

        let events = drained(&recorder).await;
        let declared: Vec<_> = events
            .iter()
            .filter(|e| e.kind == EventKind::WinnerDeclared)
            .filter_map(|e| e.player)
            .collect();
        assert_eq!(declared, vec![winner]);
    }
}
