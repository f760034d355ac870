//! # chairvisor
//!
//! **Chairvisor** simulates the musical-chairs elimination game as a
//! concurrency coordination exercise: N independent player actors compete
//! for N−1 chairs each round, coordinated by a single controller actor.
//! The interesting part is the synchronization protocol, not the game.
//!
//! ## Architecture
//! ```text
//!  ┌──────────────────────────────────────────────────────────────┐
//!  │  Controller (round loop)                                     │
//!  │  - samples music delay (DelaySource)                         │
//!  │  - RoundSignal: arm / stop_music                             │
//!  │  - ChairPool: reset between rounds                           │
//!  │  - settles claims per SettlePolicy (barrier or window)       │
//!  └───────┬─────────────────────┬────────────────────────┬───────┘
//!          ▼                     ▼                        ▼
//!   ┌─────────────┐       ┌─────────────┐          ┌─────────────┐
//!   │ PlayerActor │       │ PlayerActor │   ...    │ PlayerActor │
//!   │ wait: music │       │ wait: music │          │ wait: music │
//!   └──────┬──────┘       └──────┬──────┘          └──────┬──────┘
//!          │   race: ChairPool::try_claim() (one per round)      │
//!          │                     │                        │
//!          ▼  publish            ▼  publish               ▼  publish
//!  ┌──────────────────────────────────────────────────────────────┐
//!  │                    Bus (broadcast channel)                   │
//!  └──────────────────────────────┬───────────────────────────────┘
//!                                 ▼
//!                      Observer (e.g. LogWriter)
//!                      narrates rounds, claims,
//!                      eliminations, the winner
//! ```
//!
//! ## Round lifecycle
//! ```text
//! loop while more than one player is active {
//!   ├─► sleep(DelaySource::next_delay())        music playing
//!   ├─► RoundSignal::stop_music()               broadcast wake
//!   │      players: active && first attempt this round?
//!   │        ├─ try_claim() == Some(seat) ─► seated, keep playing
//!   │        └─ try_claim() == None      ─► eliminated, actor exits
//!   ├─► settle claims (Barrier: all reports in; Window: fixed delay)
//!   ├─► rescan roster, ChairPool::reset(active - 1)
//!   ├─► clear attempted flags
//!   └─► RoundSignal::arm()                      next round
//! }
//! winner declared, runtime token cancelled, survivor's actor exits
//! ```
//!
//! ## Guarantees
//! - At most `capacity` claims succeed per round, for any interleaving.
//! - A player attempts at most one claim per round, spurious wakeups
//!   included.
//! - Elimination is permanent: `active` flips true to false at most once.
//! - No missed or doubled stop signals across re-arms.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use chairvisor::{Controller, FixedDelay, GameConfig, LogWriter};
//!
//! #[tokio::main(flavor = "multi_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut cfg = GameConfig::default();
//!     cfg.players = 4;
//!
//!     // A fixed delay keeps the example fast; production games use
//!     // UniformDelay's 1-3 s music.
//!     let controller = Controller::new(
//!         cfg,
//!         LogWriter,
//!         Arc::new(FixedDelay(Duration::from_millis(10))),
//!     );
//!
//!     let winner = controller.run().await?;
//!     println!("winner: player {winner}");
//!     Ok(())
//! }
//! ```

mod bus;
mod chairs;
mod config;
mod controller;
mod delay;
mod error;
mod event;
mod observer;
mod player;
mod signal;

// ---- Public re-exports ----

pub use bus::Bus;
pub use chairs::ChairPool;
pub use config::{GameConfig, SettlePolicy};
pub use controller::Controller;
pub use delay::{DelaySource, FixedDelay, UniformDelay};
pub use error::GameError;
pub use event::{Event, EventKind};
pub use observer::{LogWriter, Observer};
pub use player::{PlayerId, PlayerState};
pub use signal::{RoundSignal, RoundWatcher};
