//! # Example: musical_chairs
//!
//! Runs a full game with N players (default 4) and narrates it to stdout.
//!
//! ## Flow
//! ```text
//! GameConfig ──► Controller::run()
//!     ├─► spawn N PlayerActors
//!     ├─► per round: music plays 1-3 s, stops, players race for chairs
//!     ├─► loser eliminated, chairs shrink by one
//!     └─► winner declared
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example musical_chairs -- 6
//! ```

use std::sync::Arc;

use chairvisor::{Controller, GameConfig, LogWriter, UniformDelay};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let players = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 4,
    };

    let mut cfg = GameConfig::default();
    cfg.players = players;

    let controller = Controller::new(cfg, LogWriter, Arc::new(UniformDelay::default()));

    match controller.run().await {
        Ok(winner) => println!("musical chairs finished, winner: player {winner}"),
        Err(e) => println!("game stopped with error: {e}"),
    }

    Ok(())
}
