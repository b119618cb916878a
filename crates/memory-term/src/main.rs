//! Terminal frontend for the memory game.

use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod input;
mod runner;
mod terminal;

use memory_core::MemoryGame;
use terminal::TerminalSurface;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing on stderr so it stays out of the board
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = config::from_env()?;

    info!(
        "Starting memory game: {} pairs, {} ms reveal delay",
        config.pair_count, config.reveal_delay_ms
    );

    let surface = TerminalSurface::new(std::io::stdout(), config.layout);
    let mut game = MemoryGame::new(&config, surface)?;

    runner::run(&mut game, BufReader::new(tokio::io::stdin())).await?;

    info!("Finished after {} turns", game.state().turns());
    Ok(())
}
