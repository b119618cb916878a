//! Single-threaded event loop: input lines and the resolution timer.

use crate::input::Command;
use crate::terminal::TerminalSurface;
use memory_core::{GameError, GameEvent, MemoryGame};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, error, info};

pub type TerminalGame<W> = MemoryGame<TerminalSurface<W>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Run the game until the player quits or input ends.
pub async fn run<R, W>(game: &mut TerminalGame<W>, input: R) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let tile_count = game.state().board().len();
    let usage = game.surface().usage(tile_count);
    game.surface_mut().message(&usage);

    loop {
        let deadline = game.surface().deadline();

        tokio::select! {
            biased;

            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if let Some(ticket) = game.surface_mut().take_pending() {
                    debug!("Resolution {} fired", ticket.generation);
                    report(game.resolve(ticket));
                }
            }

            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Input closed");
                    if let Some(ticket) = game.surface_mut().take_pending() {
                        debug!("Resolution {} applied before exit", ticket.generation);
                        report(game.resolve(ticket));
                    }
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(command) => {
                        if handle(game, command)? == Flow::Quit {
                            break;
                        }
                    }
                    Err(e) => {
                        let usage = game.surface().usage(game.state().board().len());
                        game.surface_mut().message(&format!("{}. {}", e, usage));
                    }
                }
            }
        }
    }

    Ok(())
}

fn handle<W: Write>(game: &mut TerminalGame<W>, command: Command) -> anyhow::Result<Flow> {
    match command {
        Command::Click(x) => report(game.click_at(x)),
        Command::Tile(index) => {
            let len = game.state().board().len();
            if index < len {
                report(game.select_tile(index));
            } else {
                game.surface_mut()
                    .message(&format!("No tile {} (board has {} tiles)", index, len));
            }
        }
        Command::Reset => {
            info!("Resetting game");
            report(game.reset());
        }
        Command::State => {
            let json = serde_json::to_string_pretty(game.state())?;
            game.surface_mut().message(&json);
        }
        Command::Help => {
            let usage = game.surface().usage(game.state().board().len());
            game.surface_mut().message(&usage);
        }
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Log the outcome of an action.
///
/// An out-of-range index means the input mapping let a bad click through;
/// the game state is untouched so play continues.
fn report(result: Result<Vec<GameEvent>, GameError>) {
    match result {
        Ok(events) => {
            for event in events {
                debug!(?event, "Game event");
                if let GameEvent::GameWon { turns } = event {
                    info!("Game won in {} turns", turns);
                }
            }
        }
        Err(e) => error!("Rejected action: {}", e),
    }
}
