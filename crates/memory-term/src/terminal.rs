//! Text rendering of the board and the one-shot resolution timer.

use memory_core::{DisplaySurface, GameState, ResolutionTicket, TileLayout};
use std::io::Write;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// A resolution waiting for its deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingResolution {
    pub ticket: ResolutionTicket,
    pub deadline: Instant,
}

/// Draws the board as a row of text cells and remembers the pending timer.
///
/// The event loop polls [`TerminalSurface::deadline`] and applies the
/// resolution once it passes; cancelling just forgets it.
pub struct TerminalSurface<W: Write> {
    out: W,
    layout: TileLayout,
    pending: Option<PendingResolution>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, layout: TileLayout) -> Self {
        Self {
            out,
            layout,
            pending: None,
        }
    }

    pub fn pending(&self) -> Option<PendingResolution> {
        self.pending
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.deadline)
    }

    /// Take the pending ticket so it fires at most once
    pub fn take_pending(&mut self) -> Option<ResolutionTicket> {
        self.pending.take().map(|p| p.ticket)
    }

    /// Write a line of free-form text (prompts, help, errors)
    pub fn message(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            warn!("Failed to write to terminal: {}", e);
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Render the tile row, face-down tiles as `[??]`.
///
/// Cells widen to fit the largest card value and tile index.
pub fn render_board(game: &GameState) -> String {
    let board = game.board();
    let widest_card = board.deck().iter().max().copied().unwrap_or(0);
    let width = digits(widest_card as usize)
        .max(digits(board.len().saturating_sub(1)))
        .max(2);

    let mut cells = String::new();
    let mut indices = String::new();
    for (index, card, exposed) in board.tiles() {
        if exposed {
            cells.push_str(&format!("[{:>width$}]", card, width = width));
        } else {
            cells.push_str(&format!("[{}]", "?".repeat(width)));
        }
        indices.push_str(&format!("{:>width$} ", index, width = width + 1));
    }
    format!("{}\n{}", cells, indices.trim_end())
}

fn digits(value: usize) -> usize {
    value.to_string().len()
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn redraw(&mut self, game: &GameState) {
        let board = render_board(game);
        self.message(&board);
    }

    fn show_turns(&mut self, label: &str) {
        self.message(label);
    }

    fn schedule_resolution(&mut self, ticket: ResolutionTicket, delay: Duration) {
        debug!("Resolution {} scheduled in {:?}", ticket.generation, delay);
        self.pending = Some(PendingResolution {
            ticket,
            deadline: Instant::now() + delay,
        });
    }

    fn cancel_resolution(&mut self, ticket: ResolutionTicket) {
        if self.pending.map(|p| p.ticket) == Some(ticket) {
            debug!("Resolution {} cancelled", ticket.generation);
            self.pending = None;
        }
    }

    fn announce_win(&mut self, turns: u32) {
        let plural = if turns == 1 { "" } else { "s" };
        self.message(&format!(
            "All pairs found in {} turn{}! Type `reset` to play again.",
            turns, plural
        ));
    }
}

impl<W: Write> TerminalSurface<W> {
    /// Click hint covering the board's pixel width
    pub fn usage(&self, tile_count: usize) -> String {
        format!(
            "Commands: click <x> (0..{}), tile <index> (0..{}), reset, state, help, quit",
            self.layout.board_width(tile_count),
            tile_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memory_core::Board;
    use pretty_assertions::assert_eq;

    fn state(deck: Vec<u32>) -> GameState {
        GameState::new(Board::from_deck(deck).unwrap(), Duration::from_millis(1000))
    }

    #[test]
    fn test_render_face_down_board() {
        let game = state(vec![5, 3, 5, 3]);
        assert_eq!(render_board(&game), "[??][??][??][??]\n  0   1   2   3");
    }

    #[test]
    fn test_render_exposed_tiles() {
        let mut game = state(vec![5, 3, 5, 3]);
        game.select_tile(0).unwrap();
        game.select_tile(3).unwrap();
        assert_eq!(render_board(&game), "[ 5][??][??][ 3]\n  0   1   2   3");
    }

    #[test]
    fn test_wide_cards_stay_aligned() {
        let deck: Vec<u32> = (0..120).chain(0..120).collect();
        let mut game = state(deck);
        game.select_tile(119).unwrap();

        let rendered = render_board(&game);
        let (cells, indices) = rendered.split_once('\n').unwrap();
        assert_eq!(cells.len(), 240 * 5);
        assert_eq!(indices.len(), 240 * 5 - 1);
        assert!(cells.starts_with("[???][???]"));
        assert!(cells.contains("[119]"));
        assert!(indices.ends_with(" 238  239"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_schedule_and_cancel() {
        let mut surface = TerminalSurface::new(Vec::new(), TileLayout::default());
        let ticket = ResolutionTicket::new(3);

        surface.schedule_resolution(ticket, Duration::from_millis(1000));
        assert_eq!(
            surface.deadline(),
            Some(Instant::now() + Duration::from_millis(1000))
        );

        surface.cancel_resolution(ResolutionTicket::new(2));
        assert!(surface.pending().is_some());

        surface.cancel_resolution(ticket);
        assert_eq!(surface.pending(), None);
    }

    #[test]
    fn test_win_message() {
        let mut surface = TerminalSurface::new(Vec::new(), TileLayout::default());
        surface.announce_win(1);
        surface.announce_win(8);
        let out = String::from_utf8(surface.into_inner()).unwrap();
        assert!(out.contains("All pairs found in 1 turn!"));
        assert!(out.contains("All pairs found in 8 turns!"));
    }
}
