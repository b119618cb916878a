//! A game session bound to a display surface.
//!
//! `MemoryGame` owns the game state, the shuffle RNG, and whatever draws
//! the board. Each action that changes the board produces exactly one
//! redraw, however many flags it touched.

use crate::actions::{GameAction, GameEvent, ResolutionTicket};
use crate::board::{Board, TileIndex};
use crate::config::GameConfig;
use crate::game::{GameError, GameState};
use crate::layout::TileLayout;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

/// The rendering, timer, and label facilities a game needs from its host.
pub trait DisplaySurface {
    /// Draw every tile, face-up or face-down, left to right
    fn redraw(&mut self, game: &GameState);

    /// Update the turn counter label (`"Turns: N"`)
    fn show_turns(&mut self, label: &str);

    /// Arrange for `GameAction::Resolve(ticket)` to be applied once after `delay`
    fn schedule_resolution(&mut self, ticket: ResolutionTicket, delay: Duration);

    /// Drop a previously scheduled resolution if it has not fired yet
    fn cancel_resolution(&mut self, ticket: ResolutionTicket);

    /// Called once when the last pair is matched
    fn announce_win(&mut self, _turns: u32) {}
}

fn seeded_rng(config: &GameConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub struct MemoryGame<S: DisplaySurface> {
    state: GameState,
    layout: TileLayout,
    rng: StdRng,
    surface: S,
}

impl<S: DisplaySurface> MemoryGame<S> {
    /// Start a game with a shuffled board and draw it
    pub fn new(config: &GameConfig, surface: S) -> Result<Self, GameError> {
        let mut rng = seeded_rng(config);
        let state = GameState::from_config(config, &mut rng)?;
        Ok(Self::start(state, config.layout, rng, surface))
    }

    /// Start a game on a fixed board and draw it.
    ///
    /// Later resets still reshuffle, seeded from `config`.
    pub fn with_board(board: Board, config: &GameConfig, surface: S) -> Result<Self, GameError> {
        config.validate()?;
        let rng = seeded_rng(config);
        let state = GameState::new(board, config.reveal_delay());
        Ok(Self::start(state, config.layout, rng, surface))
    }

    fn start(state: GameState, layout: TileLayout, rng: StdRng, surface: S) -> Self {
        let mut game = Self {
            state,
            layout,
            rng,
            surface,
        };
        game.surface.redraw(&game.state);
        game.surface.show_turns(&game.state.turns_label());
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn layout(&self) -> TileLayout {
        self.layout
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Apply an action and push its effects to the surface
    pub fn apply(&mut self, action: GameAction) -> Result<Vec<GameEvent>, GameError> {
        let turns_before = self.state.turns();
        let events = self.state.apply_action(action, &mut self.rng)?;
        self.dispatch(&events, turns_before);
        Ok(events)
    }

    pub fn select_tile(&mut self, index: TileIndex) -> Result<Vec<GameEvent>, GameError> {
        self.apply(GameAction::SelectTile(index))
    }

    /// Handle a click at horizontal screen coordinate `x`.
    ///
    /// Clicks that miss the board are ignored.
    pub fn click_at(&mut self, x: f64) -> Result<Vec<GameEvent>, GameError> {
        match self.layout.index_at(x, self.state.board().len()) {
            Some(index) => self.select_tile(index),
            None => Ok(Vec::new()),
        }
    }

    pub fn resolve(&mut self, ticket: ResolutionTicket) -> Result<Vec<GameEvent>, GameError> {
        self.apply(GameAction::Resolve(ticket))
    }

    pub fn reset(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.apply(GameAction::Reset)
    }

    fn dispatch(&mut self, events: &[GameEvent], turns_before: u32) {
        for event in events {
            match event {
                GameEvent::ResolutionScheduled { ticket, delay } => {
                    self.surface.schedule_resolution(*ticket, *delay)
                }
                GameEvent::ResolutionCancelled { ticket } => {
                    self.surface.cancel_resolution(*ticket)
                }
                GameEvent::GameWon { turns } => self.surface.announce_win(*turns),
                _ => {}
            }
        }

        if events.iter().any(GameEvent::is_visible) {
            self.surface.redraw(&self.state);
        }
        if self.state.turns() != turns_before {
            self.surface.show_turns(&self.state.turns_label());
        }
    }
}
