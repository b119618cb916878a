//! Turn state machine.
//!
//! This module contains the `GameState` struct: the board, the turn
//! counter, and the three-phase selection machine that reveals tiles,
//! defers mismatch resolution, and resets the game.

use crate::actions::{GameAction, GameEvent, ResolutionTicket};
use crate::board::{Board, BoardError, TileIndex};
use crate::config::{ConfigError, GameConfig};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Selection phase of the current turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// No tile selected yet
    AwaitingFirst,

    /// One tile is face-up, waiting for its partner
    AwaitingSecond { first: TileIndex },

    /// Both tiles are face-up; a deferred resolution is pending
    Resolving {
        first: TileIndex,
        second: TileIndex,
        ticket: ResolutionTicket,
    },
}

/// Errors that can occur when applying actions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// The complete game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    phase: TurnPhase,
    /// Completed pair selections since the last reset
    turns: u32,
    /// Source of resolution tickets; bumped on schedule and on reset
    generation: u64,
    reveal_delay: Duration,
}

impl GameState {
    /// Start a game on the given board
    pub fn new(board: Board, reveal_delay: Duration) -> Self {
        Self {
            board,
            phase: TurnPhase::AwaitingFirst,
            turns: 0,
            generation: 0,
            reveal_delay,
        }
    }

    /// Start a game with a freshly shuffled board sized by `config`
    pub fn from_config<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::new(
            Board::new(config.pair_count, rng),
            config.reveal_delay(),
        ))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn reveal_delay(&self) -> Duration {
        self.reveal_delay
    }

    /// Text for the turn counter display
    pub fn turns_label(&self) -> String {
        format!("Turns: {}", self.turns)
    }

    /// First tile of the pair in progress
    pub fn first(&self) -> Option<TileIndex> {
        match self.phase {
            TurnPhase::AwaitingFirst => None,
            TurnPhase::AwaitingSecond { first } | TurnPhase::Resolving { first, .. } => Some(first),
        }
    }

    /// Second tile of the pair awaiting resolution
    pub fn second(&self) -> Option<TileIndex> {
        match self.phase {
            TurnPhase::Resolving { second, .. } => Some(second),
            _ => None,
        }
    }

    /// The ticket of the resolution currently waiting to fire, if any
    pub fn pending_resolution(&self) -> Option<ResolutionTicket> {
        match self.phase {
            TurnPhase::Resolving { ticket, .. } => Some(ticket),
            _ => None,
        }
    }

    /// True once every pair has been found and resolved
    pub fn is_complete(&self) -> bool {
        self.phase == TurnPhase::AwaitingFirst && self.board.all_exposed()
    }

    /// Apply an action, returning the resulting events.
    ///
    /// `rng` is only consumed by [`GameAction::Reset`].
    pub fn apply_action<R: Rng + ?Sized>(
        &mut self,
        action: GameAction,
        rng: &mut R,
    ) -> Result<Vec<GameEvent>, GameError> {
        match action {
            GameAction::SelectTile(index) => self.select_tile(index),
            GameAction::Resolve(ticket) => self.resolve(ticket),
            GameAction::Reset => {
                let board = Board::new(self.board.pair_count(), rng);
                Ok(self.reset_with_board(board))
            }
        }
    }

    /// Handle a click on tile `index`.
    ///
    /// Clicking a face-up tile is a no-op in every phase. A click while a
    /// pair is still resolving settles that pair immediately and starts a
    /// new pair with this tile.
    pub fn select_tile(&mut self, index: TileIndex) -> Result<Vec<GameEvent>, GameError> {
        if self.board.is_exposed(index)? {
            return Ok(Vec::new());
        }

        let mut events = Vec::new();

        match self.phase {
            TurnPhase::AwaitingFirst => {
                self.expose(index, &mut events)?;
                self.phase = TurnPhase::AwaitingSecond { first: index };
            }

            TurnPhase::AwaitingSecond { first } => {
                self.expose(index, &mut events)?;
                self.turns += 1;
                events.push(GameEvent::TurnCompleted { turns: self.turns });

                self.generation += 1;
                let ticket = ResolutionTicket::new(self.generation);
                events.push(GameEvent::ResolutionScheduled {
                    ticket,
                    delay: self.reveal_delay,
                });

                self.phase = TurnPhase::Resolving {
                    first,
                    second: index,
                    ticket,
                };
            }

            TurnPhase::Resolving {
                first,
                second,
                ticket,
            } => {
                events.push(GameEvent::ResolutionCancelled { ticket });
                self.expose(index, &mut events)?;
                self.settle_pair(first, second, &mut events)?;
                self.phase = TurnPhase::AwaitingSecond { first: index };
            }
        }

        Ok(events)
    }

    /// Handle the deferred-resolution timer.
    ///
    /// Stale tickets (already settled early, or from before a reset) are
    /// ignored.
    pub fn resolve(&mut self, ticket: ResolutionTicket) -> Result<Vec<GameEvent>, GameError> {
        let TurnPhase::Resolving {
            first,
            second,
            ticket: pending,
        } = self.phase
        else {
            return Ok(Vec::new());
        };
        if pending != ticket {
            return Ok(Vec::new());
        }

        let mut events = Vec::new();
        self.settle_pair(first, second, &mut events)?;
        self.phase = TurnPhase::AwaitingFirst;

        if self.board.all_exposed() {
            events.push(GameEvent::GameWon { turns: self.turns });
        }

        Ok(events)
    }

    /// Replace the board and return to a fresh game in one step
    pub fn reset_with_board(&mut self, board: Board) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if let Some(ticket) = self.pending_resolution() {
            events.push(GameEvent::ResolutionCancelled { ticket });
        }

        self.generation += 1;
        self.board = board;
        self.phase = TurnPhase::AwaitingFirst;
        self.turns = 0;

        events.push(GameEvent::GameReset {
            tile_count: self.board.len(),
        });
        events
    }

    fn expose(&mut self, index: TileIndex, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        self.board.set_exposed(index, true)?;
        events.push(GameEvent::TileExposed {
            index,
            card: self.board.card(index)?,
        });
        Ok(())
    }

    /// Keep a matching pair face-up, or hide a mismatched one
    fn settle_pair(
        &mut self,
        first: TileIndex,
        second: TileIndex,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), GameError> {
        if self.board.values_match(first, second)? {
            events.push(GameEvent::PairMatched { first, second });
        } else {
            self.board.set_exposed(first, false)?;
            self.board.set_exposed(second, false)?;
            events.push(GameEvent::PairHidden { first, second });
        }
        Ok(())
    }
}
