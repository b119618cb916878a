//! Player actions and the events they produce.
//!
//! Every input to the turn controller is a [`GameAction`]; applying one
//! returns the [`GameEvent`]s that describe what changed. An empty event
//! list means the action was a no-op.

use crate::board::{Card, TileIndex};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Identifies one scheduled deferred resolution.
///
/// The generation advances every time a resolution is scheduled and on
/// every reset, so a timer that fires for an older ticket is recognised
/// as stale and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolutionTicket {
    pub generation: u64,
}

impl ResolutionTicket {
    pub fn new(generation: u64) -> Self {
        Self { generation }
    }
}

/// Everything that can drive the game forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// The player clicked the tile at this index
    SelectTile(TileIndex),
    /// The deferred-resolution timer fired for this ticket
    Resolve(ResolutionTicket),
    /// Start over with a freshly shuffled deck
    Reset,
}

/// What happened as a result of an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A tile was turned face-up
    TileExposed { index: TileIndex, card: Card },

    /// The second tile of a pair was chosen
    TurnCompleted { turns: u32 },

    /// A deferred resolution should fire after `delay`
    ResolutionScheduled {
        ticket: ResolutionTicket,
        delay: Duration,
    },

    /// A previously scheduled resolution no longer applies
    ResolutionCancelled { ticket: ResolutionTicket },

    /// Both tiles carry the same card and stay face-up
    PairMatched { first: TileIndex, second: TileIndex },

    /// The tiles did not match and were turned face-down again
    PairHidden { first: TileIndex, second: TileIndex },

    /// Every tile has been matched
    GameWon { turns: u32 },

    /// The board was reshuffled and the counter zeroed
    GameReset { tile_count: usize },
}

impl GameEvent {
    /// Whether this event changes what the board or the counter shows
    pub fn is_visible(&self) -> bool {
        !matches!(
            self,
            GameEvent::ResolutionScheduled { .. } | GameEvent::ResolutionCancelled { .. }
        )
    }
}
