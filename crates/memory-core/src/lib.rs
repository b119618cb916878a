//! A single-player tile-matching memory game engine
//!
//! This crate provides the core game logic, including:
//! - A shuffled deck of paired cards with per-tile exposure flags
//! - The turn state machine with deferred mismatch resolution
//! - Screen layout for mapping clicks to tiles
//! - A session type that drives any display surface
//!
//! # Architecture
//!
//! The game engine is designed to be platform-agnostic. It can be compiled to:
//! - Native Rust behind a terminal (or any other) frontend
//! - WebAssembly for a browser-hosted board
//!
//! # Modules
//!
//! - [`board`]: Deck construction and exposure flags
//! - [`game`]: Turn state machine
//! - [`actions`]: Actions, events and resolution tickets
//! - [`layout`]: Coordinate to tile mapping
//! - [`config`]: Board size and timing
//! - [`session`]: `MemoryGame` and the `DisplaySurface` trait

pub mod actions;
pub mod board;
pub mod config;
pub mod game;
pub mod layout;
pub mod session;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{GameAction, GameEvent, ResolutionTicket};
pub use board::{new_shuffled_deck, Board, BoardError, Card, TileIndex};
pub use config::{ConfigError, GameConfig};
pub use game::{GameError, GameState, TurnPhase};
pub use layout::TileLayout;
pub use session::{DisplaySurface, MemoryGame};
