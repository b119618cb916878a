//! Board model: the shuffled deck and the per-tile exposure flags.
//!
//! This module contains:
//! - Deck construction (`new_shuffled_deck`)
//! - The `Board` holding cards and exposed flags side by side
//! - Range-checked flag access and pair comparison
//!
//! The board knows nothing about turns or selections; that lives in
//! [`crate::game`].

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// The symbol printed on a tile. Two tiles share each value.
pub type Card = u32;

/// Tile position within the deck
pub type TileIndex = usize;

/// Largest supported number of pairs
pub const MAX_PAIR_COUNT: usize = 1000;

/// Errors raised by board queries and construction
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BoardError {
    #[error("Tile index {index} out of range for board of {len} tiles")]
    IndexOutOfRange { index: TileIndex, len: usize },

    #[error("Tile {0} cannot be compared with itself")]
    SameTile(TileIndex),

    #[error("Invalid deck: {0}")]
    InvalidDeck(String),
}

/// Build a deck of `2 * pair_count` cards where every value in
/// `0..pair_count` appears exactly twice, in uniformly random order.
///
/// Panics if `pair_count` exceeds [`MAX_PAIR_COUNT`].
pub fn new_shuffled_deck<R: Rng + ?Sized>(pair_count: usize, rng: &mut R) -> Vec<Card> {
    assert!(
        pair_count <= MAX_PAIR_COUNT,
        "At most {} pairs are supported",
        MAX_PAIR_COUNT
    );
    let mut deck: Vec<Card> = (0..pair_count as Card)
        .chain(0..pair_count as Card)
        .collect();
    deck.shuffle(rng);
    deck
}

/// A row of face-down or face-up tiles.
///
/// `deck` and `exposed` always have the same length and are only ever
/// replaced together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    deck: Vec<Card>,
    exposed: Vec<bool>,
}

/// Unchecked wire form of a `Board`
#[derive(Deserialize)]
struct BoardRepr {
    deck: Vec<Card>,
    exposed: Vec<bool>,
}

impl TryFrom<BoardRepr> for Board {
    type Error = BoardError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        validate_deck(&repr.deck)?;
        if repr.exposed.len() != repr.deck.len() {
            return Err(BoardError::InvalidDeck(format!(
                "{} exposure flags for {} tiles",
                repr.exposed.len(),
                repr.deck.len()
            )));
        }
        Ok(Self {
            deck: repr.deck,
            exposed: repr.exposed,
        })
    }
}

/// Every value must appear exactly twice in a non-empty deck
fn validate_deck(deck: &[Card]) -> Result<(), BoardError> {
    if deck.is_empty() {
        return Err(BoardError::InvalidDeck("deck is empty".into()));
    }

    let mut counts: HashMap<Card, usize> = HashMap::new();
    for &card in deck {
        *counts.entry(card).or_default() += 1;
    }
    if let Some((card, count)) = counts.iter().find(|(_, count)| **count != 2) {
        return Err(BoardError::InvalidDeck(format!(
            "card {} appears {} times",
            card, count
        )));
    }
    Ok(())
}

impl Board {
    /// Create a freshly shuffled board with every tile face-down
    pub fn new<R: Rng + ?Sized>(pair_count: usize, rng: &mut R) -> Self {
        let deck = new_shuffled_deck(pair_count, rng);
        let exposed = vec![false; deck.len()];
        Self { deck, exposed }
    }

    /// Create a face-down board from a fixed deck.
    ///
    /// The deck must be non-empty and contain every value exactly twice.
    pub fn from_deck(deck: Vec<Card>) -> Result<Self, BoardError> {
        validate_deck(&deck)?;
        let exposed = vec![false; deck.len()];
        Ok(Self { deck, exposed })
    }

    /// Number of tiles on the board
    pub fn len(&self) -> usize {
        self.deck.len()
    }

    /// Number of distinct card values
    pub fn pair_count(&self) -> usize {
        self.deck.len() / 2
    }

    /// The deck in board order
    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    fn check(&self, index: TileIndex) -> Result<(), BoardError> {
        if index < self.deck.len() {
            Ok(())
        } else {
            Err(BoardError::IndexOutOfRange {
                index,
                len: self.deck.len(),
            })
        }
    }

    /// The card at `index`
    pub fn card(&self, index: TileIndex) -> Result<Card, BoardError> {
        self.check(index)?;
        Ok(self.deck[index])
    }

    /// Whether the tile at `index` is face-up
    pub fn is_exposed(&self, index: TileIndex) -> Result<bool, BoardError> {
        self.check(index)?;
        Ok(self.exposed[index])
    }

    /// Turn the tile at `index` face-up (`true`) or face-down (`false`)
    pub fn set_exposed(&mut self, index: TileIndex, value: bool) -> Result<(), BoardError> {
        self.check(index)?;
        self.exposed[index] = value;
        Ok(())
    }

    /// Whether two distinct tiles carry the same card
    pub fn values_match(&self, a: TileIndex, b: TileIndex) -> Result<bool, BoardError> {
        self.check(a)?;
        self.check(b)?;
        if a == b {
            return Err(BoardError::SameTile(a));
        }
        Ok(self.deck[a] == self.deck[b])
    }

    /// Number of face-up tiles
    pub fn exposed_count(&self) -> usize {
        self.exposed.iter().filter(|&&e| e).count()
    }

    /// True once every tile is face-up
    pub fn all_exposed(&self) -> bool {
        self.exposed.iter().all(|&e| e)
    }

    /// Iterate over `(index, card, exposed)` in left-to-right order
    pub fn tiles(&self) -> impl Iterator<Item = (TileIndex, Card, bool)> + '_ {
        self.deck
            .iter()
            .zip(&self.exposed)
            .enumerate()
            .map(|(i, (&card, &exposed))| (i, card, exposed))
    }
}
