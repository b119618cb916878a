//! Game configuration.

use crate::board::MAX_PAIR_COUNT;
use crate::layout::TileLayout;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Pairs on a standard board (16 tiles)
pub const DEFAULT_PAIR_COUNT: usize = 8;

/// How long both tiles of a pair stay visible before a mismatch is hidden
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("pair count must be at least 1")]
    NoPairs,

    #[error("pair count must be at most {max}")]
    TooManyPairs { max: usize },

    #[error("tile width must be non-zero")]
    ZeroTileWidth,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of distinct card values; the board holds twice as many tiles
    pub pair_count: usize,
    /// Visible delay before a pending pair is resolved
    pub reveal_delay_ms: u64,
    pub layout: TileLayout,
    /// Fixed shuffle seed for reproducible decks
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pair_count: DEFAULT_PAIR_COUNT,
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
            layout: TileLayout::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pair_count == 0 {
            return Err(ConfigError::NoPairs);
        }
        if self.pair_count > MAX_PAIR_COUNT {
            return Err(ConfigError::TooManyPairs {
                max: MAX_PAIR_COUNT,
            });
        }
        if self.layout.tile_width == 0 {
            return Err(ConfigError::ZeroTileWidth);
        }
        Ok(())
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.reveal_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_validation_errors() {
        let config = GameConfig {
            pair_count: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoPairs));

        let config = GameConfig {
            pair_count: MAX_PAIR_COUNT + 1,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManyPairs {
                max: MAX_PAIR_COUNT
            })
        );
        let config = GameConfig {
            pair_count: MAX_PAIR_COUNT,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));

        let config = GameConfig {
            layout: TileLayout::new(0),
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTileWidth));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"pair_count": 3}"#).unwrap();
        assert_eq!(config.pair_count, 3);
        assert_eq!(config.reveal_delay_ms, DEFAULT_REVEAL_DELAY_MS);
        assert_eq!(config.seed, None);
    }
}
