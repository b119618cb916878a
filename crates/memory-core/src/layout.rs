//! Screen geometry for a single row of tiles.
//!
//! Tiles are laid out left-to-right, each `tile_width` pixels wide, so a
//! click at horizontal position `x` lands on tile `floor(x / tile_width)`.

use crate::board::TileIndex;
use serde::{Deserialize, Serialize};

/// Default tile width in pixels
pub const DEFAULT_TILE_WIDTH: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayout {
    pub tile_width: u32,
}

impl Default for TileLayout {
    fn default() -> Self {
        Self {
            tile_width: DEFAULT_TILE_WIDTH,
        }
    }
}

impl TileLayout {
    pub fn new(tile_width: u32) -> Self {
        Self { tile_width }
    }

    /// Map a horizontal screen coordinate to a tile index.
    ///
    /// Returns `None` for coordinates left of the board, right of the last
    /// tile, or that are not finite numbers.
    pub fn index_at(&self, x: f64, tile_count: usize) -> Option<TileIndex> {
        if !x.is_finite() || x < 0.0 || self.tile_width == 0 {
            return None;
        }
        let index = (x / f64::from(self.tile_width)).floor() as usize;
        (index < tile_count).then_some(index)
    }

    /// Centre of a tile, useful for synthesising clicks
    pub fn tile_center(&self, index: TileIndex) -> f64 {
        (index as f64 + 0.5) * f64::from(self.tile_width)
    }

    /// Total width of a board with `tile_count` tiles
    pub fn board_width(&self, tile_count: usize) -> u64 {
        tile_count as u64 * u64::from(self.tile_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_at_floors_coordinate() {
        let layout = TileLayout::default();
        assert_eq!(layout.index_at(0.0, 16), Some(0));
        assert_eq!(layout.index_at(49.9, 16), Some(0));
        assert_eq!(layout.index_at(50.0, 16), Some(1));
        assert_eq!(layout.index_at(799.0, 16), Some(15));
    }

    #[test]
    fn test_index_at_rejects_outside_board() {
        let layout = TileLayout::default();
        assert_eq!(layout.index_at(800.0, 16), None);
        assert_eq!(layout.index_at(-1.0, 16), None);
        assert_eq!(layout.index_at(f64::NAN, 16), None);
        assert_eq!(layout.index_at(f64::INFINITY, 16), None);
        assert_eq!(layout.index_at(10.0, 0), None);
    }

    #[test]
    fn test_geometry() {
        let layout = TileLayout::new(40);
        assert_eq!(layout.tile_center(2), 100.0);
        assert_eq!(layout.board_width(4), 160);
        assert_eq!(layout.index_at(layout.tile_center(3), 4), Some(3));
    }
}
