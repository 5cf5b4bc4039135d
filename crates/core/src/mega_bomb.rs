//! Mega bomb - a marker tile that clears the whole board when clicked
//!
//! Created in place of a sufficiently large removed group: every group cell
//! except the chosen center is removed and the center becomes the mega-bomb
//! marker color. Because creation deletes the rest of the source group, two
//! markers never end up 4-adjacent.
//!
//! A stateless helper over the grid contents; the creation threshold is the
//! only configuration it carries.

use tile_blast_types::{Tile, TileColor, TilePos};

use crate::grid::Grid;

/// Result of a mega-bomb explosion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explosion {
    /// Every cell emptied, the marker itself included.
    pub removed: Vec<TilePos>,
    /// Count of removed cells, for score accounting.
    pub total: usize,
}

#[derive(Debug, Clone)]
pub struct MegaBomb {
    min_group_size: usize,
}

impl MegaBomb {
    pub fn new(min_group_size: usize) -> Self {
        Self { min_group_size }
    }

    /// Whether a removed group of `size` tiles qualifies for conversion.
    /// The threshold is distinct from (and normally larger than) the
    /// ordinary minimum match size.
    pub fn can_create_from_size(&self, size: usize) -> bool {
        size >= self.min_group_size
    }

    /// Convert a group into a mega bomb at `center`: removes every group
    /// cell except the center, then marks the center. Returns false (no
    /// mutation) when the group is below the threshold.
    pub fn create_from_group(&self, grid: &mut Grid, group: &[TilePos], center: TilePos) -> bool {
        if !self.can_create_from_size(group.len()) {
            return false;
        }

        let others: Vec<TilePos> = group.iter().copied().filter(|&p| p != center).collect();
        grid.remove_group(&others);
        grid.set(
            center,
            Some(Tile {
                color: TileColor::MEGA_BOMB,
                special: true,
            }),
        );
        true
    }

    /// True iff the cell holds the mega-bomb marker.
    pub fn is_mega_bomb(&self, grid: &Grid, pos: TilePos) -> bool {
        matches!(grid.get(pos), Some(Some(t)) if t.color.is_mega_bomb())
    }

    /// Detonate the marker at `pos`: collects and removes every occupied
    /// cell on the board. Returns None if the cell is not a mega bomb or
    /// the board holds no tiles.
    pub fn explode(&self, grid: &mut Grid, pos: TilePos) -> Option<Explosion> {
        if !self.is_mega_bomb(grid, pos) {
            return None;
        }

        let removed = grid.clear_all_tiles();
        if removed.is_empty() {
            return None;
        }
        let total = removed.len();
        Some(Explosion { removed, total })
    }
}
