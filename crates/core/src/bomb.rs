//! Bomb booster - collect a square neighborhood for removal
//!
//! While active, the next click detonates: the controller deactivates
//! itself (strictly one explosion per activation) and returns every
//! occupied cell within the configured Chebyshev radius of the click,
//! clipped to grid bounds. It never mutates the grid; the orchestrator
//! removes the returned cells.

use tile_blast_types::TilePos;

use crate::grid::Grid;

#[derive(Debug, Clone)]
pub struct BombController {
    active: bool,
    radius: i16,
}

impl BombController {
    pub fn new(radius: i16) -> Self {
        Self {
            active: false,
            radius,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn radius(&self) -> i16 {
        self.radius
    }

    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        self.active
    }

    pub fn reset(&mut self) {
        self.active = false;
    }

    /// Interpret a click while active: deactivate and return the occupied
    /// cells of the square neighborhood around `center`. Empty when
    /// inactive.
    ///
    /// `center` comes straight from raw view input, so the scan bounds are
    /// computed with saturating arithmetic and clipped to the grid before
    /// iterating; extreme coordinates yield an empty result, never a panic.
    pub fn handle_click(&mut self, grid: &Grid, center: TilePos) -> Vec<TilePos> {
        if !self.active {
            return Vec::new();
        }
        self.active = false;

        let row_lo = center.row.saturating_sub(self.radius).max(0);
        let row_hi = center.row.saturating_add(self.radius).min(grid.rows() - 1);
        let col_lo = center.col.saturating_sub(self.radius).max(0);
        let col_hi = center.col.saturating_add(self.radius).min(grid.cols() - 1);

        let mut cells = Vec::new();
        for row in row_lo..=row_hi {
            for col in col_lo..=col_hi {
                let pos = TilePos::new(row, col);
                if grid.is_occupied(pos) {
                    cells.push(pos);
                }
            }
        }
        cells
    }
}
