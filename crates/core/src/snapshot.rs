//! Read-only grid snapshots handed to view layers.
//!
//! Collaborators never receive references into the live grid; they get a
//! copied snapshot, so no aliasing of the exclusively-owned grid buffer is
//! possible.

use tile_blast_types::{Cell, TilePos};

use crate::grid::Grid;

/// Full-grid copy in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    pub rows: i16,
    pub cols: i16,
    pub cells: Vec<Cell>,
}

impl GridSnapshot {
    pub fn of(grid: &Grid) -> Self {
        let mut s = Self {
            rows: 0,
            cols: 0,
            cells: Vec::new(),
        };
        s.capture(grid);
        s
    }

    /// Re-capture into an existing snapshot, reusing its allocation.
    pub fn capture(&mut self, grid: &Grid) {
        self.rows = grid.rows();
        self.cols = grid.cols();
        self.cells.clear();
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                self.cells
                    .push(grid.get(TilePos::new(row, col)).unwrap_or(None));
            }
        }
    }

    pub fn get(&self, pos: TilePos) -> Option<Cell> {
        if pos.row < 0 || pos.row >= self.rows || pos.col < 0 || pos.col >= self.cols {
            return None;
        }
        Some(self.cells[(pos.row as usize) * (self.cols as usize) + (pos.col as usize)])
    }
}
