//! Grid module - manages the color grid and its local algorithms
//!
//! The grid is a rows x cols matrix where each cell is empty or holds one
//! (color, special) tile. Storage is a flat row-major `Vec` indexed by
//! `row * cols + col`. Dimensions are fixed at construction.
//!
//! The grid knows nothing about score, boosters or turns; it only provides
//! the local algorithms: flood-fill grouping, removal, gravity compaction,
//! refill, swap and full-board clear. Out-of-bounds positions are clamped
//! to no-ops rather than raised, so raw view coordinates can be passed in
//! directly.

use arrayvec::ArrayVec;

use tile_blast_types::{Cell, GravityMove, RefillCell, Tile, TileColor, TilePos};

use crate::rng::SimpleRng;

/// The game grid with its color palette and RNG.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: i16,
    cols: i16,
    num_colors: u8,
    /// Flat array of cells, row-major order (row * cols + col).
    cells: Vec<Cell>,
    rng: SimpleRng,
}

impl Grid {
    /// Create a new empty grid. Call [`Grid::random_fill`] to populate it.
    pub fn new(rows: u8, cols: u8, num_colors: u8, seed: u32) -> Self {
        let rows = i16::from(rows);
        let cols = i16::from(cols);
        Self {
            rows,
            cols,
            num_colors,
            cells: vec![None; (rows as usize) * (cols as usize)],
            rng: SimpleRng::new(seed),
        }
    }

    /// Calculate flat index from a position.
    /// Returns None if out of bounds.
    #[inline(always)]
    fn index(&self, pos: TilePos) -> Option<usize> {
        if pos.row < 0 || pos.row >= self.rows || pos.col < 0 || pos.col >= self.cols {
            return None;
        }
        Some((pos.row as usize) * (self.cols as usize) + (pos.col as usize))
    }

    pub fn rows(&self) -> i16 {
        self.rows
    }

    pub fn cols(&self) -> i16 {
        self.cols
    }

    /// Current RNG state, used to seed a replacement grid so the random
    /// sequence continues across reshuffles and restarts.
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    /// Get cell at a position. Returns None if out of bounds.
    pub fn get(&self, pos: TilePos) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Set cell at a position. Returns false if out of bounds.
    pub fn set(&mut self, pos: TilePos, cell: Cell) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if a position is within bounds and occupied.
    pub fn is_occupied(&self, pos: TilePos) -> bool {
        matches!(self.get(pos), Some(Some(_)))
    }

    /// Assign every cell an independently uniform-random palette color and
    /// clear all special flags.
    pub fn random_fill(&mut self) {
        for cell in &mut self.cells {
            let color = TileColor(self.rng.next_range(u32::from(self.num_colors)) as u8);
            *cell = Some(Tile::new(color));
        }
    }

    /// In-bounds 4-neighbors of a position.
    fn neighbors(&self, pos: TilePos) -> ArrayVec<TilePos, 4> {
        let mut out = ArrayVec::new();
        let candidates = [
            TilePos::new(pos.row - 1, pos.col),
            TilePos::new(pos.row + 1, pos.col),
            TilePos::new(pos.row, pos.col - 1),
            TilePos::new(pos.row, pos.col + 1),
        ];
        for c in candidates {
            if self.index(c).is_some() {
                out.push(c);
            }
        }
        out
    }

    /// Find the maximal 4-connected group of cells sharing the color at
    /// `start`. Returns an empty vec if `start` is out of bounds or empty.
    ///
    /// Iterative flood fill with an explicit stack; no recursion, so large
    /// grids cannot overflow the call stack. Order of the returned
    /// positions is unspecified.
    pub fn find_group(&self, start: TilePos) -> Vec<TilePos> {
        let Some(Some(tile)) = self.get(start) else {
            return Vec::new();
        };
        let color = tile.color;

        let mut visited = vec![false; self.cells.len()];
        let mut group = Vec::new();
        let mut stack = vec![start];
        visited[self.index(start).expect("start is in bounds")] = true;

        while let Some(pos) = stack.pop() {
            group.push(pos);
            for n in self.neighbors(pos) {
                let idx = self.index(n).expect("neighbor is in bounds");
                if visited[idx] {
                    continue;
                }
                if let Some(t) = self.cells[idx] {
                    if t.color == color {
                        visited[idx] = true;
                        stack.push(n);
                    }
                }
            }
        }

        group
    }

    /// Set each listed cell to empty. Out-of-bounds entries are ignored.
    pub fn remove_group(&mut self, cells: &[TilePos]) {
        for &pos in cells {
            if let Some(idx) = self.index(pos) {
                self.cells[idx] = None;
            }
        }
    }

    /// Per-column bottom-up compaction: occupied cells shift down to fill
    /// trailing empties while preserving relative order. Returns the moves
    /// actually performed; stationary tiles are not reported.
    pub fn apply_gravity(&mut self) -> Vec<GravityMove> {
        let mut moves = Vec::new();

        for col in 0..self.cols {
            // Two-pointer scan from the bottom of the column.
            let mut write_row = self.rows - 1;
            for read_row in (0..self.rows).rev() {
                let read_idx = (read_row as usize) * (self.cols as usize) + (col as usize);
                let Some(tile) = self.cells[read_idx] else {
                    continue;
                };
                if write_row != read_row {
                    let write_idx = (write_row as usize) * (self.cols as usize) + (col as usize);
                    self.cells[write_idx] = Some(tile);
                    self.cells[read_idx] = None;
                    moves.push(GravityMove {
                        from: TilePos::new(read_row, col),
                        to: TilePos::new(write_row, col),
                        color: tile.color,
                    });
                }
                write_row -= 1;
            }
        }

        moves
    }

    /// Assign every empty cell a uniform-random palette color and clear its
    /// special flag. Returns the creation list; afterwards no cell is empty.
    pub fn refill_empty_cells(&mut self) -> Vec<RefillCell> {
        let mut created = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let idx = (row as usize) * (self.cols as usize) + (col as usize);
                if self.cells[idx].is_none() {
                    let color = TileColor(self.rng.next_range(u32::from(self.num_colors)) as u8);
                    self.cells[idx] = Some(Tile::new(color));
                    created.push(RefillCell {
                        pos: TilePos::new(row, col),
                        color,
                    });
                }
            }
        }
        created
    }

    /// Check whether at least one removable match exists.
    ///
    /// Returns true unconditionally when `min_group_size <= 1`. Otherwise
    /// true iff some cell has an equal-colored right or down neighbor, a
    /// witness of a size-2 match. Deliberate simplification: for
    /// `min_group_size > 2` this proves a pair exists but not a group of
    /// the configured size.
    pub fn has_any_moves(&self, min_group_size: usize) -> bool {
        if min_group_size <= 1 {
            return true;
        }

        for row in 0..self.rows {
            for col in 0..self.cols {
                let idx = (row as usize) * (self.cols as usize) + (col as usize);
                let Some(tile) = self.cells[idx] else {
                    continue;
                };
                // Mega-bomb markers never participate in ordinary matching.
                if tile.color.is_mega_bomb() {
                    continue;
                }
                let right = TilePos::new(row, col + 1);
                if let Some(Some(t)) = self.get(right) {
                    if t.color == tile.color {
                        return true;
                    }
                }
                let down = TilePos::new(row + 1, col);
                if let Some(Some(t)) = self.get(down) {
                    if t.color == tile.color {
                        return true;
                    }
                }
            }
        }

        false
    }

    /// Unconditionally exchange the full payload of two cells. Adjacency is
    /// the caller's responsibility; out-of-range calls are no-ops.
    pub fn swap_tiles(&mut self, a: TilePos, b: TilePos) {
        let (Some(ia), Some(ib)) = (self.index(a), self.index(b)) else {
            return;
        };
        self.cells.swap(ia, ib);
    }

    /// Empty the whole board, returning every previously occupied position.
    pub fn clear_all_tiles(&mut self) -> Vec<TilePos> {
        let mut cleared = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let idx = (row as usize) * (self.cols as usize) + (col as usize);
                if self.cells[idx].is_some() {
                    self.cells[idx] = None;
                    cleared.push(TilePos::new(row, col));
                }
            }
        }
        cleared
    }

    /// Number of occupied cells.
    pub fn count_non_empty_tiles(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}
