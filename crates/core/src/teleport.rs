//! Teleport booster - swap two adjacent tiles without removing anything
//!
//! An input-interpretation strategy layered over the grid. While active it
//! tracks an optional selected cell; a click on a 4-adjacent cell performs
//! the swap and deactivates the mode. The controller never touches charges
//! or score; the orchestrator consumes the teleport charge once a swap has
//! actually happened.

use tile_blast_types::TilePos;

use crate::grid::Grid;

/// Outcome of a click handled in teleport mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeleportAction {
    /// First click: cell selected.
    Select(TilePos),
    /// Click on the current selection: cleared.
    Deselect(TilePos),
    /// Click on a non-adjacent cell: selection moved.
    Reselect { from: TilePos, to: TilePos },
    /// Click on a 4-adjacent cell: payloads swapped, mode deactivated.
    Swap { from: TilePos, to: TilePos },
}

#[derive(Debug, Clone, Default)]
pub struct TeleportController {
    active: bool,
    selection: Option<TilePos>,
}

impl TeleportController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn selection(&self) -> Option<TilePos> {
        self.selection
    }

    /// Flip active/inactive; either way the selection is cleared.
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        self.selection = None;
        self.active
    }

    /// Deactivate and clear the selection.
    pub fn reset(&mut self) {
        self.active = false;
        self.selection = None;
    }

    /// Interpret a click while active. Returns None when inactive or when
    /// the click is out of grid bounds.
    pub fn handle_click(&mut self, grid: &mut Grid, pos: TilePos) -> Option<TeleportAction> {
        if !self.active || grid.get(pos).is_none() {
            return None;
        }

        match self.selection {
            None => {
                self.selection = Some(pos);
                Some(TeleportAction::Select(pos))
            }
            Some(sel) if sel == pos => {
                self.selection = None;
                Some(TeleportAction::Deselect(pos))
            }
            Some(sel) if !sel.is_adjacent(&pos) => {
                self.selection = Some(pos);
                Some(TeleportAction::Reselect { from: sel, to: pos })
            }
            Some(sel) => {
                grid.swap_tiles(sel, pos);
                self.selection = None;
                self.active = false;
                Some(TeleportAction::Swap { from: sel, to: pos })
            }
        }
    }
}
