//! Shared types module - pure data structures and configuration
//!
//! This module defines the fundamental types used throughout the game.
//! All types are plain data with no external dependencies, making them
//! usable in any context (core logic, orchestration, view adapters).
//!
//! # Grid Coordinates
//!
//! Positions are (row, col) pairs with row 0 at the top. Coordinates are
//! signed so that raw view input can be passed through unvalidated; the
//! grid clamps out-of-range positions to no-ops.
//!
//! # Default Configuration
//!
//! | Field | Value | Description |
//! |-------|-------|-------------|
//! | `rows` x `cols` | 9 x 9 | Grid dimensions |
//! | `num_colors` | 5 | Palette size |
//! | `start_moves` | 25 | Moves per game |
//! | `target_score` | 2000 | Score needed to win |
//! | `score_per_tile` | 10 | Points per removed tile |
//! | `min_group_size` | 2 | Smallest removable group |
//! | `bomb_radius` | 1 | Chebyshev radius of the bomb booster |
//! | `mega_bomb_min_group_size` | 5 | Group size that spawns a mega bomb |
//! | `reshuffle_limit` | 3 | Reshuffle charges |
//! | `bomb_limit` | 3 | Bomb charges |
//! | `teleport_limit` | 3 | Teleport charges |

/// Position on the grid as (row, col), row 0 at the top.
///
/// Signed so that arbitrary view input can flow through the core; every
/// grid operation bounds-checks before touching storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TilePos {
    pub row: i16,
    pub col: i16,
}

impl TilePos {
    pub fn new(row: i16, col: i16) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another position.
    pub fn manhattan_distance(&self, other: &TilePos) -> i16 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// True iff `other` is directly up, down, left or right of `self`.
    pub fn is_adjacent(&self, other: &TilePos) -> bool {
        self.manhattan_distance(other) == 1
    }
}

/// Tile color as a palette index.
///
/// Ordinary tiles use indices `0..num_colors`. The mega bomb occupies a
/// cell like any tile but carries the distinguished [`TileColor::MEGA_BOMB`]
/// marker, which never appears in the random palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileColor(pub u8);

impl TileColor {
    /// Marker color for mega-bomb tiles; outside every palette.
    pub const MEGA_BOMB: TileColor = TileColor(u8::MAX);

    pub fn is_mega_bomb(&self) -> bool {
        *self == Self::MEGA_BOMB
    }
}

/// Payload of an occupied cell: a color plus a special-visual flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub color: TileColor,
    pub special: bool,
}

impl Tile {
    pub fn new(color: TileColor) -> Self {
        Self {
            color,
            special: false,
        }
    }
}

/// Cell on the grid (None = empty, Some = occupied).
pub type Cell = Option<Tile>;

/// A tile relocating during gravity compaction.
///
/// Purely informational: the grid already reflects the final state when
/// these records are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityMove {
    pub from: TilePos,
    pub to: TilePos,
    pub color: TileColor,
}

/// A newly populated cell produced by refill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefillCell {
    pub pos: TilePos,
    pub color: TileColor,
}

/// Why the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndReason {
    Win,
    Lose,
}

impl EndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndReason::Win => "win",
            EndReason::Lose => "lose",
        }
    }
}

/// Input events from the view layer into the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    TileClick { row: i16, col: i16 },
    ToggleTeleport,
    ToggleBomb,
    ConfirmNoMoves,
    Restart,
}

impl InputEvent {
    /// Parse an event name (without payload) for protocol plumbing.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "toggleteleport" => Some(InputEvent::ToggleTeleport),
            "togglebomb" => Some(InputEvent::ToggleBomb),
            "confirmnomoves" => Some(InputEvent::ConfirmNoMoves),
            "restart" => Some(InputEvent::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputEvent::TileClick { .. } => "tileClick",
            InputEvent::ToggleTeleport => "toggleTeleport",
            InputEvent::ToggleBomb => "toggleBomb",
            InputEvent::ConfirmNoMoves => "confirmNoMoves",
            InputEvent::Restart => "restart",
        }
    }
}

/// Game configuration, injected at construction and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: u8,
    pub cols: u8,
    /// Palette size; random fills draw uniformly from `0..num_colors`.
    pub num_colors: u8,
    pub start_moves: u32,
    pub target_score: u32,
    pub score_per_tile: u32,
    pub min_group_size: usize,
    pub bomb_radius: i16,
    pub mega_bomb_min_group_size: usize,
    pub reshuffle_limit: u32,
    pub bomb_limit: u32,
    pub teleport_limit: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 9,
            cols: 9,
            num_colors: 5,
            start_moves: 25,
            target_score: 2000,
            score_per_tile: 10,
            min_group_size: 2,
            bomb_radius: 1,
            mega_bomb_min_group_size: 5,
            reshuffle_limit: 3,
            bomb_limit: 3,
            teleport_limit: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        let a = TilePos::new(2, 3);
        assert_eq!(a.manhattan_distance(&TilePos::new(2, 3)), 0);
        assert_eq!(a.manhattan_distance(&TilePos::new(2, 4)), 1);
        assert_eq!(a.manhattan_distance(&TilePos::new(0, 0)), 5);
    }

    #[test]
    fn test_adjacency() {
        let a = TilePos::new(4, 4);
        assert!(a.is_adjacent(&TilePos::new(3, 4)));
        assert!(a.is_adjacent(&TilePos::new(5, 4)));
        assert!(a.is_adjacent(&TilePos::new(4, 3)));
        assert!(a.is_adjacent(&TilePos::new(4, 5)));

        // Diagonals and self are not adjacent
        assert!(!a.is_adjacent(&TilePos::new(3, 3)));
        assert!(!a.is_adjacent(&TilePos::new(4, 4)));
        assert!(!a.is_adjacent(&TilePos::new(4, 6)));
    }

    #[test]
    fn test_mega_bomb_marker_outside_palette() {
        let config = GameConfig::default();
        assert!(u32::from(TileColor::MEGA_BOMB.0) >= u32::from(config.num_colors));
        assert!(TileColor::MEGA_BOMB.is_mega_bomb());
        assert!(!TileColor(0).is_mega_bomb());
    }

    #[test]
    fn test_event_name_roundtrip() {
        for ev in [
            InputEvent::ToggleTeleport,
            InputEvent::ToggleBomb,
            InputEvent::ConfirmNoMoves,
            InputEvent::Restart,
        ] {
            assert_eq!(InputEvent::from_str(ev.as_str()), Some(ev));
        }
        assert_eq!(InputEvent::from_str("bogus"), None);
    }

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.rows, 9);
        assert_eq!(config.cols, 9);
        assert_eq!(config.min_group_size, 2);
        assert!(config.mega_bomb_min_group_size > config.min_group_size);
    }
}
