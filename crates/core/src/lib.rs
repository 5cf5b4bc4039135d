//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the grid rules, turn accounting, and booster
//! strategies. It has **zero dependencies** on UI, networking, or I/O,
//! making it:
//!
//! - **Deterministic**: Same seed produces identical grids and refills
//! - **Testable**: Comprehensive unit tests for all game rules
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`grid`]: the color grid with flood-fill grouping, gravity, refill,
//!   swap and clear
//! - [`turn`]: score, moves-left and booster-charge counters with win/lose
//!   evaluation
//! - [`teleport`]: adjacent-swap booster strategy
//! - [`bomb`]: square-neighborhood removal booster strategy
//! - [`mega_bomb`]: board-clearing marker tile created from large groups
//! - [`rng`]: seedable LCG driving all randomness
//! - [`snapshot`]: detached grid copies for view layers
//!
//! # Game Rules
//!
//! - A click removes the maximal 4-connected same-colored group at the
//!   clicked cell, provided it meets the configured minimum size
//! - Removal scores `size * score_per_tile` and consumes one move
//! - Groups at or above the mega-bomb threshold collapse into a marker
//!   tile that clears the whole board when clicked
//! - Win evaluation takes priority over lose: reaching the target score on
//!   the final move wins
//!
//! # Example
//!
//! ```
//! use tile_blast_core::{Grid, TurnState};
//! use tile_blast_types::{GameConfig, TilePos};
//!
//! let config = GameConfig::default();
//! let mut grid = Grid::new(config.rows, config.cols, config.num_colors, 12345);
//! grid.random_fill();
//! let mut turn = TurnState::new(&config);
//!
//! let group = grid.find_group(TilePos::new(4, 4));
//! if turn.can_remove_group(group.len()) {
//!     grid.remove_group(&group);
//!     turn.apply_group(group.len());
//!     grid.apply_gravity();
//!     grid.refill_empty_cells();
//! }
//! assert_eq!(grid.count_non_empty_tiles(), 81);
//! ```

pub mod bomb;
pub mod grid;
pub mod mega_bomb;
pub mod rng;
pub mod snapshot;
pub mod teleport;
pub mod turn;

pub use bomb::BombController;
pub use grid::Grid;
pub use mega_bomb::{Explosion, MegaBomb};
pub use rng::SimpleRng;
pub use snapshot::GridSnapshot;
pub use teleport::{TeleportAction, TeleportController};
pub use turn::TurnState;
