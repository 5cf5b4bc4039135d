//! Grid tests - bounds, grouping, gravity and refill through the facade

use tile_blast::core::Grid;
use tile_blast::types::{Tile, TileColor, TilePos};

fn tile(color: u8) -> Option<Tile> {
    Some(Tile::new(TileColor(color)))
}

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new(9, 9, 5, 1);
    assert_eq!(grid.rows(), 9);
    assert_eq!(grid.cols(), 9);

    // All cells should be empty
    for row in 0..9 {
        for col in 0..9 {
            assert_eq!(grid.get(TilePos::new(row, col)), Some(None));
        }
    }
}

#[test]
fn test_grid_get_out_of_bounds() {
    let grid = Grid::new(9, 9, 5, 1);

    // Negative coordinates
    assert_eq!(grid.get(TilePos::new(-1, 0)), None);
    assert_eq!(grid.get(TilePos::new(0, -1)), None);

    // Beyond bounds
    assert_eq!(grid.get(TilePos::new(9, 0)), None);
    assert_eq!(grid.get(TilePos::new(0, 9)), None);
}

#[test]
fn test_grid_set_out_of_bounds() {
    let mut grid = Grid::new(9, 9, 5, 1);

    // Should return false for out of bounds
    assert!(!grid.set(TilePos::new(-1, 0), tile(0)));
    assert!(!grid.set(TilePos::new(0, -1), tile(0)));
    assert!(!grid.set(TilePos::new(9, 0), tile(0)));
    assert!(!grid.set(TilePos::new(0, 9), tile(0)));
}

#[test]
fn test_same_seed_same_game() {
    let mut a = Grid::new(9, 9, 5, 424242);
    let mut b = Grid::new(9, 9, 5, 424242);
    a.random_fill();
    b.random_fill();

    // Identical fills, identical groups, identical refills
    let pos = TilePos::new(4, 4);
    assert_eq!(a.find_group(pos), b.find_group(pos));

    let ga = a.find_group(pos);
    a.remove_group(&ga);
    b.remove_group(&ga);
    assert_eq!(a.apply_gravity(), b.apply_gravity());
    assert_eq!(a.refill_empty_cells(), b.refill_empty_cells());
}

#[test]
fn test_full_removal_cycle_restores_full_grid() {
    let mut grid = Grid::new(9, 9, 5, 31337);
    grid.random_fill();

    for click in [TilePos::new(0, 0), TilePos::new(4, 4), TilePos::new(8, 8)] {
        let group = grid.find_group(click);
        grid.remove_group(&group);
        let moves = grid.apply_gravity();
        let created = grid.refill_empty_cells();

        assert_eq!(created.len(), group.len());
        assert_eq!(grid.count_non_empty_tiles(), 81);
        // Gravity never moves a tile across columns or upward
        for m in &moves {
            assert_eq!(m.from.col, m.to.col);
            assert!(m.to.row > m.from.row);
        }
    }
}

#[test]
fn test_gravity_leaves_holes_at_top_only() {
    let mut grid = Grid::new(9, 9, 5, 5);
    grid.random_fill();
    for col in 0..9 {
        grid.set(TilePos::new(3, col), None);
        grid.set(TilePos::new(6, col), None);
    }
    grid.apply_gravity();

    for col in 0..9 {
        // Rows 0-1 empty, rows 2-8 occupied
        for row in 0..2 {
            assert_eq!(grid.get(TilePos::new(row, col)), Some(None));
        }
        for row in 2..9 {
            assert!(grid.is_occupied(TilePos::new(row, col)));
        }
    }
}

#[test]
fn test_group_removal_below_minimum_is_callers_decision() {
    // The grid itself happily removes singletons; the size gate lives in
    // the turn state.
    let mut grid = Grid::new(9, 9, 5, 8);
    grid.set(TilePos::new(0, 0), tile(1));
    let group = grid.find_group(TilePos::new(0, 0));
    assert_eq!(group.len(), 1);
    grid.remove_group(&group);
    assert_eq!(grid.count_non_empty_tiles(), 0);
}
