//! A single board cell: a short stack of tiles and an optional animal.
//!
//! Stacking rules depend on the color being placed, the current height and
//! the tile directly below:
//!
//! | placing | allowed on top of                          |
//! |---------|--------------------------------------------|
//! | Gray    | Gray                                       |
//! | Red     | Gray, Red or Brown, only as the 2nd tile   |
//! | Brown   | Brown, only as the 2nd tile                |
//! | Green   | Brown                                      |
//! | other   | nothing                                    |
//!
//! Anything goes on an empty cell. A cell holding an animal is closed.

use crate::tile::{Animal, TileType};
use serde::{Deserialize, Serialize};

/// Maximum number of tiles stacked on one cell
pub const MAX_ELEVATION: usize = 3;

/// Whether `tile` may go on top of `below` when the cell already holds
/// `height` tiles.
pub fn can_be_placed_above(tile: TileType, below: TileType, height: usize) -> bool {
    match tile {
        TileType::Gray => below == TileType::Gray,
        TileType::Red => {
            height == 1 && matches!(below, TileType::Gray | TileType::Red | TileType::Brown)
        }
        TileType::Brown => below == TileType::Brown && height == 1,
        TileType::Green => below == TileType::Brown,
        _ => false,
    }
}

/// Compare a required stack against an actual one, bottom to top.
///
/// Stacks must have the same height and the same tiles, except that a
/// two-high requirement topped with Red accepts any two-high stack topped
/// with Red: the tile under a building does not matter.
pub fn same_tile_stack(required: &[TileType], actual: &[TileType]) -> bool {
    if required.len() != actual.len() {
        return false;
    }
    if required.len() == 2 && required[1] == TileType::Red && actual[1] == TileType::Red {
        return true;
    }
    required == actual
}

/// One cell of the board
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    levels: [TileType; MAX_ELEVATION],
    height: usize,
    animal: Animal,
}

impl GridCell {
    /// Create an empty cell
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every tile and the animal
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Number of stacked tiles
    pub fn height(&self) -> usize {
        self.height
    }

    /// Stacked tiles, bottom to top
    pub fn levels(&self) -> &[TileType] {
        &self.levels[..self.height]
    }

    /// Tile at `level`, or `None` outside the occupied range
    pub fn tile_at_level(&self, level: usize) -> TileType {
        self.levels().get(level).copied().unwrap_or_default()
    }

    /// Topmost tile, `None` on an empty cell
    pub fn top(&self) -> TileType {
        self.levels().last().copied().unwrap_or_default()
    }

    /// Animal standing on the cell
    pub fn animal(&self) -> Animal {
        self.animal
    }

    /// Whether an animal occupies the cell
    pub fn has_animal(&self) -> bool {
        self.animal != Animal::None
    }

    /// Put an animal on the cell. Fails if one is already there.
    pub fn place_animal(&mut self, animal: Animal) -> bool {
        if self.has_animal() {
            return false;
        }
        self.animal = animal;
        true
    }

    /// Push a tile without checking the stacking rules.
    ///
    /// Returns the level the tile landed on, or `None` when the stack is full.
    pub fn add_tile(&mut self, tile: TileType) -> Option<usize> {
        if self.height >= MAX_ELEVATION {
            return None;
        }
        let level = self.height;
        self.levels[level] = tile;
        self.height += 1;
        Some(level)
    }

    /// Check whether `tile` may be stacked here
    pub fn can_place(&self, tile: TileType) -> bool {
        if self.has_animal() {
            return false;
        }
        match self.height {
            0 => true,
            h if h < MAX_ELEVATION => can_be_placed_above(tile, self.tile_at_level(h - 1), h),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell_with(tiles: &[TileType]) -> GridCell {
        let mut cell = GridCell::new();
        for tile in tiles {
            cell.add_tile(*tile);
        }
        cell
    }

    #[test]
    fn test_empty_cell_accepts_everything() {
        for tile in TileType::ALL {
            assert!(GridCell::new().can_place(tile), "{tile:?} refused on empty cell");
        }
    }

    #[test]
    fn test_gray_rules() {
        let cell = cell_with(&[TileType::Gray]);
        assert!(cell.can_place(TileType::Gray));
        assert!(cell.can_place(TileType::Red));
        assert!(!cell.can_place(TileType::Blue));
        assert!(!cell.can_place(TileType::Green));

        let cell = cell_with(&[TileType::Gray, TileType::Gray]);
        assert!(cell.can_place(TileType::Gray));
        assert!(!cell.can_place(TileType::Red));
    }

    #[test]
    fn test_tree_rules() {
        let mut cell = cell_with(&[TileType::Brown]);
        assert!(!cell.can_place(TileType::Gray));
        assert!(!cell.can_place(TileType::Blue));
        assert!(cell.can_place(TileType::Red));
        assert!(cell.can_place(TileType::Brown));
        assert!(cell.can_place(TileType::Green));

        cell.add_tile(TileType::Brown);
        assert!(!cell.can_place(TileType::Red));
        assert!(!cell.can_place(TileType::Brown));
        assert!(cell.can_place(TileType::Green));
    }

    #[test]
    fn test_red_only_as_second_tile() {
        assert!(cell_with(&[TileType::Red]).can_place(TileType::Red));
        assert!(!cell_with(&[TileType::Yellow]).can_place(TileType::Red));
        assert!(!cell_with(&[TileType::Blue]).can_place(TileType::Red));
        assert!(!cell_with(&[TileType::Brown, TileType::Brown]).can_place(TileType::Red));
    }

    #[test]
    fn test_flat_tiles_do_not_stack() {
        for base in [TileType::Blue, TileType::Yellow, TileType::Green] {
            let cell = cell_with(&[base]);
            for tile in TileType::ALL {
                assert!(!cell.can_place(tile), "{tile:?} accepted on {base:?}");
            }
        }
    }

    #[test]
    fn test_full_cell_refuses() {
        let mut cell = cell_with(&[TileType::Gray, TileType::Gray, TileType::Gray]);
        assert!(!cell.can_place(TileType::Gray));
        assert_eq!(cell.add_tile(TileType::Gray), None);
        assert_eq!(cell.height(), MAX_ELEVATION);
    }

    #[test]
    fn test_add_tile_reports_level() {
        let mut cell = GridCell::new();
        assert_eq!(cell.add_tile(TileType::Brown), Some(0));
        assert_eq!(cell.add_tile(TileType::Brown), Some(1));
        assert_eq!(cell.add_tile(TileType::Green), Some(2));
        assert_eq!(cell.top(), TileType::Green);
    }

    #[test]
    fn test_animal_blocks_placement() {
        let mut cell = cell_with(&[TileType::Brown]);
        assert!(cell.place_animal(Animal::Bee));
        for tile in TileType::ALL {
            assert!(!cell.can_place(tile));
        }
        assert!(!cell.place_animal(Animal::Crow));
        assert_eq!(cell.animal(), Animal::Bee);
    }

    #[test]
    fn test_tile_at_level_out_of_range() {
        let cell = cell_with(&[TileType::Gray]);
        assert_eq!(cell.tile_at_level(0), TileType::Gray);
        assert_eq!(cell.tile_at_level(1), TileType::None);
        assert_eq!(cell.tile_at_level(7), TileType::None);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut cell = cell_with(&[TileType::Gray, TileType::Red]);
        cell.place_animal(Animal::Parrot);
        cell.clear();
        assert_eq!(cell, GridCell::new());
        assert!(cell.levels().is_empty());
    }

    #[test]
    fn test_red_topped_pairs_match_any_base() {
        let required = [TileType::Brown, TileType::Red];
        assert!(same_tile_stack(&required, &[TileType::Red, TileType::Red]));
        assert!(same_tile_stack(&required, &[TileType::Gray, TileType::Red]));
        assert!(!same_tile_stack(&required, &[TileType::Red]));
        assert!(!same_tile_stack(&required, &[TileType::Brown, TileType::Green]));
    }

    #[test]
    fn test_stack_equality_is_exact() {
        assert!(same_tile_stack(&[TileType::Blue], &[TileType::Blue]));
        assert!(!same_tile_stack(&[TileType::Blue], &[]));
        assert!(!same_tile_stack(
            &[TileType::Gray],
            &[TileType::Gray, TileType::Gray]
        ));
        assert!(same_tile_stack(
            &[TileType::Brown, TileType::Brown, TileType::Green],
            &[TileType::Brown, TileType::Brown, TileType::Green]
        ));
    }
}
