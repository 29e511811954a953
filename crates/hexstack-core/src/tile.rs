//! Tile and animal enumerations.

use serde::{Deserialize, Serialize};

/// Color of a resource token.
///
/// `None` marks an empty spot; it is never drawn from the market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileType {
    #[default]
    None,
    /// Water
    Blue,
    /// Mountain
    Gray,
    /// Trunk
    Brown,
    /// Foliage
    Green,
    /// Field
    Yellow,
    /// Building
    Red,
}

impl TileType {
    /// Number of variants, `None` included
    pub const COUNT: usize = 7;

    /// Every placeable tile type
    pub const PLACEABLE: [TileType; 6] = [
        TileType::Blue,
        TileType::Gray,
        TileType::Brown,
        TileType::Green,
        TileType::Yellow,
        TileType::Red,
    ];

    /// Every variant, `None` first
    pub const ALL: [TileType; 7] = [
        TileType::None,
        TileType::Blue,
        TileType::Gray,
        TileType::Brown,
        TileType::Green,
        TileType::Yellow,
        TileType::Red,
    ];

    /// Dense index, usable for per-type tables
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`TileType::index`]
    pub fn from_index(index: usize) -> Option<TileType> {
        TileType::ALL.get(index).copied()
    }

    /// Single-bit mask for deduplicating sets of types
    pub const fn mask(self) -> u8 {
        1 << (self as u8)
    }
}

/// Animals printed on the cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Animal {
    #[default]
    None,
    Kingfisher,
    Parrot,
    Crow,
    Bee,
}

impl Animal {
    /// Every real animal, in deck order before shuffling
    pub const ALL: [Animal; 4] = [Animal::Kingfisher, Animal::Parrot, Animal::Crow, Animal::Bee];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for tile in TileType::ALL {
            assert_eq!(TileType::from_index(tile.index()), Some(tile));
        }
        assert_eq!(TileType::from_index(TileType::COUNT), None);
    }

    #[test]
    fn test_masks_are_distinct() {
        let combined = TileType::ALL.iter().fold(0u8, |acc, t| acc | t.mask());
        assert_eq!(combined.count_ones() as usize, TileType::COUNT);
    }

    #[test]
    fn test_placeable_excludes_none() {
        assert!(!TileType::PLACEABLE.contains(&TileType::None));
        assert!(!Animal::ALL.contains(&Animal::None));
    }
}
