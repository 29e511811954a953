//! The central gameboard: a row of market slots filled from a shared supply.
//!
//! This module contains:
//! - `TileSupply`: how many tokens of each color are left to draw
//! - `ResourcesChoice`: the tokens lying in one slot
//! - `CentralGameboard`: all slots together

use crate::random::GameRandom;
use crate::tile::TileType;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Consecutive draws of exhausted colors tolerated before falling back to a
/// pick weighted by the remaining counts
pub const MAX_REJECTED_DRAWS: u32 = 64;

/// Number of tokens of one color in the full game box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyEntry {
    pub tile: TileType,
    pub count: u32,
}

impl SupplyEntry {
    pub const fn new(tile: TileType, count: u32) -> Self {
        Self { tile, count }
    }
}

/// Token counts of the full game box
pub const STANDARD_SUPPLY: [SupplyEntry; 6] = [
    SupplyEntry::new(TileType::Blue, 23),
    SupplyEntry::new(TileType::Gray, 23),
    SupplyEntry::new(TileType::Brown, 21),
    SupplyEntry::new(TileType::Green, 19),
    SupplyEntry::new(TileType::Yellow, 19),
    SupplyEntry::new(TileType::Red, 15),
];

/// Tokens remaining in the bag, per color
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSupply {
    counts: [u32; TileType::COUNT],
}

impl TileSupply {
    /// An empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Bag holding the listed tokens. Entries for `None` are ignored and
    /// repeated colors add up.
    pub fn from_entries(entries: &[SupplyEntry]) -> Self {
        let mut supply = Self::new();
        for entry in entries {
            supply.add(entry.tile, entry.count);
        }
        supply
    }

    /// The full game box
    pub fn standard() -> Self {
        Self::from_entries(&STANDARD_SUPPLY)
    }

    /// Put tokens in the bag. A color's count saturates at `u32::MAX`.
    pub fn add(&mut self, tile: TileType, count: u32) {
        if tile != TileType::None {
            let slot = &mut self.counts[tile.index()];
            *slot = slot.saturating_add(count);
        }
    }

    /// Tokens of one color left
    pub fn remaining(&self, tile: TileType) -> u32 {
        self.counts[tile.index()]
    }

    /// Tokens left over all colors
    pub fn total(&self) -> u64 {
        TileType::PLACEABLE
            .iter()
            .map(|t| u64::from(self.remaining(*t)))
            .sum()
    }

    /// Take one token of `tile` if any is left
    pub fn take(&mut self, tile: TileType) -> bool {
        if tile == TileType::None || self.counts[tile.index()] == 0 {
            return false;
        }
        self.counts[tile.index()] -= 1;
        true
    }

    /// Pick a color with probability proportional to its remaining count
    fn weighted_pick<R: GameRandom + ?Sized>(&self, random: &mut R) -> Option<TileType> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        // Bags past i32::MAX tokens draw from the first i32::MAX only.
        let max = i32::try_from(total - 1).unwrap_or(i32::MAX);
        let mut pick = u64::try_from(random.next_in_range(0, max)).unwrap_or(0);
        for tile in TileType::PLACEABLE {
            let count = u64::from(self.remaining(tile));
            if pick < count {
                return Some(tile);
            }
            pick -= count;
        }
        None
    }
}

/// Tokens lying in one market slot, in draw order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcesChoice {
    tiles: Vec<TileType>,
}

impl ResourcesChoice {
    /// Create a slot and fill it with up to `number` tokens
    pub fn new<R: GameRandom + ?Sized>(random: &mut R, number: u32, supply: &mut TileSupply) -> Self {
        let mut choice = Self::default();
        choice.fill(random, number, supply);
        choice
    }

    /// Draw tokens until the slot holds `number` of them or the bag is empty.
    ///
    /// Colors are drawn uniformly and exhausted colors are skipped. If the
    /// generator keeps returning exhausted colors, the draw falls back to a
    /// pick weighted by the remaining counts so the fill always finishes.
    pub fn fill<R: GameRandom + ?Sized>(&mut self, random: &mut R, number: u32, supply: &mut TileSupply) {
        let target = number as usize;
        let mut misses = 0;

        while self.tiles.len() < target && supply.total() > 0 {
            let mut tile = random.next_tile_type();
            if !supply.take(tile) {
                misses += 1;
                if misses < MAX_REJECTED_DRAWS {
                    continue;
                }
                match supply.weighted_pick(random) {
                    Some(picked) if supply.take(picked) => tile = picked,
                    _ => break,
                }
            }

            misses = 0;
            self.tiles.push(tile);
        }
    }

    /// Remove one token of `tile`, if present
    pub fn consume(&mut self, tile: TileType) -> bool {
        match self.tiles.iter().position(|t| *t == tile) {
            Some(index) => {
                self.tiles.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop every token
    pub fn empty(&mut self) {
        self.tiles.clear();
    }

    /// Whether the slot still holds tokens
    pub fn is_valid(&self) -> bool {
        !self.tiles.is_empty()
    }

    /// Number of tokens left
    pub fn tiles_remaining(&self) -> usize {
        self.tiles.len()
    }

    pub fn contains(&self, tile: TileType) -> bool {
        self.tiles.contains(&tile)
    }

    /// First token in draw order, `None` when empty
    pub fn next(&self) -> TileType {
        self.tiles.first().copied().unwrap_or_default()
    }

    pub fn tiles(&self) -> &[TileType] {
        &self.tiles
    }
}

/// All market slots.
///
/// Operations on a slot index out of range do nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CentralGameboard {
    choices: Vec<ResourcesChoice>,
    tokens_per_slot: u32,
}

impl CentralGameboard {
    /// Create `slot_count` slots of `tokens_per_slot` tokens each, drawn from `supply`
    pub fn new<R: GameRandom + ?Sized>(
        slot_count: usize,
        tokens_per_slot: u32,
        random: &mut R,
        supply: &mut TileSupply,
    ) -> Self {
        let choices = (0..slot_count)
            .map(|_| ResourcesChoice::new(random, tokens_per_slot, supply))
            .collect();
        Self {
            choices,
            tokens_per_slot,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.choices.len()
    }

    pub fn tokens_per_slot(&self) -> u32 {
        self.tokens_per_slot
    }

    pub fn slot(&self, index: usize) -> Option<&ResourcesChoice> {
        self.choices.get(index)
    }

    pub fn slots(&self) -> &[ResourcesChoice] {
        &self.choices
    }

    /// Tokens of one slot
    pub fn cell_content(&self, index: usize) -> Option<&[TileType]> {
        self.slot(index).map(ResourcesChoice::tiles)
    }

    /// Top a slot up from the bag
    pub fn fill<R: GameRandom + ?Sized>(&mut self, index: usize, random: &mut R, supply: &mut TileSupply) {
        let tokens = self.tokens_per_slot;
        if let Some(choice) = self.choices.get_mut(index) {
            choice.fill(random, tokens, supply);
        }
    }

    /// Remove one token of `tile` from a slot
    pub fn consume(&mut self, tile: TileType, index: usize) -> bool {
        self.choices
            .get_mut(index)
            .is_some_and(|choice| choice.consume(tile))
    }

    /// Whether any slot holds `tile`
    pub fn contains(&self, tile: TileType) -> bool {
        self.choices.iter().any(|c| c.contains(tile))
    }

    /// Whether slot `index` holds `tile`
    pub fn cell_contains(&self, tile: TileType, index: usize) -> bool {
        self.slot(index).is_some_and(|c| c.contains(tile))
    }

    /// First token of a slot, `None` if empty or out of range
    pub fn next_tile(&self, index: usize) -> TileType {
        self.slot(index).map(ResourcesChoice::next).unwrap_or_default()
    }

    /// Drop every token of a slot
    pub fn empty(&mut self, index: usize) {
        if let Some(choice) = self.choices.get_mut(index) {
            choice.empty();
        }
    }

    /// Fill a slot again, but only once it has been emptied.
    ///
    /// Returns whether the slot was refilled.
    pub fn refill<R: GameRandom + ?Sized>(
        &mut self,
        index: usize,
        random: &mut R,
        supply: &mut TileSupply,
    ) -> bool {
        let tokens = self.tokens_per_slot;
        match self.choices.get_mut(index) {
            Some(choice) if !choice.is_valid() => {
                choice.fill(random, tokens, supply);
                debug!(slot = index, tiles = ?choice.tiles(), "market slot refilled");
                true
            }
            _ => false,
        }
    }
}
