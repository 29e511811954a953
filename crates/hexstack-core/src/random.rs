//! Random source used by the market and the card deck.
//!
//! The engine only needs two draws, so they are expressed as a small trait.
//! Games use [`SeededRandom`]; tests can plug in anything deterministic.

use crate::tile::TileType;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of randomness for the engine
pub trait GameRandom {
    /// Uniform draw over the placeable tile types
    fn next_tile_type(&mut self) -> TileType;

    /// Uniform draw in `min..=max`
    fn next_in_range(&mut self, min: i32, max: i32) -> i32;
}

/// Default generator backed by `StdRng`
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Deterministic generator: the same seed replays the same game
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl GameRandom for SeededRandom {
    fn next_tile_type(&mut self) -> TileType {
        TileType::PLACEABLE[self.rng.gen_range(0..TileType::PLACEABLE.len())]
    }

    fn next_in_range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }
}

/// Fisher–Yates shuffle driven by a [`GameRandom`]
pub fn shuffle<T, R: GameRandom + ?Sized>(items: &mut [T], random: &mut R) {
    for i in (1..items.len()).rev() {
        let j = random.next_in_range(0, i as i32) as usize;
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SeededRandom::new(4102);
        let mut b = SeededRandom::new(4102);
        for _ in 0..32 {
            assert_eq!(a.next_tile_type(), b.next_tile_type());
            assert_eq!(a.next_in_range(0, 10), b.next_in_range(0, 10));
        }
    }

    #[test]
    fn test_tile_draws_never_none() {
        let mut random = SeededRandom::new(7);
        for _ in 0..200 {
            assert_ne!(random.next_tile_type(), TileType::None);
        }
    }

    #[test]
    fn test_range_is_inclusive() {
        let mut random = SeededRandom::new(1);
        let mut seen_max = false;
        for _ in 0..500 {
            let v = random.next_in_range(2, 4);
            assert!((2..=4).contains(&v));
            seen_max |= v == 4;
        }
        assert!(seen_max);
        assert_eq!(random.next_in_range(3, 3), 3);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut random = SeededRandom::new(99);
        let mut items: Vec<u32> = (0..20).collect();
        shuffle(&mut items, &mut random);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }
}
