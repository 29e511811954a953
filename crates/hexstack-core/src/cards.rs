//! Animal cards: the catalog printed in the box and a player's progress on a card.

use crate::config::ConfigError;
use crate::hex::HexCoord;
use crate::shape::HexShape;
use crate::tile::{Animal, TileType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What one card asks for and what it pays.
///
/// Each entry of `scores` is one step on the card; a step is covered every
/// time the shape is matched, so the card is finished after `scores.len()`
/// matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardData {
    pub animal: Animal,
    pub shape: HexShape,
    pub scores: Vec<u32>,
}

impl CardData {
    pub fn new(animal: Animal, shape: HexShape, scores: &[u32]) -> Self {
        Self {
            animal,
            shape,
            scores: scores.to_vec(),
        }
    }

    /// Matches needed to finish the card
    pub fn required(&self) -> usize {
        self.scores.len()
    }

    /// Points earned after `matched` matches: the value of the last covered step
    pub fn points_for(&self, matched: usize) -> u32 {
        match matched.min(self.scores.len()) {
            0 => 0,
            covered => self.scores[covered - 1],
        }
    }
}

/// Every card available in a game, one per animal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardCatalog {
    cards: Vec<CardData>,
}

impl CardCatalog {
    /// Build a catalog, rejecting inconsistent card data
    pub fn new(cards: Vec<CardData>) -> Result<Self, ConfigError> {
        let catalog = Self { cards };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a catalog from JSON of the form `{ "cards": [...] }`
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let catalog: CardCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// The cards shipped with the game
    pub fn standard() -> Self {
        use TileType::{Blue, Brown, Gray, Green, Red, Yellow};

        let kingfisher = HexShape::new(&[Blue])
            .with_tile(HexCoord::new(1, 0), &[Blue])
            .with_tile(HexCoord::new(0, 1), &[Gray, Gray]);

        let parrot = HexShape::new(&[Green])
            .with_tile(HexCoord::new(-1, 0), &[Yellow])
            .with_tile(HexCoord::new(-2, 0), &[Blue]);

        let crow = HexShape::new(&[Yellow])
            .with_tile(HexCoord::new(1, -1), &[Red, Red])
            .with_tile(HexCoord::new(-1, 0), &[Red, Red]);

        let bee = HexShape::new(&[Brown, Green])
            .with_tile(HexCoord::new(0, -1), &[Yellow])
            .with_tile(HexCoord::new(1, -1), &[Yellow])
            .with_tile(HexCoord::new(-1, 0), &[Yellow]);

        Self {
            cards: vec![
                CardData::new(Animal::Kingfisher, kingfisher, &[4, 9, 15]),
                CardData::new(Animal::Parrot, parrot, &[3, 7, 12]),
                CardData::new(Animal::Crow, crow, &[4, 9]),
                CardData::new(Animal::Bee, bee, &[5, 11, 18]),
            ],
        }
    }

    /// Check every card: a real animal, at most one card per animal, at least
    /// one score step and a well formed shape
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for card in &self.cards {
            if card.animal == Animal::None {
                return Err(ConfigError::MissingAnimal);
            }
            if !seen.insert(card.animal) {
                return Err(ConfigError::DuplicateCard(card.animal));
            }
            if card.scores.is_empty() {
                return Err(ConfigError::NoScoreSteps(card.animal));
            }
            card.shape
                .validate()
                .map_err(|source| ConfigError::Shape {
                    animal: card.animal,
                    source,
                })?;
        }
        Ok(())
    }

    pub fn find(&self, animal: Animal) -> Option<&CardData> {
        self.cards.iter().find(|c| c.animal == animal)
    }

    pub fn cards(&self) -> &[CardData] {
        &self.cards
    }

    /// Animals in catalog order
    pub fn animals(&self) -> impl Iterator<Item = Animal> + '_ {
        self.cards.iter().map(|c| c.animal)
    }
}

impl Default for CardCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// A card in front of a player, with the number of shapes matched so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalCard {
    pub animal: Animal,
    pub matched_count: usize,
}

impl AnimalCard {
    /// A freshly drawn card
    pub fn new(animal: Animal) -> Self {
        Self {
            animal,
            matched_count: 0,
        }
    }

    pub fn is_complete(&self, data: &CardData) -> bool {
        self.matched_count >= data.required()
    }
}
