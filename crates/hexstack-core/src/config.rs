//! Game configuration and the errors raised while loading game data.

use crate::board::{BoardLayout, STANDARD_COLUMNS, STANDARD_ROWS};
use crate::market::{SupplyEntry, TileSupply, STANDARD_SUPPLY};
use crate::scoring::ScoringRules;
use crate::shape::ShapeError;
use crate::tile::Animal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of market slots
pub const DEFAULT_SLOT_COUNT: usize = 5;

/// Default number of tokens per market slot
pub const DEFAULT_TOKENS_PER_SLOT: u32 = 3;

/// Default seed of the engine generator
pub const DEFAULT_SEED: u64 = 4102;

/// Largest bag the market can draw from
pub const MAX_SUPPLY: u64 = i32::MAX as u64;

/// Errors from loading or validating configuration and card data
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("board must have at least one row and one column")]
    EmptyBoard,

    #[error("market needs at least one slot")]
    NoSlots,

    #[error("market slots must hold at least one token")]
    ZeroSlotSize,

    #[error("supply holds {0} tokens, at most 2147483647 are allowed")]
    SupplyTooLarge(u64),

    #[error("blue scoring table is empty")]
    EmptyBlueTable,

    #[error("card without an animal")]
    MissingAnimal,

    #[error("more than one card for {0:?}")]
    DuplicateCard(Animal),

    #[error("card for {0:?} has no score steps")]
    NoScoreSteps(Animal),

    #[error("shape of the {animal:?} card is invalid: {source}")]
    Shape {
        animal: Animal,
        #[source]
        source: ShapeError,
    },
}

/// Everything needed to set up a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: u32,
    pub columns: u32,
    pub layout: BoardLayout,
    pub slot_count: usize,
    pub tokens_per_slot: u32,
    pub seed: u64,
    /// Tokens in the bag at the start
    pub supply: Vec<SupplyEntry>,
    pub scoring: ScoringRules,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: STANDARD_ROWS,
            columns: STANDARD_COLUMNS,
            layout: BoardLayout::default(),
            slot_count: DEFAULT_SLOT_COUNT,
            tokens_per_slot: DEFAULT_TOKENS_PER_SLOT,
            seed: DEFAULT_SEED,
            supply: STANDARD_SUPPLY.to_vec(),
            scoring: ScoringRules::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if self.slot_count == 0 {
            return Err(ConfigError::NoSlots);
        }
        if self.tokens_per_slot == 0 {
            return Err(ConfigError::ZeroSlotSize);
        }
        let supply: u64 = self.supply.iter().map(|e| u64::from(e.count)).sum();
        if supply > MAX_SUPPLY {
            return Err(ConfigError::SupplyTooLarge(supply));
        }
        if self.scoring.blue_points.is_empty() {
            return Err(ConfigError::EmptyBlueTable);
        }
        Ok(())
    }

    /// Fresh bag built from `supply`
    pub fn tile_supply(&self) -> TileSupply {
        TileSupply::from_entries(&self.supply)
    }
}
