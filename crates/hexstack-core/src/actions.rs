//! Commands a player can issue and the events they produce.
//!
//! `GameState::apply_action` takes a [`GameAction`] and answers with the list
//! of [`GameEvent`]s describing everything that changed, in order.

use crate::hex::HexCoord;
use crate::tile::{Animal, TileType};
use serde::{Deserialize, Serialize};

/// All possible player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    // ==================== SelectTokens ====================
    /// Take the tokens of one market slot
    SelectSlot(usize),

    // ==================== PlaceTokens ====================
    /// Place one token of the selected slot on the board
    PlaceTile { coord: HexCoord, tile: TileType },

    // ==================== Any Phase ====================
    /// Draw the next animal card from the deck
    DrawCard,
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A market slot was selected
    SlotSelected { slot: usize, tiles: Vec<TileType> },

    /// A tile was stacked on a cell
    TilePlaced {
        coord: HexCoord,
        tile: TileType,
        level: usize,
    },

    /// A card shape was matched and its animal put on the board
    AnimalPlaced {
        animal: Animal,
        coord: HexCoord,
        rotation: usize,
    },

    /// A card got one step further
    CardProgressed { animal: Animal, matched_count: usize },

    /// A card reached its last step
    CardCompleted { animal: Animal, points: u32 },

    /// A token left the selected slot
    TokenConsumed { slot: usize, tile: TileType },

    /// The selected slot ran out and was filled again; the turn is over
    SlotRefilled { slot: usize, tiles: Vec<TileType> },

    /// A new card was drawn
    CardDrawn { animal: Animal },
}
