//! Core game state machine.
//!
//! A turn has two phases. In `SelectTokens` the player picks one market
//! slot; in `PlaceTokens` they put the tokens of that slot on the board one
//! by one. Every placement is followed by a search for the shapes of the
//! player's animal cards. Once the slot is used up it is refilled and the
//! next turn starts.

use crate::actions::{GameAction, GameEvent};
use crate::board::{BoardJson, HexGrid, PlacementOutcome};
use crate::cards::{AnimalCard, CardCatalog};
use crate::config::{ConfigError, GameConfig};
use crate::hex::HexCoord;
use crate::market::{CentralGameboard, TileSupply};
use crate::random::{shuffle, GameRandom, SeededRandom};
use crate::scoring::{score_tile_type, ScoreSheet};
use crate::tile::{Animal, TileType};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Choose a market slot
    #[default]
    SelectTokens,
    /// Place the tokens of the selected slot
    PlaceTokens,
}

/// Errors that can occur when applying actions
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Invalid action for current phase")]
    InvalidPhase,

    #[error("Tile type cannot be placed there")]
    InvalidType,

    #[error("No such cell on the board")]
    InvalidCoordinate,

    #[error("Market slot {0} cannot be selected")]
    InvalidSlot(usize),

    #[error("No animal cards left in deck")]
    EmptyDeck,
}

impl GameError {
    fn from_outcome(outcome: PlacementOutcome) -> Option<Self> {
        match outcome {
            PlacementOutcome::Validated => None,
            PlacementOutcome::InvalidPhase => Some(GameError::InvalidPhase),
            PlacementOutcome::InvalidType => Some(GameError::InvalidType),
            PlacementOutcome::InvalidCoordinate => Some(GameError::InvalidCoordinate),
        }
    }
}

/// An animal card shape found on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalMatch {
    pub animal: Animal,
    /// Anchor of the match, where the animal now stands
    pub coord: HexCoord,
    pub rotation: usize,
}

/// Everything that happened during one placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceTileResult {
    pub outcome: PlacementOutcome,
    /// Level the tile landed on
    pub level: Option<usize>,
    pub matched: Option<AnimalMatch>,
    /// The matched card reached its last step
    pub card_finished: bool,
}

impl PlaceTileResult {
    fn rejected(outcome: PlacementOutcome) -> Self {
        Self {
            outcome,
            level: None,
            matched: None,
            card_finished: false,
        }
    }
}

/// Serializable view of the whole game for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub selected_slot: Option<usize>,
    pub next_tile: TileType,
    pub board: BoardJson,
    pub market: Vec<Vec<TileType>>,
    pub player_cards: Vec<AnimalCard>,
    pub completed_cards: Vec<AnimalCard>,
    pub remaining_deck_size: usize,
    pub scores: ScoreSheet,
}

/// The complete game state
#[derive(Debug, Clone)]
pub struct GameState<R: GameRandom = SeededRandom> {
    config: GameConfig,
    catalog: CardCatalog,
    board: HexGrid,
    market: CentralGameboard,
    /// Tokens still in the bag
    supply: TileSupply,
    phase: Phase,
    selected_slot: Option<usize>,
    /// Animals still to draw, drawn from the back
    deck: Vec<Animal>,
    /// Cards in progress, in draw order
    player_cards: Vec<AnimalCard>,
    completed_cards: Vec<AnimalCard>,
    random: R,
}

impl GameState {
    /// Create a game driven by a generator seeded from `config.seed`
    pub fn new(config: GameConfig, catalog: CardCatalog) -> Result<Self, ConfigError> {
        let random = SeededRandom::new(config.seed);
        Self::with_random(config, catalog, random)
    }

    /// Create the standard game
    pub fn standard() -> Self {
        let config = GameConfig::default();
        let random = SeededRandom::new(config.seed);
        Self::build(config, CardCatalog::standard(), random)
    }
}

impl<R: GameRandom> GameState<R> {
    /// Create a game driven by `random`
    pub fn with_random(config: GameConfig, catalog: CardCatalog, random: R) -> Result<Self, ConfigError> {
        config.validate()?;
        catalog.validate()?;
        Ok(Self::build(config, catalog, random))
    }

    fn build(config: GameConfig, catalog: CardCatalog, mut random: R) -> Self {
        let board = HexGrid::new(config.rows, config.columns, config.layout);
        let mut supply = config.tile_supply();
        let market = CentralGameboard::new(
            config.slot_count,
            config.tokens_per_slot,
            &mut random,
            &mut supply,
        );

        let mut deck: Vec<Animal> = catalog.animals().collect();
        shuffle(&mut deck, &mut random);

        debug!(
            cells = board.len(),
            slots = market.slot_count(),
            cards = deck.len(),
            "game created"
        );

        Self {
            config,
            catalog,
            board,
            market,
            supply,
            phase: Phase::SelectTokens,
            selected_slot: None,
            deck,
            player_cards: Vec::new(),
            completed_cards: Vec::new(),
            random,
        }
    }

    // ==================== Query Methods ====================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &HexGrid {
        &self.board
    }

    pub fn market(&self) -> &CentralGameboard {
        &self.market
    }

    pub fn selected_slot(&self) -> Option<usize> {
        self.selected_slot
    }

    /// First token of the selected slot, `None` outside `PlaceTokens`
    pub fn next_tile(&self) -> TileType {
        match (self.phase, self.selected_slot) {
            (Phase::PlaceTokens, Some(slot)) => self.market.next_tile(slot),
            _ => TileType::None,
        }
    }

    /// Tokens of one color left in the bag
    pub fn tile_remaining(&self, tile: TileType) -> u32 {
        self.supply.remaining(tile)
    }

    /// Whether a token of `tile` from the selected slot may be placed now
    pub fn can_play_this_type(&self, tile: TileType) -> bool {
        match (self.phase, self.selected_slot) {
            (Phase::PlaceTokens, Some(slot)) => self.market.cell_contains(tile, slot),
            _ => false,
        }
    }

    /// Cards in progress, in the order they were drawn
    pub fn player_cards(&self) -> &[AnimalCard] {
        &self.player_cards
    }

    pub fn completed_cards(&self) -> &[AnimalCard] {
        &self.completed_cards
    }

    /// Matches recorded on the card of `animal`; 0 if the player does not hold it
    pub fn cubes_on_card(&self, animal: Animal) -> usize {
        self.player_cards
            .iter()
            .chain(&self.completed_cards)
            .find(|card| card.animal == animal)
            .map_or(0, |card| card.matched_count)
    }

    pub fn remaining_deck_size(&self) -> usize {
        self.deck.len()
    }

    /// Points of one color
    pub fn score(&self, tile: TileType) -> u32 {
        score_tile_type(&self.board, tile, &self.config.scoring)
    }

    /// Points of every color plus the animal cards
    pub fn score_sheet(&self) -> ScoreSheet {
        let mut sheet = ScoreSheet::from_board(&self.board, &self.config.scoring);
        sheet.animals = self
            .player_cards
            .iter()
            .chain(&self.completed_cards)
            .filter_map(|card| {
                self.catalog
                    .find(card.animal)
                    .map(|data| data.points_for(card.matched_count))
            })
            .sum();
        sheet
    }

    /// Verdict for placing `tile` at `coord`: phase first, then the board,
    /// then the content of the selected slot
    pub fn can_place_tile(&self, coord: HexCoord, tile: TileType) -> PlacementOutcome {
        if self.phase != Phase::PlaceTokens {
            return PlacementOutcome::InvalidPhase;
        }
        match self.board.can_place_tile(coord, tile) {
            PlacementOutcome::Validated if !self.can_play_this_type(tile) => PlacementOutcome::InvalidType,
            outcome => outcome,
        }
    }

    /// Capture the state for a rendering collaborator
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            selected_slot: self.selected_slot,
            next_tile: self.next_tile(),
            board: self.board.to_json_friendly(),
            market: self
                .market
                .slots()
                .iter()
                .map(|slot| slot.tiles().to_vec())
                .collect(),
            player_cards: self.player_cards.clone(),
            completed_cards: self.completed_cards.clone(),
            remaining_deck_size: self.deck.len(),
            scores: self.score_sheet(),
        }
    }

    /// Every action `apply_action` would accept right now
    pub fn valid_actions(&self) -> Vec<GameAction> {
        let mut actions = Vec::new();

        match (self.phase, self.selected_slot) {
            (Phase::SelectTokens, _) => {
                for (slot, choice) in self.market.slots().iter().enumerate() {
                    if choice.is_valid() {
                        actions.push(GameAction::SelectSlot(slot));
                    }
                }
            }
            (Phase::PlaceTokens, Some(slot)) => {
                let mut tiles = self.market.cell_content(slot).unwrap_or_default().to_vec();
                tiles.sort_by_key(|t| t.index());
                tiles.dedup();

                for tile in tiles {
                    for (coord, _) in self.board.iter() {
                        if self.can_place_tile(coord, tile) == PlacementOutcome::Validated {
                            actions.push(GameAction::PlaceTile { coord, tile });
                        }
                    }
                }
            }
            (Phase::PlaceTokens, None) => {}
        }

        if !self.deck.is_empty() {
            actions.push(GameAction::DrawCard);
        }

        actions
    }

    // ==================== Commands ====================

    /// Select a market slot and move to `PlaceTokens`.
    ///
    /// Fails outside `SelectTokens` or on an unknown slot. An empty slot is
    /// refused too, even when its index is in range: a turn on it could never
    /// end. Slots only stay empty once the bag has run out.
    pub fn select_token_board(&mut self, slot: usize) -> bool {
        let selectable = self.phase == Phase::SelectTokens
            && self.market.slot(slot).is_some_and(|choice| choice.is_valid());
        if selectable {
            self.selected_slot = Some(slot);
            self.phase = Phase::PlaceTokens;
            debug!(slot, tiles = ?self.market.cell_content(slot), "market slot selected");
        }
        selectable
    }

    /// Place a token of the selected slot on the board.
    ///
    /// On success the player's cards are searched, in draw order, for a shape
    /// now present on the board. The first hit puts its animal on the anchor
    /// cell and moves the card one step; a card reaching its last step moves
    /// to the completed list. The token itself stays in the market until
    /// [`GameState::consume`] is called.
    pub fn place_tile(&mut self, coord: HexCoord, tile: TileType) -> PlaceTileResult {
        let outcome = self.can_place_tile(coord, tile);
        if outcome != PlacementOutcome::Validated {
            return PlaceTileResult::rejected(outcome);
        }

        let level = self.board.place_tile(coord, tile);
        debug!(%coord, ?tile, ?level, "tile placed");

        let mut result = PlaceTileResult {
            outcome,
            level,
            matched: None,
            card_finished: false,
        };

        if let Some((index, found)) = self.find_animal_match() {
            trace!(animal = ?found.animal, coord = %found.coord, rotation = found.rotation, "shape matched");
            self.board.place_animal(found.coord, found.animal);
            debug!(animal = ?found.animal, coord = %found.coord, "animal placed");
            result.card_finished = self.record_match(index);
            result.matched = Some(found);
        }

        result
    }

    /// Remove a placed token from the selected slot.
    ///
    /// Returns `true` when this empties the slot: the slot is refilled from
    /// the bag, the selection is cleared and the turn goes back to
    /// `SelectTokens`.
    pub fn consume(&mut self, tile: TileType) -> bool {
        let Some(slot) = self.selected_slot.filter(|_| self.phase == Phase::PlaceTokens) else {
            return false;
        };

        self.market.consume(tile, slot);
        let emptied = self.market.slot(slot).is_some_and(|choice| !choice.is_valid());
        if emptied {
            self.market.refill(slot, &mut self.random, &mut self.supply);
            self.phase = Phase::SelectTokens;
            self.selected_slot = None;
        }
        emptied
    }

    /// Draw the next animal card, or `Animal::None` when the deck is empty
    pub fn draw_one_card_animal(&mut self) -> Animal {
        match self.deck.pop() {
            Some(animal) => {
                self.player_cards.push(AnimalCard::new(animal));
                debug!(?animal, left = self.deck.len(), "card drawn");
                animal
            }
            None => Animal::None,
        }
    }

    /// Remove every tile and animal from the board. Cards and market are kept.
    pub fn clear_board(&mut self) {
        self.board.clear();
    }

    /// Apply an action and return the resulting events.
    ///
    /// `PlaceTile` also consumes the token from the market, and a finished
    /// card is replaced by the next card of the deck if any is left.
    pub fn apply_action(&mut self, action: GameAction) -> Result<Vec<GameEvent>, GameError> {
        let mut events = Vec::new();

        match action {
            GameAction::SelectSlot(slot) => {
                if self.phase != Phase::SelectTokens {
                    return Err(GameError::InvalidPhase);
                }
                if !self.select_token_board(slot) {
                    return Err(GameError::InvalidSlot(slot));
                }
                events.push(GameEvent::SlotSelected {
                    slot,
                    tiles: self.market.cell_content(slot).unwrap_or_default().to_vec(),
                });
            }

            GameAction::PlaceTile { coord, tile } => {
                let result = self.place_tile(coord, tile);
                if let Some(error) = GameError::from_outcome(result.outcome) {
                    return Err(error);
                }

                if let Some(level) = result.level {
                    events.push(GameEvent::TilePlaced { coord, tile, level });
                }

                if let Some(found) = result.matched {
                    events.push(GameEvent::AnimalPlaced {
                        animal: found.animal,
                        coord: found.coord,
                        rotation: found.rotation,
                    });
                    events.push(GameEvent::CardProgressed {
                        animal: found.animal,
                        matched_count: self.cubes_on_card(found.animal),
                    });

                    if result.card_finished {
                        let points = self
                            .catalog
                            .find(found.animal)
                            .map_or(0, |data| data.points_for(data.required()));
                        events.push(GameEvent::CardCompleted {
                            animal: found.animal,
                            points,
                        });

                        let animal = self.draw_one_card_animal();
                        if animal != Animal::None {
                            events.push(GameEvent::CardDrawn { animal });
                        }
                    }
                }

                // Selection is still set: placement only succeeds in PlaceTokens.
                if let Some(slot) = self.selected_slot {
                    let turn_over = self.consume(tile);
                    events.push(GameEvent::TokenConsumed { slot, tile });
                    if turn_over {
                        events.push(GameEvent::SlotRefilled {
                            slot,
                            tiles: self.market.cell_content(slot).unwrap_or_default().to_vec(),
                        });
                    }
                }
            }

            GameAction::DrawCard => match self.draw_one_card_animal() {
                Animal::None => return Err(GameError::EmptyDeck),
                animal => events.push(GameEvent::CardDrawn { animal }),
            },
        }

        Ok(events)
    }

    // ==================== Helpers ====================

    /// First card, in draw order, whose shape is on the board, with its
    /// first matching anchor
    fn find_animal_match(&self) -> Option<(usize, AnimalMatch)> {
        self.player_cards.iter().enumerate().find_map(|(index, card)| {
            let data = self.catalog.find(card.animal)?;
            let (coord, rotation) = self.board.matching_positions(&data.shape).next()?;
            Some((
                index,
                AnimalMatch {
                    animal: card.animal,
                    coord,
                    rotation,
                },
            ))
        })
    }

    /// Count one match on the card at `index`; returns whether it is now finished
    fn record_match(&mut self, index: usize) -> bool {
        let card = &mut self.player_cards[index];
        card.matched_count += 1;

        let finished = self
            .catalog
            .find(card.animal)
            .is_some_and(|data| card.is_complete(data));
        if finished {
            let card = self.player_cards.remove(index);
            debug!(animal = ?card.animal, "card completed");
            self.completed_cards.push(card);
        }
        finished
    }
}
