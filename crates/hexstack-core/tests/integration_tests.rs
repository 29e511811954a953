//! Integration tests for the hexstack game engine.
//!
//! These tests drive complete turns through the public API, from market
//! selection to card completion and scoring.

use hexstack_core::*;
use pretty_assertions::assert_eq;

/// Replays a fixed list of tile draws and always picks the low end of ranges
struct ScriptedRandom {
    tiles: Vec<TileType>,
    next: usize,
}

impl ScriptedRandom {
    fn new(tiles: &[TileType]) -> Self {
        Self {
            tiles: tiles.to_vec(),
            next: 0,
        }
    }
}

impl GameRandom for ScriptedRandom {
    fn next_tile_type(&mut self) -> TileType {
        let tile = self.tiles[self.next % self.tiles.len()];
        self.next += 1;
        tile
    }

    fn next_in_range(&mut self, min: i32, _max: i32) -> i32 {
        min
    }
}

fn single_color_config(tile: TileType, count: u32) -> GameConfig {
    GameConfig {
        supply: vec![SupplyEntry::new(tile, count)],
        ..GameConfig::default()
    }
}

/// The standard card for `animal`, alone in its catalog
fn single_card_catalog(animal: Animal) -> CardCatalog {
    CardCatalog::new(
        CardCatalog::standard()
            .cards()
            .iter()
            .filter(|card| card.animal == animal)
            .cloned()
            .collect(),
    )
    .unwrap()
}

/// One slot holding exactly `tiles`, in that order, and an otherwise empty bag
fn scripted_game(animal: Animal, tiles: &[TileType]) -> GameState<ScriptedRandom> {
    let mut supply: Vec<SupplyEntry> = Vec::new();
    for tile in tiles {
        match supply.iter_mut().find(|e| e.tile == *tile) {
            Some(entry) => entry.count += 1,
            None => supply.push(SupplyEntry::new(*tile, 1)),
        }
    }
    let config = GameConfig {
        slot_count: 1,
        tokens_per_slot: tiles.len() as u32,
        supply,
        ..GameConfig::default()
    };
    let mut game =
        GameState::with_random(config, single_card_catalog(animal), ScriptedRandom::new(tiles)).unwrap();
    assert_eq!(
        game.apply_action(GameAction::DrawCard),
        Ok(vec![GameEvent::CardDrawn { animal }])
    );
    game.apply_action(GameAction::SelectSlot(0)).unwrap();
    game
}

fn animals_placed(events: &[GameEvent]) -> Vec<GameEvent> {
    events
        .iter()
        .filter(|e| matches!(e, GameEvent::AnimalPlaced { .. }))
        .cloned()
        .collect()
}

#[test]
fn test_turn_flow() {
    let mut game = GameState::new(single_color_config(TileType::Blue, 50), CardCatalog::standard()).unwrap();
    let origin = HexCoord::new(0, 0);

    assert_eq!(game.phase(), Phase::SelectTokens);
    assert_eq!(game.place_tile(origin, TileType::Blue).outcome, PlacementOutcome::InvalidPhase);

    assert!(!game.select_token_board(game.market().slot_count()));
    assert_eq!(game.phase(), Phase::SelectTokens);

    assert!(game.select_token_board(0));
    assert_eq!(game.phase(), Phase::PlaceTokens);
    assert_eq!(game.next_tile(), TileType::Blue);

    assert_eq!(game.place_tile(origin, TileType::Red).outcome, PlacementOutcome::InvalidType);
    assert_eq!(
        game.place_tile(HexCoord::new(-5, -10), TileType::Blue).outcome,
        PlacementOutcome::InvalidCoordinate
    );

    let before = game.board().cell(origin).map(GridCell::height);
    let result = game.place_tile(origin, TileType::Blue);
    assert_eq!(result.outcome, PlacementOutcome::Validated);
    assert_eq!(game.board().cell(origin).map(GridCell::height), before.map(|h| h + 1));
}

#[test]
fn test_turn_ends_when_slot_is_used_up() {
    let mut game = GameState::new(single_color_config(TileType::Blue, 50), CardCatalog::standard()).unwrap();
    game.apply_action(GameAction::SelectSlot(3)).unwrap();

    let coords = [HexCoord::new(0, 0), HexCoord::new(1, 0), HexCoord::new(2, 0)];
    let mut last_events = Vec::new();
    for coord in coords {
        last_events = game
            .apply_action(GameAction::PlaceTile { coord, tile: TileType::Blue })
            .unwrap();
    }

    assert_eq!(
        last_events,
        vec![
            GameEvent::TilePlaced {
                coord: HexCoord::new(2, 0),
                tile: TileType::Blue,
                level: 0
            },
            GameEvent::TokenConsumed {
                slot: 3,
                tile: TileType::Blue
            },
            GameEvent::SlotRefilled {
                slot: 3,
                tiles: vec![TileType::Blue; 3]
            },
        ]
    );
    assert_eq!(game.phase(), Phase::SelectTokens);
    assert_eq!(game.selected_slot(), None);

    // A straight river of three
    assert_eq!(game.score(TileType::Blue), 5);
    assert_eq!(game.score_sheet().total(), 5);
}

#[test]
fn test_crow_card_matched_through_actions() {
    use TileType::{Red, Yellow};

    let config = GameConfig {
        slot_count: 1,
        tokens_per_slot: 5,
        supply: vec![SupplyEntry::new(Yellow, 1), SupplyEntry::new(Red, 4)],
        ..GameConfig::default()
    };
    let catalog = single_card_catalog(Animal::Crow);
    let random = ScriptedRandom::new(&[Yellow, Red, Red, Red, Red]);
    let mut game = GameState::with_random(config, catalog, random).unwrap();

    assert_eq!(
        game.apply_action(GameAction::DrawCard),
        Ok(vec![GameEvent::CardDrawn { animal: Animal::Crow }])
    );
    game.apply_action(GameAction::SelectSlot(0)).unwrap();

    let anchor = HexCoord::new(2, 1);
    let east = HexCoord::new(3, 0);
    let west = HexCoord::new(1, 1);
    for coord in [east, east, west, west] {
        let events = game
            .apply_action(GameAction::PlaceTile { coord, tile: Red })
            .unwrap();
        assert!(!events.iter().any(|e| matches!(e, GameEvent::AnimalPlaced { .. })));
    }
    assert_eq!(game.board().cell(east).map(|c| c.levels().to_vec()), Some(vec![Red, Red]));

    let events = game
        .apply_action(GameAction::PlaceTile { coord: anchor, tile: Yellow })
        .unwrap();
    assert_eq!(
        events,
        vec![
            GameEvent::TilePlaced {
                coord: anchor,
                tile: Yellow,
                level: 0
            },
            GameEvent::AnimalPlaced {
                animal: Animal::Crow,
                coord: anchor,
                rotation: 0
            },
            GameEvent::CardProgressed {
                animal: Animal::Crow,
                matched_count: 1
            },
            GameEvent::TokenConsumed { slot: 0, tile: Yellow },
            GameEvent::SlotRefilled { slot: 0, tiles: vec![] },
        ]
    );

    assert_eq!(game.board().animal_at(anchor), Animal::Crow);
    assert_eq!(game.cubes_on_card(Animal::Crow), 1);
    assert_eq!(game.score_sheet().animals, 4);
    assert!(game.completed_cards().is_empty());

    // The bag is empty and so is the only slot
    assert_eq!(game.valid_actions(), Vec::<GameAction>::new());
}

#[test]
fn test_bee_card_matched_through_actions() {
    use TileType::{Brown, Green, Yellow};

    let mut game = scripted_game(Animal::Bee, &[Brown, Green, Yellow, Yellow, Yellow]);
    let hive = HexCoord::new(2, 2);
    let moves = [
        (hive, Brown),
        (hive, Green),
        (HexCoord::new(2, 1), Yellow),
        (HexCoord::new(3, 1), Yellow),
    ];
    for (coord, tile) in moves {
        let events = game.apply_action(GameAction::PlaceTile { coord, tile }).unwrap();
        assert_eq!(animals_placed(&events), Vec::<GameEvent>::new());
    }

    let events = game
        .apply_action(GameAction::PlaceTile {
            coord: HexCoord::new(1, 2),
            tile: Yellow,
        })
        .unwrap();
    assert_eq!(
        animals_placed(&events),
        vec![GameEvent::AnimalPlaced {
            animal: Animal::Bee,
            coord: hive,
            rotation: 0
        }]
    );
    assert_eq!(game.board().animal_at(hive), Animal::Bee);
    assert_eq!(game.cubes_on_card(Animal::Bee), 1);
    assert_eq!(game.score_sheet().animals, 5);
}

#[test]
fn test_kingfisher_card_matched_through_actions() {
    use TileType::{Blue, Gray};

    let mut game = scripted_game(Animal::Kingfisher, &[Gray, Gray, Blue, Blue]);
    let nest = HexCoord::new(1, 1);
    let moves = [
        (HexCoord::new(1, 2), Gray),
        (HexCoord::new(1, 2), Gray),
        (HexCoord::new(2, 1), Blue),
    ];
    for (coord, tile) in moves {
        let events = game.apply_action(GameAction::PlaceTile { coord, tile }).unwrap();
        assert_eq!(animals_placed(&events), Vec::<GameEvent>::new());
    }

    let events = game
        .apply_action(GameAction::PlaceTile { coord: nest, tile: Blue })
        .unwrap();
    assert_eq!(
        animals_placed(&events),
        vec![GameEvent::AnimalPlaced {
            animal: Animal::Kingfisher,
            coord: nest,
            rotation: 0
        }]
    );
    assert_eq!(game.board().animal_at(nest), Animal::Kingfisher);
    assert_eq!(game.cubes_on_card(Animal::Kingfisher), 1);
    assert_eq!(game.score_sheet().animals, 4);
}

#[test]
fn test_deck_draws_every_animal_once() {
    let mut game = GameState::standard();
    let mut drawn: Vec<Animal> = (0..4).map(|_| game.draw_one_card_animal()).collect();
    drawn.sort_by_key(|a| *a as u8);

    assert_eq!(drawn, Animal::ALL.to_vec());
    assert_eq!(game.draw_one_card_animal(), Animal::None);
    assert_eq!(game.remaining_deck_size(), 0);
    assert_eq!(game.player_cards().len(), 4);
    assert!(game.player_cards().iter().all(|c| c.matched_count == 0));
}

#[test]
fn test_game_from_json_config() {
    let config = GameConfig::from_json(
        r#"{ "layout": "Parallelogram", "slot_count": 2, "tokens_per_slot": 4, "seed": 7 }"#,
    )
    .unwrap();
    let game = GameState::new(config, CardCatalog::standard()).unwrap();

    assert_eq!(game.board().len(), 25);
    assert_eq!(game.market().slot_count(), 2);
    assert!(game.market().slots().iter().all(|s| s.tiles_remaining() == 4));
}

#[test]
fn test_random_game_simulation() {
    let mut game = GameState::standard();
    for _ in 0..3 {
        game.draw_one_card_animal();
    }

    let mut placed = 0;
    for _ in 0..200 {
        let action = game
            .valid_actions()
            .into_iter()
            .find(|a| !matches!(a, GameAction::DrawCard));
        let Some(action) = action else { break };

        let events = game.apply_action(action).expect("valid action must apply");
        placed += events
            .iter()
            .filter(|e| matches!(e, GameEvent::TilePlaced { .. }))
            .count();

        assert!(game.board().iter().all(|(_, cell)| cell.height() <= MAX_ELEVATION));
        assert!(game.market().slots().iter().all(|s| s.tiles_remaining() <= 3));
        for entry in &game.config().supply {
            assert!(game.tile_remaining(entry.tile) <= entry.count);
        }
    }

    assert!(placed > 0);
    let snapshot = game.snapshot();
    assert_eq!(snapshot.scores, game.score_sheet());
    assert_eq!(
        snapshot.remaining_deck_size + snapshot.player_cards.len() + snapshot.completed_cards.len(),
        Animal::ALL.len()
    );
}
