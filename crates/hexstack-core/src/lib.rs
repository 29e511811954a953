//! Hexstack - rule and scoring engine for a hex tile-stacking board game
//!
//! Players take colored tokens from a shared market, stack them on a hex
//! board, and complete animal cards by building the shapes printed on them.
//! This crate provides:
//! - Cube hex coordinates and their rotation group
//! - Per-cell stacking rules and the board itself
//! - The rotation-aware shape matcher used by animal cards
//! - Scoring for each tile color
//! - The token market and the turn state machine
//!
//! # Architecture
//!
//! The engine is synchronous and platform-agnostic. It can be compiled to:
//! - Native Rust, embedded in any host
//! - WebAssembly through the `wasm` feature
//!
//! Randomness comes through the [`GameRandom`] trait so games can be replayed.
//!
//! # Modules
//!
//! - [`hex`]: Coordinate system and rotations
//! - [`tile`]: Tile colors and animals
//! - [`cell`]: Stacking rules for a single cell
//! - [`board`]: The board and its searches
//! - [`shape`]: Card shapes and the matcher
//! - [`scoring`]: Points per color
//! - [`market`]: Token bag and market slots
//! - [`cards`]: Card catalog and card progress
//! - [`config`]: Game configuration
//! - [`game`]: Game state machine

pub mod actions;
pub mod board;
pub mod cards;
pub mod cell;
pub mod config;
pub mod game;
pub mod hex;
pub mod market;
pub mod random;
pub mod scoring;
pub mod shape;
pub mod tile;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{GameAction, GameEvent};
pub use board::{BoardJson, BoardLayout, CellJson, HexGrid, PlacementOutcome};
pub use cards::{AnimalCard, CardCatalog, CardData};
pub use cell::{GridCell, MAX_ELEVATION};
pub use config::{ConfigError, GameConfig};
pub use game::{AnimalMatch, GameError, GameSnapshot, GameState, Phase, PlaceTileResult};
pub use hex::{CoordinateOutOfRange, HexCoord};
pub use market::{CentralGameboard, ResourcesChoice, SupplyEntry, TileSupply};
pub use random::{GameRandom, SeededRandom};
pub use scoring::{ScoreSheet, ScoringRules};
pub use shape::{HexShape, HexShapePiece, ShapeError, MAX_PIECE_DISTANCE};
pub use tile::{Animal, TileType};
