//! Multi-cell patterns printed on animal cards and the rotation-aware matcher.
//!
//! A shape is a list of pieces. The first piece is the anchor and sits at
//! offset zero; every other piece gives an offset from the anchor and the
//! stack of tiles required at that cell. A shape may be turned by any of the
//! six 60° rotations, but all pieces share the same rotation.

use crate::board::HexGrid;
use crate::cell::{same_tile_stack, MAX_ELEVATION};
use crate::hex::{HexCoord, ROTATIONS};
use crate::tile::TileType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Farthest a piece may sit from its anchor
pub const MAX_PIECE_DISTANCE: u32 = 8;

/// Problems found while validating a shape loaded from data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("shape has no pieces")]
    Empty,

    #[error("anchor piece must sit at offset zero, found {0}")]
    AnchorOffset(HexCoord),

    #[error("piece {0} requires no tiles")]
    EmptyPiece(usize),

    #[error("piece {piece} requires {levels} tiles, at most 3 fit on a cell")]
    TooManyLevels { piece: usize, levels: usize },

    #[error("piece {piece} sits at {offset}, more than 8 cells from the anchor")]
    OffsetTooFar { piece: usize, offset: HexCoord },
}

/// One cell of a shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexShapePiece {
    /// Offset from the anchor before rotation
    pub offset: HexCoord,
    /// Required stack, bottom to top
    pub levels: Vec<TileType>,
}

impl HexShapePiece {
    /// Create a piece requiring `levels` at `offset`
    pub fn new(offset: HexCoord, levels: &[TileType]) -> Self {
        Self {
            offset,
            levels: levels.to_vec(),
        }
    }

    /// Required stack with any `None` padding cut off
    pub fn required_levels(&self) -> &[TileType] {
        let end = self
            .levels
            .iter()
            .position(|t| *t == TileType::None)
            .unwrap_or(self.levels.len());
        &self.levels[..end]
    }
}

/// A complete pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexShape {
    pub pieces: Vec<HexShapePiece>,
}

impl HexShape {
    /// Start a shape from its anchor stack
    pub fn new(anchor: &[TileType]) -> Self {
        Self {
            pieces: vec![HexShapePiece::new(HexCoord::ZERO, anchor)],
        }
    }

    /// Builder form of [`HexShape::add_tile`]
    pub fn with_tile(mut self, offset: HexCoord, levels: &[TileType]) -> Self {
        self.add_tile(offset, levels);
        self
    }

    /// Append a piece. Panics on a zero offset, which only the anchor may use.
    pub fn add_tile(&mut self, offset: HexCoord, levels: &[TileType]) {
        assert_ne!(offset, HexCoord::ZERO, "only the anchor sits at offset zero");
        self.pieces.push(HexShapePiece::new(offset, levels));
    }

    /// Check the invariants a shape coming from card data must hold
    pub fn validate(&self) -> Result<(), ShapeError> {
        let anchor = self.pieces.first().ok_or(ShapeError::Empty)?;
        if anchor.offset != HexCoord::ZERO {
            return Err(ShapeError::AnchorOffset(anchor.offset));
        }
        for (i, piece) in self.pieces.iter().enumerate() {
            if piece.levels.len() > MAX_ELEVATION {
                return Err(ShapeError::TooManyLevels {
                    piece: i,
                    levels: piece.levels.len(),
                });
            }
            if piece.required_levels().is_empty() {
                return Err(ShapeError::EmptyPiece(i));
            }
            if piece.offset.length() > MAX_PIECE_DISTANCE {
                return Err(ShapeError::OffsetTooFar {
                    piece: i,
                    offset: piece.offset,
                });
            }
        }
        Ok(())
    }

    /// Try to match the shape with its anchor on `anchor`.
    ///
    /// The anchor cell must be free of animals and hold exactly the anchor
    /// stack. With more pieces, rotations are tried in order 0..6: the second
    /// piece picks candidate rotations and every other piece must match under
    /// the same one. Returns the first rotation that works.
    pub fn match_at(&self, grid: &HexGrid, anchor: HexCoord) -> Option<usize> {
        let (first, rest) = self.pieces.split_first()?;
        debug_assert_eq!(first.offset, HexCoord::ZERO);

        let cell = grid.cell(anchor)?;
        if cell.has_animal() || !same_tile_stack(first.required_levels(), cell.levels()) {
            return None;
        }

        let Some((second, others)) = rest.split_first() else {
            return Some(0);
        };

        (0..ROTATIONS).find(|&rotation| {
            piece_matches(grid, anchor, second, rotation)
                && others
                    .iter()
                    .all(|piece| piece_matches(grid, anchor, piece, rotation))
        })
    }

    /// Every cell the shape covers when anchored at `anchor` with `rotation`
    pub fn footprint(&self, anchor: HexCoord, rotation: usize) -> Vec<HexCoord> {
        self.pieces
            .iter()
            .map(|piece| anchor + HexCoord::rotate60(piece.offset, rotation as i32))
            .collect()
    }
}

fn piece_matches(grid: &HexGrid, anchor: HexCoord, piece: &HexShapePiece, rotation: usize) -> bool {
    let target = anchor + HexCoord::rotate60(piece.offset, rotation as i32);
    grid.cell(target)
        .is_some_and(|cell| same_tile_stack(piece.required_levels(), cell.levels()))
}
