//! Game board representation: a fixed set of hex cells holding tile stacks.
//!
//! This module contains:
//! - Board layouts and construction
//! - Placement validation
//! - Neighbor queries and connected-component discovery
//! - Shape matching over the whole board

use crate::cell::GridCell;
use crate::hex::HexCoord;
use crate::shape::HexShape;
use crate::tile::{Animal, TileType};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Default number of board rows
pub const STANDARD_ROWS: u32 = 5;

/// Default number of board columns
pub const STANDARD_COLUMNS: u32 = 5;

/// Shape of the region covered by the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoardLayout {
    /// Alternating long and short columns kept level with each other.
    /// A 5 × 5 board has 5 + 4 + 5 + 4 + 5 = 23 cells.
    #[default]
    Staggered,
    /// Every column has the full length and is sheared along the r axis.
    Parallelogram,
}

impl BoardLayout {
    /// Coordinates of a `rows` × `columns` board in construction order
    pub fn coordinates(self, rows: u32, columns: u32) -> Vec<HexCoord> {
        let rows = rows as i32;
        let columns = columns as i32;
        let mut coords = Vec::new();

        for q in 0..rows {
            match self {
                BoardLayout::Staggered => {
                    let q_offset = q.div_euclid(2);
                    let length = if q % 2 == 0 { columns } else { columns - 1 };
                    for r in -q_offset..length - q_offset {
                        coords.push(HexCoord::new(q, r));
                    }
                }
                BoardLayout::Parallelogram => {
                    for r in 0..columns {
                        coords.push(HexCoord::new(q, r));
                    }
                }
            }
        }

        coords
    }
}

/// Verdict of a placement check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementOutcome {
    /// The tile may be placed
    Validated,
    /// Not the moment to place tiles
    InvalidPhase,
    /// The stacking rules (or the market) refuse this tile type here
    InvalidType,
    /// No such cell on the board
    InvalidCoordinate,
}

/// The complete game board
///
/// Use [`HexGrid::to_json_friendly`] to serialize; coordinates are not string keys.
#[derive(Debug, Clone)]
pub struct HexGrid {
    /// All cells indexed by coordinate
    cells: HashMap<HexCoord, GridCell>,
    /// Coordinates in construction order, for deterministic iteration
    order: Vec<HexCoord>,
    layout: BoardLayout,
}

impl HexGrid {
    /// Create a board covering `rows` × `columns` cells in the given layout.
    ///
    /// Panics if the layout produces the same coordinate twice.
    pub fn new(rows: u32, columns: u32, layout: BoardLayout) -> Self {
        let order = layout.coordinates(rows, columns);
        let mut cells = HashMap::with_capacity(order.len());
        for coord in &order {
            let previous = cells.insert(*coord, GridCell::new());
            assert!(previous.is_none(), "duplicate board coordinate {coord}");
        }

        Self {
            cells,
            order,
            layout,
        }
    }

    /// The regular 5 × 5 staggered board
    pub fn standard() -> Self {
        Self::new(STANDARD_ROWS, STANDARD_COLUMNS, BoardLayout::Staggered)
    }

    // ==================== Query Methods ====================

    /// Layout the board was built with
    pub fn layout(&self) -> BoardLayout {
        self.layout
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the board has no cells at all
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Check if a coordinate belongs to the board
    pub fn is_valid_coordinate(&self, coord: HexCoord) -> bool {
        self.cells.contains_key(&coord)
    }

    /// Get a cell by coordinate
    pub fn cell(&self, coord: HexCoord) -> Option<&GridCell> {
        self.cells.get(&coord)
    }

    /// All cells in construction order
    pub fn iter(&self) -> impl Iterator<Item = (HexCoord, &GridCell)> + '_ {
        self.order.iter().map(move |coord| (*coord, &self.cells[coord]))
    }

    /// Top tile of a cell, `None` for empty or unknown cells
    pub fn top_tile(&self, coord: HexCoord) -> TileType {
        self.cell(coord).map(GridCell::top).unwrap_or_default()
    }

    /// Animal on a cell, `None` for free or unknown cells
    pub fn animal_at(&self, coord: HexCoord) -> Animal {
        self.cell(coord).map(GridCell::animal).unwrap_or_default()
    }

    /// Neighbors of `coord` that exist on the board
    pub fn neighbors(&self, coord: HexCoord) -> impl Iterator<Item = HexCoord> + '_ {
        coord
            .neighbors()
            .into_iter()
            .filter(move |c| self.is_valid_coordinate(*c))
    }

    // ==================== Validation Methods ====================

    /// Check whether `tile` could be stacked on `coord`.
    ///
    /// Never returns [`PlacementOutcome::InvalidPhase`]; phases belong to the game.
    pub fn can_place_tile(&self, coord: HexCoord, tile: TileType) -> PlacementOutcome {
        match self.cell(coord) {
            Some(cell) if cell.can_place(tile) => PlacementOutcome::Validated,
            Some(_) => PlacementOutcome::InvalidType,
            None => PlacementOutcome::InvalidCoordinate,
        }
    }

    // ==================== Mutation Methods ====================

    /// Stack a tile if the rules allow it.
    ///
    /// Returns the level it landed on, or `None` if nothing was placed.
    pub fn place_tile(&mut self, coord: HexCoord, tile: TileType) -> Option<usize> {
        let cell = self.cells.get_mut(&coord)?;
        if !cell.can_place(tile) {
            return None;
        }
        cell.add_tile(tile)
    }

    /// Put an animal on a cell. Fails on unknown or already occupied cells.
    pub fn place_animal(&mut self, coord: HexCoord, animal: Animal) -> bool {
        self.cells
            .get_mut(&coord)
            .is_some_and(|cell| cell.place_animal(animal))
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        for cell in self.cells.values_mut() {
            cell.clear();
        }
    }

    // ==================== Graph Queries ====================

    /// Cells connected to `coord` through neighbors topped with `tile`.
    ///
    /// The start cell is always part of the result; callers pass a cell whose
    /// top already is `tile`. Cells are returned in discovery order.
    pub fn connected_tiles(&self, coord: HexCoord, tile: TileType) -> Vec<HexCoord> {
        let mut visited = HashSet::from([coord]);
        let mut component = Vec::new();
        let mut stack = vec![coord];

        while let Some(current) = stack.pop() {
            component.push(current);
            for neighbor in self.neighbors(current) {
                if self.top_tile(neighbor) == tile && visited.insert(neighbor) {
                    stack.push(neighbor);
                }
            }
        }

        component
    }

    /// Every connected component of cells topped with `tile`, in board order
    pub fn components(&self, tile: TileType) -> Vec<Vec<HexCoord>> {
        let mut assigned = HashSet::new();
        let mut components = Vec::new();

        for (coord, cell) in self.iter() {
            if cell.top() != tile || assigned.contains(&coord) {
                continue;
            }
            let component = self.connected_tiles(coord, tile);
            assigned.extend(component.iter().copied());
            components.push(component);
        }

        components
    }

    // ==================== Shape Matching ====================

    /// Match `shape` anchored at `coord`, returning the rotation used
    pub fn match_shape(&self, coord: HexCoord, shape: &HexShape) -> Option<usize> {
        shape.match_at(self, coord)
    }

    /// Every anchor where `shape` matches, with the first rotation that fits
    pub fn matching_positions<'a>(
        &'a self,
        shape: &'a HexShape,
    ) -> impl Iterator<Item = (HexCoord, usize)> + 'a {
        self.order
            .iter()
            .filter_map(move |coord| shape.match_at(self, *coord).map(|rotation| (*coord, rotation)))
    }

    /// Convert to a JSON-friendly representation with arrays instead of HashMaps
    pub fn to_json_friendly(&self) -> BoardJson {
        BoardJson {
            cells: self
                .iter()
                .map(|(coord, cell)| CellJson {
                    q: coord.q,
                    r: coord.r,
                    levels: cell.levels().to_vec(),
                    animal: cell.animal(),
                })
                .collect(),
        }
    }
}

impl Default for HexGrid {
    fn default() -> Self {
        Self::standard()
    }
}

/// JSON-friendly board representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardJson {
    pub cells: Vec<CellJson>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellJson {
    pub q: i32,
    pub r: i32,
    pub levels: Vec<TileType>,
    pub animal: Animal,
}
