//! End-of-game scoring, one independent rule per tile color.
//!
//! Every rule scans the whole board; nothing is tracked incrementally.
//!
//! - Green (trees): each Green top scores by the height of its stack
//! - Gray (mountains): each Gray top next to another Gray top scores by height
//! - Red (buildings): each two-high Red top scores if its neighbors show
//!   enough distinct top colors
//! - Yellow (fields): each group of at least two connected Yellow tops scores once
//! - Blue (rivers): each connected Blue group scores by its length
//!
//! Brown only ever supports other tiles and scores nothing on its own.

use crate::board::HexGrid;
use crate::hex::HexCoord;
use crate::tile::TileType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Green points for stacks of 1, 2 and 3 tiles
pub const GREEN_SIZE_POINTS: [u32; 3] = [1, 3, 7];

/// Gray points for stacks of 1, 2 and 3 tiles
pub const GRAY_SIZE_POINTS: [u32; 3] = [1, 3, 7];

/// Points for a building with enough different neighbors
pub const RED_VALIDATED: u32 = 5;

/// Points for a building without enough different neighbors
pub const RED_NOT_VALIDATED: u32 = 0;

/// Distinct neighbor colors a building needs
pub const RED_MIN_DISTINCT_NEIGHBORS: u32 = 3;

/// Points per field
pub const YELLOW_POINTS: u32 = 5;

/// River points for lengths 1 through 6
pub const BLUE_SIZE_POINTS: [u32; 6] = [0, 2, 5, 8, 11, 15];

/// River points for every tile beyond the table
pub const BLUE_POINTS_PER_EXTRA: u32 = 4;

/// Point values used by the scoring rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    pub green_points: [u32; 3],
    pub gray_points: [u32; 3],
    pub red_validated: u32,
    pub red_not_validated: u32,
    pub red_min_distinct_neighbors: u32,
    pub yellow_points: u32,
    /// Points for river lengths 1, 2, 3, ...
    pub blue_points: Vec<u32>,
    pub blue_points_per_extra: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            green_points: GREEN_SIZE_POINTS,
            gray_points: GRAY_SIZE_POINTS,
            red_validated: RED_VALIDATED,
            red_not_validated: RED_NOT_VALIDATED,
            red_min_distinct_neighbors: RED_MIN_DISTINCT_NEIGHBORS,
            yellow_points: YELLOW_POINTS,
            blue_points: BLUE_SIZE_POINTS.to_vec(),
            blue_points_per_extra: BLUE_POINTS_PER_EXTRA,
        }
    }
}

/// Points per color plus animal cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSheet {
    pub blue: u32,
    pub gray: u32,
    pub green: u32,
    pub yellow: u32,
    pub red: u32,
    pub animals: u32,
}

impl ScoreSheet {
    /// Score every color on `board`; animal points are left at zero
    pub fn from_board(board: &HexGrid, rules: &ScoringRules) -> Self {
        Self {
            blue: score_tile_type(board, TileType::Blue, rules),
            gray: score_tile_type(board, TileType::Gray, rules),
            green: score_tile_type(board, TileType::Green, rules),
            yellow: score_tile_type(board, TileType::Yellow, rules),
            red: score_tile_type(board, TileType::Red, rules),
            animals: 0,
        }
    }

    /// Sum of every line
    pub fn total(&self) -> u32 {
        self.blue + self.gray + self.green + self.yellow + self.red + self.animals
    }
}

/// Score a single color over the whole board
pub fn score_tile_type(board: &HexGrid, tile: TileType, rules: &ScoringRules) -> u32 {
    match tile {
        TileType::Green => score_green(board, rules),
        TileType::Gray => score_gray(board, rules),
        TileType::Red => score_red(board, rules),
        TileType::Yellow => score_yellow(board, rules),
        TileType::Blue => score_blue(board, rules),
        TileType::Brown | TileType::None => 0,
    }
}

fn tiered(points: &[u32; 3], height: usize) -> u32 {
    height
        .checked_sub(1)
        .and_then(|i| points.get(i))
        .copied()
        .unwrap_or(0)
}

fn score_green(board: &HexGrid, rules: &ScoringRules) -> u32 {
    board
        .iter()
        .filter(|(_, cell)| cell.top() == TileType::Green)
        .map(|(_, cell)| tiered(&rules.green_points, cell.height()))
        .sum()
}

fn score_gray(board: &HexGrid, rules: &ScoringRules) -> u32 {
    board
        .iter()
        .filter(|(coord, cell)| {
            cell.top() == TileType::Gray
                && board
                    .neighbors(*coord)
                    .any(|n| board.top_tile(n) == TileType::Gray)
        })
        .map(|(_, cell)| tiered(&rules.gray_points, cell.height()))
        .sum()
}

fn score_red(board: &HexGrid, rules: &ScoringRules) -> u32 {
    board
        .iter()
        .filter(|(_, cell)| cell.height() == 2 && cell.top() == TileType::Red)
        .map(|(coord, _)| {
            // Empty neighbors count as their own color.
            let seen = board
                .neighbors(coord)
                .fold(0u8, |mask, n| mask | board.top_tile(n).mask());
            if seen.count_ones() >= rules.red_min_distinct_neighbors {
                rules.red_validated
            } else {
                rules.red_not_validated
            }
        })
        .sum()
}

fn score_yellow(board: &HexGrid, rules: &ScoringRules) -> u32 {
    board
        .components(TileType::Yellow)
        .iter()
        .filter(|component| component.len() >= 2)
        .map(|_| rules.yellow_points)
        .sum()
}

fn score_blue(board: &HexGrid, rules: &ScoringRules) -> u32 {
    board
        .components(TileType::Blue)
        .iter()
        .map(|component| blue_score_for_size(blue_component_size(board, component), rules))
        .sum()
}

/// Points for a river of `size` tiles
pub fn blue_score_for_size(size: usize, rules: &ScoringRules) -> u32 {
    let table = &rules.blue_points;
    match size {
        0 => 0,
        s if s <= table.len() => table[s - 1],
        s => {
            let extra = (s - table.len()) as u32;
            table.last().copied().unwrap_or(0) + extra * rules.blue_points_per_extra
        }
    }
}

/// Length of a river, measured with a double sweep.
///
/// A depth-first walk from the first member records, for every cell, the
/// depth at which the walk first reached it; the deepest cell then starts a
/// second walk whose deepest depth is the result. On tree-shaped groups this
/// is the number of cells on the longest path. Groups with cycles can report
/// more than their true diameter: this is the rule as played, not a bug.
pub fn blue_component_size(board: &HexGrid, component: &[HexCoord]) -> usize {
    let Some(&start) = component.first() else {
        return 0;
    };
    let members: HashSet<HexCoord> = component.iter().copied().collect();

    let (far_end, _) = deepest_walk(board, &members, start);
    let (_, depth) = deepest_walk(board, &members, far_end);
    depth
}

fn deepest_walk(board: &HexGrid, members: &HashSet<HexCoord>, start: HexCoord) -> (HexCoord, usize) {
    let mut visited = HashSet::new();
    let mut stack = vec![(start, 1)];
    let mut deepest = (start, 0);

    while let Some((node, depth)) = stack.pop() {
        if !visited.insert(node) {
            continue;
        }
        if depth > deepest.1 {
            deepest = (node, depth);
        }
        for neighbor in board.neighbors(node) {
            if members.contains(&neighbor) && !visited.contains(&neighbor) {
                stack.push((neighbor, depth + 1));
            }
        }
    }

    deepest
}
