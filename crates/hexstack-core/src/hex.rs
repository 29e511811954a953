//! Hex coordinate system using cube coordinates (q, r, s).
//!
//! This module provides the coordinate algebra for the board:
//! - `HexCoord`: Identifies individual board cells
//! - `rotate60`: The six-element rotation group around the origin
//! - Distance and neighbor helpers
//!
//! Cube coordinates keep the invariant `q + r + s = 0`. Because `s` is
//! redundant, equality and hashing only look at `(q, r)`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Neg, Sub};
use thiserror::Error;

/// Number of distinct 60° rotations around a hex.
pub const ROTATIONS: usize = 6;

/// Cube coordinate for the hex grid.
///
/// - `q` increases going east
/// - `r` increases going southeast
/// - `s` is kept alongside and always equals `-q - r`
///
/// Two coordinates are equal when their `q` and `r` are equal, and the hash
/// only covers `(q, r)`, so the two stay consistent with each other.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(try_from = "AxialRepr", into = "AxialRepr")]
pub struct HexCoord {
    /// Column (increases going east)
    pub q: i32,
    /// Row (increases going southeast)
    pub r: i32,
    s: i32,
}

/// Wire form of a coordinate: only the two independent axes.
#[derive(Serialize, Deserialize)]
struct AxialRepr {
    q: i32,
    r: i32,
}

/// Axial pair whose third cube axis does not fit in an `i32`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("coordinate ({q}, {r}) is out of range")]
pub struct CoordinateOutOfRange {
    pub q: i32,
    pub r: i32,
}

impl TryFrom<AxialRepr> for HexCoord {
    type Error = CoordinateOutOfRange;

    fn try_from(repr: AxialRepr) -> Result<Self, Self::Error> {
        HexCoord::try_new(repr.q, repr.r).ok_or(CoordinateOutOfRange {
            q: repr.q,
            r: repr.r,
        })
    }
}

impl From<HexCoord> for AxialRepr {
    fn from(coord: HexCoord) -> Self {
        AxialRepr {
            q: coord.q,
            r: coord.r,
        }
    }
}

impl HexCoord {
    /// The six neighboring offsets: E, NE, NW, W, SW, SE
    pub const DIRECTIONS: [HexCoord; 6] = [
        HexCoord::new(1, 0),
        HexCoord::new(1, -1),
        HexCoord::new(0, -1),
        HexCoord::new(-1, 0),
        HexCoord::new(-1, 1),
        HexCoord::new(0, 1),
    ];

    /// The origin (also the offset of every shape anchor)
    pub const ZERO: HexCoord = HexCoord::new(0, 0);

    /// Create a coordinate from its two independent axes.
    ///
    /// `-q - r` must fit in an `i32`; use [`HexCoord::try_new`] for untrusted input.
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    /// Create a coordinate, or `None` if `-q - r` does not fit in an `i32`
    pub const fn try_new(q: i32, r: i32) -> Option<Self> {
        let s = -(q as i64) - (r as i64);
        if s < i32::MIN as i64 || s > i32::MAX as i64 {
            return None;
        }
        Some(Self { q, r, s: s as i32 })
    }

    /// Create a coordinate from all three cube axes.
    ///
    /// Panics if `q + r + s != 0`.
    pub fn cube(q: i32, r: i32, s: i32) -> Self {
        assert_eq!(q + r + s, 0, "cube coordinate ({q}, {r}, {s}) off the plane");
        Self { q, r, s }
    }

    /// The third cube axis
    pub const fn s(&self) -> i32 {
        self.s
    }

    /// Hex distance from the origin
    pub fn length(&self) -> u32 {
        let sum = u64::from(self.q.unsigned_abs())
            + u64::from(self.r.unsigned_abs())
            + u64::from(self.s.unsigned_abs());
        (sum / 2) as u32
    }

    /// Hex distance between two coordinates
    pub fn distance(a: HexCoord, b: HexCoord) -> u32 {
        (a - b).length()
    }

    /// The six surrounding coordinates, in `DIRECTIONS` order
    pub fn neighbors(&self) -> [HexCoord; 6] {
        HexCoord::DIRECTIONS.map(|d| *self + d)
    }

    /// Rotate around the origin by `rotation` steps of 60°.
    ///
    /// `rotation` is taken modulo 6, so negative values wrap.
    pub fn rotate60(c: HexCoord, rotation: i32) -> HexCoord {
        match rotation.rem_euclid(ROTATIONS as i32) {
            0 => HexCoord::new(c.q, c.r),
            1 => HexCoord::new(-c.r, c.q + c.r),
            2 => HexCoord::new(-c.q - c.r, c.q),
            3 => HexCoord::new(-c.q, -c.r),
            4 => HexCoord::new(c.r, -c.q - c.r),
            _ => HexCoord::new(c.q + c.r, -c.q),
        }
    }

    /// Smallest rotation that maps `expected` onto `given`, if any
    pub fn infer_rotation(expected: HexCoord, given: HexCoord) -> Option<usize> {
        (0..ROTATIONS).find(|&k| HexCoord::rotate60(expected, k as i32) == given)
    }
}

impl PartialEq for HexCoord {
    fn eq(&self, other: &Self) -> bool {
        self.q == other.q && self.r == other.r
    }
}

impl Eq for HexCoord {}

impl Hash for HexCoord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.q.hash(state);
        self.r.hash(state);
    }
}

impl Add for HexCoord {
    type Output = HexCoord;

    fn add(self, rhs: HexCoord) -> HexCoord {
        HexCoord::cube(self.q + rhs.q, self.r + rhs.r, self.s + rhs.s)
    }
}

impl Sub for HexCoord {
    type Output = HexCoord;

    fn sub(self, rhs: HexCoord) -> HexCoord {
        HexCoord::cube(self.q - rhs.q, self.r - rhs.r, self.s - rhs.s)
    }
}

impl Neg for HexCoord {
    type Output = HexCoord;

    fn neg(self) -> HexCoord {
        HexCoord::cube(-self.q, -self.r, -self.s)
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.q, self.r, self.s)
    }
}
