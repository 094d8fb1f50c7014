//! Hex coordinate system (axial coordinates)
//!
//! Uses axial coordinates (q, r) for easy neighbor calculation.
//! The derived ordering (q first, then r) is the tie-break used everywhere
//! a deterministic choice between equally good hexes is needed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::{ColonyError, Result};

/// Axial hex coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Cube coordinate S (derived from q and r)
    pub fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Hex-grid distance: `(|dq| + |dq + dr| + |dr|) / 2`
    pub fn distance(&self, other: &Self) -> u32 {
        let dq = self.q - other.q;
        let dr = self.r - other.r;
        (dq.unsigned_abs() + (dq + dr).unsigned_abs() + dr.unsigned_abs()) / 2
    }

    /// Get all 6 neighboring hex coordinates
    pub fn neighbors(&self) -> [HexCoord; 6] {
        [
            HexCoord::new(self.q + 1, self.r),
            HexCoord::new(self.q + 1, self.r - 1),
            HexCoord::new(self.q, self.r - 1),
            HexCoord::new(self.q - 1, self.r),
            HexCoord::new(self.q - 1, self.r + 1),
            HexCoord::new(self.q, self.r + 1),
        ]
    }

    pub fn is_adjacent(&self, other: &Self) -> bool {
        self.distance(other) == 1
    }
}

impl From<(i32, i32)> for HexCoord {
    fn from((q, r): (i32, i32)) -> Self {
        Self::new(q, r)
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

pub fn hex_distance(a: HexCoord, b: HexCoord) -> u32 {
    a.distance(&b)
}

pub fn neighbors(hex: HexCoord) -> [HexCoord; 6] {
    hex.neighbors()
}

/// Enumerate every hex whose distance `d` from `center` lies in the band
/// `small_radius ⋚ d ⋚ big_radius`.
///
/// A strict flag excludes its boundary distance. Hexes come out in a fixed
/// order: offset `q` ascending, then offset `r` ascending.
///
/// Fails with [`ColonyError::InvalidArgument`] when `big_radius < small_radius`.
pub fn area(
    center: HexCoord,
    small_radius: u32,
    big_radius: u32,
    small_strict: bool,
    big_strict: bool,
) -> Result<Vec<HexCoord>> {
    if big_radius < small_radius {
        return Err(ColonyError::InvalidArgument(format!(
            "big radius ({big_radius}) must be >= small radius ({small_radius})"
        )));
    }

    let big = big_radius as i32;
    let origin = HexCoord::default();
    let mut hexes = Vec::new();

    for q in -big..=big {
        for r in -big..=big {
            let d = origin.distance(&HexCoord::new(q, r));
            let above_small = d > small_radius || (!small_strict && d == small_radius);
            let below_big = d < big_radius || (!big_strict && d == big_radius);
            if above_small && below_big {
                hexes.push(HexCoord::new(center.q + q, center.r + r));
            }
        }
    }

    Ok(hexes)
}

/// Hexes at exactly `radius` from `center`
pub fn ring(center: HexCoord, radius: u32) -> Vec<HexCoord> {
    area(center, radius, radius, false, false).unwrap_or_default()
}

/// Hexes within `radius` of `center` (inclusive, center included)
pub fn disk(center: HexCoord, radius: u32) -> Vec<HexCoord> {
    area(center, 0, radius, false, false).unwrap_or_default()
}
