//! Terrain kinds and observed map tiles
//!
//! Tiles never change once observed: the world memory only ever adds them.

use std::hash::{Hash, Hasher};

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::ColonyError;
use crate::grid::hex::HexCoord;

/// Terrain kind of a hex, with the server's numeric codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TerrainKind {
    Anthill = 1, // Colony structure
    Empty = 2,
    Dirt = 3, // Slow going
    Acid = 4, // Damages units standing on it
    Stone = 5, // Impassable
}

impl TerrainKind {
    /// Can never be entered, whoever the mover is
    pub fn is_impassable(&self) -> bool {
        matches!(self, TerrainKind::Stone)
    }

    /// Damages units that end a move on it
    pub fn is_hazardous(&self) -> bool {
        matches!(self, TerrainKind::Acid)
    }

    /// Anthill tile (own home or an enemy structure)
    pub fn is_structure(&self) -> bool {
        matches!(self, TerrainKind::Anthill)
    }

    /// Is this terrain usable as a patrol slot?
    pub fn is_patrol_safe(&self) -> bool {
        !(self.is_impassable() || self.is_hazardous() || self.is_structure())
    }
}

impl TryFrom<u8> for TerrainKind {
    type Error = ColonyError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(TerrainKind::Anthill),
            2 => Ok(TerrainKind::Empty),
            3 => Ok(TerrainKind::Dirt),
            4 => Ok(TerrainKind::Acid),
            5 => Ok(TerrainKind::Stone),
            other => Err(ColonyError::UnknownTerrain(other)),
        }
    }
}

impl From<TerrainKind> for u8 {
    fn from(kind: TerrainKind) -> Self {
        kind as u8
    }
}

/// A single observed hex of the map
///
/// Equality and hashing use the coordinate only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tile {
    pub coord: HexCoord,
    pub kind: TerrainKind,
    /// Movement budget spent to enter this hex
    pub cost: u32,
}

impl Tile {
    pub fn new(coord: HexCoord, kind: TerrainKind, cost: u32) -> Self {
        Self { coord, kind, cost }
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord
    }
}

impl Eq for Tile {}

impl Hash for Tile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coord.hash(state);
    }
}

/// Read-only lookup of known tiles, the map the pathfinder searches
pub trait TerrainView {
    fn tile(&self, coord: HexCoord) -> Option<&Tile>;

    fn is_known(&self, coord: HexCoord) -> bool {
        self.tile(coord).is_some()
    }
}

impl TerrainView for AHashMap<HexCoord, Tile> {
    fn tile(&self, coord: HexCoord) -> Option<&Tile> {
        self.get(&coord)
    }
}
