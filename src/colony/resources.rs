//! Resource nodes scattered over the map

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::core::error::ColonyError;
use crate::grid::hex::HexCoord;

/// Kind of gatherable resource, with the server's numeric codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ResourceKind {
    Apple = 1,
    Bread = 2,
    Nectar = 3,
}

impl TryFrom<u8> for ResourceKind {
    type Error = ColonyError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(ResourceKind::Apple),
            2 => Ok(ResourceKind::Bread),
            3 => Ok(ResourceKind::Nectar),
            other => Err(ColonyError::UnknownResourceKind(other)),
        }
    }
}

impl From<ResourceKind> for u8 {
    fn from(kind: ResourceKind) -> Self {
        kind as u8
    }
}

/// A pile of resources on a hex
///
/// Identity is the coordinate; a node with zero amount is treated as gone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResourceNode {
    pub coord: HexCoord,
    pub kind: ResourceKind,
    pub amount: u32,
}

impl ResourceNode {
    pub fn new(coord: HexCoord, kind: ResourceKind, amount: u32) -> Self {
        Self { coord, kind, amount }
    }

    pub fn is_depleted(&self) -> bool {
        self.amount == 0
    }
}

impl PartialEq for ResourceNode {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord
    }
}

impl Eq for ResourceNode {}

impl Hash for ResourceNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coord.hash(state);
    }
}
