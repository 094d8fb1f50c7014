//! Raw JSON shapes of the arena snapshot
//!
//! Enum fields are kept as raw codes here; validation happens when the
//! wire snapshot is converted into a [`Snapshot`](super::Snapshot).

use serde::{Deserialize, Serialize};

use crate::grid::hex::HexCoord;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSnapshot {
    #[serde(default)]
    pub ants: Vec<WireAnt>,
    #[serde(default)]
    pub enemies: Vec<WireEnemy>,
    #[serde(default)]
    pub food: Vec<WireFood>,
    #[serde(default)]
    pub home: Vec<HexCoord>,
    #[serde(default)]
    pub map: Vec<WireTile>,
    #[serde(default)]
    pub spot: Option<HexCoord>,
    #[serde(default)]
    pub next_turn_in: f64,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub turn_no: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireAnt {
    pub id: String,
    #[serde(rename = "type")]
    pub class: u8,
    pub q: i32,
    pub r: i32,
    pub health: u32,
    #[serde(default)]
    pub food: Option<WireCargo>,
    #[serde(default)]
    pub last_move: Option<Vec<HexCoord>>,
    #[serde(default, rename = "move")]
    pub pending_move: Option<Vec<HexCoord>>,
    #[serde(default)]
    pub last_attack: Option<WirePoint>,
    #[serde(default)]
    pub last_enemy_ant: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireEnemy {
    #[serde(rename = "type")]
    pub class: u8,
    pub q: i32,
    pub r: i32,
    pub health: u32,
    #[serde(default)]
    pub food: Option<WireCargo>,
    #[serde(default)]
    pub attack: Option<u32>,
}

/// Carried resources; the server sends `{"amount": 0, "type": 0}` for nothing
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WireCargo {
    #[serde(default)]
    pub amount: u32,
    #[serde(default, rename = "type")]
    pub kind: u8,
}

/// Coordinate that may arrive as an empty object
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WirePoint {
    #[serde(default)]
    pub q: Option<i32>,
    #[serde(default)]
    pub r: Option<i32>,
}

impl WirePoint {
    pub fn coord(&self) -> Option<HexCoord> {
        Some(HexCoord::new(self.q?, self.r?))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireFood {
    pub q: i32,
    pub r: i32,
    #[serde(rename = "type")]
    pub kind: u8,
    pub amount: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireTile {
    pub q: i32,
    pub r: i32,
    #[serde(rename = "type")]
    pub kind: u8,
    pub cost: u32,
}
