//! Unit classes and their fixed per-class stats

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::ColonyError;

/// Class of a unit, with the server's numeric codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum UnitClass {
    Worker = 0,
    Soldier = 1,
    Scout = 2,
}

/// Fixed properties shared by every unit of a class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitStats {
    pub max_health: u32,
    pub damage: u32,
    /// Resource units a unit can carry
    pub capacity: u32,
    /// In hexes
    pub view_range: u32,
    /// Movement budget per turn
    pub speed: u32,
    pub spawn_rate: f32,
}

const WORKER_STATS: UnitStats = UnitStats {
    max_health: 130,
    damage: 30,
    capacity: 8,
    view_range: 1,
    speed: 5,
    spawn_rate: 0.6,
};

const SOLDIER_STATS: UnitStats = UnitStats {
    max_health: 180,
    damage: 70,
    capacity: 2,
    view_range: 1,
    speed: 4,
    spawn_rate: 0.3,
};

const SCOUT_STATS: UnitStats = UnitStats {
    max_health: 80,
    damage: 20,
    capacity: 2,
    view_range: 4,
    speed: 7,
    spawn_rate: 0.1,
};

impl UnitClass {
    /// Static stats table lookup
    pub fn stats(&self) -> &'static UnitStats {
        match self {
            UnitClass::Worker => &WORKER_STATS,
            UnitClass::Soldier => &SOLDIER_STATS,
            UnitClass::Scout => &SCOUT_STATS,
        }
    }

    pub fn all() -> [UnitClass; 3] {
        [UnitClass::Worker, UnitClass::Soldier, UnitClass::Scout]
    }
}

impl TryFrom<u8> for UnitClass {
    type Error = ColonyError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(UnitClass::Worker),
            1 => Ok(UnitClass::Soldier),
            2 => Ok(UnitClass::Scout),
            other => Err(ColonyError::UnknownUnitClass(other)),
        }
    }
}

impl FromStr for UnitClass {
    type Err = ColonyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "worker" => Ok(UnitClass::Worker),
            "soldier" => Ok(UnitClass::Soldier),
            "scout" => Ok(UnitClass::Scout),
            other => Err(ColonyError::InvalidArgument(format!("unknown unit class '{other}'"))),
        }
    }
}

impl From<UnitClass> for u8 {
    fn from(class: UnitClass) -> Self {
        class as u8
    }
}
