//! Friendly and enemy units as seen in a turn snapshot

use std::hash::{Hash, Hasher};

use crate::colony::resources::ResourceKind;
use crate::colony::unit_class::{UnitClass, UnitStats};
use crate::core::types::UnitId;
use crate::grid::hex::HexCoord;

/// A friendly unit under our control
///
/// Equality and hashing use the id only.
#[derive(Debug, Clone)]
pub struct Unit {
    pub id: UnitId,
    pub class: UnitClass,
    pub position: HexCoord,
    pub health: u32,
    /// Resource units currently carried
    pub carried: u32,
    pub carried_kind: Option<ResourceKind>,
    /// Hexes traversed during the previous turn
    pub last_move: Vec<HexCoord>,
    /// Remaining path the server still has queued for this unit
    pub pending_move: Vec<HexCoord>,
    pub last_attack: Option<HexCoord>,
    pub last_enemy: Option<String>,
}

impl Unit {
    pub fn new(id: impl Into<UnitId>, class: UnitClass, position: HexCoord) -> Self {
        Self {
            id: id.into(),
            class,
            position,
            health: class.stats().max_health,
            carried: 0,
            carried_kind: None,
            last_move: Vec::new(),
            pending_move: Vec::new(),
            last_attack: None,
            last_enemy: None,
        }
    }

    pub fn with_cargo(mut self, kind: ResourceKind, amount: u32) -> Self {
        self.carried = amount;
        self.carried_kind = (amount > 0).then_some(kind);
        self
    }

    pub fn with_pending_move(mut self, path: Vec<HexCoord>) -> Self {
        self.pending_move = path;
        self
    }

    pub fn stats(&self) -> &'static UnitStats {
        self.class.stats()
    }

    /// Movement budget for this turn
    pub fn speed(&self) -> u32 {
        self.stats().speed
    }

    pub fn capacity(&self) -> u32 {
        self.stats().capacity
    }

    /// Carrying at least half of capacity
    pub fn is_loaded(&self) -> bool {
        self.carried > 0 && self.carried * 2 >= self.capacity()
    }

    /// Where the server-side queued move will end, if any
    pub fn pending_destination(&self) -> Option<HexCoord> {
        self.pending_move.last().copied()
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Unit {}

impl Hash for Unit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// An enemy unit spotted this turn
///
/// Enemies have no stable id; identity is `(class, position)` for the turn.
#[derive(Debug, Clone)]
pub struct EnemyUnit {
    pub class: UnitClass,
    pub position: HexCoord,
    pub health: u32,
    pub carried: Option<u32>,
    pub attack: Option<u32>,
}

impl EnemyUnit {
    pub fn new(class: UnitClass, position: HexCoord) -> Self {
        Self {
            class,
            position,
            health: class.stats().max_health,
            carried: None,
            attack: None,
        }
    }

    pub fn is_soldier(&self) -> bool {
        self.class == UnitClass::Soldier
    }
}

impl PartialEq for EnemyUnit {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class && self.position == other.position
    }
}

impl Eq for EnemyUnit {}

impl Hash for EnemyUnit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class.hash(state);
        self.position.hash(state);
    }
}
