//! Per-turn unit occupancy of the grid
//!
//! Built from the current snapshot positions only. Pending server-side moves
//! are not projected here; the strategy layer tracks those as claims.

use ahash::{AHashMap, AHashSet};

use crate::colony::unit_class::UnitClass;
use crate::grid::hex::HexCoord;
use crate::protocol::snapshot::Snapshot;

#[derive(Debug, Clone, Default)]
pub struct Occupancy {
    friendly: AHashMap<HexCoord, Vec<UnitClass>>,
    enemies: AHashSet<HexCoord>,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut occupancy = Self::new();
        for unit in &snapshot.units {
            occupancy.add_friendly(unit.position, unit.class);
        }
        for enemy in &snapshot.enemies {
            occupancy.add_enemy(enemy.position);
        }
        occupancy
    }

    pub fn add_friendly(&mut self, coord: HexCoord, class: UnitClass) {
        self.friendly.entry(coord).or_default().push(class);
    }

    pub fn add_enemy(&mut self, coord: HexCoord) {
        self.enemies.insert(coord);
    }

    /// Friendly classes standing on `coord`
    pub fn friendly_at(&self, coord: HexCoord) -> &[UnitClass] {
        self.friendly.get(&coord).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_enemy(&self, coord: HexCoord) -> bool {
        self.enemies.contains(&coord)
    }

    /// Would a unit of `mover` class collide entering `coord`?
    ///
    /// Friendly units only block their own class; any enemy blocks everyone.
    pub fn collides(&self, coord: HexCoord, mover: UnitClass) -> bool {
        self.has_enemy(coord) || self.friendly_at(coord).contains(&mover)
    }
}
