//! Read-only view of the turn used by every policy

use crate::colony::unit_class::UnitClass;
use crate::colony::units::{EnemyUnit, Unit};
use crate::core::config::ColonyConfig;
use crate::grid::hex::HexCoord;
use crate::grid::occupancy::Occupancy;
use crate::grid::terrain::{TerrainKind, TerrainView};
use crate::memory::world_memory::WorldMemory;
use crate::protocol::snapshot::Snapshot;

/// What a unit may look at while deciding
pub struct DecisionContext<'a> {
    pub snapshot: &'a Snapshot,
    pub memory: &'a WorldMemory,
    pub occupancy: &'a Occupancy,
    pub config: &'a ColonyConfig,
    /// Attack window state, sampled once at the start of the turn
    pub attack_active: bool,
}

impl<'a> DecisionContext<'a> {
    pub fn new(
        snapshot: &'a Snapshot,
        memory: &'a WorldMemory,
        occupancy: &'a Occupancy,
        config: &'a ColonyConfig,
        attack_active: bool,
    ) -> Self {
        Self {
            snapshot,
            memory,
            occupancy,
            config,
            attack_active,
        }
    }

    /// Main home hex; memory wins over the current snapshot
    pub fn home_spot(&self) -> HexCoord {
        self.memory.spot().unwrap_or(self.snapshot.spot)
    }

    pub fn is_home(&self, coord: HexCoord) -> bool {
        self.memory.is_home(coord) || self.snapshot.is_home(coord)
    }

    /// Closest home tile, ties broken by coordinate
    pub fn nearest_home(&self, from: HexCoord) -> HexCoord {
        self.memory
            .home()
            .iter()
            .copied()
            .min_by_key(|h| (h.distance(&from), *h))
            .unwrap_or_else(|| self.home_spot())
    }

    pub fn terrain_at(&self, coord: HexCoord) -> Option<TerrainKind> {
        self.memory
            .tile(coord)
            .map(|t| t.kind)
            .or_else(|| self.snapshot.tiles.iter().find(|t| t.coord == coord).map(|t| t.kind))
    }

    /// Standing somewhere a unit should not linger
    pub fn on_hazard_or_structure(&self, coord: HexCoord) -> bool {
        self.terrain_at(coord)
            .is_some_and(|k| k.is_hazardous() || k.is_structure())
    }

    pub fn enemies_within(&self, from: HexCoord, radius: u32) -> impl Iterator<Item = &EnemyUnit> {
        self.snapshot
            .enemies
            .iter()
            .filter(move |e| e.position.distance(&from) <= radius)
    }

    pub fn enemy_soldier_within(&self, from: HexCoord, radius: u32) -> bool {
        self.enemies_within(from, radius).any(|e| e.is_soldier())
    }

    /// Nearest enemy within `radius`, ties broken by coordinate
    pub fn nearest_enemy_within(&self, from: HexCoord, radius: u32) -> Option<HexCoord> {
        self.enemies_within(from, radius)
            .map(|e| e.position)
            .min_by_key(|p| (p.distance(&from), *p))
    }

    /// Nearest friendly unit of `class` other than `me`
    pub fn nearest_friendly(&self, me: &Unit, class: UnitClass) -> Option<&'a Unit> {
        self.snapshot
            .units
            .iter()
            .filter(|u| u.class == class && u.id != me.id)
            .min_by_key(|u| (u.position.distance(&me.position), u.position))
    }

    /// Positions of every friendly unit of `class`
    pub fn friendly_positions(&self, class: UnitClass) -> impl Iterator<Item = HexCoord> + 'a {
        self.snapshot.units_of(class).map(|u| u.position)
    }

    /// Enemy structure targeted while an attack is running
    pub fn attack_target(&self) -> Option<HexCoord> {
        if !self.attack_active {
            return None;
        }
        self.memory.designated_enemy_structure()
    }
}
