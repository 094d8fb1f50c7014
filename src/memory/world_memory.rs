//! Cross-turn world memory
//!
//! Each turn only shows what our units can see. The memory folds those
//! partial views together:
//! - tiles are remembered forever and never retyped
//! - resource nodes keep their last observed amount and vanish once seen
//!   empty or missing from a visible tile
//! - the home set is fixed by the first snapshot that reports one
//! - anthills outside the home set are recorded as enemy structures
//! - hexes inside a unit's view that the server does not report are off
//!   the map and leave the frontier for good

use std::collections::{BTreeSet, HashSet};

use ahash::AHashMap;
use rand::Rng;

use crate::colony::resources::ResourceNode;
use crate::core::types::{Timestamp, TurnNumber, UnitId};
use crate::grid::hex::{disk, HexCoord};
use crate::grid::terrain::{TerrainView, Tile};
use crate::memory::attack::AttackWindow;
use crate::memory::roles::RoleStore;
use crate::protocol::snapshot::Snapshot;

/// What changed during one merge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub new_tiles: usize,
    pub new_structures: usize,
    pub resources_updated: usize,
    pub resources_dropped: usize,
    pub roles_pruned: usize,
    pub frontier_retired: usize,
    pub attack_expired: bool,
}

#[derive(Debug, Clone)]
pub struct WorldMemory {
    tiles: AHashMap<HexCoord, Tile>,
    resources: AHashMap<HexCoord, ResourceNode>,
    home: BTreeSet<HexCoord>,
    spot: Option<HexCoord>,
    enemy_structures: BTreeSet<HexCoord>,
    /// Unknown hexes adjacent to at least one known tile
    frontier: BTreeSet<HexCoord>,
    /// Hexes seen to not exist
    void: BTreeSet<HexCoord>,
    pub roles: RoleStore,
    pub attack: AttackWindow,
    last_turn: Option<TurnNumber>,
}

impl WorldMemory {
    pub fn new(attack: AttackWindow) -> Self {
        Self {
            tiles: AHashMap::new(),
            resources: AHashMap::new(),
            home: BTreeSet::new(),
            spot: None,
            enemy_structures: BTreeSet::new(),
            frontier: BTreeSet::new(),
            void: BTreeSet::new(),
            roles: RoleStore::new(),
            attack,
            last_turn: None,
        }
    }

    /// Fold one snapshot into memory
    pub fn merge(&mut self, snapshot: &Snapshot, now: Timestamp) -> MergeReport {
        let mut report = MergeReport::default();

        if self.home.is_empty() && !snapshot.home.is_empty() {
            self.home = snapshot.home.iter().copied().collect();
            self.spot = Some(snapshot.spot);
            // Anthills seen before home was known may have been our own
            let home = &self.home;
            self.enemy_structures.retain(|c| !home.contains(c));
        }

        for tile in &snapshot.tiles {
            if self.record_tile(*tile) {
                report.new_tiles += 1;
                if tile.kind.is_structure() && !self.home.contains(&tile.coord) {
                    if self.enemy_structures.insert(tile.coord) {
                        report.new_structures += 1;
                        tracing::info!("Discovered enemy structure at {}", tile.coord);
                    }
                }
            }
        }

        report.frontier_retired = self.retire_unseen(snapshot);

        let (updated, dropped) = self.merge_resources(snapshot);
        report.resources_updated = updated;
        report.resources_dropped = dropped;

        let alive: HashSet<UnitId> = snapshot.units.iter().map(|u| u.id.clone()).collect();
        report.roles_pruned = self.roles.retain_alive(&alive);

        if self.attack.expire(now) {
            report.attack_expired = true;
            tracing::info!("Attack window expired");
        }

        self.last_turn = Some(snapshot.turn);
        report
    }

    /// Insert a tile if unseen; returns true when it was new
    fn record_tile(&mut self, tile: Tile) -> bool {
        if self.tiles.contains_key(&tile.coord) {
            return false;
        }
        self.tiles.insert(tile.coord, tile);
        self.frontier.remove(&tile.coord);
        self.void.remove(&tile.coord);
        for n in tile.coord.neighbors() {
            if !self.tiles.contains_key(&n) && !self.void.contains(&n) {
                self.frontier.insert(n);
            }
        }
        true
    }

    /// Mark unreported hexes within view of our units as void.
    ///
    /// The server reports every tile a unit can see, so a hex in range that
    /// is still unknown lies past the map border. Returns how many frontier
    /// hexes were retired.
    fn retire_unseen(&mut self, snapshot: &Snapshot) -> usize {
        let mut retired = 0;
        for unit in &snapshot.units {
            for hex in disk(unit.position, unit.stats().view_range) {
                if self.tiles.contains_key(&hex) || !self.void.insert(hex) {
                    continue;
                }
                if self.frontier.remove(&hex) {
                    retired += 1;
                }
            }
        }
        if retired > 0 {
            tracing::debug!("Retired {} frontier hexes past the map border", retired);
        }
        retired
    }

    /// Known to lie outside the map
    pub fn is_void(&self, coord: HexCoord) -> bool {
        self.void.contains(&coord)
    }

    fn merge_resources(&mut self, snapshot: &Snapshot) -> (usize, usize) {
        let visible: HashSet<HexCoord> = snapshot.tiles.iter().map(|t| t.coord).collect();
        let reported: HashSet<HexCoord> = snapshot.resources.iter().map(|r| r.coord).collect();

        let before = self.resources.len();
        self.resources
            .retain(|coord, _| !visible.contains(coord) || reported.contains(coord));
        let mut dropped = before - self.resources.len();

        let mut updated = 0;
        for node in &snapshot.resources {
            if node.is_depleted() {
                if self.resources.remove(&node.coord).is_some() {
                    dropped += 1;
                }
            } else {
                self.resources.insert(node.coord, *node);
                updated += 1;
            }
        }

        (updated, dropped)
    }

    /// Open an attack window and promote foragers to helpers.
    ///
    /// Does nothing while a window is already active. Returns the number of
    /// promoted workers, or `None` if the declaration was a no-op.
    pub fn declare_attack<R: Rng + ?Sized>(
        &mut self,
        now: Timestamp,
        helper_probability: f64,
        rng: &mut R,
    ) -> Option<usize> {
        if !self.attack.start(now) {
            return None;
        }
        let promoted = self.roles.promote_helpers(helper_probability, rng);
        tracing::info!(
            "Attack declared, {} workers reassigned to helper, window ends at {:?}",
            promoted,
            self.attack.expires_at()
        );
        Some(promoted)
    }

    pub fn attack_active(&self, now: Timestamp) -> bool {
        self.attack.is_active(now)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    pub fn known_tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Live resource nodes (amount > 0), in no particular order
    pub fn resources(&self) -> impl Iterator<Item = &ResourceNode> {
        self.resources.values()
    }

    pub fn resource_at(&self, coord: HexCoord) -> Option<&ResourceNode> {
        self.resources.get(&coord)
    }

    pub fn home(&self) -> &BTreeSet<HexCoord> {
        &self.home
    }

    pub fn is_home(&self, coord: HexCoord) -> bool {
        self.home.contains(&coord)
    }

    /// Main home hex, once known
    pub fn spot(&self) -> Option<HexCoord> {
        self.spot
    }

    pub fn enemy_structures(&self) -> &BTreeSet<HexCoord> {
        &self.enemy_structures
    }

    /// Attack target: the enemy structure closest to our spot
    pub fn designated_enemy_structure(&self) -> Option<HexCoord> {
        let spot = self.spot?;
        self.enemy_structures
            .iter()
            .min_by_key(|c| (c.distance(&spot), **c))
            .copied()
    }

    pub fn frontier(&self) -> &BTreeSet<HexCoord> {
        &self.frontier
    }

    pub fn last_turn(&self) -> Option<TurnNumber> {
        self.last_turn
    }
}

impl TerrainView for WorldMemory {
    fn tile(&self, coord: HexCoord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }
}
