//! Per-turn claims shared by the units decided so far
//!
//! Units are decided one after another; each claim made here is visible to
//! every unit decided later in the same turn.

use std::collections::BTreeSet;

use crate::colony::unit_class::UnitClass;
use crate::core::types::UnitId;
use crate::grid::hex::HexCoord;
use crate::protocol::snapshot::Snapshot;

#[derive(Debug, Clone, Default)]
pub struct TurnPlan {
    /// Resource nodes targeted by workers earlier this turn
    resource_claims: BTreeSet<HexCoord>,
    /// Patrol slots taken earlier this turn
    slot_claims: BTreeSet<HexCoord>,
    /// Frontier hexes already picked by an explorer this turn
    frontier_claims: BTreeSet<HexCoord>,
    /// Hexes each worker stands on or is already walking to
    worker_spots: Vec<(UnitId, HexCoord)>,
}

impl TurnPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the plan with worker positions and their queued destinations
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut plan = Self::new();
        for worker in snapshot.units_of(UnitClass::Worker) {
            plan.worker_spots.push((worker.id.clone(), worker.position));
            if let Some(dest) = worker.pending_destination() {
                plan.worker_spots.push((worker.id.clone(), dest));
            }
        }
        plan
    }

    /// Is `coord` already taken by some worker other than `by`?
    pub fn is_resource_claimed(&self, coord: HexCoord, by: &UnitId) -> bool {
        self.resource_claims.contains(&coord)
            || self
                .worker_spots
                .iter()
                .any(|(id, spot)| id != by && *spot == coord)
    }

    pub fn claim_resource(&mut self, coord: HexCoord) -> bool {
        self.resource_claims.insert(coord)
    }

    pub fn is_slot_claimed(&self, coord: HexCoord) -> bool {
        self.slot_claims.contains(&coord)
    }

    pub fn claim_slot(&mut self, coord: HexCoord) -> bool {
        self.slot_claims.insert(coord)
    }

    pub fn is_frontier_claimed(&self, coord: HexCoord) -> bool {
        self.frontier_claims.contains(&coord)
    }

    pub fn claim_frontier(&mut self, coord: HexCoord) -> bool {
        self.frontier_claims.insert(coord)
    }

    pub fn claimed_resources(&self) -> &BTreeSet<HexCoord> {
        &self.resource_claims
    }

    pub fn claimed_slots(&self) -> &BTreeSet<HexCoord> {
        &self.slot_claims
    }
}
