//! Ring patrol slots around a center hex
//!
//! Each ring of the band is thinned to every `spacing`-th position so
//! patrollers spread out instead of clustering. Slots on known Anthill,
//! Stone or Acid tiles are dropped; unknown hexes stay eligible.

use std::collections::BTreeSet;

use crate::colony::unit_class::UnitClass;
use crate::colony::units::Unit;
use crate::core::config::RingBand;
use crate::grid::hex::{ring, HexCoord};
use crate::grid::terrain::TerrainView;
use crate::strategy::action::{Decision, Intent};
use crate::strategy::decision_context::DecisionContext;
use crate::strategy::plan::TurnPlan;

/// Candidate slots of `band` around `center`, in ring order
pub fn ring_slots(center: HexCoord, band: RingBand, world: &impl TerrainView) -> Vec<HexCoord> {
    let spacing = band.spacing.max(1);
    (band.inner..=band.outer)
        .flat_map(|radius| ring(center, radius).into_iter().step_by(spacing))
        .filter(|slot| world.tile(*slot).map_or(true, |t| t.kind.is_patrol_safe()))
        .collect()
}

/// Outcome of a slot search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotChoice {
    /// Already standing on a slot
    Hold(HexCoord),
    /// Head for this free slot
    Goto(HexCoord),
    /// Every slot is taken
    Full,
}

/// Pick a slot for a patroller at `position`.
///
/// `reserved` holds slots already taken (friendly positions plus slots
/// claimed this turn). The nearest free slot wins, ties by coordinate.
pub fn choose_slot(position: HexCoord, slots: &[HexCoord], reserved: &BTreeSet<HexCoord>) -> SlotChoice {
    if slots.contains(&position) {
        return SlotChoice::Hold(position);
    }

    slots
        .iter()
        .filter(|slot| !reserved.contains(slot))
        .min_by_key(|slot| (slot.distance(&position), **slot))
        .map_or(SlotChoice::Full, |slot| SlotChoice::Goto(*slot))
}

/// Send `unit` to a free slot of `band` around `center`, claiming it.
///
/// Positions of friendly `rivals` count as taken. Returns None when the
/// band has no free slot left.
pub fn patrol(
    unit: &Unit,
    center: HexCoord,
    band: RingBand,
    rivals: UnitClass,
    intent: Intent,
    ctx: &DecisionContext<'_>,
    plan: &mut TurnPlan,
) -> Option<Decision> {
    let slots = ring_slots(center, band, ctx.memory);
    let mut reserved: BTreeSet<HexCoord> = ctx.friendly_positions(rivals).collect();
    reserved.extend(plan.claimed_slots().iter().copied());

    match choose_slot(unit.position, &slots, &reserved) {
        SlotChoice::Hold(slot) => {
            plan.claim_slot(slot);
            Some(Decision::hold(intent))
        }
        SlotChoice::Goto(slot) => {
            plan.claim_slot(slot);
            Some(Decision::move_to(intent, slot))
        }
        SlotChoice::Full => None,
    }
}
