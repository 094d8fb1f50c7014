//! Worker policy: deliver, flee, haul for an attack, forage, explore

use rand::Rng;

use crate::colony::unit_class::UnitClass;
use crate::colony::units::Unit;
use crate::memory::roles::Role;
use crate::strategy::action::{Decision, Intent};
use crate::strategy::decision_context::DecisionContext;
use crate::strategy::patrol::patrol;
use crate::strategy::plan::TurnPlan;
use crate::strategy::scout;

pub fn decide<R: Rng + ?Sized>(
    unit: &Unit,
    role: Role,
    ctx: &DecisionContext<'_>,
    plan: &mut TurnPlan,
    rng: &mut R,
) -> Decision {
    if let Some(decision) = deliver(unit, ctx) {
        return decision;
    }

    if ctx.enemy_soldier_within(unit.position, ctx.config.strategy.threat_radius) {
        if let Some(guard) = ctx.nearest_friendly(unit, UnitClass::Soldier) {
            return Decision::move_to(Intent::Retreat, guard.position);
        }
    }

    if role == Role::Helper {
        if let Some(structure) = ctx.attack_target() {
            let band = ctx.config.patrol.helper;
            if let Some(decision) =
                patrol(unit, structure, band, UnitClass::Worker, Intent::Haul, ctx, plan)
            {
                return decision;
            }
        }
    }

    if let Some(decision) = forage(unit, ctx, plan) {
        return decision;
    }

    scout::explore(unit, ctx, plan, rng)
}

/// Bring cargo home once loaded, and stay put while unloading
fn deliver(unit: &Unit, ctx: &DecisionContext<'_>) -> Option<Decision> {
    if unit.carried == 0 {
        return None;
    }
    let at_home = ctx.is_home(unit.position);
    if at_home {
        return Some(Decision::hold(Intent::Unload));
    }
    if unit.is_loaded() {
        return Some(Decision::move_to(
            Intent::ReturnHome,
            ctx.nearest_home(unit.position),
        ));
    }
    None
}

/// Claim the nearest unclaimed resource node off the home tiles
fn forage(unit: &Unit, ctx: &DecisionContext<'_>, plan: &mut TurnPlan) -> Option<Decision> {
    let node = ctx
        .memory
        .resources()
        .filter(|n| !n.is_depleted())
        .filter(|n| !ctx.is_home(n.coord))
        .filter(|n| !plan.is_resource_claimed(n.coord, &unit.id))
        .min_by_key(|n| (n.coord.distance(&unit.position), n.coord))?;

    plan.claim_resource(node.coord);
    Some(Decision::move_to(Intent::Forage, node.coord))
}
