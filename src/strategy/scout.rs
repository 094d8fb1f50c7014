//! Scout policy, plus the exploration and wander fallbacks other classes reuse

use rand::seq::SliceRandom;
use rand::Rng;

use crate::colony::unit_class::UnitClass;
use crate::colony::units::Unit;
use crate::grid::hex::HexCoord;
use crate::grid::terrain::TerrainView;
use crate::memory::roles::Role;
use crate::strategy::action::{Decision, Intent};
use crate::strategy::decision_context::DecisionContext;
use crate::strategy::patrol::patrol;
use crate::strategy::plan::TurnPlan;

pub fn decide<R: Rng + ?Sized>(
    unit: &Unit,
    role: Role,
    ctx: &DecisionContext<'_>,
    plan: &mut TurnPlan,
    rng: &mut R,
) -> Decision {
    match role {
        Role::Scout => explore(unit, ctx, plan, rng),
        Role::Defender => patrol(
            unit,
            ctx.home_spot(),
            ctx.config.patrol.scout,
            UnitClass::Scout,
            Intent::Patrol,
            ctx,
            plan,
        )
        .unwrap_or_else(|| wander(unit, ctx, rng)),
        _ => wander(unit, ctx, rng),
    }
}

/// Head for the nearest frontier hex no other explorer picked this turn
pub fn explore<R: Rng + ?Sized>(
    unit: &Unit,
    ctx: &DecisionContext<'_>,
    plan: &mut TurnPlan,
    rng: &mut R,
) -> Decision {
    let target = ctx
        .memory
        .frontier()
        .iter()
        .filter(|h| !plan.is_frontier_claimed(**h))
        .min_by_key(|h| (h.distance(&unit.position), **h))
        .copied();

    match target {
        Some(hex) => {
            plan.claim_frontier(hex);
            Decision::move_to(Intent::Explore, hex)
        }
        None => wander(unit, ctx, rng),
    }
}

/// Step off a hazard or structure tile, otherwise hold
pub fn wander<R: Rng + ?Sized>(unit: &Unit, ctx: &DecisionContext<'_>, rng: &mut R) -> Decision {
    if !ctx.on_hazard_or_structure(unit.position) {
        return Decision::hold(Intent::Idle);
    }

    let options: Vec<HexCoord> = unit
        .position
        .neighbors()
        .into_iter()
        .filter(|n| can_step(unit, *n, ctx))
        .collect();

    match options.choose(rng) {
        Some(next) => Decision::step(Intent::Wander, *next),
        None => Decision::hold(Intent::Idle),
    }
}

fn can_step(unit: &Unit, to: HexCoord, ctx: &DecisionContext<'_>) -> bool {
    let Some(tile) = ctx.memory.tile(to) else {
        return false;
    };
    if tile.kind.is_impassable() || tile.cost > unit.speed() {
        return false;
    }
    if tile.kind.is_structure() && !ctx.memory.is_home(to) {
        return false;
    }
    !ctx.occupancy.collides(to, unit.class)
}
