//! Soldier policy: besiege, engage, patrol, escort

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
    let tuning = &ctx.config.strategy;

    if role == Role::Army {
        if let Some(structure) = ctx.attack_target() {
            let band = ctx.config.patrol.army;
            if let Some(decision) =
                patrol(unit, structure, band, UnitClass::Soldier, Intent::Besiege, ctx, plan)
            {
                return decision;
            }
        }
    }

    // Any nearby enemy overrides the role
    if let Some(enemy) = ctx.nearest_enemy_within(unit.position, tuning.engage_radius) {
        return Decision::move_to(Intent::Engage, enemy);
    }

    if role == Role::Defender {
        let band = ctx.config.patrol.soldier;
        if let Some(decision) = patrol(
            unit,
            ctx.home_spot(),
            band,
            UnitClass::Soldier,
            Intent::Patrol,
            ctx,
            plan,
        ) {
            return decision;
        }
    }

    let escorting = role == Role::Escort || (role == Role::Army && !ctx.attack_active);
    if escorting {
        let spot = ctx.home_spot();
        let worker = ctx
            .snapshot
            .units_of(UnitClass::Worker)
            .filter(|w| w.position.distance(&spot) > tuning.escort_safety_radius)
            .min_by_key(|w| (w.position.distance(&unit.position), w.position));
        if let Some(worker) = worker {
            return Decision::move_to(Intent::Escort, worker.position);
        }
    }

    scout::wander(unit, ctx, rng)
}
