//! Strategy engine: roles in, paths out
//!
//! Owns the seeded RNG used for every random choice of the bot, so a fixed
//! seed and the same snapshots replay to the same commands.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::colony::unit_class::UnitClass;
use crate::colony::units::Unit;
use crate::core::config::ColonyConfig;
use crate::grid::hex::HexCoord;
use crate::grid::pathfinding::{Mover, PathFinder};
use crate::memory::roles::{Role, RoleStore};
use crate::protocol::snapshot::Snapshot;
use crate::strategy::action::{Action, Decision, Intent};
use crate::strategy::decision_context::DecisionContext;
use crate::strategy::plan::TurnPlan;
use crate::strategy::{scout, soldier, worker};

/// A decision resolved into the path to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOrder {
    pub role: Role,
    pub decision: Decision,
    pub path: Vec<HexCoord>,
}

pub struct StrategyEngine {
    rng: ChaCha8Rng,
    finder: PathFinder,
}

impl StrategyEngine {
    pub fn new(config: &ColonyConfig) -> Self {
        Self::with_seed(config.seed, config.strategy.acid_penalty)
    }

    pub fn with_seed(seed: u64, acid_penalty: f32) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            finder: PathFinder::new(acid_penalty),
        }
    }

    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn finder(&self) -> &PathFinder {
        &self.finder
    }

    /// Resolve the role of every unit in snapshot order
    pub fn assign_roles(&mut self, snapshot: &Snapshot, roles: &mut RoleStore) -> Vec<Role> {
        snapshot
            .units
            .iter()
            .map(|unit| roles.resolve(unit, &mut self.rng))
            .collect()
    }

    /// Pick an action for `unit` and turn it into a path
    pub fn decide(
        &mut self,
        unit: &Unit,
        role: Role,
        ctx: &DecisionContext<'_>,
        plan: &mut TurnPlan,
    ) -> UnitOrder {
        let decision = match unit.class {
            UnitClass::Worker => worker::decide(unit, role, ctx, plan, &mut self.rng),
            UnitClass::Soldier => soldier::decide(unit, role, ctx, plan, &mut self.rng),
            UnitClass::Scout => scout::decide(unit, role, ctx, plan, &mut self.rng),
        };
        self.order(unit, role, decision, ctx)
    }

    /// Walk `unit` to the nearest home tile regardless of its role
    pub fn recall(&mut self, unit: &Unit, role: Role, ctx: &DecisionContext<'_>) -> UnitOrder {
        let decision = if ctx.is_home(unit.position) {
            Decision::hold(Intent::Recall)
        } else {
            Decision::move_to(Intent::Recall, ctx.nearest_home(unit.position))
        };
        self.order(unit, role, decision, ctx)
    }

    fn order(
        &mut self,
        unit: &Unit,
        role: Role,
        decision: Decision,
        ctx: &DecisionContext<'_>,
    ) -> UnitOrder {
        let path = match decision.action {
            Action::Hold => Vec::new(),
            Action::Step(next) => vec![next],
            Action::MoveTo(target) => {
                let mover = Mover::new(unit.class, ctx.memory.home());
                self.finder.find_path(
                    unit.position,
                    target,
                    unit.speed(),
                    ctx.memory,
                    ctx.occupancy,
                    &mover,
                )
            }
        };

        tracing::debug!(
            "Unit {} ({}) {}: {:?} -> {} steps",
            unit.id,
            role,
            decision.intent,
            decision.target(),
            path.len()
        );

        UnitOrder {
            role,
            decision,
            path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colony::resources::ResourceKind;
    use crate::core::types::Timestamp;
    use crate::grid::occupancy::Occupancy;
    use crate::grid::terrain::{TerrainKind, Tile};
    use crate::memory::attack::AttackWindow;
    use crate::memory::world_memory::WorldMemory;
    use std::time::Duration;

    fn field(snapshot: &mut Snapshot, radius: i32) {
        for q in -radius..=radius {
            for r in -radius..=radius {
                let c = HexCoord::new(q, r);
                let kind = if snapshot.home.contains(&c) {
                    TerrainKind::Anthill
                } else {
                    TerrainKind::Empty
                };
                snapshot.tiles.push(Tile::new(c, kind, 1));
            }
        }
    }

    #[test]
    fn test_assign_roles_is_stable_across_calls() {
        let mut snapshot = Snapshot::new(1, HexCoord::new(0, 0));
        snapshot.units = (0..6)
            .map(|i| Unit::new(format!("s{i}"), UnitClass::Soldier, HexCoord::new(i, 0)))
            .collect();
        let mut engine = StrategyEngine::new(&ColonyConfig::default());
        let mut roles = RoleStore::new();
        let first = engine.assign_roles(&snapshot, &mut roles);
        let second = engine.assign_roles(&snapshot, &mut roles);
        assert_eq!(first, second);
    }

    #[test]
    fn test_loaded_worker_path_goes_home() {
        let mut snapshot = Snapshot::new(1, HexCoord::new(0, 0));
        snapshot.home = vec![HexCoord::new(0, 0)];
        field(&mut snapshot, 4);
        let worker = Unit::new("w", UnitClass::Worker, HexCoord::new(3, 0))
            .with_cargo(ResourceKind::Apple, 6);
        snapshot.units = vec![worker.clone()];

        let mut memory = WorldMemory::new(AttackWindow::new(Duration::from_secs(60)));
        memory.merge(&snapshot, Timestamp::default());
        let occ = Occupancy::from_snapshot(&snapshot);
        let config = ColonyConfig::default();
        let ctx = DecisionContext::new(&snapshot, &memory, &occ, &config, false);

        let mut engine = StrategyEngine::new(&config);
        let order = engine.decide(&worker, Role::Forager, &ctx, &mut TurnPlan::new());
        assert_eq!(order.decision.intent, Intent::ReturnHome);
        assert_eq!(order.path.len(), 3);
        assert_eq!(order.path.last(), Some(&HexCoord::new(0, 0)));
    }

    #[test]
    fn test_hold_produces_empty_path() {
        let mut snapshot = Snapshot::new(1, HexCoord::new(0, 0));
        snapshot.home = vec![HexCoord::new(0, 0)];
        let worker = Unit::new("w", UnitClass::Worker, HexCoord::new(0, 0))
            .with_cargo(ResourceKind::Bread, 5);
        snapshot.units = vec![worker.clone()];

        let mut memory = WorldMemory::new(AttackWindow::new(Duration::from_secs(60)));
        memory.merge(&snapshot, Timestamp::default());
        let occ = Occupancy::from_snapshot(&snapshot);
        let config = ColonyConfig::default();
        let ctx = DecisionContext::new(&snapshot, &memory, &occ, &config, false);

        let mut engine = StrategyEngine::new(&config);
        let order = engine.decide(&worker, Role::Forager, &ctx, &mut TurnPlan::new());
        assert!(order.path.is_empty());
    }
}
