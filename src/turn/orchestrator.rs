//! Turn orchestration
//!
//! One call per server turn: merge the snapshot into memory, resolve
//! roles, decide every unit in snapshot order and batch the non-empty paths.
//! Classes under a manual recall skip their policy and walk home.

use std::collections::BTreeSet;

use crate::colony::unit_class::UnitClass;
use crate::core::config::ColonyConfig;
use crate::core::error::Result;
use crate::grid::occupancy::Occupancy;
use crate::memory::attack::AttackWindow;
use crate::memory::clock::{Clock, SystemClock};
use crate::memory::roles::Role;
use crate::memory::world_memory::{MergeReport, WorldMemory};
use crate::protocol::command::CommandBatch;
use crate::protocol::snapshot::Snapshot;
use crate::strategy::decision_context::DecisionContext;
use crate::strategy::engine::StrategyEngine;
use crate::strategy::plan::TurnPlan;

/// Summary of the last played turn
#[derive(Debug, Clone, Default)]
pub struct TurnSummary {
    pub turn: u64,
    pub units: usize,
    pub commands: usize,
    pub attack_active: bool,
    pub merge: MergeReport,
}

pub struct TurnOrchestrator<C: Clock = SystemClock> {
    config: ColonyConfig,
    memory: WorldMemory,
    engine: StrategyEngine,
    clock: C,
    recalled: BTreeSet<UnitClass>,
    last_summary: Option<TurnSummary>,
}

impl TurnOrchestrator<SystemClock> {
    pub fn with_system_clock(config: ColonyConfig) -> Result<Self> {
        Self::new(config, SystemClock::new())
    }
}

impl<C: Clock> TurnOrchestrator<C> {
    /// Build an orchestrator; fails if `config` does not validate
    pub fn new(config: ColonyConfig, clock: C) -> Result<Self> {
        config.validate()?;
        let memory = WorldMemory::new(AttackWindow::new(config.attack.duration()));
        let engine = StrategyEngine::new(&config);
        Ok(Self {
            config,
            memory,
            engine,
            clock,
            recalled: BTreeSet::new(),
            last_summary: None,
        })
    }

    /// Decide the moves for one snapshot
    pub fn play_turn(&mut self, snapshot: &Snapshot) -> CommandBatch {
        let now = self.clock.now();
        let merge = self.memory.merge(snapshot, now);

        self.engine.assign_roles(snapshot, &mut self.memory.roles);
        if self.config.attack.auto_declare {
            self.maybe_declare_attack(snapshot);
        }
        // Re-read after a possible helper promotion; no new draws happen here
        let roles = self.engine.assign_roles(snapshot, &mut self.memory.roles);

        let attack_active = self.memory.attack_active(now);
        let occupancy = Occupancy::from_snapshot(snapshot);
        let mut plan = TurnPlan::from_snapshot(snapshot);
        let ctx = DecisionContext::new(
            snapshot,
            &self.memory,
            &occupancy,
            &self.config,
            attack_active,
        );

        let mut batch = CommandBatch::new();
        for (unit, role) in snapshot.units.iter().zip(roles) {
            let order = if self.recalled.contains(&unit.class) {
                self.engine.recall(unit, role, &ctx)
            } else {
                self.engine.decide(unit, role, &ctx, &mut plan)
            };
            batch.push(unit.id.clone(), order.path);
        }

        let summary = TurnSummary {
            turn: snapshot.turn,
            units: snapshot.units.len(),
            commands: batch.len(),
            attack_active,
            merge,
        };
        tracing::info!(
            "Turn {}: {} units, {} commands, {} known tiles, attack {}",
            summary.turn,
            summary.units,
            summary.commands,
            self.memory.known_tile_count(),
            if attack_active { "active" } else { "idle" }
        );
        self.last_summary = Some(summary);

        batch
    }

    /// Open an attack window now. Returns false if one is already running.
    pub fn declare_attack(&mut self) -> bool {
        let now = self.clock.now();
        let probability = self.config.roles.helper_probability;
        self.memory
            .declare_attack(now, probability, self.engine.rng_mut())
            .is_some()
    }

    /// Send every unit of `class` home until released. Returns false if
    /// the class was already recalled.
    pub fn recall(&mut self, class: UnitClass) -> bool {
        let added = self.recalled.insert(class);
        if added {
            tracing::info!("Recalling all {:?} units home", class);
        }
        added
    }

    /// Hand `class` back to its regular policy
    pub fn release(&mut self, class: UnitClass) -> bool {
        let removed = self.recalled.remove(&class);
        if removed {
            tracing::info!("Released {:?} units from recall", class);
        }
        removed
    }

    pub fn is_recalled(&self, class: UnitClass) -> bool {
        self.recalled.contains(&class)
    }

    fn maybe_declare_attack(&mut self, snapshot: &Snapshot) {
        if self.memory.designated_enemy_structure().is_none() {
            return;
        }
        let army = snapshot
            .units_of(UnitClass::Soldier)
            .filter(|u| self.memory.roles.get(&u.id) == Some(Role::Army))
            .count();
        if army >= self.config.attack.min_army && self.declare_attack() {
            tracing::info!("Auto-declared attack with {} army soldiers", army);
        }
    }

    pub fn memory(&self) -> &WorldMemory {
        &self.memory
    }

    pub fn config(&self) -> &ColonyConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn last_summary(&self) -> Option<&TurnSummary> {
        self.last_summary.as_ref()
    }
}
