//! Sticky per-unit roles
//!
//! A role is drawn once, on the unit's first decision, and kept for the
//! unit's lifetime. The only override is the attack declaration, which
//! turns some foragers into helpers.

use std::collections::HashSet;
use std::fmt;

use ahash::AHashMap;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::colony::unit_class::UnitClass;
use crate::colony::units::Unit;
use crate::core::types::UnitId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Worker gathering resources
    Forager,
    /// Worker supporting an attack
    Helper,
    /// Patrols a ring around home
    Defender,
    /// Soldier joining attacks on enemy structures
    Army,
    /// Soldier shadowing workers away from home
    Escort,
    /// Explores unknown territory
    Scout,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Roles a unit of `class` can be drawn into
pub fn role_domain(class: UnitClass) -> &'static [Role] {
    match class {
        UnitClass::Worker => &[Role::Forager],
        UnitClass::Soldier => &[Role::Defender, Role::Army, Role::Escort],
        UnitClass::Scout => &[Role::Scout, Role::Defender],
    }
}

/// Unit id → role, owned by the world memory
#[derive(Debug, Clone, Default)]
pub struct RoleStore {
    roles: AHashMap<UnitId, Role>,
}

impl RoleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &UnitId) -> Option<Role> {
        self.roles.get(id).copied()
    }

    /// Stored role for `unit`, drawing and persisting one on first use
    pub fn resolve<R: Rng + ?Sized>(&mut self, unit: &Unit, rng: &mut R) -> Role {
        if let Some(role) = self.roles.get(&unit.id) {
            return *role;
        }

        let role = role_domain(unit.class)
            .choose(rng)
            .copied()
            .unwrap_or(Role::Forager);
        self.roles.insert(unit.id.clone(), role);
        tracing::debug!("Assigned role {} to unit {}", role, unit.id);
        role
    }

    /// Turn each forager into a helper with `probability`.
    ///
    /// Ids are visited in sorted order so a seeded RNG gives the same result
    /// on every run. Returns the number of reassigned units.
    pub fn promote_helpers<R: Rng + ?Sized>(&mut self, probability: f64, rng: &mut R) -> usize {
        let mut foragers: Vec<UnitId> = self
            .roles
            .iter()
            .filter(|(_, role)| **role == Role::Forager)
            .map(|(id, _)| id.clone())
            .collect();
        foragers.sort();

        // gen_bool panics outside [0, 1]
        let probability = if probability.is_nan() { 0.0 } else { probability.clamp(0.0, 1.0) };
        let mut promoted = 0;
        for id in foragers {
            if rng.gen_bool(probability) {
                self.roles.insert(id, Role::Helper);
                promoted += 1;
            }
        }
        promoted
    }

    /// Drop entries of units that no longer exist
    pub fn retain_alive(&mut self, alive: &HashSet<UnitId>) -> usize {
        let before = self.roles.len();
        self.roles.retain(|id, _| alive.contains(id));
        before - self.roles.len()
    }

    pub fn count(&self, role: Role) -> usize {
        self.roles.values().filter(|r| **r == role).count()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
