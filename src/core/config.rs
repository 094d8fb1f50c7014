//! Colony configuration with documented constants
//!
//! All tunable numbers used by the decision engine are collected here.
//! Values can be overridden from a TOML file; every section falls back to
//! its defaults when omitted.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::{ColonyError, Result};

/// Complete bot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColonyConfig {
    /// Seed for the engine RNG (role draws, helper rolls, random steps)
    pub seed: u64,
    pub roles: RoleConfig,
    pub attack: AttackConfig,
    pub strategy: StrategyConfig,
    pub patrol: PatrolConfig,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            roles: RoleConfig::default(),
            attack: AttackConfig::default(),
            strategy: StrategyConfig::default(),
            patrol: PatrolConfig::default(),
        }
    }
}

/// Role assignment tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleConfig {
    /// Chance that a foraging worker is reassigned to Helper when an attack is declared
    pub helper_probability: f64,
}

impl Default for RoleConfig {
    fn default() -> Self {
        Self {
            helper_probability: 0.6,
        }
    }
}

/// Attack window tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackConfig {
    /// Fixed lifetime of an attack window in seconds
    pub duration_secs: u64,
    /// Declare an attack automatically once enough Army soldiers exist
    pub auto_declare: bool,
    /// Army-role soldiers required before an automatic declaration
    pub min_army: usize,
}

impl AttackConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            duration_secs: 60,
            auto_declare: false,
            min_army: 3,
        }
    }
}

/// Distances and penalties used by the per-class policies
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Workers retreat when an enemy soldier is at most this far away
    pub threat_radius: u32,
    /// Soldiers engage any enemy at most this far away
    pub engage_radius: u32,
    /// Escorts only follow workers farther than this from the home spot
    pub escort_safety_radius: u32,
    /// Heuristic penalty for landing on acid
    pub acid_penalty: f32,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            threat_radius: 5,
            engage_radius: 5,
            escort_safety_radius: 3,
            acid_penalty: 3.2,
        }
    }
}

/// A ring band of patrol slots around a center hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingBand {
    pub inner: u32,
    pub outer: u32,
    /// Keep every `spacing`-th position of each ring
    pub spacing: usize,
}

impl RingBand {
    pub const fn new(inner: u32, outer: u32, spacing: usize) -> Self {
        Self { inner, outer, spacing }
    }

    fn validate(&self, name: &str) -> Result<()> {
        if self.inner > self.outer {
            return Err(ColonyError::InvalidConfig(format!(
                "patrol.{name}: inner ({}) must be <= outer ({})",
                self.inner, self.outer
            )));
        }
        if self.spacing == 0 {
            return Err(ColonyError::InvalidConfig(format!(
                "patrol.{name}: spacing must be >= 1"
            )));
        }
        Ok(())
    }
}

/// Ring bands for every patrolling role
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatrolConfig {
    /// Soldier defenders around the home spot
    pub soldier: RingBand,
    /// Scout defenders around the home spot
    pub scout: RingBand,
    /// Army soldiers around the enemy structure during an attack
    pub army: RingBand,
    /// Helper workers around the enemy structure during an attack
    pub helper: RingBand,
}

impl Default for PatrolConfig {
    fn default() -> Self {
        Self {
            soldier: RingBand::new(7, 12, 3),
            scout: RingBand::new(9, 25, 6),
            army: RingBand::new(1, 5, 1),
            helper: RingBand::new(2, 4, 1),
        }
    }
}

impl ColonyConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: ColonyConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.roles.helper_probability) {
            return Err(ColonyError::InvalidConfig(format!(
                "roles.helper_probability ({}) must be within [0, 1]",
                self.roles.helper_probability
            )));
        }

        if self.attack.duration_secs == 0 {
            return Err(ColonyError::InvalidConfig(
                "attack.duration_secs must be positive".into(),
            ));
        }

        if !self.strategy.acid_penalty.is_finite() || self.strategy.acid_penalty < 0.0 {
            return Err(ColonyError::InvalidConfig(format!(
                "strategy.acid_penalty ({}) must be a non-negative number",
                self.strategy.acid_penalty
            )));
        }

        self.patrol.soldier.validate("soldier")?;
        self.patrol.scout.validate("scout")?;
        self.patrol.army.validate("army")?;
        self.patrol.helper.validate("helper")?;

        Ok(())
    }
}
