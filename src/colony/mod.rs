//! Colony model - unit classes, units, enemies and resource nodes

pub mod resources;
pub mod unit_class;
pub mod units;

pub use resources::{ResourceKind, ResourceNode};
pub use unit_class::{UnitClass, UnitStats};
pub use units::{EnemyUnit, Unit};
