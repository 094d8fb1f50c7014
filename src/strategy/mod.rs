//! Per-unit decision policies
//!
//! Each class has its own policy module; a policy names a target and the
//! engine turns it into a budget-bounded path. Claims made by units decided
//! earlier in the turn live in [`TurnPlan`].

pub mod action;
pub mod decision_context;
pub mod engine;
pub mod patrol;
pub mod plan;
pub mod scout;
pub mod soldier;
pub mod worker;

pub use action::{Action, Decision, Intent};
pub use decision_context::DecisionContext;
pub use engine::{StrategyEngine, UnitOrder};
pub use plan::TurnPlan;
