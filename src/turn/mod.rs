//! Turn loop driving memory, roles and strategy

pub mod orchestrator;

pub use orchestrator::{TurnOrchestrator, TurnSummary};
