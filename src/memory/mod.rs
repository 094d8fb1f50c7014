//! Cross-turn memory: observed world, sticky roles and the attack window

pub mod attack;
pub mod clock;
pub mod roles;
pub mod world_memory;

pub use attack::AttackWindow;
pub use clock::{Clock, ManualClock, SystemClock};
pub use roles::{role_domain, Role, RoleStore};
pub use world_memory::{MergeReport, WorldMemory};
