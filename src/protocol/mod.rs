//! Wire contracts with the game server: inbound snapshot, outbound commands

pub mod command;
pub mod snapshot;
pub mod wire;

pub use command::{CommandBatch, MoveCommand};
pub use snapshot::Snapshot;
pub use wire::WireSnapshot;
