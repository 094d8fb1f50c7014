pub mod config;
pub mod error;
pub mod types;

pub use config::ColonyConfig;
pub use error::{ColonyError, Result};
pub use types::{Timestamp, TurnNumber, UnitId};
