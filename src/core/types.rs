//! Core type definitions used throughout the codebase

use std::time::Duration;

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Opaque, server-assigned identifier of a friendly unit
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From)]
#[serde(transparent)]
pub struct UnitId(pub String);

impl UnitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UnitId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Turn counter reported by the game server
pub type TurnNumber = u64;

/// Monotonic point in time, measured from the owning clock's origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(pub Duration);

impl Timestamp {
    pub fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    /// Timestamp `duration` after this one (saturating)
    pub fn after(&self, duration: Duration) -> Self {
        Self(self.0.saturating_add(duration))
    }

    /// Time elapsed since `earlier`, zero if `earlier` is in the future
    pub fn since(&self, earlier: Timestamp) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}
