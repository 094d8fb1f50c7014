//! Outbound per-unit path commands

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::UnitId;
use crate::grid::hex::HexCoord;

/// Path for one unit, starting at the first step after its current hex
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCommand {
    #[serde(rename = "ant")]
    pub unit_id: UnitId,
    pub path: Vec<HexCoord>,
}

impl MoveCommand {
    pub fn new(unit_id: UnitId, path: Vec<HexCoord>) -> Self {
        Self { unit_id, path }
    }

    pub fn destination(&self) -> Option<HexCoord> {
        self.path.last().copied()
    }
}

/// All commands produced for one turn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandBatch {
    pub moves: Vec<MoveCommand>,
}

impl CommandBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a path; empty paths mean "hold" and are not sent
    pub fn push(&mut self, unit_id: UnitId, path: Vec<HexCoord>) -> bool {
        if path.is_empty() {
            return false;
        }
        self.moves.push(MoveCommand::new(unit_id, path));
        true
    }

    pub fn get(&self, unit_id: &UnitId) -> Option<&MoveCommand> {
        self.moves.iter().find(|m| &m.unit_id == unit_id)
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
