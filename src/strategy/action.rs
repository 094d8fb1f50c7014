//! What a policy decided for one unit

use std::fmt;

use crate::grid::hex::HexCoord;

/// Movement requested by a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Hold,
    /// Search a path toward this hex
    MoveTo(HexCoord),
    /// Single step onto an adjacent hex, no search
    Step(HexCoord),
}

/// Why the policy chose its action, for logs and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Unload,
    ReturnHome,
    Retreat,
    Haul,
    Forage,
    Explore,
    Besiege,
    Engage,
    Patrol,
    Escort,
    /// Manual override: head home
    Recall,
    Wander,
    Idle,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub intent: Intent,
    pub action: Action,
}

impl Decision {
    pub fn hold(intent: Intent) -> Self {
        Self {
            intent,
            action: Action::Hold,
        }
    }

    pub fn move_to(intent: Intent, target: HexCoord) -> Self {
        Self {
            intent,
            action: Action::MoveTo(target),
        }
    }

    pub fn step(intent: Intent, next: HexCoord) -> Self {
        Self {
            intent,
            action: Action::Step(next),
        }
    }

    pub fn target(&self) -> Option<HexCoord> {
        match self.action {
            Action::Hold => None,
            Action::MoveTo(t) | Action::Step(t) => Some(t),
        }
    }
}
