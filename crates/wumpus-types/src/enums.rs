//! Enumeration types shared by the agent, the world, and the runner.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// An action the agent can submit to the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Walk one room in the facing direction.
    MoveForward,
    /// Rotate 90 degrees counter-clockwise.
    TurnLeft,
    /// Rotate 90 degrees clockwise.
    TurnRight,
    /// Pick up the gold in the current room.
    Grab,
    /// Fire the arrow in the facing direction.
    Shoot,
    /// Leave the cave; only possible at the entrance.
    Climb,
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MoveForward => write!(f, "move_forward"),
            Self::TurnLeft => write!(f, "turn_left"),
            Self::TurnRight => write!(f, "turn_right"),
            Self::Grab => write!(f, "grab"),
            Self::Shoot => write!(f, "shoot"),
            Self::Climb => write!(f, "climb"),
        }
    }
}

// ---------------------------------------------------------------------------
// CellBelief
// ---------------------------------------------------------------------------

/// The knowledge base's derived status for one room.
///
/// Exactly one status holds at a time. Statuses only move away from
/// [`CellBelief::Unknown`]; the single exception is the Wumpus being killed,
/// which clears beliefs that only the Wumpus explained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CellBelief {
    /// Nothing is known about the room.
    Unknown,
    /// Proven free of both pits and the live Wumpus.
    Safe,
    /// Proven to contain a pit.
    Pit,
    /// Proven to contain the live Wumpus.
    Wumpus,
    /// Suspected of holding a pit or the Wumpus, not yet classified.
    PitOrWumpus,
    /// The agent has been in this room.
    Visited,
}

impl CellBelief {
    /// Whether the agent may enter a room with this status.
    pub const fn is_safe(self) -> bool {
        matches!(self, Self::Safe | Self::Visited)
    }

    /// Whether a hazard may still be in a room with this status.
    pub const fn is_hazard_possible(self) -> bool {
        matches!(
            self,
            Self::Unknown | Self::PitOrWumpus | Self::Pit | Self::Wumpus
        )
    }

    /// Single-character glyph for map rendering.
    pub const fn glyph(self) -> char {
        match self {
            Self::Unknown => '?',
            Self::Safe => 'o',
            Self::Pit => 'P',
            Self::Wumpus => 'W',
            Self::PitOrWumpus => '!',
            Self::Visited => '.',
        }
    }
}

// ---------------------------------------------------------------------------
// Terminal
// ---------------------------------------------------------------------------

/// Whether a step ended the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terminal {
    /// The run continues.
    #[default]
    None,
    /// The agent entered a pit or the live Wumpus's room.
    Died,
    /// The agent climbed out of the cave.
    ClimbedOut,
}

impl Terminal {
    /// Whether the run is over.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_and_hazard_queries_partition_beliefs() {
        let all = [
            CellBelief::Unknown,
            CellBelief::Safe,
            CellBelief::Pit,
            CellBelief::Wumpus,
            CellBelief::PitOrWumpus,
            CellBelief::Visited,
        ];
        for belief in all {
            assert_ne!(belief.is_safe(), belief.is_hazard_possible(), "{belief:?}");
        }
    }

    #[test]
    fn terminal_detection() {
        assert!(!Terminal::None.is_terminal());
        assert!(Terminal::Died.is_terminal());
        assert!(Terminal::ClimbedOut.is_terminal());
    }

    #[test]
    fn action_names() {
        assert_eq!(Action::MoveForward.to_string(), "move_forward");
        assert_eq!(Action::Climb.to_string(), "climb");
    }
}
