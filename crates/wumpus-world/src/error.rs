//! Error types for the `wumpus-world` crate.

use wumpus_types::{Action, Cell};

/// Errors raised while building or driving a simulated cave.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorldError {
    /// A layout entry lies outside the cave.
    #[error("{item} at {cell} lies outside the cave")]
    OutOfBounds {
        /// What was placed there (`"wumpus"`, `"gold"`, `"pit"`).
        item: &'static str,
        /// The offending cell.
        cell: Cell,
    },

    /// A hazard sits on the entrance.
    #[error("{item} placed on the entrance {cell}")]
    HazardAtStart {
        /// The hazard kind.
        item: &'static str,
        /// The entrance cell.
        cell: Cell,
    },

    /// The cave has no room besides the entrance.
    #[error("a {width}x{height} cave has no room for the wumpus")]
    CaveTooSmall {
        /// Cave width.
        width: u32,
        /// Cave height.
        height: u32,
    },

    /// A pit probability outside `[0, 1]`.
    #[error("pit probability {0} is not within [0, 1]")]
    InvalidPitProbability(f64),

    /// An action arrived after the run ended.
    #[error("cannot {action}: the run has already ended")]
    RunEnded {
        /// The rejected action.
        action: Action,
    },
}
