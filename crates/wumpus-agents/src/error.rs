//! Error types for the wumpus-agents crate.
//!
//! Both error families are fatal for the run that raised them: a
//! contradiction invalidates the knowledge base's soundness guarantee, and an
//! illegal action means the decision policy is broken. Neither is retried.

use wumpus_types::{Action, Cell, PerceptSet};

use crate::knowledge::Hazard;

/// Errors raised while telling percepts to the knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KnowledgeError {
    /// A visited cell was told a percept that disagrees with its recorded one.
    #[error("inconsistent percept at {cell}: recorded {recorded}, received {received}")]
    InconsistentPercept {
        /// The cell told twice.
        cell: Cell,
        /// The percept recorded on the first visit.
        recorded: PerceptSet,
        /// The conflicting percept.
        received: PerceptSet,
    },

    /// A derivation conflicts with an established fact.
    #[error("contradictory {hazard} evidence at {cell}")]
    Contradiction {
        /// The cell whose facts conflict.
        cell: Cell,
        /// Which hazard the conflicting evidence concerns.
        hazard: Hazard,
    },

    /// The cell lies outside the cave.
    #[error("cell {0} is outside the cave")]
    OutOfBounds(Cell),
}

/// Errors raised by the agent's action bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    /// The action violates a hard constraint.
    #[error("illegal action {action}: {reason}")]
    IllegalAction {
        /// The rejected action.
        action: Action,
        /// Description of the violated constraint.
        reason: String,
    },

    /// The agent received a percept after its run ended.
    #[error("agent run has already ended")]
    RunEnded,

    /// The knowledge base rejected a percept.
    #[error("knowledge base error: {source}")]
    Knowledge {
        /// The underlying knowledge base error.
        #[from]
        source: KnowledgeError,
    },
}
