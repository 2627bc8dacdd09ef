//! The seam between the episode runner and whatever world the agent acts in.
//!
//! The runner only ever talks to an [`Environment`]: it asks for the current
//! percept and hands over one action per step. [`WumpusWorld`] is the
//! simulated implementation; tests plug in scripted ones.

use wumpus_types::{Action, GridBounds, PerceptSet, StepOutcome};
use wumpus_world::{WorldError, WumpusWorld};

/// Errors raised by an environment while applying an action.
#[derive(Debug, thiserror::Error)]
pub enum EnvironmentError {
    /// The simulated world rejected the action.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// Any other environment failure.
    #[error("environment failure: {message}")]
    Internal {
        /// Description of the failure.
        message: String,
    },
}

/// A world the agent can perceive and act in.
pub trait Environment {
    /// The cave dimensions, known to the agent up front.
    fn bounds(&self) -> GridBounds;

    /// The percept in the agent's current room.
    fn percept(&self) -> PerceptSet;

    /// Apply one action.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentError`] if the action cannot be applied at all
    /// (for instance after the run ended).
    fn apply(&mut self, action: Action) -> Result<StepOutcome, EnvironmentError>;
}

impl Environment for WumpusWorld {
    fn bounds(&self) -> GridBounds {
        self.layout().bounds
    }

    fn percept(&self) -> PerceptSet {
        Self::percept(self)
    }

    fn apply(&mut self, action: Action) -> Result<StepOutcome, EnvironmentError> {
        Ok(Self::apply(self, action)?)
    }
}
