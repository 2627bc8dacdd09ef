//! Result types returned by the world after an action is applied.

use serde::{Deserialize, Serialize};

use crate::enums::Terminal;
use crate::percept::PerceptSet;

/// What the world reports back after applying one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// The percept in the agent's room after the action.
    pub percept: PerceptSet,
    /// Whether the action ended the run.
    pub terminal: Terminal,
    /// Change to the performance score caused by the action.
    pub score_delta: i64,
}
