//! Performance measure shared by the agent's bookkeeping and the world.
//!
//! The defaults follow the classic Wumpus World performance measure: every
//! action costs a point, the arrow costs ten, death costs a thousand, and
//! leaving the cave with the gold earns a thousand.

use serde::{Deserialize, Serialize};

/// Score adjustments applied per action and per outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Points lost for every action taken (default: 1).
    pub action_cost: i64,
    /// Extra points lost for firing the arrow (default: 10).
    pub arrow_cost: i64,
    /// Points lost when the agent dies (default: 1000).
    pub death_penalty: i64,
    /// Points gained when the gold is picked up (default: 100).
    pub gold_pickup_bonus: i64,
    /// Points gained for climbing out while holding the gold (default: 1000).
    pub exit_with_gold_bonus: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            action_cost: 1,
            arrow_cost: 10,
            death_penalty: 1000,
            gold_pickup_bonus: 100,
            exit_with_gold_bonus: 1000,
        }
    }
}
