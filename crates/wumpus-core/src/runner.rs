//! Episode runner.
//!
//! [`run_episode`] drives one agent through one environment, one action per
//! step: perceive, choose, apply. The episode ends when the agent dies,
//! climbs out, or the step bound is reached. Any error from the knowledge
//! base, the agent or the environment aborts the episode.

use serde::Serialize;
use tracing::{info, warn};
use wumpus_agents::{Agent, AgentError, Rule};
use wumpus_types::{Action, Cell, Direction, PerceptSet, Terminal};

use crate::environment::{Environment, EnvironmentError};

/// Errors that abort an episode.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The agent or its knowledge base failed.
    #[error("agent error: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },

    /// The environment failed.
    #[error("environment error: {source}")]
    Environment {
        /// The underlying environment error.
        #[from]
        source: EnvironmentError,
    },
}

/// Why an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EndReason {
    /// The agent left the cave holding the gold.
    ClimbedOutWithGold,
    /// The agent left the cave without the gold.
    ClimbedOutEmptyHanded,
    /// The agent walked into a pit or the live Wumpus.
    Died,
    /// The step bound cut the episode off.
    MaxStepsReached,
}

impl core::fmt::Display for EndReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ClimbedOutWithGold => write!(f, "climbed out with the gold"),
            Self::ClimbedOutEmptyHanded => write!(f, "escaped without the gold"),
            Self::Died => write!(f, "died"),
            Self::MaxStepsReached => write!(f, "maximum steps reached"),
        }
    }
}

/// Result of one episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EpisodeResult {
    /// Why the episode ended.
    pub end_reason: EndReason,
    /// Actions taken.
    pub steps: u64,
    /// The agent's own score.
    pub score: i64,
    /// Sum of the score deltas the environment reported.
    pub world_score: i64,
    /// Whether the agent held the gold at the end.
    pub has_gold: bool,
}

/// One completed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TurnRecord {
    /// 1-based step number.
    pub step: u64,
    /// Where the agent was when it chose the action.
    pub cell: Cell,
    /// The facing when it chose the action.
    pub facing: Direction,
    /// What it perceived there.
    pub percept: PerceptSet,
    /// The action taken.
    pub action: Action,
    /// The decision rule that produced the action.
    pub rule: Option<Rule>,
    /// The agent's score after the action.
    pub score: i64,
}

/// Callback invoked after every step.
pub trait TurnCallback {
    /// Called once the environment has applied the step's action.
    fn on_turn(&mut self, record: &TurnRecord);
}

/// A no-op turn callback.
pub struct NoOpCallback;

impl TurnCallback for NoOpCallback {
    fn on_turn(&mut self, _record: &TurnRecord) {}
}

/// Run one episode to completion.
///
/// # Errors
///
/// Returns [`RunnerError`] if the agent, its knowledge base, or the
/// environment fails. Nothing is retried.
pub fn run_episode(
    env: &mut dyn Environment,
    agent: &mut Agent,
    max_steps: u64,
    callback: &mut dyn TurnCallback,
) -> Result<EpisodeResult, RunnerError> {
    info!(max_steps, bounds = ?env.bounds(), "Episode starting");

    let mut percept = env.percept();
    let mut steps: u64 = 0;
    let mut world_score: i64 = 0;

    let end_reason = loop {
        if steps >= max_steps {
            warn!(steps, "Maximum steps reached");
            break EndReason::MaxStepsReached;
        }

        agent.perceive(percept)?;
        let cell = agent.state().cell;
        let facing = agent.state().facing;
        let action = agent.choose_action()?;

        let outcome = env.apply(action)?;
        steps = steps.saturating_add(1);
        world_score = world_score.saturating_add(outcome.score_delta);
        if outcome.terminal == Terminal::Died {
            agent.notify_died();
        }

        callback.on_turn(&TurnRecord {
            step: steps,
            cell,
            facing,
            percept,
            action,
            rule: agent.last_decision().map(|d| d.rule),
            score: agent.state().score,
        });

        match outcome.terminal {
            Terminal::None => percept = outcome.percept,
            Terminal::Died => break EndReason::Died,
            Terminal::ClimbedOut if agent.state().has_gold => {
                break EndReason::ClimbedOutWithGold;
            }
            Terminal::ClimbedOut => break EndReason::ClimbedOutEmptyHanded,
        }
    };

    let result = EpisodeResult {
        end_reason,
        steps,
        score: agent.state().score,
        world_score,
        has_gold: agent.state().has_gold,
    };
    log_episode_end(&result);
    Ok(result)
}

/// Log how an episode ended.
pub fn log_episode_end(result: &EpisodeResult) {
    info!(
        reason = %result.end_reason,
        steps = result.steps,
        score = result.score,
        has_gold = result.has_gold,
        "Episode ended"
    );
    if result.score != result.world_score {
        warn!(
            agent_score = result.score,
            world_score = result.world_score,
            "Agent and world disagree on the score"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use wumpus_types::{GridBounds, ScoringConfig, StepOutcome};
    use wumpus_world::{WorldLayout, WumpusWorld};

    use super::*;

    struct Recorder {
        turns: Vec<TurnRecord>,
    }

    impl TurnCallback for Recorder {
        fn on_turn(&mut self, record: &TurnRecord) {
            self.turns.push(*record);
        }
    }

    /// An environment that never lets anything happen.
    struct Breezy;

    impl Environment for Breezy {
        fn bounds(&self) -> GridBounds {
            GridBounds::default()
        }

        fn percept(&self) -> PerceptSet {
            PerceptSet::none().with_breeze()
        }

        fn apply(&mut self, action: Action) -> Result<StepOutcome, EnvironmentError> {
            let terminal = if action == Action::Climb {
                Terminal::ClimbedOut
            } else {
                Terminal::None
            };
            Ok(StepOutcome {
                percept: self.percept(),
                terminal,
                score_delta: -1,
            })
        }
    }

    /// An environment that fails on the first action.
    struct Broken;

    impl Environment for Broken {
        fn bounds(&self) -> GridBounds {
            GridBounds::default()
        }

        fn percept(&self) -> PerceptSet {
            PerceptSet::none()
        }

        fn apply(&mut self, _action: Action) -> Result<StepOutcome, EnvironmentError> {
            Err(EnvironmentError::Internal {
                message: "sensor offline".to_owned(),
            })
        }
    }

    fn agent() -> Agent {
        Agent::new(GridBounds::default(), ScoringConfig::default())
    }

    #[test]
    fn breeze_at_entrance_ends_in_one_step() {
        let mut env = Breezy;
        let mut agent = agent();
        let mut recorder = Recorder { turns: Vec::new() };
        let result = run_episode(&mut env, &mut agent, 200, &mut recorder).unwrap();

        assert_eq!(result.end_reason, EndReason::ClimbedOutEmptyHanded);
        assert_eq!(result.steps, 1);
        assert_eq!(result.score, -1);
        assert_eq!(result.world_score, -1);
        assert_eq!(recorder.turns.len(), 1);
        assert_eq!(recorder.turns[0].action, Action::Climb);
        assert_eq!(recorder.turns[0].rule, Some(Rule::ClimbEmptyHanded));
        assert!(recorder.turns[0].percept.breeze);
    }

    #[test]
    fn step_bound_cuts_the_episode() {
        let mut env =
            WumpusWorld::new(WorldLayout::classic(), ScoringConfig::default()).unwrap();
        let mut agent = agent();
        let result = run_episode(&mut env, &mut agent, 3, &mut NoOpCallback).unwrap();
        assert_eq!(result.end_reason, EndReason::MaxStepsReached);
        assert_eq!(result.steps, 3);
        assert_eq!(result.score, -3);
    }

    #[test]
    fn zero_step_bound_takes_no_action() {
        let mut env = Breezy;
        let mut agent = agent();
        let result = run_episode(&mut env, &mut agent, 0, &mut NoOpCallback).unwrap();
        assert_eq!(result.end_reason, EndReason::MaxStepsReached);
        assert_eq!(result.steps, 0);
        assert_eq!(agent.state().time, 0);
    }

    #[test]
    fn environment_errors_abort() {
        let mut env = Broken;
        let mut agent = agent();
        let result = run_episode(&mut env, &mut agent, 10, &mut NoOpCallback);
        assert!(matches!(result, Err(RunnerError::Environment { .. })));
    }

    #[test]
    fn turn_records_serialize() {
        let record = TurnRecord {
            step: 1,
            cell: Cell::START,
            facing: Direction::East,
            percept: PerceptSet::none(),
            action: Action::TurnLeft,
            rule: Some(Rule::ExploreNeighbor),
            score: -1,
        };
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["step"], 1);
        assert_eq!(json["cell"], serde_json::json!([1, 1]));
        assert_eq!(json["action"], "TurnLeft");
    }

    #[test]
    fn end_reasons_read_as_outcomes() {
        assert_eq!(EndReason::ClimbedOutWithGold.to_string(), "climbed out with the gold");
        assert_eq!(EndReason::MaxStepsReached.to_string(), "maximum steps reached");
    }
}
