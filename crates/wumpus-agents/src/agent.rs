//! The knowledge-based agent and its decision policy.
//!
//! Each step the agent tells its [`KnowledgeBase`] what it perceives, then
//! evaluates a fixed rule table, highest priority first:
//!
//! 1. Holding the gold at the entrance: climb out.
//! 2. Glitter here and no gold yet: grab it.
//! 3. An adjacent unvisited cell is safe: go there (North, East, South, West
//!    tie-break), turning first if needed.
//! 4. A located Wumpus lies ahead, an arrow remains: shoot.
//! 5. A safe unvisited cell is reachable through safe cells: head there.
//!    Otherwise, with an arrow left and the Wumpus located, move into its
//!    line of fire and face it.
//! 6. Walk the shortest safe route back to the entrance.
//! 7. Climb out empty-handed.
//!
//! Rules 3 to 5 only apply while exploring; once the gold is taken the
//! agent heads straight for the exit. The table is a pure function of the
//! agent's state, so identical percept sequences yield identical actions.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use wumpus_types::{
    Action, Cell, Direction, GridBounds, PerceptSet, START_FACING, STARTING_ARROWS, ScoringConfig,
};

use crate::error::AgentError;
use crate::knowledge::KnowledgeBase;
use crate::route;

// ---------------------------------------------------------------------------
// AgentPhase
// ---------------------------------------------------------------------------

/// Lifecycle of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentPhase {
    /// Looking for the gold.
    Exploring,
    /// Holding the gold, heading for the entrance.
    SeekingExit,
    /// Left the cave. Terminal.
    ClimbedOut,
    /// Killed by a pit or the Wumpus. Terminal.
    Died,
}

impl AgentPhase {
    /// Whether the run is over.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::ClimbedOut | Self::Died)
    }
}

// ---------------------------------------------------------------------------
// AgentState
// ---------------------------------------------------------------------------

/// The agent's belief about its own situation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentState {
    /// The room the agent is in.
    pub cell: Cell,
    /// The direction the agent faces.
    pub facing: Direction,
    /// Arrows left. Never increases.
    pub arrows: u32,
    /// Whether the agent carries the gold.
    pub has_gold: bool,
    /// Whether the agent is alive.
    pub alive: bool,
    /// Cumulative performance score.
    pub score: i64,
    /// Number of actions taken.
    pub time: u64,
}

impl AgentState {
    /// The state on entering the cave.
    pub const fn initial() -> Self {
        Self {
            cell: Cell::START,
            facing: START_FACING,
            arrows: STARTING_ARROWS,
            has_gold: false,
            alive: true,
            score: 0,
            time: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// The rule of the decision table that produced an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    /// At the entrance with the gold.
    ClimbWithGold,
    /// Gold glitters here.
    GrabGold,
    /// A safe unvisited neighbor exists.
    ExploreNeighbor,
    /// The located Wumpus is in the line of fire.
    ShootWumpus,
    /// Travelling to a safe unvisited cell further away.
    TravelToFrontier,
    /// Getting into the line of fire of the located Wumpus.
    HuntWumpus,
    /// Walking back to the entrance.
    ReturnHome,
    /// Nothing safe left to do.
    ClimbEmptyHanded,
}

impl core::fmt::Display for Rule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ClimbWithGold => write!(f, "climb with gold"),
            Self::GrabGold => write!(f, "grab gold"),
            Self::ExploreNeighbor => write!(f, "explore neighbor"),
            Self::ShootWumpus => write!(f, "shoot wumpus"),
            Self::TravelToFrontier => write!(f, "travel to frontier"),
            Self::HuntWumpus => write!(f, "hunt wumpus"),
            Self::ReturnHome => write!(f, "return home"),
            Self::ClimbEmptyHanded => write!(f, "climb empty-handed"),
        }
    }
}

/// An action together with the rule that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// The chosen action.
    pub action: Action,
    /// The rule that fired.
    pub rule: Rule,
}

impl Decision {
    const fn new(action: Action, rule: Rule) -> Self {
        Self { action, rule }
    }
}

// ---------------------------------------------------------------------------
// Agent
// ---------------------------------------------------------------------------

/// A knowledge-based Wumpus World agent.
///
/// The agent exclusively owns its knowledge base; nothing else can tell it
/// percepts.
#[derive(Debug, Clone)]
pub struct Agent {
    kb: KnowledgeBase,
    state: AgentState,
    phase: AgentPhase,
    scoring: ScoringConfig,
    /// Glitter in the current room, per the latest percept.
    glitter_here: bool,
    /// Cleared when the scream is heard.
    wumpus_threat: bool,
    /// Where the last forward move started, for reverting on a bump.
    last_move_from: Option<Cell>,
    last_decision: Option<Decision>,
}

impl Agent {
    /// Create an agent at the entrance of a cave of the given size.
    pub fn new(bounds: GridBounds, scoring: ScoringConfig) -> Self {
        Self {
            kb: KnowledgeBase::new(bounds),
            state: AgentState::initial(),
            phase: AgentPhase::Exploring,
            scoring,
            glitter_here: false,
            wumpus_threat: true,
            last_move_from: None,
            last_decision: None,
        }
    }

    /// The agent's knowledge base.
    pub const fn knowledge(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// The agent's belief about itself.
    pub const fn state(&self) -> &AgentState {
        &self.state
    }

    /// The current lifecycle phase.
    pub const fn phase(&self) -> AgentPhase {
        self.phase
    }

    /// The decision behind the most recent [`Agent::choose_action`].
    pub const fn last_decision(&self) -> Option<Decision> {
        self.last_decision
    }

    /// Whether the Wumpus is still considered a threat.
    pub const fn wumpus_threat(&self) -> bool {
        self.wumpus_threat
    }

    // -------------------------------------------------------------------
    // Perception
    // -------------------------------------------------------------------

    /// Tell the knowledge base what the agent perceives in its current room.
    ///
    /// A bump right after a forward move means the move did not happen, so
    /// the believed position is reverted first. Glitter and scream are
    /// forwarded to the knowledge base.
    pub fn perceive(&mut self, percept: PerceptSet) -> Result<(), AgentError> {
        if self.phase.is_terminal() {
            return Err(AgentError::RunEnded);
        }

        let moved_from = self.last_move_from.take();
        if percept.bump {
            if let Some(from) = moved_from {
                warn!(
                    believed = %self.state.cell,
                    reverted_to = %from,
                    "Bumped into a wall, reverting move"
                );
                self.state.cell = from;
            }
        }

        let here = self.state.cell;
        self.kb.tell(here, percept)?;

        self.glitter_here = percept.glitter;
        if percept.glitter {
            self.kb.notify_glitter_at(here)?;
        }

        if percept.scream && self.wumpus_threat {
            self.kb.notify_wumpus_killed()?;
            self.wumpus_threat = false;
            debug!(cell = %here, "Scream heard, Wumpus no longer a threat");
        }

        Ok(())
    }

    /// Record that the world killed the agent.
    pub fn notify_died(&mut self) {
        if self.phase.is_terminal() {
            return;
        }
        self.state.alive = false;
        self.state.score = self.state.score.saturating_sub(self.scoring.death_penalty);
        self.phase = AgentPhase::Died;
        warn!(cell = %self.state.cell, "Agent died");
    }

    // -------------------------------------------------------------------
    // Decision
    // -------------------------------------------------------------------

    /// Choose the next action and apply it to the agent's own state.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::RunEnded`] after a terminal phase. An
    /// [`AgentError::IllegalAction`] here means the policy is broken.
    pub fn choose_action(&mut self) -> Result<Action, AgentError> {
        if self.phase.is_terminal() {
            return Err(AgentError::RunEnded);
        }
        let decision = self.decide();
        debug!(
            step = self.state.time,
            cell = %self.state.cell,
            facing = %self.state.facing,
            action = %decision.action,
            rule = %decision.rule,
            "Action chosen"
        );
        self.apply(decision.action)?;
        self.last_decision = Some(decision);
        Ok(decision.action)
    }

    /// Evaluate the decision table without changing any state.
    pub fn decide(&self) -> Decision {
        let here = self.state.cell;

        if self.state.has_gold && here == Cell::START {
            return Decision::new(Action::Climb, Rule::ClimbWithGold);
        }

        if self.glitter_here && !self.state.has_gold {
            return Decision::new(Action::Grab, Rule::GrabGold);
        }

        if self.phase == AgentPhase::Exploring {
            if let Some(decision) = self.explore() {
                return decision;
            }
        }

        if here != Cell::START {
            let step = route::route_to(&self.kb, here, Cell::START)
                .and_then(|path| path.get(1).copied())
                .and_then(|next| self.step_toward(next));
            if let Some(action) = step {
                return Decision::new(action, Rule::ReturnHome);
            }
        }

        Decision::new(Action::Climb, Rule::ClimbEmptyHanded)
    }

    fn explore(&self) -> Option<Decision> {
        let here = self.state.cell;

        let neighbor = self
            .kb
            .bounds()
            .neighbors(here)
            .into_iter()
            .find(|&n| self.is_frontier(n));
        if let Some(action) = neighbor.and_then(|n| self.step_toward(n)) {
            return Some(Decision::new(action, Rule::ExploreNeighbor));
        }

        let target = self.huntable_wumpus();
        if let Some(wumpus) = target {
            if here.line_direction(wumpus) == Some(self.state.facing) {
                return Some(Decision::new(Action::Shoot, Rule::ShootWumpus));
            }
        }

        let frontier = route::find_route(&self.kb, here, |c| self.is_frontier(c))
            .and_then(|path| path.get(1).copied())
            .and_then(|next| self.step_toward(next));
        if let Some(action) = frontier {
            return Some(Decision::new(action, Rule::TravelToFrontier));
        }

        let wumpus = target?;
        if let Some(direction) = here.line_direction(wumpus) {
            return Some(Decision::new(self.turn_toward(direction), Rule::HuntWumpus));
        }
        let action = route::find_route(&self.kb, here, |c| c.line_direction(wumpus).is_some())
            .and_then(|path| path.get(1).copied())
            .and_then(|next| self.step_toward(next))?;
        Some(Decision::new(action, Rule::HuntWumpus))
    }

    fn is_frontier(&self, cell: Cell) -> bool {
        self.kb.ask_safe(cell) && !self.kb.is_visited(cell)
    }

    fn huntable_wumpus(&self) -> Option<Cell> {
        if self.state.arrows == 0 || !self.wumpus_threat {
            return None;
        }
        self.kb.wumpus_location()
    }

    /// The action that makes progress toward the adjacent cell `next`.
    fn step_toward(&self, next: Cell) -> Option<Action> {
        let direction = self.state.cell.direction_to(next)?;
        if direction == self.state.facing {
            Some(Action::MoveForward)
        } else {
            Some(self.turn_toward(direction))
        }
    }

    fn turn_toward(&self, direction: Direction) -> Action {
        if self.state.facing.left() == direction {
            Action::TurnLeft
        } else {
            Action::TurnRight
        }
    }

    // -------------------------------------------------------------------
    // Action bookkeeping
    // -------------------------------------------------------------------

    /// Validate `action` and apply it to the agent's own state.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::IllegalAction`] when the run has ended, when
    /// moving off the grid or into a cell not proven safe, grabbing without
    /// glitter, shooting without arrows, or climbing away from the entrance.
    pub fn apply(&mut self, action: Action) -> Result<(), AgentError> {
        if self.phase.is_terminal() {
            return Err(illegal(action, "the run has ended"));
        }

        let mut delta = self.scoring.action_cost.saturating_neg();
        let mut moved_from = None;

        match action {
            Action::MoveForward => {
                let here = self.state.cell;
                let Some(next) = self.kb.bounds().neighbor(here, self.state.facing) else {
                    return Err(illegal(action, "facing a wall"));
                };
                if !self.kb.ask_safe(next) {
                    return Err(illegal(action, format!("{next} is not proven safe")));
                }
                moved_from = Some(here);
                self.state.cell = next;
            }
            Action::TurnLeft => self.state.facing = self.state.facing.left(),
            Action::TurnRight => self.state.facing = self.state.facing.right(),
            Action::Grab => {
                if !self.glitter_here || self.state.has_gold {
                    return Err(illegal(action, "no gold here"));
                }
                self.state.has_gold = true;
                self.glitter_here = false;
                self.phase = AgentPhase::SeekingExit;
                delta = delta.saturating_add(self.scoring.gold_pickup_bonus);
            }
            Action::Shoot => {
                if self.state.arrows == 0 {
                    return Err(illegal(action, "no arrows left"));
                }
                self.state.arrows = self.state.arrows.saturating_sub(1);
                delta = delta.saturating_sub(self.scoring.arrow_cost);
            }
            Action::Climb => {
                if self.state.cell != Cell::START {
                    return Err(illegal(action, "not at the cave entrance"));
                }
                self.phase = AgentPhase::ClimbedOut;
                if self.state.has_gold {
                    delta = delta.saturating_add(self.scoring.exit_with_gold_bonus);
                }
            }
        }

        self.last_move_from = moved_from;
        self.state.score = self.state.score.saturating_add(delta);
        self.state.time = self.state.time.saturating_add(1);
        Ok(())
    }
}

fn illegal(action: Action, reason: impl Into<String>) -> AgentError {
    AgentError::IllegalAction {
        action,
        reason: reason.into(),
    }
}
