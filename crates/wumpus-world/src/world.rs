//! The simulated cave: ground truth the agent never sees directly.
//!
//! The world owns the layout and the agent's true body (room, facing,
//! arrow, gold). It hands out percepts and applies actions. Once the Wumpus
//! dies its scream lingers in every later percept, and a bump is reported
//! only right after walking into a wall.

use tracing::{info, warn};
use wumpus_types::{
    Action, Cell, Direction, PerceptSet, START_FACING, STARTING_ARROWS, ScoringConfig,
    StepOutcome, Terminal,
};

use crate::error::WorldError;
use crate::layout::WorldLayout;

/// A running Wumpus World.
#[derive(Debug, Clone)]
pub struct WumpusWorld {
    layout: WorldLayout,
    scoring: ScoringConfig,
    agent_cell: Cell,
    facing: Direction,
    arrows: u32,
    has_gold: bool,
    /// Gold still lying in the cave.
    gold: Option<Cell>,
    wumpus_alive: bool,
    /// Set by a forward move into a wall, cleared by the next action.
    bumped: bool,
    terminal: Terminal,
    score: i64,
    steps: u64,
}

impl WumpusWorld {
    /// Create a world with the agent at the entrance facing East.
    ///
    /// # Errors
    ///
    /// Returns the [`WorldError`] from [`WorldLayout::validate`].
    pub fn new(layout: WorldLayout, scoring: ScoringConfig) -> Result<Self, WorldError> {
        layout.validate()?;
        Ok(Self {
            gold: layout.gold,
            layout,
            scoring,
            agent_cell: Cell::START,
            facing: START_FACING,
            arrows: STARTING_ARROWS,
            has_gold: false,
            wumpus_alive: true,
            bumped: false,
            terminal: Terminal::None,
            score: 0,
            steps: 0,
        })
    }

    /// The layout the world was built from.
    pub const fn layout(&self) -> &WorldLayout {
        &self.layout
    }

    /// The agent's true room.
    pub const fn agent_cell(&self) -> Cell {
        self.agent_cell
    }

    /// The agent's true facing.
    pub const fn facing(&self) -> Direction {
        self.facing
    }

    /// Whether the agent carries the gold.
    pub const fn has_gold(&self) -> bool {
        self.has_gold
    }

    /// Whether the Wumpus is alive.
    pub const fn wumpus_alive(&self) -> bool {
        self.wumpus_alive
    }

    /// How the run ended, if it has.
    pub const fn terminal(&self) -> Terminal {
        self.terminal
    }

    /// Cumulative score.
    pub const fn score(&self) -> i64 {
        self.score
    }

    /// Actions applied so far.
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// What the agent perceives in its current room.
    pub fn percept(&self) -> PerceptSet {
        let here = self.agent_cell;
        let around = self.layout.bounds.neighbors(here);
        let wumpus = self.layout.wumpus;
        PerceptSet {
            breeze: around.iter().any(|&c| self.layout.is_pit(c)),
            stench: wumpus == here || around.contains(&wumpus),
            glitter: self.gold == Some(here),
            bump: self.bumped,
            scream: !self.wumpus_alive,
        }
    }

    /// Apply one action and report the resulting percept, terminal signal,
    /// and score change.
    ///
    /// Actions with no effect (grabbing where there is no gold, shooting
    /// with no arrow, climbing away from the entrance) still cost a turn.
    ///
    /// # Errors
    ///
    /// [`WorldError::RunEnded`] once the agent has died or climbed out.
    pub fn apply(&mut self, action: Action) -> Result<StepOutcome, WorldError> {
        if self.terminal.is_terminal() {
            return Err(WorldError::RunEnded { action });
        }

        self.bumped = false;
        let mut delta = self.scoring.action_cost.saturating_neg();

        match action {
            Action::MoveForward => delta = delta.saturating_add(self.move_forward()),
            Action::TurnLeft => self.facing = self.facing.left(),
            Action::TurnRight => self.facing = self.facing.right(),
            Action::Grab => {
                if self.gold == Some(self.agent_cell) {
                    self.gold = None;
                    self.has_gold = true;
                    delta = delta.saturating_add(self.scoring.gold_pickup_bonus);
                    info!(cell = %self.agent_cell, "Gold picked up");
                }
            }
            Action::Shoot => {
                if self.arrows > 0 {
                    self.arrows = self.arrows.saturating_sub(1);
                    delta = delta.saturating_sub(self.scoring.arrow_cost);
                    self.shoot();
                }
            }
            Action::Climb => {
                if self.agent_cell == Cell::START {
                    self.terminal = Terminal::ClimbedOut;
                    if self.has_gold {
                        delta = delta.saturating_add(self.scoring.exit_with_gold_bonus);
                    }
                    info!(has_gold = self.has_gold, "Agent climbed out");
                }
            }
        }

        self.score = self.score.saturating_add(delta);
        self.steps = self.steps.saturating_add(1);

        Ok(StepOutcome {
            percept: self.percept(),
            terminal: self.terminal,
            score_delta: delta,
        })
    }

    /// Returns the extra score change caused by the move.
    fn move_forward(&mut self) -> i64 {
        let Some(next) = self.layout.bounds.neighbor(self.agent_cell, self.facing) else {
            self.bumped = true;
            return 0;
        };
        self.agent_cell = next;

        let killer = if self.layout.is_pit(next) {
            Some("pit")
        } else if self.wumpus_alive && next == self.layout.wumpus {
            Some("wumpus")
        } else {
            None
        };
        match killer {
            Some(killer) => {
                self.terminal = Terminal::Died;
                warn!(cell = %next, killer, "Agent killed");
                self.scoring.death_penalty.saturating_neg()
            }
            None => 0,
        }
    }

    fn shoot(&mut self) {
        let in_line = self
            .layout
            .bounds
            .ray(self.agent_cell, self.facing)
            .contains(&self.layout.wumpus);
        if self.wumpus_alive && in_line {
            self.wumpus_alive = false;
            info!(wumpus = %self.layout.wumpus, "Arrow hit, the Wumpus screams");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn classic() -> WumpusWorld {
        WumpusWorld::new(WorldLayout::classic(), ScoringConfig::default()).unwrap()
    }

    fn run(world: &mut WumpusWorld, actions: &[Action]) -> StepOutcome {
        let mut last = None;
        for &action in actions {
            last = Some(world.apply(action).unwrap());
        }
        last.unwrap()
    }

    #[test]
    fn entrance_is_quiet_in_classic_cave() {
        let world = classic();
        assert_eq!(world.percept(), PerceptSet::none());
        assert_eq!(world.agent_cell(), Cell::START);
        assert_eq!(world.facing(), Direction::East);
    }

    #[test]
    fn percepts_follow_the_layout() {
        let mut world = classic();
        // (2,1) borders the pit at (3,1).
        let outcome = world.apply(Action::MoveForward).unwrap();
        assert!(outcome.percept.breeze);
        assert!(!outcome.percept.stench);
        assert_eq!(outcome.score_delta, -1);

        // (2,2) is quiet; (2,3) holds the gold beside the Wumpus and a pit.
        run(&mut world, &[Action::TurnLeft, Action::MoveForward]);
        assert_eq!(world.percept(), PerceptSet::none());
        let outcome = world.apply(Action::MoveForward).unwrap();
        assert_eq!(
            outcome.percept,
            PerceptSet::none().with_breeze().with_stench().with_glitter()
        );
    }

    #[test]
    fn bump_only_after_walking_into_a_wall() {
        let mut world = classic();
        let outcome = run(&mut world, &[Action::TurnRight, Action::MoveForward]);
        assert!(outcome.percept.bump);
        assert_eq!(world.agent_cell(), Cell::START);
        let outcome = world.apply(Action::TurnLeft).unwrap();
        assert!(!outcome.percept.bump);
    }

    #[test]
    fn walking_into_a_pit_kills() {
        let mut world = classic();
        let outcome = run(&mut world, &[Action::MoveForward, Action::MoveForward]);
        assert_eq!(outcome.terminal, Terminal::Died);
        assert_eq!(outcome.score_delta, -1001);
        assert_eq!(world.score(), -1002);
        assert_eq!(
            world.apply(Action::Climb),
            Err(WorldError::RunEnded {
                action: Action::Climb
            })
        );
    }

    #[test]
    fn arrow_kills_wumpus_in_line_and_scream_lingers() {
        let mut world = classic();
        let outcome = run(&mut world, &[Action::TurnLeft, Action::Shoot]);
        assert!(outcome.percept.scream);
        assert_eq!(outcome.score_delta, -11);
        assert!(!world.wumpus_alive());

        // The dead Wumpus still smells but no longer kills.
        let outcome = run(&mut world, &[Action::MoveForward, Action::MoveForward]);
        assert_eq!(world.agent_cell(), Cell::new(1, 3));
        assert_eq!(outcome.terminal, Terminal::None);
        assert!(outcome.percept.stench);
        assert!(outcome.percept.scream);
    }

    #[test]
    fn pit_under_a_dead_wumpus_still_kills() {
        let mut layout = WorldLayout::classic();
        layout.pits.insert(Cell::new(1, 3));
        let mut world = WumpusWorld::new(layout, ScoringConfig::default()).unwrap();

        let outcome = run(&mut world, &[Action::TurnLeft, Action::MoveForward]);
        assert!(outcome.percept.breeze);
        assert!(outcome.percept.stench);

        run(&mut world, &[Action::Shoot]);
        assert!(!world.wumpus_alive());
        let outcome = world.apply(Action::MoveForward).unwrap();
        assert_eq!(outcome.terminal, Terminal::Died);
    }

    #[test]
    fn arrow_out_of_line_misses() {
        let mut world = classic();
        let outcome = world.apply(Action::Shoot).unwrap();
        assert!(!outcome.percept.scream);
        assert!(world.wumpus_alive());
        // No arrow left: costs a turn, nothing else.
        let outcome = run(&mut world, &[Action::TurnLeft, Action::Shoot]);
        assert_eq!(outcome.score_delta, -1);
        assert!(world.wumpus_alive());
    }

    #[test]
    fn gold_run_scores_the_bonuses() {
        let mut world = classic();
        run(
            &mut world,
            &[
                Action::MoveForward,
                Action::TurnLeft,
                Action::MoveForward,
                Action::MoveForward,
            ],
        );
        let outcome = world.apply(Action::Grab).unwrap();
        assert_eq!(outcome.score_delta, 99);
        assert!(world.has_gold());
        assert!(!world.percept().glitter);

        let outcome = run(
            &mut world,
            &[
                Action::TurnLeft,
                Action::TurnLeft,
                Action::MoveForward,
                Action::MoveForward,
                Action::TurnRight,
                Action::MoveForward,
                Action::Climb,
            ],
        );
        assert_eq!(outcome.terminal, Terminal::ClimbedOut);
        assert_eq!(outcome.score_delta, 999);
        // 12 actions, +100 pickup, +1000 exit
        assert_eq!(world.score(), 1088);
    }

    #[test]
    fn climbing_away_from_entrance_does_nothing() {
        let mut world = classic();
        let outcome = run(&mut world, &[Action::TurnLeft, Action::MoveForward, Action::Climb]);
        assert_eq!(outcome.terminal, Terminal::None);
        assert_eq!(world.agent_cell(), Cell::new(1, 2));
    }

    #[test]
    fn invalid_layout_is_rejected() {
        let mut layout = WorldLayout::classic();
        layout.pits.insert(Cell::START);
        assert!(WumpusWorld::new(layout, ScoringConfig::default()).is_err());
    }
}
