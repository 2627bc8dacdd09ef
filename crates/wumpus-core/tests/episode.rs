//! End-to-end episodes: the real agent in the simulated cave.

#![allow(clippy::unwrap_used)]

use wumpus_agents::Agent;
use wumpus_core::{EndReason, NoOpCallback, TurnCallback, TurnRecord, run_episode};
use wumpus_types::{Action, Cell, GridBounds, ScoringConfig};
use wumpus_world::{WorldLayout, WumpusWorld};

struct Recorder {
    turns: Vec<TurnRecord>,
}

impl TurnCallback for Recorder {
    fn on_turn(&mut self, record: &TurnRecord) {
        self.turns.push(*record);
    }
}

fn play(layout: WorldLayout, max_steps: u64) -> (wumpus_core::EpisodeResult, Vec<TurnRecord>) {
    let bounds = layout.bounds;
    let mut world = WumpusWorld::new(layout, ScoringConfig::default()).unwrap();
    let mut agent = Agent::new(bounds, ScoringConfig::default());
    let mut recorder = Recorder { turns: Vec::new() };
    let result = run_episode(&mut world, &mut agent, max_steps, &mut recorder).unwrap();
    (result, recorder.turns)
}

#[test]
fn classic_cave_is_solved() {
    let (result, turns) = play(WorldLayout::classic(), 200);

    assert_eq!(result.end_reason, EndReason::ClimbedOutWithGold);
    assert!(result.has_gold);
    assert_eq!(result.score, result.world_score);
    assert!(result.score > 1000);

    let grab = turns.iter().find(|t| t.action == Action::Grab).unwrap();
    assert_eq!(grab.cell, Cell::new(2, 3));
    let last = turns.last().unwrap();
    assert_eq!(last.action, Action::Climb);
    assert_eq!(last.cell, Cell::START);
}

#[test]
fn classic_cave_never_enters_a_hazard() {
    let layout = WorldLayout::classic();
    let (_, turns) = play(layout.clone(), 200);
    for turn in &turns {
        assert!(!layout.is_pit(turn.cell));
        assert_ne!(turn.cell, layout.wumpus);
    }
}

#[test]
fn seeded_random_caves_never_kill_the_agent() {
    for seed in 0..300 {
        let layout = WorldLayout::random(GridBounds::default(), 0.2, seed).unwrap();
        let (result, _) = play(layout, 500);
        assert_ne!(result.end_reason, EndReason::Died, "seed {seed}");
        assert_ne!(result.end_reason, EndReason::MaxStepsReached, "seed {seed}");
        assert_eq!(result.score, result.world_score, "seed {seed}");
    }
}

#[test]
fn larger_caves_are_played_safely() {
    for seed in 0..50 {
        let layout = WorldLayout::random(GridBounds::new(6, 5), 0.15, seed).unwrap();
        let (result, _) = play(layout, 1000);
        assert_ne!(result.end_reason, EndReason::Died, "seed {seed}");
    }
}

#[test]
fn episodes_are_deterministic() {
    for seed in [1, 7, 42] {
        let layout = WorldLayout::random(GridBounds::default(), 0.2, seed).unwrap();
        let (first, first_turns) = play(layout.clone(), 200);
        let (second, second_turns) = play(layout, 200);
        assert_eq!(first, second);
        assert_eq!(first_turns, second_turns);
    }
}

#[test]
fn no_op_callback_runs_silently() {
    let mut world = WumpusWorld::new(WorldLayout::classic(), ScoringConfig::default()).unwrap();
    let mut agent = Agent::new(GridBounds::default(), ScoringConfig::default());
    let result = run_episode(&mut world, &mut agent, 200, &mut NoOpCallback).unwrap();
    assert_eq!(result.end_reason, EndReason::ClimbedOutWithGold);
}
