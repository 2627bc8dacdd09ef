//! Shared type definitions for the Wumpus World agent.
//!
//! This crate is the single source of truth for the value types exchanged
//! between the knowledge-based agent, the world simulator, and the runner.
//!
//! # Modules
//!
//! - [`cell`] -- Coordinates ([`Cell`]), cave dimensions ([`GridBounds`]),
//!   and compass [`Direction`]s
//! - [`enums`] -- [`Action`], [`CellBelief`], and [`Terminal`]
//! - [`percept`] -- The five-channel [`PerceptSet`]
//! - [`actions`] -- [`StepOutcome`] returned by the world per action
//! - [`scoring`] -- The performance measure ([`ScoringConfig`])

pub mod actions;
pub mod cell;
pub mod enums;
pub mod percept;
pub mod scoring;

// Re-export all public types at crate root for convenience.
pub use actions::StepOutcome;
pub use cell::{Cell, Direction, GridBounds};
pub use enums::{Action, CellBelief, Terminal};
pub use percept::PerceptSet;
pub use scoring::ScoringConfig;

/// Arrows the agent carries into the cave.
pub const STARTING_ARROWS: u32 = 1;

/// The direction the agent faces on entering the cave.
pub const START_FACING: Direction = Direction::East;
