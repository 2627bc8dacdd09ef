//! The simulated Wumpus World cave.
//!
//! This crate is the ground truth the agent acts in: hazard placement,
//! percept generation, move legality and the score.
//!
//! # Modules
//!
//! - [`layout`] -- [`WorldLayout`]: the classic demonstration cave or a
//!   seeded random one
//! - [`world`] -- [`WumpusWorld`]: percepts and action effects
//! - [`error`] -- Error types for invalid layouts and finished runs

pub mod error;
pub mod layout;
pub mod world;

pub use error::WorldError;
pub use layout::WorldLayout;
pub use world::WumpusWorld;
