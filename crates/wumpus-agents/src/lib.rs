//! Knowledge-based agent for the Wumpus World.
//!
//! The agent never sees the cave layout. It reasons only from the percepts
//! the world hands it, and never enters a room it cannot prove safe.
//!
//! # Modules
//!
//! - [`knowledge`] -- Percept store and constraint propagation
//!   ([`KnowledgeBase`])
//! - [`route`] -- Shortest routes through proven-safe rooms
//! - [`agent`] -- The decision policy and the agent's own bookkeeping
//!   ([`Agent`])
//! - [`error`] -- Error types for knowledge and action failures

pub mod agent;
pub mod error;
pub mod knowledge;
pub mod route;

pub use agent::{Agent, AgentPhase, AgentState, Decision, Rule};
pub use error::{AgentError, KnowledgeError};
pub use knowledge::{CellFacts, Hazard, KnowledgeBase};
