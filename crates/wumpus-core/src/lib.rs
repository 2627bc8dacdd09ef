//! Orchestration for the Wumpus World agent.
//!
//! # Modules
//!
//! - [`config`] -- YAML configuration with environment overrides
//! - [`environment`] -- The [`Environment`] trait the runner drives
//! - [`runner`] -- [`run_episode`]: the synchronous perceive/choose/apply loop

pub mod config;
pub mod environment;
pub mod runner;

pub use config::{ConfigError, LayoutKind, SimulationConfig};
pub use environment::{Environment, EnvironmentError};
pub use runner::{
    EndReason, EpisodeResult, NoOpCallback, RunnerError, TurnCallback, TurnRecord, run_episode,
};
