//! Error types for the `wumpus` binary.

/// Top-level error for the `wumpus` binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: wumpus_core::ConfigError,
    },

    /// The cave could not be built.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: wumpus_world::WorldError,
    },

    /// The episode aborted.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: wumpus_core::RunnerError,
    },
}
