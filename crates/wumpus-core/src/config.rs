//! Configuration loading and typed config structures.
//!
//! The configuration lives in `wumpus-config.yaml`. Every field has a
//! default, so an empty file (or no file at all) yields a playable setup:
//! the classic 4x4 cave, the classic scoring, and a 200-step bound.

use std::path::Path;

use serde::Deserialize;
use wumpus_types::{GridBounds, ScoringConfig};
use wumpus_world::{WorldError, WorldLayout};

/// Environment variable overriding `world.seed`.
pub const SEED_VAR: &str = "WUMPUS_SEED";

/// Environment variable overriding `simulation.max_steps`.
pub const MAX_STEPS_VAR: &str = "WUMPUS_MAX_STEPS";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override could not be parsed.
    #[error("invalid value {value:?} for {var}")]
    InvalidOverride {
        /// The environment variable.
        var: &'static str,
        /// Its raw value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration, mirroring `wumpus-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Cave size and layout.
    #[serde(default)]
    pub world: WorldConfig,

    /// Performance measure.
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Episode bounds.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `WUMPUS_SEED` overrides `world.seed`
    /// - `WUMPUS_MAX_STEPS` overrides `simulation.max_steps`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidOverride`] for an unparsable override.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::parse_without_env(yaml)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string, ignoring the environment.
    ///
    /// An empty document yields the defaults.
    pub fn parse_without_env(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply `WUMPUS_SEED` and `WUMPUS_MAX_STEPS` from the process
    /// environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_from(|var| std::env::var(var).ok())
    }

    /// Apply overrides from any variable lookup.
    pub fn apply_overrides_from(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(seed) = parse_override(&lookup, SEED_VAR)? {
            self.world.seed = seed;
        }
        if let Some(max_steps) = parse_override(&lookup, MAX_STEPS_VAR)? {
            self.simulation.max_steps = max_steps;
        }
        Ok(())
    }
}

fn parse_override(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<u64>, ConfigError> {
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_parse| ConfigError::InvalidOverride { var, value })
}

/// Which cave to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// The fixed 4x4 demonstration cave. Width and height are ignored.
    #[default]
    Classic,
    /// A cave generated from `seed` and `pit_probability`.
    Random,
}

/// Cave configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldConfig {
    /// Number of columns.
    #[serde(default = "default_dimension")]
    pub width: u32,

    /// Number of rows.
    #[serde(default = "default_dimension")]
    pub height: u32,

    /// Classic or random layout.
    #[serde(default)]
    pub layout: LayoutKind,

    /// Seed for the random layout.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Chance of a pit in each eligible room of a random layout.
    #[serde(default = "default_pit_probability")]
    pub pit_probability: f64,
}

impl WorldConfig {
    /// The configured cave dimensions.
    pub const fn bounds(&self) -> GridBounds {
        GridBounds::new(self.width, self.height)
    }

    /// Build the configured layout.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] when random generation parameters are invalid.
    pub fn build_layout(&self) -> Result<WorldLayout, WorldError> {
        match self.layout {
            LayoutKind::Classic => Ok(WorldLayout::classic()),
            LayoutKind::Random => {
                WorldLayout::random(self.bounds(), self.pit_probability, self.seed)
            }
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: default_dimension(),
            height: default_dimension(),
            layout: LayoutKind::default(),
            seed: default_seed(),
            pit_probability: default_pit_probability(),
        }
    }
}

/// Episode bounds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Actions allowed before the episode is cut off.
    #[serde(default = "default_max_steps")]
    pub max_steps: u64,
}

impl Default for SimulationBoundsConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

const fn default_dimension() -> u32 {
    4
}

const fn default_seed() -> u64 {
    7
}

const fn default_pit_probability() -> f64 {
    0.2
}

const fn default_max_steps() -> u64 {
    200
}

fn default_log_level() -> String {
    "info".to_owned()
}
