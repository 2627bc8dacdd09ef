//! Command-line runner for the Wumpus World agent.
//!
//! # Startup Sequence
//!
//! 1. Initialize bootstrap logging (tracing) at `info`
//! 2. Load configuration from the path given as the first argument, or
//!    `wumpus-config.yaml` in the working directory (defaults if absent)
//! 3. Install the global subscriber at the configured level (`RUST_LOG`
//!    wins over the config level)
//! 4. Build the classic or seeded random cave and print it
//! 5. Play one episode, printing every turn
//! 6. Print the outcome and the agent's final picture of the cave

mod error;
mod printer;

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wumpus_agents::Agent;
use wumpus_core::{SimulationConfig, run_episode};
use wumpus_world::WumpusWorld;

use crate::error::CliError;
use crate::printer::{TurnPrinter, format_outcome};

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG: &str = "wumpus-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the cave cannot be
/// built, or the episode aborts.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Bootstrap logging, scoped to configuration loading.
    let bootstrap = tracing_subscriber::fmt()
        .with_env_filter(log_filter("info"))
        .with_target(true)
        .finish();

    // 2. Load configuration.
    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from);
    let config = tracing::subscriber::with_default(bootstrap, || {
        info!("wumpus starting");
        load_config(&config_path)
    })?;

    // 3. Initialize structured logging at the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&config.logging.level))
        .with_target(true)
        .init();

    info!(
        layout = ?config.world.layout,
        seed = config.world.seed,
        max_steps = config.simulation.max_steps,
        "Configuration resolved"
    );

    run(&config)?;
    Ok(())
}

/// `RUST_LOG` if set, otherwise `default`.
fn log_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Load the configuration file, or the defaults when it does not exist.
fn load_config(path: &Path) -> Result<SimulationConfig, CliError> {
    if path.exists() {
        let config = SimulationConfig::from_file(path)?;
        info!(path = %path.display(), "Configuration loaded");
        Ok(config)
    } else {
        warn!(path = %path.display(), "Config file not found, using defaults");
        let mut config = SimulationConfig::default();
        config.apply_env_overrides()?;
        Ok(config)
    }
}

/// Build the cave and play one episode.
fn run(config: &SimulationConfig) -> Result<(), CliError> {
    let layout = config.world.build_layout()?;
    let bounds = layout.bounds;

    println!(
        "Wumpus World ({:?} layout, {}x{})",
        config.world.layout, bounds.width, bounds.height
    );
    print!("{}", layout.render());
    println!();

    let mut world = WumpusWorld::new(layout, config.scoring)?;
    let mut agent = Agent::new(bounds, config.scoring);
    let mut printer = TurnPrinter::new(std::io::stdout());

    let result = run_episode(
        &mut world,
        &mut agent,
        config.simulation.max_steps,
        &mut printer,
    )?;

    println!();
    println!("{}", format_outcome(&result));
    println!("Agent's view of the cave:");
    print!("{}", agent.knowledge().render(Some(agent.state().cell)));
    Ok(())
}
