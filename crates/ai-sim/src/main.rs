//! Headless runner for melee, ranged and tower agents.
//!
//! - `ai-sim run` - step a scenario and print a summary
//! - `ai-sim path` - query the scenario's grid for a route

use std::path::{Path, PathBuf};

use ai_nav::Navigator;
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod arena;
mod config;
mod sim;
mod steerers;

use config::ScenarioConfig;
use sim::{parse_point, Simulation};

#[derive(Parser)]
#[command(name = "ai-sim")]
#[command(about = "Headless scenario runner for game agents", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario
    Run {
        /// Scenario file (YAML)
        #[arg(short, long)]
        scenario: PathBuf,

        /// Fixed steps to run, overriding the scenario
        #[arg(long)]
        ticks: Option<u64>,
    },

    /// Find a route on the scenario's grid
    Path {
        /// Scenario file (YAML)
        #[arg(short, long)]
        scenario: PathBuf,

        /// Start point as x,z
        #[arg(long, allow_hyphen_values = true)]
        from: String,

        /// Goal point as x,z
        #[arg(long, allow_hyphen_values = true)]
        to: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Run { scenario, ticks } => run_scenario(&scenario, ticks),
        Commands::Path { scenario, from, to } => find_path(&scenario, &from, &to),
    }
}

fn run_scenario(path: &Path, ticks: Option<u64>) -> Result<()> {
    let config = ScenarioConfig::load(path)?;
    tracing::info!(scenario = %path.display(), agents = config.agents.len(), "Loaded scenario");

    let mut sim = Simulation::from_config(&config)?;
    let summary = sim.run(ticks.unwrap_or(config.ticks))?;

    println!("Scenario: {}", path.display());
    println!("Ticks: {}", summary.ticks);
    println!(
        "Agents: {} alive, {} killed",
        summary.agents_alive, summary.agents_killed
    );
    println!("Steerers: {}", summary.steerers);
    println!(
        "Player: {} ({:.1} health)",
        if summary.player_alive { "alive" } else { "dead" },
        summary.player_health
    );
    println!(
        "Bullets: {} fired, {} hit",
        summary.bullets_fired, summary.bullets_hit
    );

    Ok(())
}

fn find_path(path: &Path, from: &str, to: &str) -> Result<()> {
    let config = ScenarioConfig::load(path)?;
    let sim = Simulation::from_config(&config)?;
    let start = parse_point(from)?;
    let goal = parse_point(to)?;

    let route = sim.navigator().find_path(start, goal);
    if route.is_empty() {
        println!("No route from {from} to {to}");
        return Ok(());
    }

    println!("Route: {} waypoints, cost {}", route.len(), route.cost);
    for point in &route.points {
        println!("  ({:.2}, {:.2})", point.x, point.z);
    }
    Ok(())
}
