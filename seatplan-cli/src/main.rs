//! Seatplan CLI - Command-line interface
//!
//! Commands:
//! - solve: Build and optimize a tournament schedule
//! - check: Load an existing schedule and print its statistics

mod check_cmd;
mod solve_cmd;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use seatplan_core::Configuration;

#[derive(Parser)]
#[command(name = "seatplan")]
#[command(about = "Tournament seating planner for 10-seat tables")]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Show optimizer progress
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and optimize a schedule
    Solve(solve_cmd::SolveArgs),
    /// Print statistics of an existing schedule
    Check(check_cmd::CheckArgs),
}

/// Tournament size, shared by all commands
#[derive(Args, Clone, Debug)]
pub struct TournamentArgs {
    /// Number of players
    pub players: usize,

    /// Number of rounds
    pub rounds: usize,

    /// Tables per round
    pub tables: usize,

    /// Total number of games (default: rounds * tables)
    pub games: Option<usize>,
}

impl TournamentArgs {
    /// Validate parameters and derive the games each player plays
    pub fn configuration(&self) -> Result<Configuration> {
        let games = self
            .games
            .unwrap_or_else(|| Configuration::default_games(self.rounds, self.tables));
        let config = Configuration::from_params(self.players, self.rounds, self.tables, games)?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Solve(args) => solve_cmd::run(args, cli.seed),
        Commands::Check(args) => check_cmd::run(args),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
